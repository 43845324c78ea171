//! The `formkit` binary.

use std::path::PathBuf;
use std::process::ExitCode;

use formkit_cli::command::CommandRegistry;
use formkit_cli::commands::register_builtin_commands;
use formkit_core::logging::setup_logging;
use formkit_core::settings_loader;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let mut registry = CommandRegistry::new();
    register_builtin_commands(&mut registry);

    let matches = registry.build_cli().get_matches();

    let settings = match matches.get_one::<PathBuf>("settings") {
        Some(path) => settings_loader::from_file_with_env(path)?,
        None => settings_loader::from_env(),
    };
    setup_logging(&settings);

    let outcome = registry.execute(&matches, &settings).await?;
    Ok(outcome.into())
}
