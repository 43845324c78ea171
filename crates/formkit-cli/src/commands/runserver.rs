//! The `runserver` command.
//!
//! Serves every registered schema over HTTP. `--host` and `--port` override
//! the configured bind address.

use async_trait::async_trait;
use formkit_core::{FormError, FormResult, Settings};
use formkit_server::FormApp;

use crate::command::{CommandOutcome, ManagementCommand};

/// Starts the form server.
pub struct RunserverCommand;

#[async_trait]
impl ManagementCommand for RunserverCommand {
    fn name(&self) -> &'static str {
        "runserver"
    }

    fn help(&self) -> &'static str {
        "Starts the form server"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("host")
                .long("host")
                .help("Host to bind to (default: settings host)"),
        )
        .arg(
            clap::Arg::new("port")
                .long("port")
                .help("Port to bind to (default: settings port)"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> FormResult<CommandOutcome> {
        let settings = server_settings(matches, settings)?;
        let addr = settings.bind_address();
        tracing::info!(debug = settings.debug, "Starting form server at http://{addr}/");

        FormApp::from_settings(settings)?.run(&addr).await?;
        Ok(CommandOutcome::Success)
    }
}

/// Applies `--host` and `--port` on top of `settings`.
fn server_settings(matches: &clap::ArgMatches, settings: &Settings) -> FormResult<Settings> {
    let mut settings = settings.clone();
    if let Some(host) = matches.get_one::<String>("host") {
        settings.host.clone_from(host);
    }
    if let Some(port) = matches.get_one::<String>("port") {
        settings.port = port
            .parse()
            .map_err(|_| FormError::ConfigurationError(format!("Invalid port: {port}")))?;
    }
    Ok(settings)
}
