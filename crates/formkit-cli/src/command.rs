//! Command framework for the `formkit` tool.
//!
//! Every subcommand implements [`ManagementCommand`]; a [`CommandRegistry`]
//! collects them, builds the clap parser, and dispatches parsed arguments.
//!
//! ## Defining a Command
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use formkit_cli::command::{CommandOutcome, ManagementCommand};
//! use formkit_core::{FormResult, Settings};
//!
//! struct HelloCommand;
//!
//! #[async_trait]
//! impl ManagementCommand for HelloCommand {
//!     fn name(&self) -> &'static str { "hello" }
//!     fn help(&self) -> &'static str { "Say hello" }
//!
//!     async fn handle(
//!         &self,
//!         _matches: &clap::ArgMatches,
//!         _settings: &Settings,
//!     ) -> FormResult<CommandOutcome> {
//!         println!("Hello from formkit!");
//!         Ok(CommandOutcome::Success)
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use async_trait::async_trait;
use formkit_core::{FormError, FormResult, Settings};

/// How a command finished, when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Exit status 0.
    Success,
    /// Exit status 1: the command ran but its check did not pass.
    Failure,
}

impl From<CommandOutcome> for ExitCode {
    fn from(outcome: CommandOutcome) -> Self {
        match outcome {
            CommandOutcome::Success => Self::SUCCESS,
            CommandOutcome::Failure => Self::FAILURE,
        }
    }
}

/// A subcommand of the `formkit` tool.
#[async_trait]
pub trait ManagementCommand: Send + Sync {
    /// The name used to invoke this command.
    fn name(&self) -> &'static str;

    /// A short help description.
    fn help(&self) -> &'static str;

    /// Adds arguments to the clap command. The default adds none.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Runs the command.
    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> FormResult<CommandOutcome>;
}

/// A registry of commands, keyed by name.
pub struct CommandRegistry {
    commands: HashMap<&'static str, Box<dyn ManagementCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a command, replacing any command with the same name.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        self.commands.insert(command.name(), command);
    }

    /// Returns the command with the given name, if registered.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns the sorted names of all registered commands.
    pub fn list_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level clap `Command` with every registered subcommand.
    ///
    /// The global `--settings <file>` option names a TOML or JSON settings file.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("formkit")
            .about("Schema-driven forms: serve, validate, and render")
            .subcommand_required(true)
            .arg(
                clap::Arg::new("settings")
                    .long("settings")
                    .global(true)
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Path to a TOML or JSON settings file"),
            );

        for name in self.list_commands() {
            if let Some(cmd) = self.get(name) {
                let subcmd = clap::Command::new(cmd.name()).about(cmd.help());
                app = app.subcommand(cmd.add_arguments(subcmd));
            }
        }

        app
    }

    /// Dispatches parsed arguments to the selected command.
    pub async fn execute(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> FormResult<CommandOutcome> {
        let (name, sub_matches) = matches.subcommand().ok_or_else(|| {
            FormError::ConfigurationError("No subcommand specified".to_string())
        })?;

        let cmd = self
            .get(name)
            .ok_or_else(|| FormError::ConfigurationError(format!("Unknown command: {name}")))?;

        tracing::debug!(command = name, "running command");
        cmd.handle(sub_matches, settings).await
    }
}
