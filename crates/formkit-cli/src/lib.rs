//! # formkit-cli
//!
//! The `formkit` command-line tool.
//!
//! - **Command framework** - [`ManagementCommand`] and [`CommandRegistry`]
//! - **Built-in commands** - `runserver`, `validate`, `render`, and `schemas`
//!
//! ```rust
//! use formkit_cli::command::CommandRegistry;
//! use formkit_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! let names = registry.list_commands();
//! assert_eq!(names, vec!["render", "runserver", "schemas", "validate"]);
//! ```

// These clippy lints are intentionally allowed:
// - result_large_err: FormError is the workspace-wide error type
// - unused_async: command handlers keep one async signature
#![allow(clippy::result_large_err)]
#![allow(clippy::unused_async)]

pub mod command;
pub mod commands;

pub use command::{CommandOutcome, CommandRegistry, ManagementCommand};
