//! The `render` command: prints the HTML of a form.

use std::sync::Arc;

use async_trait::async_trait;
use formkit_core::{FormError, FormResult, Settings};
use formkit_forms::{check_value_types, FormEngine};

use super::validate::{error_report, required_arg};
use super::{read_values, resolve_schema};
use crate::command::{CommandOutcome, ManagementCommand};

/// Renders a schema as an HTML form.
///
/// With `--data`, the values are filled in and the form is submitted first,
/// so the output shows either the errors or the success block.
pub struct RenderCommand;

#[async_trait]
impl ManagementCommand for RenderCommand {
    fn name(&self) -> &'static str {
        "render"
    }

    fn help(&self) -> &'static str {
        "Prints the HTML form for a schema"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("schema")
                .required(true)
                .help("Registry key or path to a .json/.toml schema"),
        )
        .arg(
            clap::Arg::new("data")
                .long("data")
                .help("JSON values to fill in and submit"),
        )
        .arg(
            clap::Arg::new("action")
                .long("action")
                .default_value("")
                .help("Form action URL"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> FormResult<CommandOutcome> {
        let schema = resolve_schema(required_arg(matches, "schema")?, settings)?;
        let mut engine = FormEngine::new(Arc::clone(&schema));

        if let Some(data) = matches.get_one::<String>("data") {
            let values = check_value_types(&schema, read_values(data)?).map_err(|errors| {
                FormError::ConfigurationError(format!(
                    "Invalid values in {data}:\n{}",
                    error_report(&schema, &errors)
                ))
            })?;
            engine.set_values(values);
            engine.submit();
        }

        let action = matches.get_one::<String>("action").map_or("", String::as_str);
        println!("{}", engine.render_html(action));
        Ok(CommandOutcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_render_by_key() {
        let cmd = RenderCommand;
        let matches = cmd
            .add_arguments(clap::Command::new("render"))
            .try_get_matches_from(["render", "registration"])
            .unwrap();
        let outcome = cmd.handle(&matches, &Settings::default()).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Success);
    }

    #[tokio::test]
    async fn test_render_rejects_wrong_types() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.json");
        std::fs::write(&data, r#"{"hobbies": "Reading"}"#).unwrap();

        let cmd = RenderCommand;
        let matches = cmd
            .add_arguments(clap::Command::new("render"))
            .try_get_matches_from(["render", "registration", "--data", data.to_str().unwrap()])
            .unwrap();
        match cmd.handle(&matches, &Settings::default()).await {
            Err(FormError::ConfigurationError(message)) => {
                assert!(message.contains("hobbies: Hobbies must be a list of options"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_render_unknown_schema() {
        let cmd = RenderCommand;
        let matches = cmd
            .add_arguments(clap::Command::new("render"))
            .try_get_matches_from(["render", "nope"])
            .unwrap();
        assert!(cmd.handle(&matches, &Settings::default()).await.is_err());
    }
}
