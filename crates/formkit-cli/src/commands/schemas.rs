//! The `schemas` command: lists the registered schemas.

use async_trait::async_trait;
use formkit_core::{FormResult, Settings};
use formkit_forms::SchemaRegistry;

use crate::command::{CommandOutcome, ManagementCommand};

/// Lists every schema the registry would serve.
pub struct SchemasCommand;

#[async_trait]
impl ManagementCommand for SchemasCommand {
    fn name(&self) -> &'static str {
        "schemas"
    }

    fn help(&self) -> &'static str {
        "Lists the registered schemas"
    }

    async fn handle(
        &self,
        _matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> FormResult<CommandOutcome> {
        let registry = SchemaRegistry::from_settings(settings)?;
        println!("{}", list_schemas(&registry, &settings.default_schema));
        Ok(CommandOutcome::Success)
    }
}

/// One line per schema: key, title and field count. The default is starred.
pub fn list_schemas(registry: &SchemaRegistry, default_key: &str) -> String {
    let width = registry.keys().iter().map(|k| k.len()).max().unwrap_or(0);
    registry
        .iter()
        .map(|(key, schema)| {
            let marker = if key == default_key { '*' } else { ' ' };
            format!(
                "{marker} {key:<width$}  {} ({} fields)",
                schema.title(),
                schema.fields().len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
