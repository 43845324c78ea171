//! The `validate` command.
//!
//! Submits a JSON file of values to a schema and prints either the submitted
//! data or one line per failing field. Exits non-zero when the form is
//! rejected.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use formkit_core::{FormError, FormResult, Settings};
use formkit_forms::{check_value_types, CompiledSchema, FieldValue, FormEngine, SubmitOutcome};

use super::{read_values, resolve_schema};
use crate::command::{CommandOutcome, ManagementCommand};

/// Validates a values file against a schema.
pub struct ValidateCommand;

#[async_trait]
impl ManagementCommand for ValidateCommand {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn help(&self) -> &'static str {
        "Validates a JSON values file against a schema"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("schema")
                .required(true)
                .help("Registry key or path to a .json/.toml schema"),
        )
        .arg(
            clap::Arg::new("data")
                .required(true)
                .help("Path to a JSON object of field values"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> FormResult<CommandOutcome> {
        let schema_arg = required_arg(matches, "schema")?;
        let data_arg = required_arg(matches, "data")?;

        let schema = resolve_schema(schema_arg, settings)?;
        let values = read_values(data_arg)?;
        let (outcome, report) = validate_values(schema, values);
        println!("{report}");
        Ok(outcome)
    }
}

/// Submits `values` to a fresh engine for `schema`.
///
/// Returns the outcome with a printable report: the submitted data as pretty
/// JSON, or `name: message` lines in schema order. Values of the wrong shape
/// for their field fail before any rule runs.
pub fn validate_values(
    schema: Arc<CompiledSchema>,
    values: HashMap<String, FieldValue>,
) -> (CommandOutcome, String) {
    let values = match check_value_types(&schema, values) {
        Ok(values) => values,
        Err(errors) => return (CommandOutcome::Failure, error_report(&schema, &errors)),
    };

    let mut engine = FormEngine::new(Arc::clone(&schema));
    engine.set_values(values);

    match engine.submit() {
        SubmitOutcome::Submitted(_) => (CommandOutcome::Success, engine.values_json()),
        SubmitOutcome::Rejected(errors) => (CommandOutcome::Failure, error_report(&schema, &errors)),
    }
}

/// Formats an error map as `name: message` lines in schema order.
pub(crate) fn error_report(schema: &CompiledSchema, errors: &HashMap<String, String>) -> String {
    schema
        .fields()
        .iter()
        .filter_map(|field| {
            errors
                .get(field.name())
                .map(|message| format!("{}: {message}", field.name()))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn required_arg<'a>(matches: &'a clap::ArgMatches, name: &str) -> FormResult<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| FormError::ConfigurationError(format!("Missing argument: {name}")))
}
