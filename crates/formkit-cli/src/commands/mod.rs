//! Built-in commands.
//!
//! Each command implements [`ManagementCommand`](crate::command::ManagementCommand).
//! The helpers here resolve the `<schema>` argument shared by `validate` and
//! `render`, and read value files.

pub mod render;
pub mod runserver;
pub mod schemas;
pub mod validate;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use formkit_core::{FormError, FormResult, Settings};
use formkit_forms::{CompiledSchema, FieldValue, FormSchema, SchemaRegistry};

pub use render::RenderCommand;
pub use runserver::RunserverCommand;
pub use schemas::SchemasCommand;
pub use validate::ValidateCommand;

use crate::command::CommandRegistry;

/// Registers all built-in commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(RunserverCommand));
    registry.register(Box::new(ValidateCommand));
    registry.register(Box::new(RenderCommand));
    registry.register(Box::new(SchemasCommand));
}

/// Resolves a `<schema>` argument.
///
/// A path to an existing `.json` or `.toml` file is loaded directly; anything
/// else is looked up as a key in the registry built from `settings`.
pub fn resolve_schema(arg: &str, settings: &Settings) -> FormResult<Arc<CompiledSchema>> {
    let path = Path::new(arg);
    let is_schema_file = path.is_file()
        && matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("json" | "toml")
        );
    if is_schema_file {
        tracing::debug!(path = %path.display(), "loading schema file");
        return Ok(Arc::new(FormSchema::from_file(path)?.compile()?));
    }
    SchemaRegistry::from_settings(settings)?.get(arg)
}

/// Reads a JSON object of field values.
pub fn read_values(path: impl AsRef<Path>) -> FormResult<HashMap<String, FieldValue>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let values: HashMap<String, FieldValue> = serde_json::from_str(&text).map_err(|e| {
        FormError::ConfigurationError(format!("Invalid values in {}: {e}", path.display()))
    })?;
    Ok(values
        .into_iter()
        .map(|(name, value)| (name, value.normalized()))
        .collect())
}
