//! Schema registry and form host.
//!
//! [`SchemaRegistry`] holds compiled schemas under string keys, in
//! registration order. [`FormHost`] is the schema picker: it keeps one
//! [`FormEngine`] and points it at whichever schema is selected, so switching
//! schemas always starts from an empty form.

use std::path::Path;
use std::sync::Arc;

use formkit_core::{FormError, FormResult, Settings};

use crate::engine::FormEngine;
use crate::schema::{CompiledSchema, FormSchema};
use crate::schemas;

/// Compiled schemas keyed by name.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entries: Vec<(String, Arc<CompiledSchema>)>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in example schemas.
    pub fn builtin() -> FormResult<Self> {
        let mut registry = Self::new();
        for (key, schema) in schemas::builtin() {
            registry.register(key, &schema)?;
        }
        Ok(registry)
    }

    /// Builds the registry described by `settings`: the built-ins (if enabled)
    /// followed by every schema file in `schema_dirs`.
    pub fn from_settings(settings: &Settings) -> FormResult<Self> {
        let mut registry = if settings.builtin_schemas {
            Self::builtin()?
        } else {
            Self::new()
        };
        for dir in &settings.schema_dirs {
            registry.load_dir(dir)?;
        }
        Ok(registry)
    }

    /// Compiles and registers `schema` under `key`.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        schema: &FormSchema,
    ) -> FormResult<Arc<CompiledSchema>> {
        let key = key.into();
        if self.contains(&key) {
            return Err(FormError::DuplicateSchema(key));
        }
        let compiled = Arc::new(schema.compile()?);
        tracing::debug!(key = %key, title = %compiled.title(), "registered schema");
        self.entries.push((key, Arc::clone(&compiled)));
        Ok(compiled)
    }

    /// Registers every `*.json` and `*.toml` file in `dir`, keyed by file stem.
    ///
    /// Files are loaded in name order. Returns how many schemas were added.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> FormResult<usize> {
        let dir = dir.as_ref();
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && matches!(
                        path.extension().and_then(|e| e.to_str()),
                        Some("json" | "toml")
                    )
            })
            .collect();
        paths.sort();

        let mut added = 0;
        for path in paths {
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let schema = FormSchema::from_file(&path)?;
            self.register(key, &schema)?;
            added += 1;
        }
        tracing::info!(dir = %dir.display(), added, "loaded schema directory");
        Ok(added)
    }

    /// Returns the schema registered under `key`.
    pub fn get(&self, key: &str) -> FormResult<Arc<CompiledSchema>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, schema)| Arc::clone(schema))
            .ok_or_else(|| FormError::UnknownSchema(key.to_string()))
    }

    /// Returns `true` if a schema is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// All keys, in registration order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Iterates over `(key, schema)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<CompiledSchema>)> {
        self.entries.iter().map(|(k, s)| (k.as_str(), s))
    }

    /// Returns the number of registered schemas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no schemas are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A schema picker driving one form engine.
#[derive(Debug)]
pub struct FormHost {
    registry: Arc<SchemaRegistry>,
    selected: String,
    engine: FormEngine,
}

impl FormHost {
    /// Creates a host showing the schema registered under `key`.
    pub fn new(registry: Arc<SchemaRegistry>, key: &str) -> FormResult<Self> {
        let schema = registry.get(key)?;
        Ok(Self {
            registry,
            selected: key.to_string(),
            engine: FormEngine::new(schema),
        })
    }

    /// Selects the schema registered under `key`.
    ///
    /// Selecting a different key starts a fresh form; selecting the current
    /// key keeps the form as it is. An unknown key is an error and leaves the
    /// current selection in place.
    pub fn select(&mut self, key: &str) -> FormResult<()> {
        if key == self.selected {
            return Ok(());
        }
        let schema = self.registry.get(key)?;
        self.engine.set_schema(schema);
        // Different keys always mean a fresh form, even if they share a schema.
        self.engine.reset();
        self.selected = key.to_string();
        Ok(())
    }

    /// The selected key.
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// The registry the host picks from.
    pub const fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    /// The engine of the selected form.
    pub const fn engine(&self) -> &FormEngine {
        &self.engine
    }

    /// Mutable access to the engine of the selected form.
    pub fn engine_mut(&mut self) -> &mut FormEngine {
        &mut self.engine
    }
}
