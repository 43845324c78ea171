//! Settings loading from configuration files.
//!
//! This module provides functions to load [`Settings`] from TOML files, JSON
//! files, and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `FORMKIT_DEBUG` | `debug` |
//! | `FORMKIT_LOG_LEVEL` | `log_level` |
//! | `FORMKIT_LOG_FORMAT` | `log_format` (`pretty`, `compact` or `json`) |
//! | `FORMKIT_HOST` | `host` |
//! | `FORMKIT_PORT` | `port` |
//! | `FORMKIT_SCHEMA_DIRS` | `schema_dirs` (comma-separated) |
//! | `FORMKIT_DEFAULT_SCHEMA` | `default_schema` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use formkit_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("formkit.toml").unwrap();
//! let settings = settings_loader::from_file_with_env("formkit.json").unwrap();
//! ```

use std::path::{Path, PathBuf};

use crate::error::FormError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, FormError> {
    // Merge through serde_json so that missing keys fall back to defaults.
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| FormError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, FormError> {
    let content = read_config(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, FormError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| FormError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, FormError> {
    let content = read_config(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from a `.toml` or `.json` file, chosen by extension, and then
/// applies environment variable overrides.
pub fn from_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormError> {
    let path = path.as_ref();
    let mut settings = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => from_toml_file(path)?,
        Some("json") => from_json_file(path)?,
        _ => {
            return Err(FormError::ConfigurationError(format!(
                "Unsupported settings file '{}': expected .toml or .json",
                path.display()
            )))
        }
    };
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `FORMKIT_*` environment variable overrides to a settings struct.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides(settings, |key| std::env::var(key).ok());
}

/// Applies overrides from an arbitrary variable source.
///
/// Split out of [`apply_env_overrides`] so the mapping can be tested without
/// touching the process environment.
fn apply_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(val) = var("FORMKIT_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Some(val) = var("FORMKIT_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Some(val) = var("FORMKIT_LOG_FORMAT") {
        match val.parse() {
            Ok(format) => settings.log_format = Some(format),
            Err(e) => tracing::warn!(value = %val, error = %e, "ignoring invalid FORMKIT_LOG_FORMAT"),
        }
    }

    if let Some(val) = var("FORMKIT_HOST") {
        settings.host = val;
    }

    if let Some(val) = var("FORMKIT_PORT") {
        match val.parse::<u16>() {
            Ok(port) => settings.port = port,
            Err(_) => tracing::warn!(value = %val, "ignoring invalid FORMKIT_PORT"),
        }
    }

    if let Some(val) = var("FORMKIT_SCHEMA_DIRS") {
        settings.schema_dirs = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();
    }

    if let Some(val) = var("FORMKIT_DEFAULT_SCHEMA") {
        settings.default_schema = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config(path: &Path, kind: &str) -> Result<String, FormError> {
    std::fs::read_to_string(path).map_err(|e| {
        FormError::ConfigurationError(format!(
            "Failed to read {kind} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(value: serde_json::Value, kind: &str) -> Result<Settings, FormError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        FormError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        FormError::ConfigurationError(format!("Failed to deserialize settings from {kind}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = false
            port = 9000
            default_schema = "job"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.default_schema, "job");
        // Defaults preserved
        assert_eq!(settings.host, "127.0.0.1");
        assert!(settings.builtin_schemas);
    }

    #[test]
    fn test_from_toml_str_schema_dirs() {
        let toml = r#"
            schema_dirs = ["schemas", "more/schemas"]
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(
            settings.schema_dirs,
            vec![PathBuf::from("schemas"), PathBuf::from("more/schemas")]
        );
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert!(settings.debug);
        assert_eq!(settings.default_schema, "registration");
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("[[invalid toml content");
        assert!(matches!(result, Err(FormError::ConfigurationError(_))));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str(r#"port = "eighty""#);
        assert!(result.is_err());
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{
            "debug": false,
            "log_level": "debug",
            "site_title": "Forms"
        }"#;

        let settings = from_json_str(json).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.site_title, "Forms");
        assert_eq!(settings.port, 8000);
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{invalid json").is_err());
    }

    // ── File loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formkit.toml");
        std::fs::write(&path, "port = 8123\nbuiltin_schemas = false\n").unwrap();

        let settings = from_toml_file(&path).unwrap();
        assert_eq!(settings.port, 8123);
        assert!(!settings.builtin_schemas);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formkit.json");
        std::fs::write(&path, r#"{"host": "0.0.0.0"}"#).unwrap();

        let settings = from_json_file(&path).unwrap();
        assert_eq!(settings.host, "0.0.0.0");
    }

    #[test]
    fn test_from_file_missing() {
        let result = from_toml_file("/nonexistent/formkit.toml");
        assert!(matches!(result, Err(FormError::ConfigurationError(_))));
    }

    #[test]
    fn test_from_file_with_env_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formkit.yaml");
        std::fs::write(&path, "debug: false").unwrap();

        let result = from_file_with_env(&path);
        assert!(matches!(result, Err(FormError::ConfigurationError(_))));
    }

    // ── Overrides ───────────────────────────────────────────────────

    #[test]
    fn test_apply_overrides() {
        let vars: HashMap<&str, &str> = [
            ("FORMKIT_DEBUG", "false"),
            ("FORMKIT_LOG_LEVEL", "warn"),
            ("FORMKIT_LOG_FORMAT", "compact"),
            ("FORMKIT_HOST", "0.0.0.0"),
            ("FORMKIT_PORT", "8080"),
            ("FORMKIT_SCHEMA_DIRS", "a, b,,c"),
            ("FORMKIT_DEFAULT_SCHEMA", "job"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        apply_overrides(&mut settings, |k| vars.get(k).map(|v| (*v).to_string()));

        assert!(!settings.debug);
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.log_format, Some(crate::settings::LogFormat::Compact));
        assert_eq!(settings.bind_address(), "0.0.0.0:8080");
        assert_eq!(
            settings.schema_dirs,
            vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")]
        );
        assert_eq!(settings.default_schema, "job");
    }

    #[test]
    fn test_apply_overrides_invalid_port_is_ignored() {
        let mut settings = Settings::default();
        apply_overrides(&mut settings, |k| {
            (k == "FORMKIT_PORT").then(|| "not-a-port".to_string())
        });
        assert_eq!(settings.port, 8000);
    }

    #[test]
    fn test_apply_overrides_none_set() {
        let mut settings = Settings::default();
        apply_overrides(&mut settings, |_| None);
        assert_eq!(settings.bind_address(), Settings::default().bind_address());
    }

    // ── Merge helper ────────────────────────────────────────────────

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"a": 1, "nested": {"x": 1, "y": 2}});
        let over = serde_json::json!({"nested": {"y": 3}, "b": 2});
        let merged = merge_json(base, over);
        assert_eq!(
            merged,
            serde_json::json!({"a": 1, "b": 2, "nested": {"x": 1, "y": 3}})
        );
    }
}
