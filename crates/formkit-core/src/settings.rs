//! Settings for formkit.
//!
//! This module provides the [`Settings`] struct, which holds the runtime
//! configuration of the form host: where to listen, where to find schema
//! files, which schema the picker shows first, and how to log.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The complete set of formkit settings.
///
/// # Examples
///
/// ```
/// use formkit_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.default_schema, "registration");
/// assert_eq!(settings.bind_address(), "127.0.0.1:8000");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,
    /// Heading shown on the schema picker page.
    pub site_title: String,

    // ── Server ───────────────────────────────────────────────────────

    /// Interface the HTTP host binds to.
    pub host: String,
    /// Port the HTTP host binds to.
    pub port: u16,

    // ── Schemas ──────────────────────────────────────────────────────

    /// Directories scanned for `*.json` and `*.toml` schema files.
    pub schema_dirs: Vec<PathBuf>,
    /// Whether the built-in example schemas are registered.
    pub builtin_schemas: bool,
    /// Registry key of the schema selected when the picker first loads.
    pub default_schema: String,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level (e.g. "info", "debug", "warn").
    ///
    /// A bare level applies to the formkit crates and request tracing only;
    /// a full filter directive such as `"warn,formkit_forms=trace"` is used
    /// as is.
    pub log_level: String,
    /// Output format of log lines. Unset means pretty in debug mode and JSON
    /// otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_format: Option<LogFormat>,
}

/// How log lines are written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human-readable, with source locations.
    Pretty,
    /// One line per event.
    Compact,
    /// One JSON object per event.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            site_title: "Dynamic Form Demo".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            schema_dirs: Vec::new(),
            builtin_schemas: true,
            default_schema: "registration".to_string(),
            log_level: "info".to_string(),
            log_format: None,
        }
    }
}

impl Settings {
    /// Returns the `host:port` address the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the log format in effect, resolving an unset format from `debug`.
    pub fn effective_log_format(&self) -> LogFormat {
        self.log_format.unwrap_or(if self.debug {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        })
    }
}
