//! Core error types for formkit.
//!
//! [`FormError`] covers the failures that happen outside of field validation:
//! schemas that cannot be compiled, unknown schema keys, configuration
//! problems and I/O. Field validation failures are not errors in this sense;
//! they are reported inline next to the offending field and never travel
//! through a `Result`.

use thiserror::Error;

/// The primary error type for formkit.
///
/// Each variant maps to an HTTP status code via [`FormError::status_code`]
/// so the server can turn it straight into a response.
#[derive(Error, Debug)]
pub enum FormError {
    // ── Schema errors ────────────────────────────────────────────────

    /// Two fields of one schema share the same `name`.
    #[error("Duplicate field name '{name}' in schema '{schema}'")]
    DuplicateField {
        /// Title of the offending schema.
        schema: String,
        /// The repeated field name.
        name: String,
    },

    /// A field's validation pattern is not a valid regular expression.
    #[error("Invalid pattern for field '{field}': {reason}")]
    InvalidPattern {
        /// Name of the field carrying the pattern.
        field: String,
        /// The regex compiler's explanation.
        reason: String,
    },

    /// A schema document could not be parsed.
    #[error("Schema parse error: {0}")]
    SchemaParse(String),

    // ── Registry errors ──────────────────────────────────────────────

    /// No schema is registered under the requested key.
    #[error("Unknown schema: {0}")]
    UnknownSchema(String),

    /// A schema is already registered under the key.
    #[error("Schema already registered: {0}")]
    DuplicateSchema(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The application is improperly configured.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// - `SchemaParse` -> 400
    /// - `UnknownSchema` -> 404
    /// - `DuplicateSchema` -> 409
    /// - Everything else -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::SchemaParse(_) => 400,
            Self::UnknownSchema(_) => 404,
            Self::DuplicateSchema(_) => 409,
            Self::DuplicateField { .. }
            | Self::InvalidPattern { .. }
            | Self::ConfigurationError(_)
            | Self::ImproperlyConfigured(_)
            | Self::IoError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::SchemaParse(err.to_string())
    }
}

impl From<toml::de::Error> for FormError {
    fn from(err: toml::de::Error) -> Self {
        Self::SchemaParse(err.to_string())
    }
}

/// A convenience type alias for results using [`FormError`].
pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(FormError::SchemaParse("x".into()).status_code(), 400);
        assert_eq!(FormError::UnknownSchema("x".into()).status_code(), 404);
        assert_eq!(FormError::DuplicateSchema("x".into()).status_code(), 409);
        assert_eq!(
            FormError::ConfigurationError("x".into()).status_code(),
            500
        );
        let err = FormError::DuplicateField {
            schema: "Signup".into(),
            name: "email".into(),
        };
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_display_messages() {
        let err = FormError::DuplicateField {
            schema: "Signup".into(),
            name: "email".into(),
        };
        assert_eq!(
            err.to_string(),
            "Duplicate field name 'email' in schema 'Signup'"
        );

        let err = FormError::InvalidPattern {
            field: "zip".into(),
            reason: "unclosed group".into(),
        };
        assert_eq!(err.to_string(), "Invalid pattern for field 'zip': unclosed group");

        let err = FormError::UnknownSchema("survey".into());
        assert_eq!(err.to_string(), "Unknown schema: survey");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: FormError = io.into();
        assert!(matches!(err, FormError::IoError(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: FormError = json_err.into();
        assert!(matches!(err, FormError::SchemaParse(_)));
    }

    #[test]
    fn test_result_alias() {
        fn lookup(found: bool) -> FormResult<u8> {
            if found {
                Ok(1)
            } else {
                Err(FormError::UnknownSchema("missing".into()))
            }
        }
        assert_eq!(lookup(true).unwrap(), 1);
        assert!(lookup(false).is_err());
    }
}
