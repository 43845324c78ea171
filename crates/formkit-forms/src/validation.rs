//! Field validation.
//!
//! [`validate_field`] checks one value against its field's rules in a fixed
//! order and reports only the first failure:
//!
//! 1. required
//! 2. email format (email fields only)
//! 3. minimum length
//! 4. maximum length
//! 5. pattern
//!
//! A too-short value that would also fail the pattern therefore reports the
//! length error alone. [`validate_fields`] runs every field of a schema and
//! collects the failures into an error map keyed by field name.
//!
//! Values decoded from untrusted JSON go through [`check_value_types`] first,
//! which rejects a value whose shape does not match its field's type.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::schema::{CompiledField, CompiledSchema, FieldType};
use crate::value::FieldValue;

/// Pattern every non-empty email field must match.
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9+_.-]+@[a-zA-Z0-9.-]+$";

/// Default text of an email format error.
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("valid regex"))
}

/// Which rule a value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required field is blank.
    Required,
    /// The value does not match the email format or the field's pattern.
    FormatInvalid,
    /// Shorter than `minLength`.
    TooShort,
    /// Longer than `maxLength`.
    TooLong,
}

impl ErrorKind {
    /// A short machine-readable code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::FormatInvalid => "invalid",
            Self::TooShort => "min_length",
            Self::TooLong => "max_length",
        }
    }
}

/// A failed check on one field. Displays as the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The broken rule.
    pub kind: ErrorKind,
    /// Text shown next to the field.
    pub message: String,
}

impl FieldError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FieldError {}

/// Validates one value against its field. `None` means the field has no value.
///
/// Returns the first failing check, or `None` when the value is acceptable.
pub fn validate_field(field: &CompiledField, value: Option<&FieldValue>) -> Option<FieldError> {
    let filled = value.filter(|v| v.is_filled());
    let rule = field.rule();
    let custom_message = rule.and_then(|r| r.message.as_deref());

    if field.is_required() && filled.is_none() {
        return Some(FieldError::new(
            ErrorKind::Required,
            format!("{} is required", field.label()),
        ));
    }

    if *field.field_type() == FieldType::Email {
        if let Some(v) = filled {
            if !email_regex().is_match(&v.pattern_subject()) {
                return Some(FieldError::new(
                    ErrorKind::FormatInvalid,
                    custom_message.unwrap_or(INVALID_EMAIL_MESSAGE),
                ));
            }
        }
    }

    // Zero bounds count as unset.
    let length = value.and_then(FieldValue::length);
    if let (Some(min), Some(len)) = (rule.and_then(|r| r.min_length).filter(|&n| n > 0), length) {
        if len < min {
            return Some(FieldError::new(
                ErrorKind::TooShort,
                format!("{} must be at least {min} characters", field.label()),
            ));
        }
    }
    if let (Some(max), Some(len)) = (rule.and_then(|r| r.max_length).filter(|&n| n > 0), length) {
        if len > max {
            return Some(FieldError::new(
                ErrorKind::TooLong,
                format!("{} must not exceed {max} characters", field.label()),
            ));
        }
    }

    if let (Some(pattern), Some(v)) = (field.pattern(), filled) {
        if !pattern.is_match(&v.pattern_subject()) {
            let message = custom_message.map_or_else(
                || format!("{} is invalid", field.label()),
                ToString::to_string,
            );
            return Some(FieldError::new(ErrorKind::FormatInvalid, message));
        }
    }

    None
}

/// Validates every field of `schema` in order against `values`.
///
/// Only failing fields appear in the result; an empty map means the whole
/// form is valid.
pub fn validate_fields(
    schema: &CompiledSchema,
    values: &HashMap<String, FieldValue>,
) -> HashMap<String, String> {
    schema
        .fields()
        .iter()
        .filter_map(|field| {
            validate_field(field, values.get(field.name()))
                .map(|err| (field.name().to_string(), err.message))
        })
        .collect()
}

/// Keeps the values that belong to `schema` and checks each has the right shape.
///
/// Unknown names are dropped and selections lose repeated options. A text
/// value on a checkbox, a list on a text field and so on yield one message
/// per offending field instead.
pub fn check_value_types(
    schema: &CompiledSchema,
    values: HashMap<String, FieldValue>,
) -> Result<HashMap<String, FieldValue>, HashMap<String, String>> {
    let mut accepted = HashMap::new();
    let mut errors = HashMap::new();
    for (name, value) in values {
        let Some(field) = schema.field(&name) else {
            continue;
        };
        if value.fits(field.field_type()) {
            accepted.insert(name, value.normalized());
        } else {
            errors.insert(name, type_message(field));
        }
    }
    if errors.is_empty() {
        Ok(accepted)
    } else {
        Err(errors)
    }
}

fn type_message(field: &CompiledField) -> String {
    let expected = match field.field_type() {
        FieldType::Multiselect => "a list of options",
        FieldType::Checkbox => "true or false",
        _ => "text",
    };
    format!("{} must be {expected}", field.label())
}
