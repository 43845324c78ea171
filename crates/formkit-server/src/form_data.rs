//! Decoding submitted data into field values.
//!
//! HTML forms post `application/x-www-form-urlencoded` bodies, which lose the
//! distinction between "never edited" and "edited to empty", and omit
//! unchecked checkboxes entirely. [`values_from_form_body`] maps such a body
//! back onto the schema:
//!
//! - text-like fields and dropdowns take their first value; an empty string
//!   counts as untouched
//! - multiselects collect every value for their name, in body order
//! - checkboxes are checked when their name is present at all
//! - unsupported fields render without a name and are skipped

use std::collections::HashMap;

use formkit_forms::{check_value_types, CompiledSchema, FieldType, FieldValue};

/// Decodes a url-encoded form body against `schema`.
///
/// Keys that are not fields of the schema are dropped.
pub fn values_from_form_body(schema: &CompiledSchema, body: &[u8]) -> HashMap<String, FieldValue> {
    let mut raw: HashMap<String, Vec<String>> = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(body) {
        raw.entry(key.into_owned()).or_default().push(value.into_owned());
    }

    let mut values = HashMap::new();
    for field in schema.fields() {
        let Some(sent) = raw.remove(field.name()) else {
            continue;
        };
        let value = match field.field_type() {
            FieldType::Multiselect => Some(FieldValue::selected(sent)),
            FieldType::Checkbox => Some(FieldValue::Checked(true)),
            FieldType::Unsupported(_) => None,
            _ => sent
                .into_iter()
                .next()
                .filter(|text| !text.is_empty())
                .map(FieldValue::Text),
        };
        if let Some(value) = value {
            values.insert(field.name().to_string(), value);
        }
    }

    if !raw.is_empty() {
        tracing::debug!(ignored = ?raw.keys().collect::<Vec<_>>(), "ignoring unknown form keys");
    }
    values
}

/// Checks and normalizes values received as JSON.
///
/// Selections lose repeated options; keys that are not fields of the schema
/// are dropped. A value of the wrong shape for its field, such as a boolean
/// sent for a text field, fails with one message per offending field.
pub fn values_from_json(
    schema: &CompiledSchema,
    values: HashMap<String, FieldValue>,
) -> Result<HashMap<String, FieldValue>, HashMap<String, String>> {
    check_value_types(schema, values).map_err(|errors| {
        tracing::debug!(fields = ?errors.keys().collect::<Vec<_>>(), "rejecting mistyped values");
        errors
    })
}
