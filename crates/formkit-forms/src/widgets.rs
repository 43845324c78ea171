//! Widget rendering.
//!
//! Every [`FieldType`] maps to exactly one [`WidgetType`], and every widget
//! renders to an HTML string bound to the field's name and current value.
//! Unknown field types map to [`WidgetType::Unsupported`], which renders a
//! nameless placeholder input so the rest of the form is unaffected.

use std::fmt;

use crate::schema::{FieldDescriptor, FieldType};
use crate::value::FieldValue;

/// Enumerates the built-in widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetType {
    /// `<input type="text">`.
    TextInput,
    /// `<input type="email">`.
    EmailInput,
    /// `<textarea>`.
    Textarea,
    /// `<input type="date">`.
    DateInput,
    /// `<select>` with a blank placeholder option.
    Select,
    /// `<select multiple>`.
    SelectMultiple,
    /// `<input type="checkbox">`.
    CheckboxInput,
    /// Placeholder for a type without a widget.
    Unsupported,
}

impl WidgetType {
    /// Returns the widget for a field type.
    pub const fn for_field(field_type: &FieldType) -> Self {
        match field_type {
            FieldType::Text => Self::TextInput,
            FieldType::Email => Self::EmailInput,
            FieldType::Textarea => Self::Textarea,
            FieldType::Date => Self::DateInput,
            FieldType::Dropdown => Self::Select,
            FieldType::Multiselect => Self::SelectMultiple,
            FieldType::Checkbox => Self::CheckboxInput,
            FieldType::Unsupported(_) => Self::Unsupported,
        }
    }

    /// Renders the widget for `field` showing `value`.
    ///
    /// `attrs` are appended to the main element (e.g. an `id`). Values that
    /// do not fit the widget (a selection in a text input) render as blank.
    pub fn render(
        self,
        field: &FieldDescriptor,
        value: Option<&FieldValue>,
        attrs: &[(&str, String)],
    ) -> String {
        let name = escape_html(&field.name);
        let text = value.and_then(FieldValue::as_text).unwrap_or("");
        let mut all_attrs: Vec<(&str, String)> = attrs.to_vec();

        match self {
            Self::TextInput | Self::EmailInput | Self::DateInput => {
                let input_type = match self {
                    Self::EmailInput => "email",
                    Self::DateInput => "date",
                    _ => "text",
                };
                if self != Self::DateInput {
                    all_attrs.push(("placeholder", format!("Enter {}", field.label)));
                }
                push_required(&mut all_attrs, field);
                format!(
                    r#"<input type="{input_type}" name="{name}" value="{}"{} />"#,
                    escape_html(text),
                    render_attrs(&all_attrs)
                )
            }
            Self::Textarea => {
                all_attrs.push(("placeholder", format!("Enter {}", field.label)));
                push_required(&mut all_attrs, field);
                format!(
                    r#"<textarea name="{name}"{}>{}</textarea>"#,
                    render_attrs(&all_attrs),
                    escape_html(text)
                )
            }
            Self::Select => {
                push_required(&mut all_attrs, field);
                let mut html = format!(r#"<select name="{name}"{}>"#, render_attrs(&all_attrs));
                html.push_str(&format!(
                    r#"<option value="">Select {}</option>"#,
                    escape_html(&field.label)
                ));
                html.push_str(&render_options(&field.options, value));
                html.push_str("</select>");
                html
            }
            Self::SelectMultiple => {
                let mut html = format!(
                    r#"<select name="{name}" multiple="multiple"{}>"#,
                    render_attrs(&all_attrs)
                );
                html.push_str(&render_options(&field.options, value));
                html.push_str("</select>");
                html
            }
            Self::CheckboxInput => {
                if matches!(value, Some(FieldValue::Checked(true))) {
                    all_attrs.push(("checked", "checked".to_string()));
                }
                format!(
                    r#"<input type="checkbox" name="{name}" value="on"{} />"#,
                    render_attrs(&all_attrs)
                )
            }
            Self::Unsupported => {
                all_attrs.push((
                    "placeholder",
                    format!("Unsupported type: {}", field.field_type),
                ));
                format!(r#"<input type="text"{} />"#, render_attrs(&all_attrs))
            }
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextInput => "TextInput",
            Self::EmailInput => "EmailInput",
            Self::Textarea => "Textarea",
            Self::DateInput => "DateInput",
            Self::Select => "Select",
            Self::SelectMultiple => "SelectMultiple",
            Self::CheckboxInput => "CheckboxInput",
            Self::Unsupported => "Unsupported",
        };
        write!(f, "{name}")
    }
}

fn push_required(attrs: &mut Vec<(&str, String)>, field: &FieldDescriptor) {
    if field.required {
        attrs.push(("required", "required".to_string()));
    }
}

fn render_options(options: &[String], value: Option<&FieldValue>) -> String {
    options
        .iter()
        .map(|opt| {
            let opt_escaped = escape_html(opt);
            let selected = if value.is_some_and(|v| v.contains(opt)) {
                r#" selected="selected""#
            } else {
                ""
            };
            format!(r#"<option value="{opt_escaped}"{selected}>{opt_escaped}</option>"#)
        })
        .collect()
}

/// Formats attributes into a string like ` key="value" key2="value2"`, in order.
pub(crate) fn render_attrs(attrs: &[(&str, String)]) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!(r#" {k}="{}""#, escape_html(v)))
        .collect()
}

/// Escapes text for use in HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
