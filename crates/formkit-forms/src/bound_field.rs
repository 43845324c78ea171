//! Bound fields: form fields paired with their value and error.
//!
//! A [`BoundField`] is what a form renders for each schema entry: the label
//! (with a required marker), the widget bound to the current value, and the
//! current error message, if any.

use crate::schema::CompiledField;
use crate::value::FieldValue;
use crate::widgets::{escape_html, WidgetType};

/// A field bound to its current value and error.
#[derive(Debug, Clone, Copy)]
pub struct BoundField<'a> {
    /// The compiled field.
    pub field: &'a CompiledField,
    /// The current value, if the field was edited.
    pub value: Option<&'a FieldValue>,
    /// The current error message, if any.
    pub error: Option<&'a str>,
}

impl<'a> BoundField<'a> {
    /// Creates a bound field. An empty error message counts as no error.
    pub fn new(
        field: &'a CompiledField,
        value: Option<&'a FieldValue>,
        error: Option<&'a str>,
    ) -> Self {
        Self {
            field,
            value,
            error: error.filter(|e| !e.is_empty()),
        }
    }

    /// The field name.
    pub fn name(&self) -> &'a str {
        self.field.name()
    }

    /// The widget this field renders with.
    pub const fn widget(&self) -> WidgetType {
        WidgetType::for_field(self.field.field_type())
    }

    /// Returns the auto-generated HTML `id` for this field.
    pub fn auto_id(&self) -> String {
        format!("id_{}", self.field.name())
    }

    /// Returns `true` if this field has an error.
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Renders the widget HTML for this field.
    pub fn render_widget(&self) -> String {
        let attrs = [("id", self.auto_id())];
        self.widget()
            .render(&self.field.descriptor, self.value, &attrs)
    }

    /// Renders a `<label>` element, with a `*` marker for required fields.
    pub fn label_tag(&self) -> String {
        let marker = if self.field.is_required() {
            r#" <span class="required">*</span>"#
        } else {
            ""
        };
        format!(
            r#"<label for="{}">{}{marker}</label>"#,
            escape_html(&self.auto_id()),
            escape_html(self.field.label())
        )
    }

    /// Renders the error message, or an empty string when there is none.
    pub fn error_tag(&self) -> String {
        self.error.map_or_else(String::new, |e| {
            format!(r#"<p class="error">{}</p>"#, escape_html(e))
        })
    }

    /// Renders the full field row: label, widget and error.
    pub fn render(&self) -> String {
        format!(
            r#"<div class="form-field">{}{}{}</div>"#,
            self.label_tag(),
            self.render_widget(),
            self.error_tag()
        )
    }
}
