//! The form engine.
//!
//! A [`FormEngine`] owns the state of one mounted form: the current value of
//! each edited field, the error shown next to each field, and whether the
//! last submission succeeded. All mutation goes through `&mut self`:
//!
//! - [`FormEngine::set_value`] stores a value and clears that field's error.
//! - [`FormEngine::submit`] validates every field; on success it reports the
//!   values to the [`SubmitHandler`], on failure it stores the errors.
//! - [`FormEngine::set_schema`] swaps in a different schema and starts over.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use formkit_core::logging::submission_span;

use crate::bound_field::BoundField;
use crate::schema::CompiledSchema;
use crate::validation::validate_fields;
use crate::value::FieldValue;
use crate::widgets::escape_html;

/// Receives the values of a successful submission.
///
/// Implemented for every `FnMut(&HashMap<String, FieldValue>) + Send` closure.
pub trait SubmitHandler: Send {
    /// Called once per successful submission with the full value map.
    fn on_submit(&mut self, data: &HashMap<String, FieldValue>);
}

impl<F> SubmitHandler for F
where
    F: FnMut(&HashMap<String, FieldValue>) + Send,
{
    fn on_submit(&mut self, data: &HashMap<String, FieldValue>) {
        self(data);
    }
}

/// The result of [`FormEngine::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every field passed; carries the submitted values.
    Submitted(HashMap<String, FieldValue>),
    /// At least one field failed; carries the error map.
    Rejected(HashMap<String, String>),
}

impl SubmitOutcome {
    /// Returns `true` for a successful submission.
    pub const fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

/// The state machine behind one rendered form.
pub struct FormEngine {
    schema: Arc<CompiledSchema>,
    values: HashMap<String, FieldValue>,
    errors: HashMap<String, String>,
    submitted: bool,
    on_submit: Option<Box<dyn SubmitHandler>>,
}

impl FormEngine {
    /// Creates an engine with empty state for `schema`.
    pub fn new(schema: Arc<CompiledSchema>) -> Self {
        Self {
            schema,
            values: HashMap::new(),
            errors: HashMap::new(),
            submitted: false,
            on_submit: None,
        }
    }

    /// Sets the handler that receives successful submissions.
    #[must_use]
    pub fn with_on_submit(mut self, handler: impl SubmitHandler + 'static) -> Self {
        self.on_submit = Some(Box::new(handler));
        self
    }

    /// Replaces the submission handler.
    pub fn set_on_submit(&mut self, handler: impl SubmitHandler + 'static) {
        self.on_submit = Some(Box::new(handler));
    }

    /// The current schema.
    pub const fn schema(&self) -> &Arc<CompiledSchema> {
        &self.schema
    }

    /// Switches to `schema`.
    ///
    /// If `schema` is a different allocation from the current one, values,
    /// errors and the submitted flag are cleared. Passing the current schema
    /// again keeps the state.
    pub fn set_schema(&mut self, schema: Arc<CompiledSchema>) {
        if Arc::ptr_eq(&self.schema, &schema) {
            return;
        }
        tracing::debug!(from = %self.schema.title(), to = %schema.title(), "switching form schema");
        self.schema = schema;
        self.reset();
    }

    /// Clears values, errors and the submitted flag.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.submitted = false;
    }

    /// Stores the value of field `name` and clears its error.
    ///
    /// The value is not validated until the next [`submit`](Self::submit).
    /// Names that are not fields of the schema, and values of the wrong shape
    /// for their field, are ignored.
    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) {
        let Some(field) = self.schema.field(name) else {
            tracing::warn!(field = name, form = %self.schema.title(), "ignoring value for unknown field");
            return;
        };
        let value = value.into();
        if !value.fits(field.field_type()) {
            tracing::warn!(
                field = name,
                field_type = field.field_type().as_str(),
                "ignoring value of the wrong type"
            );
            return;
        }
        self.values.insert(name.to_string(), value);
        self.errors.remove(name);
        self.submitted = false;
    }

    /// Stores several values, as if [`set_value`](Self::set_value) were called for each.
    pub fn set_values<I, K>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: AsRef<str>,
    {
        for (name, value) in values {
            self.set_value(name.as_ref(), value);
        }
    }

    /// Returns the value of field `name`, if it was set.
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// All current values.
    pub const fn values(&self) -> &HashMap<String, FieldValue> {
        &self.values
    }

    /// Returns the error shown for field `name`, if any.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors
            .get(name)
            .map(String::as_str)
            .filter(|e| !e.is_empty())
    }

    /// All current errors.
    pub const fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// `true` right after a successful submission, until the next edit or submit.
    pub const fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Validates every field and either reports the values or stores the errors.
    pub fn submit(&mut self) -> SubmitOutcome {
        let span = submission_span(self.schema.title());
        let _guard = span.enter();

        let errors = validate_fields(&self.schema, &self.values);

        if errors.is_empty() {
            self.submitted = true;
            self.errors.clear();
            if let Some(handler) = self.on_submit.as_mut() {
                handler.on_submit(&self.values);
            }
            tracing::info!(fields = self.values.len(), "form submitted");
            SubmitOutcome::Submitted(self.values.clone())
        } else {
            tracing::debug!(errors = errors.len(), "form rejected");
            self.submitted = false;
            self.errors.clone_from(&errors);
            SubmitOutcome::Rejected(errors)
        }
    }

    /// Returns a bound field for every schema field, in render order.
    pub fn bound_fields(&self) -> Vec<BoundField<'_>> {
        self.schema
            .fields()
            .iter()
            .map(|field| {
                BoundField::new(
                    field,
                    self.values.get(field.name()),
                    self.errors.get(field.name()).map(String::as_str),
                )
            })
            .collect()
    }

    /// The current values as pretty-printed JSON.
    pub fn values_json(&self) -> String {
        serde_json::to_string_pretty(&self.values).unwrap_or_else(|_| "{}".to_string())
    }

    /// Renders the whole form.
    ///
    /// The `<form>` posts to `action` and disables native browser validation.
    /// After a successful submission a success block with the submitted
    /// values follows the form.
    pub fn render_html(&self, action: &str) -> String {
        let mut html = String::from(r#"<div class="form-container">"#);
        html.push_str(&format!("<h2>{}</h2>", escape_html(self.schema.title())));
        html.push_str(&format!(
            r#"<form method="post" action="{}" novalidate="novalidate">"#,
            escape_html(action)
        ));
        for bound in self.bound_fields() {
            html.push_str(&bound.render());
        }
        html.push_str(r#"<button type="submit" class="submit-btn">Submit</button></form>"#);
        if self.submitted {
            html.push_str(&format!(
                r#"<div class="success"><h4>Form Submitted Successfully</h4><pre>{}</pre></div>"#,
                escape_html(&self.values_json())
            ));
        }
        html.push_str("</div>");
        html
    }
}

impl fmt::Debug for FormEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormEngine")
            .field("schema", &self.schema.title())
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("submitted", &self.submitted)
            .field("has_on_submit", &self.on_submit.is_some())
            .finish()
    }
}
