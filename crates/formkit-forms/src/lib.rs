//! # formkit-forms
//!
//! Schema-driven forms for formkit. A [`FormSchema`] describes a form as an
//! ordered list of field descriptors; compiling it yields a [`CompiledSchema`]
//! that a [`FormEngine`] renders, edits, validates and submits.
//!
//! ```
//! use std::sync::Arc;
//!
//! use formkit_forms::{FieldDescriptor, FieldType, FormEngine, FormSchema};
//!
//! let schema = FormSchema::new("Contact")
//!     .field(FieldDescriptor::new("name", "Name", FieldType::Text).required(true));
//! let mut engine = FormEngine::new(Arc::new(schema.compile().unwrap()));
//!
//! assert!(!engine.submit().is_submitted());
//! assert_eq!(engine.error("name"), Some("Name is required"));
//!
//! engine.set_value("name", "Ada");
//! assert!(engine.submit().is_submitted());
//! ```

pub mod bound_field;
pub mod engine;
pub mod registry;
pub mod schema;
pub mod schemas;
pub mod validation;
pub mod value;
pub mod widgets;

pub use bound_field::BoundField;
pub use engine::{FormEngine, SubmitHandler, SubmitOutcome};
pub use registry::{FormHost, SchemaRegistry};
pub use schema::{
    CompiledField, CompiledSchema, FieldDescriptor, FieldPattern, FieldType, FormSchema,
    ValidationRule,
};
pub use validation::{check_value_types, validate_field, ErrorKind, FieldError};
pub use value::FieldValue;
pub use widgets::WidgetType;
