//! # formkit
//!
//! Schema-driven HTML forms with declarative validation.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on `formkit`
//! to get everything, or on the individual crates for finer-grained control.
//!
//! ```
//! use formkit::prelude::*;
//!
//! let registry = SchemaRegistry::builtin().unwrap();
//! let mut engine = FormEngine::new(registry.get("registration").unwrap());
//! engine.set_value("fullName", "Ada Lovelace");
//! engine.set_value("email", "ada@example.com");
//! engine.set_value("gender", "Female");
//! engine.set_value("hobbies", vec!["Reading", "Music"]);
//! assert!(engine.submit().is_submitted());
//! ```

/// Settings, logging, and error types.
pub use formkit_core as core;

/// Schemas, validation, the form engine, and widgets.
pub use formkit_forms as forms;

/// The axum HTTP host.
#[cfg(feature = "server")]
pub use formkit_server as server;

/// The `formkit` command framework and built-in commands.
#[cfg(feature = "cli")]
pub use formkit_cli as cli;

/// Third-party crates used in the public API.
pub use serde_json;
pub use tracing;

/// The most commonly used types.
pub mod prelude {
    pub use formkit_core::{FormError, FormResult, Settings};
    pub use formkit_forms::{
        FieldDescriptor, FieldType, FieldValue, FormEngine, FormHost, FormSchema, SchemaRegistry,
        SubmitHandler, SubmitOutcome, ValidationRule,
    };

    #[cfg(feature = "server")]
    pub use formkit_server::FormApp;
}
