//! # formkit-server
//!
//! An axum application that hosts every schema of a
//! [`SchemaRegistry`](formkit_forms::SchemaRegistry):
//!
//! - [`app`] - The [`FormApp`] builder, router, and server loop
//! - [`views`] - Request handlers for the HTML pages and the JSON API
//! - [`form_data`] - Decoding of submitted form bodies into field values
//!
//! Each request builds its own form engine, so no form state is shared
//! between requests.

pub mod app;
pub mod form_data;
pub mod views;

pub use app::{AppState, FormApp};
