//! The formkit web application.
//!
//! [`FormApp`] combines settings and a schema registry into an axum router
//! that can be served directly or mounted into a larger application.
//!
//! # Examples
//!
//! ```no_run
//! use formkit_core::Settings;
//! use formkit_server::FormApp;
//!
//! # async fn example() -> Result<(), formkit_core::FormError> {
//! let app = FormApp::from_settings(Settings::default())?;
//! app.run("127.0.0.1:8000").await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use axum::routing::get;
use tower_http::trace::TraceLayer;

use formkit_core::{FormError, FormResult, Settings};
use formkit_forms::SchemaRegistry;

use crate::views;

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The runtime settings.
    pub settings: Arc<Settings>,
    /// All schemas the host can show.
    pub registry: Arc<SchemaRegistry>,
}

impl AppState {
    /// The key selected when no other key is requested.
    ///
    /// This is the configured default if it is registered, otherwise the
    /// first registered key.
    pub fn default_key(&self) -> Option<&str> {
        if self.registry.contains(&self.settings.default_schema) {
            Some(self.settings.default_schema.as_str())
        } else {
            self.registry.keys().first().copied()
        }
    }
}

/// The formkit application.
pub struct FormApp {
    settings: Settings,
    registry: SchemaRegistry,
}

impl FormApp {
    /// Creates an application serving `registry`.
    pub const fn new(settings: Settings, registry: SchemaRegistry) -> Self {
        Self { settings, registry }
    }

    /// Creates an application with the registry described by `settings`.
    pub fn from_settings(settings: Settings) -> FormResult<Self> {
        let registry = SchemaRegistry::from_settings(&settings)?;
        Ok(Self::new(settings, registry))
    }

    /// Returns a reference to the application settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns a reference to the schema registry.
    pub const fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Converts the application into an axum router.
    pub fn into_axum_router(self) -> axum::Router {
        let state = AppState {
            settings: Arc::new(self.settings),
            registry: Arc::new(self.registry),
        };

        axum::Router::new()
            .route("/", get(views::index))
            .route(
                "/forms/{key}",
                get(views::form_page).post(views::form_submit),
            )
            .route("/api/forms", get(views::api_list))
            .route(
                "/api/forms/{key}",
                get(views::api_schema).post(views::api_submit),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Runs the application as an HTTP server on `addr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails.
    pub async fn run(self, addr: &str) -> FormResult<()> {
        let schemas = self.registry.len();
        let router = self.into_axum_router();
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            FormError::ImproperlyConfigured(format!("Failed to bind to {addr}: {e}"))
        })?;

        tracing::info!(schemas, "Starting form server at http://{addr}/");

        axum::serve(listener, router)
            .await
            .map_err(|e| FormError::ImproperlyConfigured(format!("Server error: {e}")))?;

        Ok(())
    }
}

impl std::fmt::Debug for FormApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormApp")
            .field("schemas", &self.registry.keys())
            .field("debug", &self.settings.debug)
            .finish()
    }
}
