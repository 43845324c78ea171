//! Request handlers.
//!
//! HTML routes render a full page: the schema picker followed by the form.
//! JSON routes expose the same registry and engine to API clients. Every
//! request gets its own [`FormHost`], so a submission only ever sees the
//! values it carried.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::{Deserialize, Serialize};

use formkit_core::FormError;
use formkit_forms::widgets::escape_html;
use formkit_forms::{FieldValue, FormHost, FormSchema, SubmitOutcome};

use crate::app::AppState;
use crate::form_data::{values_from_form_body, values_from_json};

const STYLE: &str = "body{font-family:sans-serif;margin:2rem auto;max-width:40rem}\
.form-field{margin-bottom:1rem;display:flex;flex-direction:column}\
.required{color:#c00}.error{color:#c00;margin:.25rem 0 0}\
.success{background:#e8f5e9;padding:1rem;margin-top:1rem}";

/// A [`FormError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct AppError(pub FormError);

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, self.0.to_string()).into_response()
    }
}

/// Query string of the picker page.
#[derive(Debug, Default, Deserialize)]
pub struct PickerQuery {
    /// Key of the schema to show.
    pub form: Option<String>,
}

/// One entry of `GET /api/forms`.
#[derive(Debug, Serialize)]
pub struct SchemaSummary {
    /// Registry key.
    pub key: String,
    /// Form title.
    pub title: String,
    /// Number of fields.
    pub fields: usize,
}

/// `GET /`: the picker with the selected (or default) form.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PickerQuery>,
) -> Result<Html<String>, AppError> {
    let Some(default) = state.default_key() else {
        return Ok(Html(render_page(
            &state,
            None,
            r#"<p class="empty">No schemas registered.</p>"#,
        )));
    };
    let mut host = FormHost::new(Arc::clone(&state.registry), default)?;
    if let Some(key) = query.form.as_deref() {
        host.select(key)?;
    }
    Ok(Html(render_host(&state, &host)))
}

/// `GET /forms/{key}`: an empty form.
pub async fn form_page(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Html<String>, AppError> {
    let host = FormHost::new(Arc::clone(&state.registry), &key)?;
    Ok(Html(render_host(&state, &host)))
}

/// `POST /forms/{key}`: submits a url-encoded form.
///
/// Responds 200 with the success block, or 422 with the form and its errors.
pub async fn form_submit(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Html<String>), AppError> {
    let mut host = FormHost::new(Arc::clone(&state.registry), &key)?;
    let values = values_from_form_body(host.engine().schema(), &body);

    let engine = host.engine_mut();
    engine.set_on_submit(log_submission(key));
    engine.set_values(values);
    let status = if engine.submit().is_submitted() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    Ok((status, Html(render_host(&state, &host))))
}

/// `GET /api/forms`: every registered schema.
pub async fn api_list(State(state): State<AppState>) -> Json<Vec<SchemaSummary>> {
    Json(
        state
            .registry
            .iter()
            .map(|(key, schema)| SchemaSummary {
                key: key.to_string(),
                title: schema.title().to_string(),
                fields: schema.fields().len(),
            })
            .collect(),
    )
}

/// `GET /api/forms/{key}`: the schema document.
pub async fn api_schema(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<FormSchema>, AppError> {
    Ok(Json(state.registry.get(&key)?.to_schema()))
}

/// `POST /api/forms/{key}`: submits a JSON object of values.
///
/// Responds 200 `{"submitted": true, "data": ..}` or
/// 422 `{"submitted": false, "errors": ..}`. A value of the wrong shape for
/// its field is rejected the same way before any rule runs.
pub async fn api_submit(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(values): Json<HashMap<String, FieldValue>>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let mut host = FormHost::new(Arc::clone(&state.registry), &key)?;
    let values = match values_from_json(host.engine().schema(), values) {
        Ok(values) => values,
        Err(errors) => {
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "submitted": false, "errors": errors })),
            ))
        }
    };

    let engine = host.engine_mut();
    engine.set_on_submit(log_submission(key));
    engine.set_values(values);
    Ok(match engine.submit() {
        SubmitOutcome::Submitted(data) => (
            StatusCode::OK,
            Json(serde_json::json!({ "submitted": true, "data": data })),
        ),
        SubmitOutcome::Rejected(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "submitted": false, "errors": errors })),
        ),
    })
}

fn log_submission(key: String) -> impl FnMut(&HashMap<String, FieldValue>) + Send {
    move |data: &HashMap<String, FieldValue>| {
        let json = serde_json::to_string(data).unwrap_or_default();
        tracing::info!(form = %key, data = %json, "Submitted data");
    }
}

fn render_host(state: &AppState, host: &FormHost) -> String {
    let action = format!("/forms/{}", host.selected());
    render_page(
        state,
        Some(host.selected()),
        &host.engine().render_html(&action),
    )
}

fn render_page(state: &AppState, selected: Option<&str>, content: &str) -> String {
    let title = escape_html(&state.settings.site_title);
    let options: String = state
        .registry
        .iter()
        .map(|(key, schema)| {
            let marker = if Some(key) == selected {
                r#" selected="selected""#
            } else {
                ""
            };
            format!(
                r#"<option value="{}"{marker}>{}</option>"#,
                escape_html(key),
                escape_html(schema.title())
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title>\
<style>{STYLE}</style></head><body><h1>{title}</h1>\
<form method=\"get\" action=\"/\" class=\"picker\"><label for=\"id_form\">Select Form:</label> \
<select name=\"form\" id=\"id_form\">{options}</select> <button type=\"submit\">Show</button></form>\
{content}</body></html>"
    )
}
