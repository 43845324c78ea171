//! Router-level tests: requests go through the full axum stack via `oneshot`.

use axum::body::Body;
use axum::Router;
use http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use formkit_core::Settings;
use formkit_forms::{FieldDescriptor, FieldType, FormSchema, SchemaRegistry};
use formkit_server::FormApp;

fn router() -> Router {
    FormApp::from_settings(Settings::default())
        .unwrap()
        .into_axum_router()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.expect("router should not error");
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

async fn get(uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router(), request).await
}

async fn post_form(uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router(), request).await
}

async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, text) = send(router(), request).await;
    (status, serde_json::from_str(&text).unwrap())
}

// ── HTML pages ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_index_shows_default_form() {
    let (status, html) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Dynamic Form Demo</title>"));
    assert!(html.contains(r#"<option value="registration" selected="selected">User Registration</option>"#));
    assert!(html.contains(r#"<option value="job">Job Application</option>"#));
    assert!(html.contains("<h2>User Registration</h2>"));
    assert!(html.contains(r#"action="/forms/registration""#));
}

#[tokio::test]
async fn test_index_picks_requested_form() {
    let (status, html) = get("/?form=job").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h2>Job Application</h2>"));
    assert!(html.contains(r#"<option value="job" selected="selected">"#));
}

#[tokio::test]
async fn test_index_unknown_form_is_404() {
    let (status, body) = get("/?form=survey").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("survey"));
}

#[tokio::test]
async fn test_index_without_schemas() {
    let app = FormApp::new(Settings::default(), SchemaRegistry::new());
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, html) = send(app.into_axum_router(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No schemas registered."));
}

#[tokio::test]
async fn test_form_page_is_empty() {
    let (status, html) = get("/forms/job").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<option value="">Select Position Applied For</option>"#));
    assert!(!html.contains(r#"class="error""#));
    assert!(!html.contains(r#"class="success""#));
}

#[tokio::test]
async fn test_form_page_unknown_key() {
    let (status, _) = get("/forms/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_form_submit_rejected() {
    let (status, html) = post_form("/forms/registration", "fullName=&email=bad-email").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains(r#"<p class="error">Full Name is required</p>"#));
    assert!(html.contains(r#"<p class="error">Invalid email address</p>"#));
    assert!(html.contains(r#"<p class="error">Gender is required</p>"#));
    // The submitted value is shown again.
    assert!(html.contains(r#"value="bad-email""#));
    assert!(!html.contains(r#"class="success""#));
}

#[tokio::test]
async fn test_form_submit_success() {
    let body = "fullName=Ada+Lovelace&email=ada%40example.com&gender=Female\
&hobbies=Reading&hobbies=Music&subscribe=on";
    let (status, html) = post_form("/forms/registration", body).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Form Submitted Successfully"));
    assert!(html.contains("&quot;fullName&quot;: &quot;Ada Lovelace&quot;"));
    assert!(html.contains("&quot;subscribe&quot;: true"));
    assert!(html.contains(r#"<option value="Music" selected="selected">"#));
    assert!(html.contains(r#"checked="checked""#));
}

// ── JSON API ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_api_list() {
    let (status, body) = get("/api/forms").await;
    assert_eq!(status, StatusCode::OK);
    let list: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        list,
        serde_json::json!([
            {"key": "registration", "title": "User Registration", "fields": 7},
            {"key": "job", "title": "Job Application", "fields": 7},
        ])
    );
}

#[tokio::test]
async fn test_api_schema() {
    let (status, body) = get("/api/forms/job").await;
    assert_eq!(status, StatusCode::OK);
    let schema = FormSchema::from_json_str(&body).unwrap();
    assert_eq!(schema, formkit_forms::schemas::job_application());
}

#[tokio::test]
async fn test_api_schema_unknown() {
    let (status, _) = get("/api/forms/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_submit_rejected() {
    let (status, body) = post_json(
        "/api/forms/job",
        serde_json::json!({"fullName": "Ada", "email": "ada@example.com", "experience": "lots"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["submitted"], false);
    assert_eq!(body["errors"]["position"], "Position Applied For is required");
    assert_eq!(body["errors"]["experience"], "Enter a valid number");
    assert!(body["errors"].get("fullName").is_none());
}

#[tokio::test]
async fn test_api_submit_success_echoes_data() {
    let (status, body) = post_json(
        "/api/forms/job",
        serde_json::json!({
            "fullName": "Ada",
            "email": "ada@example.com",
            "position": "Designer",
            "skills": ["CSS", "React", "CSS"],
            "experience": "3",
            "ignored": "x",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["submitted"], true);
    assert_eq!(body["data"]["skills"], serde_json::json!(["CSS", "React"]));
    assert_eq!(body["data"]["experience"], "3");
    assert!(body["data"].get("ignored").is_none());
}

#[tokio::test]
async fn test_api_submit_rejects_wrong_value_types() {
    let (status, body) = post_json(
        "/api/forms/registration",
        serde_json::json!({
            "fullName": true,
            "email": "a@b.c",
            "gender": ["Male", "Female"],
            "subscribe": "no",
            "hobbies": "Reading",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["submitted"], false);
    assert_eq!(body["errors"]["fullName"], "Full Name must be text");
    assert_eq!(body["errors"]["gender"], "Gender must be text");
    assert_eq!(body["errors"]["subscribe"], "Subscribe to newsletter must be true or false");
    assert_eq!(body["errors"]["hobbies"], "Hobbies must be a list of options");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_api_submit_custom_registry() {
    let mut registry = SchemaRegistry::new();
    registry
        .register(
            "mixer",
            &FormSchema::new("Mixer")
                .field(FieldDescriptor::new("name", "Name", FieldType::Text).required(true))
                .field(FieldDescriptor::new("volume", "Volume", "slider")),
        )
        .unwrap();
    let app = FormApp::new(Settings::default(), registry);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/forms/mixer")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name": "Ada"}"#))
        .unwrap();
    let (status, body) = send(app.into_axum_router(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""submitted":true"#));
}
