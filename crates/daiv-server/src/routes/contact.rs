//! Contact form relay.
//!
//! `POST /api/contact` accepts the form as a JSON object and forwards it to
//! the n8n webhook. The body is read raw so that malformed JSON surfaces as
//! the same `Internal Server Error` envelope as any other failure.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderValue};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Path the landing page posts the form to.
pub const CONTACT_PATH: &str = "/api/contact";

/// Build the contact router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(CONTACT_PATH, post(submit_contact))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

#[derive(Serialize)]
struct ContactResponse {
    message: &'static str,
    /// The webhook's JSON response, passed through untouched.
    data: Value,
}

async fn submit_contact(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ContactResponse>, AppError> {
    let data = state.relay.forward(&body, state.validation).await?;

    Ok(Json(ContactResponse {
        message: "Form submitted successfully!",
        data,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use daiv_core::error::RelayError;
    use daiv_core::relay::{
        StaticSource, Validation, WebhookClient, WebhookRequest, WebhookResponse,
    };

    use super::*;
    use crate::routes::app;

    /// Answers every call with a fixed response and remembers the requests.
    struct FixedClient {
        status: u16,
        body: String,
        calls: Mutex<Vec<WebhookRequest>>,
    }

    impl FixedClient {
        fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.to_owned(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<WebhookRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WebhookClient for FixedClient {
        async fn get(&self, request: WebhookRequest) -> Result<WebhookResponse, RelayError> {
            self.calls.lock().unwrap().push(request);
            Ok(WebhookResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    fn configured() -> StaticSource {
        StaticSource::new()
            .with("N8N_WEBHOOK_URL", "https://hooks.example/webhook/lead")
            .with("N8N_AUTH_USER", "user")
            .with("N8N_AUTH_PASS", "pass")
    }

    fn lead() -> Value {
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "number": "555-0100",
            "role": "Founder",
            "priorityProcess": "reporting",
            "timeSpent": "1–5",
            "tools": "",
            "timeline": "asap",
            "budget": "yes",
            "teamSize": "1-5",
            "website": ""
        })
    }

    async fn post_contact(
        source: StaticSource,
        client: Arc<FixedClient>,
        validation: Validation,
        body: impl Into<Body>,
    ) -> (StatusCode, Option<HeaderValue>, Value) {
        let state = Arc::new(AppState::new(Arc::new(source), client, validation));
        let request = Request::builder()
            .method("POST")
            .uri(CONTACT_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        let status = response.status();
        let cache = response.headers().get(header::CACHE_CONTROL).cloned();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, cache, serde_json::from_slice(&bytes).unwrap())
    }

    // ── success ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn success_wraps_webhook_response() {
        let client = FixedClient::new(200, r#"{"ok":true}"#);
        let (status, cache, body) = post_contact(
            configured(),
            Arc::clone(&client),
            Validation::Permissive,
            lead().to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.unwrap(), "no-store");
        assert_eq!(
            body,
            json!({ "message": "Form submitted successfully!", "data": { "ok": true } })
        );

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].url.starts_with("https://hooks.example/webhook/lead?name=Ada&"));
        assert_eq!(calls[0].authorization, "Basic dXNlcjpwYXNz");
    }

    #[tokio::test]
    async fn strict_mode_forwards_valid_lead() {
        let client = FixedClient::new(200, "{}");
        let (status, _, _) = post_contact(
            configured(),
            Arc::clone(&client),
            Validation::Strict,
            lead().to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(client.calls().len(), 1);
    }

    // ── failures ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn missing_config_makes_no_webhook_call() {
        let client = FixedClient::new(200, "{}");
        let source = StaticSource::new().with("N8N_WEBHOOK_URL", "https://hooks.example/x");
        let (status, _, body) = post_contact(
            source,
            Arc::clone(&client),
            Validation::Permissive,
            lead().to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Server configuration error." }));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn upstream_status_is_passed_through() {
        let client = FixedClient::new(404, "workflow not active");
        let (status, _, body) = post_contact(
            configured(),
            client,
            Validation::Permissive,
            lead().to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Failed to submit form." }));
    }

    #[tokio::test]
    async fn malformed_json_is_internal_error_without_call() {
        let client = FixedClient::new(200, "{}");
        let (status, _, body) = post_contact(
            configured(),
            Arc::clone(&client),
            Validation::Permissive,
            "{not json",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal Server Error");
        assert!(!body["error"].as_str().unwrap().is_empty());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn non_json_success_body_is_internal_error() {
        let client = FixedClient::new(200, "Workflow was started");
        let (status, _, body) = post_contact(
            configured(),
            client,
            Validation::Permissive,
            lead().to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal Server Error");
    }

    #[tokio::test]
    async fn strict_mode_rejects_incomplete_lead() {
        let client = FixedClient::new(200, "{}");
        let mut incomplete = lead();
        incomplete.as_object_mut().unwrap().remove("email");

        let (status, _, body) = post_contact(
            configured(),
            Arc::clone(&client),
            Validation::Strict,
            incomplete.to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid submission.");
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn cross_origin_requests_get_no_cors_grant() {
        let client = FixedClient::new(200, "{}");
        let state = Arc::new(AppState::new(
            Arc::new(configured()),
            client,
            Validation::Permissive,
        ));
        let preflight = Request::builder()
            .method("OPTIONS")
            .uri(CONTACT_PATH)
            .header(header::ORIGIN, "https://elsewhere.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app(state).oneshot(preflight).await.unwrap();
        assert!(!response.status().is_success());
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn get_is_not_allowed() {
        let client = FixedClient::new(200, "{}");
        let state = Arc::new(AppState::new(
            Arc::new(configured()),
            client,
            Validation::Permissive,
        ));
        let request = Request::builder()
            .uri(CONTACT_PATH)
            .body(Body::empty())
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
