//! Integration tests for the contact relay.
//!
//! Each test runs the real server and a stand-in n8n webhook on loopback
//! ports, so the reqwest client, query encoding and Basic auth header are
//! exercised end to end.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{RawQuery, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use base64::Engine;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use daiv_core::relay::{StaticSource, Validation};
use daiv_server::routes;
use daiv_server::state::AppState;
use daiv_server::webhook::ReqwestWebhookClient;

/// What the stand-in webhook saw: raw query string and `Authorization` header.
type Seen = Arc<Mutex<Vec<(Option<String>, Option<String>)>>>;

#[derive(Clone)]
struct Hook {
    status: StatusCode,
    body: &'static str,
    seen: Seen,
}

async fn hook_handler(
    State(hook): State<Hook>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> (StatusCode, &'static str) {
    let auth = headers
        .get(header::AUTHORIZATION)
        .map(|v| v.to_str().unwrap().to_owned());
    hook.seen.lock().unwrap().push((query, auth));
    (hook.status, hook.body)
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start a stand-in webhook at `/webhook/lead` answering with `status` and `body`.
async fn start_hook(status: StatusCode, body: &'static str) -> (String, Seen) {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route("/webhook/lead", get(hook_handler))
        .with_state(Hook {
            status,
            body,
            seen: Arc::clone(&seen),
        });
    let addr = serve(app).await;
    (format!("http://{addr}/webhook/lead"), seen)
}

/// Start the DAIV.PRO server with the given relay settings.
async fn start_server(source: StaticSource) -> String {
    let state = Arc::new(AppState::new(
        Arc::new(source),
        Arc::new(ReqwestWebhookClient::new()),
        Validation::Permissive,
    ));
    let addr = serve(routes::app(state)).await;
    format!("http://{addr}")
}

fn relay_settings(url: &str) -> StaticSource {
    StaticSource::new()
        .with("N8N_WEBHOOK_URL", url)
        .with("N8N_AUTH_USER", "daiv")
        .with("N8N_AUTH_PASS", "s3cret:pass")
}

fn lead() -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "number": "+1 555 0100",
        "role": "Founder",
        "priorityProcess": "lead follow-up & reporting",
        "timeSpent": "6–20",
        "tools": "",
        "timeline": "30d",
        "budget": "planning",
        "teamSize": "6-20",
        "website": ""
    })
}

async fn submit(server: &str, body: &Value) -> (StatusCode, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{server}/api/contact"))
        .json(body)
        .send()
        .await
        .expect("server unreachable");
    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap();
    (status, resp.json().await.unwrap())
}

// ── Relay ────────────────────────────────────────────────────────────

#[tokio::test]
async fn forwards_lead_as_query_with_basic_auth() {
    let (hook_url, seen) = start_hook(StatusCode::OK, r#"{"executionId":"42"}"#).await;
    let server = start_server(relay_settings(&hook_url)).await;

    let (status, body) = submit(&server, &lead()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Form submitted successfully!", "data": { "executionId": "42" } })
    );

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1, "webhook must be called exactly once");
    let (query, auth) = &seen[0];

    let query = query.as_deref().unwrap();
    assert!(query.starts_with("name=Ada%20Lovelace&email=ada%40example.com&"), "{query}");
    assert!(query.contains("priorityProcess=lead%20follow-up%20%26%20reporting"));
    assert!(query.contains("timeSpent=6%E2%80%9320"));
    assert!(query.contains("teamSize=6-20"));
    assert!(query.ends_with("&website="));

    let expected = base64::engine::general_purpose::STANDARD.encode("daiv:s3cret:pass");
    assert_eq!(auth.as_deref(), Some(format!("Basic {expected}").as_str()));
}

#[tokio::test]
async fn upstream_rejection_keeps_status_without_leaking_body() {
    let (hook_url, seen) =
        start_hook(StatusCode::UNAUTHORIZED, "Authorization data is wrong!").await;
    let server = start_server(relay_settings(&hook_url)).await;

    let (status, body) = submit(&server, &lead()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Failed to submit form." }));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn unreachable_webhook_is_internal_error() {
    let server = start_server(relay_settings("http://127.0.0.1:1/webhook/lead")).await;

    let (status, body) = submit(&server, &lead()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal Server Error");
    let error = body["error"].as_str().unwrap();
    assert!(!error.is_empty());
    assert!(!error.contains("127.0.0.1:1"), "webhook address leaked: {error}");
}

#[tokio::test]
async fn missing_settings_never_reach_webhook() {
    let (hook_url, seen) = start_hook(StatusCode::OK, "{}").await;
    let source = StaticSource::new()
        .with("N8N_WEBHOOK_URL", hook_url)
        .with("N8N_AUTH_USER", "daiv");
    let server = start_server(source).await;

    let (status, body) = submit(&server, &lead()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Server configuration error." }));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn each_submission_is_forwarded_independently() {
    let (hook_url, seen) = start_hook(StatusCode::OK, "{}").await;
    let server = start_server(relay_settings(&hook_url)).await;

    for _ in 0..2 {
        let (status, _) = submit(&server, &lead()).await;
        assert_eq!(status, StatusCode::OK);
    }

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, seen[1].0);
}
