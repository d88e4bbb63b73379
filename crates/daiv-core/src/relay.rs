//! Submission relay to the n8n automation webhook.
//!
//! The relay turns a submitted JSON object into query parameters, attaches
//! HTTP Basic credentials, and issues exactly one GET to the configured
//! webhook. Configuration is read through a [`ConfigSource`] on every call,
//! and the outbound request goes through a [`WebhookClient`], so both can be
//! swapped in tests.
//!
//! No retries, no timeout override, no idempotency key: a duplicate
//! submission produces a duplicate webhook call.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use base64::Engine as _;
use serde_json::Value;
use tracing::{error, info};

use crate::error::RelayError;
use crate::lead::{form_pairs, LeadSubmission};

/// Environment key holding the webhook base URL.
pub const WEBHOOK_URL_VAR: &str = "N8N_WEBHOOK_URL";
/// Environment key holding the Basic-auth username.
pub const AUTH_USER_VAR: &str = "N8N_AUTH_USER";
/// Environment key holding the Basic-auth password.
pub const AUTH_PASS_VAR: &str = "N8N_AUTH_PASS";

// ── Configuration ────────────────────────────────────────────────────

/// Read access to process-wide configuration values.
pub trait ConfigSource: Send + Sync {
    /// Return the value for `key`, or `None` if it is not set.
    fn get(&self, key: &str) -> Option<String>;
}

/// [`ConfigSource`] backed by the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// [`ConfigSource`] backed by a fixed map.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    values: HashMap<String, String>,
}

impl StaticSource {
    /// An empty source; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigSource for StaticSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Resolved webhook settings.
#[derive(Clone)]
pub struct RelayConfig {
    pub webhook_url: String,
    pub auth_user: String,
    auth_pass: String,
}

impl RelayConfig {
    /// Read all three webhook settings from `source`.
    ///
    /// Empty values count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::MissingConfig`] naming every absent key.
    pub fn resolve(source: &dyn ConfigSource) -> Result<Self, RelayError> {
        let read = |key: &str| source.get(key).filter(|v| !v.is_empty());

        let webhook_url = read(WEBHOOK_URL_VAR);
        let auth_user = read(AUTH_USER_VAR);
        let auth_pass = read(AUTH_PASS_VAR);

        match (webhook_url, auth_user, auth_pass) {
            (Some(webhook_url), Some(auth_user), Some(auth_pass)) => Ok(Self {
                webhook_url,
                auth_user,
                auth_pass,
            }),
            (url, user, pass) => {
                let missing = [
                    (WEBHOOK_URL_VAR, url.is_none()),
                    (AUTH_USER_VAR, user.is_none()),
                    (AUTH_PASS_VAR, pass.is_none()),
                ]
                .into_iter()
                .filter_map(|(key, absent)| absent.then_some(key))
                .collect();
                Err(RelayError::MissingConfig { missing })
            }
        }
    }

    /// The `Authorization` header value: `Basic base64(user:pass)`.
    pub fn authorization(&self) -> String {
        let credentials = format!("{}:{}", self.auth_user, self.auth_pass);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("webhook_url", &without_query(&self.webhook_url))
            .field("auth_user", &"[redacted]")
            .field("auth_pass", &"[redacted]")
            .finish()
    }
}

/// `url` up to its query or fragment, which may carry tokens.
fn without_query(url: &str) -> &str {
    url.find(['?', '#']).map_or(url, |end| &url[..end])
}

/// Append `pairs` to `base` as a percent-encoded query string.
///
/// Uses `&` when `base` already has a query and leaves `base` untouched when
/// there are no pairs.
pub fn webhook_url(base: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return base.to_owned();
    }

    let query = pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}

// ── Submission parsing ───────────────────────────────────────────────

/// How submitted fields are checked before forwarding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Forward any JSON object as-is.
    #[default]
    Permissive,
    /// Require a well-formed lead (see [`LeadSubmission::validate`]).
    Strict,
}

/// Parse a request body into query pairs.
///
/// # Errors
///
/// Returns [`RelayError::MalformedSubmission`] when the body is not a JSON
/// object and [`RelayError::InvalidSubmission`] when strict validation fails.
pub fn submission_pairs(
    body: &[u8],
    validation: Validation,
) -> Result<Vec<(String, String)>, RelayError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| RelayError::MalformedSubmission {
            reason: e.to_string(),
        })?;

    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(RelayError::MalformedSubmission {
                reason: format!("expected a JSON object, got {}", json_kind(&other)),
            });
        }
    };

    match validation {
        Validation::Permissive => Ok(form_pairs(&object)),
        Validation::Strict => Ok(LeadSubmission::validate(&object)?.query_pairs()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Webhook client ───────────────────────────────────────────────────

/// A fully built outbound webhook call.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookRequest {
    /// Webhook URL including the query string.
    pub url: String,
    /// `Authorization` header value.
    pub authorization: String,
}

impl fmt::Debug for WebhookRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookRequest")
            .field("url", &"[redacted]")
            .field("authorization", &"[redacted]")
            .finish()
    }
}

/// The webhook's answer, status and raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

impl WebhookResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues the outbound GET.
///
/// Implementations send no request body, follow the platform's default
/// timeout behaviour, and report connection-level failures as
/// [`RelayError::Transport`]. Any HTTP status is a successful call.
#[async_trait::async_trait]
pub trait WebhookClient: Send + Sync {
    /// Perform a single GET with the request's URL and `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Transport`] if no response was received.
    async fn get(&self, request: WebhookRequest) -> Result<WebhookResponse, RelayError>;
}

// ── Relay ────────────────────────────────────────────────────────────

/// Forwards submissions to the webhook.
#[derive(Clone)]
pub struct Relay {
    source: Arc<dyn ConfigSource>,
    client: Arc<dyn WebhookClient>,
}

impl Relay {
    pub fn new(source: Arc<dyn ConfigSource>, client: Arc<dyn WebhookClient>) -> Self {
        Self { source, client }
    }

    /// Relay a raw request body.
    ///
    /// Configuration is checked before the body is parsed, so a missing
    /// setting always wins over a malformed submission. Returns the
    /// webhook's JSON response on success.
    ///
    /// # Errors
    ///
    /// - [`RelayError::MissingConfig`]: a webhook setting is absent; no
    ///   request was made.
    /// - [`RelayError::MalformedSubmission`] / [`RelayError::InvalidSubmission`]:
    ///   the body could not be turned into query pairs; no request was made.
    /// - [`RelayError::Transport`]: the request could not be completed.
    /// - [`RelayError::UpstreamRejected`]: the webhook returned a non-2xx status.
    /// - [`RelayError::MalformedUpstream`]: the 2xx body is not JSON.
    pub async fn forward(&self, body: &[u8], validation: Validation) -> Result<Value, RelayError> {
        let config = RelayConfig::resolve(self.source.as_ref()).inspect_err(|e| {
            error!(error = %e, "relay is not configured, rejecting submission");
        })?;

        let pairs = submission_pairs(body, validation).inspect_err(|e| {
            error!(error = %e, "failed to read submission");
        })?;

        self.send(&config, &pairs).await
    }

    /// Send already-built query pairs to the webhook described by `config`.
    ///
    /// # Errors
    ///
    /// Same as [`Relay::forward`], minus the configuration and parsing cases.
    pub async fn send(
        &self,
        config: &RelayConfig,
        pairs: &[(String, String)],
    ) -> Result<Value, RelayError> {
        let request = WebhookRequest {
            url: webhook_url(&config.webhook_url, pairs),
            authorization: config.authorization(),
        };

        let response = self.client.get(request).await.inspect_err(|e| {
            error!(error = %e, "webhook request failed");
        })?;

        if !response.is_success() {
            error!(
                status = response.status,
                body = %response.body,
                "webhook rejected submission"
            );
            return Err(RelayError::UpstreamRejected {
                status: response.status,
                body: response.body,
            });
        }

        let data: Value =
            serde_json::from_str(&response.body).map_err(|e| RelayError::MalformedUpstream {
                reason: e.to_string(),
            })?;

        info!(
            status = response.status,
            fields = pairs.len(),
            "submission forwarded to webhook"
        );
        Ok(data)
    }
}

impl fmt::Debug for Relay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relay").finish_non_exhaustive()
    }
}
