//! reqwest-backed [`WebhookClient`].

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use daiv_core::error::RelayError;
use daiv_core::relay::{WebhookClient, WebhookRequest, WebhookResponse};

/// Sends webhook calls over a shared reqwest connection pool.
///
/// The client keeps reqwest's defaults: no request timeout, redirects
/// followed.
#[derive(Debug, Clone, Default)]
pub struct ReqwestWebhookClient {
    http: reqwest::Client,
}

impl ReqwestWebhookClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured reqwest client.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl WebhookClient for ReqwestWebhookClient {
    async fn get(&self, request: WebhookRequest) -> Result<WebhookResponse, RelayError> {
        // `without_url` keeps the webhook address and the lead data out of
        // error messages, which are returned to the caller.
        let resp = self
            .http
            .get(&request.url)
            .header(AUTHORIZATION, &request.authorization)
            .send()
            .await
            .map_err(|e| RelayError::Transport {
                reason: e.without_url().to_string(),
            })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| RelayError::Transport {
            reason: e.without_url().to_string(),
        })?;

        Ok(WebhookResponse { status, body })
    }
}
