//! Shared application state for the DAIV.PRO server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It holds nothing mutable: the relay reads its
//! webhook settings per request.

use std::sync::Arc;

use daiv_core::relay::{ConfigSource, Relay, Validation, WebhookClient};

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Forwards submissions to the webhook.
    pub relay: Relay,
    /// How submissions are checked before forwarding.
    pub validation: Validation,
}

impl AppState {
    pub fn new(
        source: Arc<dyn ConfigSource>,
        client: Arc<dyn WebhookClient>,
        validation: Validation,
    ) -> Self {
        Self {
            relay: Relay::new(source, client),
            validation,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}
