//! HTTP routes.

pub mod contact;
pub mod ui;

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router with middleware.
///
/// No CORS layer: the form posts from the page this server serves, so
/// browsers refuse cross-origin submissions.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(ui::router())
        .merge(contact::router())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}
