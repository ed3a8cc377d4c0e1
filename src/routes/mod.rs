//! HTTP routing.
//!
//! There is a single handler, installed as the fallback so that any method on
//! any path reaches it. Request tracing is enabled via middleware that
//! generates a unique request ID for each incoming request.

pub mod status;

use axum::{middleware, Router};

use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(status::handle)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
