//! Result file handler.
//!
//! Answers every request, whatever its method or path, with the status code
//! and body currently recorded in the result file.

use axum::{extract::State, response::Response};

use crate::state::AppState;

/// Serve the result file.
pub async fn handle(State(state): State<AppState>) -> Response {
    state.responder.respond().await
}
