use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::io;
use std::path::PathBuf;

/// Failure to turn the result file into a response.
///
/// Every variant except `Read` describes malformed content written by the
/// health checker; those are answered per request and never stop the server.
#[derive(Debug, thiserror::Error)]
pub enum ResultError {
    #[error("Failed to read result file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid result text format ({0:?})")]
    Format(String),

    #[error("Invalid result text {0:?}: invalid status code")]
    InvalidCode(String),

    #[error("Invalid result text {0:?}: invalid status code value")]
    InvalidCodeValue(String),
}

impl ResultError {
    /// Whether the error is about file access rather than file content.
    pub fn is_read_error(&self) -> bool {
        matches!(self, ResultError::Read { .. })
    }
}

impl IntoResponse for ResultError {
    fn into_response(self) -> Response {
        // Always 500, whatever the cause
        (StatusCode::INTERNAL_SERVER_ERROR, format!("{}\n", self)).into_response()
    }
}
