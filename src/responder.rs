//! The status responder.
//!
//! Reads the result file fresh on every call and turns it into an HTTP
//! response. Nothing is cached between requests: concurrent requests may see
//! different content if the health checker rewrites the file in between.

use std::path::{Path, PathBuf};

use axum::response::{IntoResponse, Response};

use crate::config::{ReadErrorPolicy, ResultFileConfig};
use crate::error::ResultError;
use crate::result::StatusFileContents;

/// Exit code used when the result file cannot be read under `ReadErrorPolicy::Exit`
pub const READ_ERROR_EXIT_CODE: i32 = 1;

#[derive(Debug, Clone)]
pub struct Responder {
    result_file: PathBuf,
    on_read_error: ReadErrorPolicy,
}

impl Responder {
    pub fn new(result_file: impl Into<PathBuf>, on_read_error: ReadErrorPolicy) -> Self {
        Self {
            result_file: result_file.into(),
            on_read_error,
        }
    }

    pub fn from_config(config: &ResultFileConfig) -> Self {
        Self::new(&config.path, config.on_read_error)
    }

    pub fn result_file(&self) -> &Path {
        &self.result_file
    }

    pub fn on_read_error(&self) -> ReadErrorPolicy {
        self.on_read_error
    }

    /// Read and parse the result file.
    pub async fn load(&self) -> Result<StatusFileContents, ResultError> {
        let bytes = tokio::fs::read(&self.result_file)
            .await
            .map_err(|source| ResultError::Read {
                path: self.result_file.clone(),
                source,
            })?;
        StatusFileContents::from_bytes(&bytes)
    }

    /// Build the response for one request.
    ///
    /// Malformed content is answered with 500 and logged. An unreadable file
    /// either terminates the process or is answered with 500, depending on
    /// the configured policy.
    pub async fn respond(&self) -> Response {
        match self.load().await {
            Ok(contents) => {
                tracing::debug!(status = contents.status.as_u16(), "Serving result file");
                (contents.status, contents.body).into_response()
            }
            Err(err) if err.is_read_error() => match self.on_read_error {
                ReadErrorPolicy::Exit => {
                    tracing::error!(error = %err, "Result file unreadable, exiting");
                    std::process::exit(READ_ERROR_EXIT_CODE);
                }
                ReadErrorPolicy::Respond => {
                    tracing::error!(error = %err, "Result file unreadable");
                    err.into_response()
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "Malformed result file");
                err.into_response()
            }
        }
    }
}
