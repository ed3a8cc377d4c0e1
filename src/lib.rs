//! status-responder: serve a health checker's result file over HTTP.
//!
//! A separate process performs the actual health checks and writes a result
//! file of the form `<status code> SPACE <response text>`. This crate answers
//! every HTTP request with that status code and text, re-reading the file each
//! time, so external probes see the latest verdict.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod responder;
pub mod result;
pub mod routes;
pub mod state;

pub use error::ResultError;
pub use responder::Responder;
pub use result::StatusFileContents;
