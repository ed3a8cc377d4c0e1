//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::ResultFileConfig;
use crate::responder::Responder;

/// Shared application state, cloneable across handlers.
///
/// Built once at startup from the final configuration and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub responder: Arc<Responder>,
}

impl AppState {
    /// Creates a new application state from the result file settings.
    pub fn new(config: &ResultFileConfig) -> Self {
        Self {
            responder: Arc::new(Responder::from_config(config)),
        }
    }
}
