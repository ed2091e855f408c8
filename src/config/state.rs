// Application state module
// Read-only state shared by every request

use std::sync::Arc;

use super::types::Config;
use crate::logger::{AccessLog, StdoutAccessLog};

/// Application state
pub struct AppState {
    pub config: Config,
    /// Sink receiving one entry per completed request
    pub access_log: Arc<dyn AccessLog>,
}

impl AppState {
    /// Create state that writes access lines to stdout
    pub fn new(config: &Config) -> Self {
        Self::with_access_log(config, Arc::new(StdoutAccessLog))
    }

    /// Create state with a custom access log sink
    pub fn with_access_log(config: &Config, access_log: Arc<dyn AccessLog>) -> Self {
        Self {
            config: config.clone(),
            access_log,
        }
    }
}
