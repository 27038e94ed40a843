//! Operational event log
//!
//! Lifecycle messages (model loaded, record saved, scoring failed) are tagged
//! with the deployment environment and the configured log group/stream, then
//! emitted as structured tracing events on the `survival::events` target so a
//! subscriber layer can route them to the log destination.

use tracing::{error, info};

/// Tracing target for operational events
pub const EVENT_TARGET: &str = "survival::events";

/// Environment-tagged operational event emitter
#[derive(Debug, Clone)]
pub struct EventLog {
    environment: String,
    log_group: String,
    log_stream: String,
}

impl EventLog {
    pub fn new(
        environment: impl Into<String>,
        log_group: impl Into<String>,
        log_stream: impl Into<String>,
    ) -> Self {
        Self {
            environment: environment.into(),
            log_group: log_group.into(),
            log_stream: log_stream.into(),
        }
    }

    /// Format a message with the environment prefix
    pub fn format(&self, message: &str) -> String {
        format!("{}:: {}", self.environment, message)
    }

    /// Emit an informational event
    pub fn emit(&self, message: &str) {
        info!(
            target: EVENT_TARGET,
            log_group = %self.log_group,
            log_stream = %self.log_stream,
            "{}",
            self.format(message)
        );
    }

    /// Emit a failure event
    pub fn emit_error(&self, message: &str) {
        error!(
            target: EVENT_TARGET,
            log_group = %self.log_group,
            log_stream = %self.log_stream,
            "{}",
            self.format(message)
        );
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new("dev", "survival-api", "default")
    }
}
