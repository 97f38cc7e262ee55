//! Session configuration.

use std::time::Duration;

/// Configuration for session behavior.
///
/// Sensible defaults are provided; override only the fields you care about.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long the server waits for the next request before dropping the
    /// connection.
    ///
    /// Default: 300 seconds.
    pub idle_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(300),
        }
    }
}
