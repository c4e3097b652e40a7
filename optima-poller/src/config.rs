//! Poller configuration
//!
//! Connection and timing settings for polling server-side tasks.

use std::time::Duration;

/// Delay between consecutive status checks of one task
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Poller configuration
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// API base URL (e.g., "http://localhost:8080")
    pub api_url: String,

    /// How long to wait after a `started` response before checking again
    pub poll_interval: Duration,
}

impl PollerConfig {
    /// Creates a new configuration with the default interval
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Overrides the polling interval
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        Ok(())
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080".to_string())
    }
}
