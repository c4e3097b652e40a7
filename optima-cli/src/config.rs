//! Configuration module
//!
//! Handles CLI configuration including the API URL and polling interval.

use optima_poller::PollerConfig;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Optima API
    pub api_url: String,
    /// Delay between status checks when watching a task
    pub poll_interval: Duration,
}

impl Config {
    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig::new(self.api_url.clone()).with_poll_interval(self.poll_interval)
    }

    /// Rejects settings that would make every command fail
    pub fn validate(&self) -> anyhow::Result<()> {
        self.poller_config().validate()
    }
}
