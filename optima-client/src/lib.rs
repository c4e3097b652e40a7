//! Optima HTTP Client
//!
//! A small, typed HTTP client for the Optima web API.
//!
//! The API exposes most of its functionality through a single RPC endpoint
//! (`POST /api/procedure`) plus a handful of plain `GET` resources. Long-running
//! work such as calibration or optimization runs as a server-side task whose
//! progress is read with status-check requests.
//!
//! # Example
//!
//! ```no_run
//! use optima_client::OptimaClient;
//!
//! #[tokio::main]
//! async fn main() -> optima_client::Result<()> {
//!     let client = OptimaClient::new("http://localhost:8080");
//!
//!     let status = client.check_task("calibration-7").await?;
//!     println!("Task is {}", status.status);
//!     Ok(())
//! }
//! ```

pub mod error;
mod procedures;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use optima_core::domain::task::TaskStatus;
pub use optima_core::dto::status::StatusRequest;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Optima API
#[derive(Debug, Clone)]
pub struct OptimaClient {
    /// Base URL of the server (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl OptimaClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use optima_client::OptimaClient;
    ///
    /// let client = OptimaClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use optima_client::OptimaClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = OptimaClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a path onto the base URL
    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-success status codes become [`ClientError::ApiError`] carrying the
    /// response body.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
