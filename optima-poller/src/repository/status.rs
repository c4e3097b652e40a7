//! Status repository
//!
//! Issues the status-check call described by a [`StatusRequest`].

use async_trait::async_trait;
use optima_client::{ClientError, OptimaClient};
use optima_core::domain::task::TaskStatus;
use optima_core::dto::status::StatusRequest;
use std::sync::Arc;

/// Repository trait for status checks against the remote API
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Performs one status-check request
    ///
    /// # Arguments
    /// * `request` - Endpoint path or procedure call to issue
    ///
    /// # Returns
    /// The full response body, or the transport/API failure
    async fn check_status(&self, request: &StatusRequest) -> Result<TaskStatus, ClientError>;
}

/// HTTP implementation of StatusRepository
pub struct HttpStatusRepository {
    client: Arc<OptimaClient>,
}

impl HttpStatusRepository {
    /// Creates a new HTTP status repository
    ///
    /// # Arguments
    /// * `client` - Shared API client
    pub fn new(client: Arc<OptimaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusRepository for HttpStatusRepository {
    async fn check_status(&self, request: &StatusRequest) -> Result<TaskStatus, ClientError> {
        self.client.check_status(request).await
    }
}
