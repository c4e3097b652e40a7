//! RPC and status-check endpoints

use crate::OptimaClient;
use crate::error::Result;
use optima_core::domain::task::TaskStatus;
use optima_core::dto::procedure::ProcedureCall;
use optima_core::dto::status::StatusRequest;
use serde::de::DeserializeOwned;
use tracing::debug;

impl OptimaClient {
    // =============================================================================
    // Remote Procedures
    // =============================================================================

    /// Call a remote procedure
    ///
    /// # Arguments
    /// * `call` - Procedure name with positional and keyword arguments
    ///
    /// # Returns
    /// The decoded return value of the procedure
    ///
    /// # Example
    /// ```no_run
    /// # use optima_client::OptimaClient;
    /// # use optima_core::dto::procedure::ProcedureCall;
    /// # use serde_json::{json, Value};
    /// # async fn example() -> optima_client::Result<()> {
    /// let client = OptimaClient::new("http://localhost:8080");
    /// let projects: Value = client
    ///     .call_procedure(&ProcedureCall::new("load_project_summaries", vec![json!("user-1")]))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call_procedure<T: DeserializeOwned>(&self, call: &ProcedureCall) -> Result<T> {
        let url = format!("{}/api/procedure", self.base_url);
        debug!("Calling procedure {}", call.name);
        let response = self.client.post(&url).json(call).send().await?;

        self.handle_response(response).await
    }

    /// GET a path relative to the base URL and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Task Status
    // =============================================================================

    /// Issue a single status-check request
    ///
    /// # Arguments
    /// * `request` - Either a plain GET path or a procedure call
    ///
    /// # Returns
    /// The full response body; `status` tells whether the task is still running
    pub async fn check_status(&self, request: &StatusRequest) -> Result<TaskStatus> {
        match request {
            StatusRequest::Get { path } => self.get_json(path).await,
            StatusRequest::Procedure(call) => self.call_procedure(call).await,
        }
    }

    /// Check a task through the `check_task` procedure
    pub async fn check_task(&self, task_id: &str) -> Result<TaskStatus> {
        self.check_status(&StatusRequest::check_task(task_id)).await
    }
}
