//! Status-check request descriptor

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::procedure::ProcedureCall;

/// Name of the procedure that reports the state of a server-side task
pub const CHECK_TASK: &str = "check_task";

/// Everything needed to issue one status-check call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusRequest {
    /// Plain `GET` of a path relative to the API base URL
    Get { path: String },
    /// RPC call through `POST /api/procedure`
    Procedure(ProcedureCall),
}

impl StatusRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::Get { path: path.into() }
    }

    /// `check_task(task_id)` procedure call
    pub fn check_task(task_id: impl Into<String>) -> Self {
        Self::Procedure(ProcedureCall::new(
            CHECK_TASK,
            vec![Value::String(task_id.into())],
        ))
    }
}

impl From<ProcedureCall> for StatusRequest {
    fn from(call: ProcedureCall) -> Self {
        Self::Procedure(call)
    }
}

impl fmt::Display for StatusRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get { path } => write!(f, "GET {}", path),
            Self::Procedure(call) => {
                write!(f, "{}({})", call.name, Value::Array(call.args.clone()))
            }
        }
    }
}
