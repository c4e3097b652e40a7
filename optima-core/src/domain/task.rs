//! Task domain types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Status value reported while a server-side task is still running.
///
/// Any other value is terminal.
pub const STARTED: &str = "started";

/// Response body of a status-check request
///
/// Only `status` is interpreted; every other field is kept verbatim so the
/// full body can be handed to whoever consumes the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskStatus {
    /// Creates a status with no extra fields
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            extra: Map::new(),
        }
    }

    /// Adds an extra field to the response body
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// True while the server reports the task as still running
    pub fn is_started(&self) -> bool {
        self.status == STARTED
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_started()
    }

    /// Returns a field of the response body other than `status`
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.extra.get(field)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status)
    }
}

/// Builds the registry key for a task belonging to an object (project, run, ...)
///
/// # Example
/// ```
/// use optima_core::domain::task::task_key;
///
/// assert_eq!(task_key("proj1", "task9"), "proj1:task9");
/// ```
pub fn task_key(object_id: impl fmt::Display, task_id: impl fmt::Display) -> String {
    format!("{}:{}", object_id, task_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_started_is_exact_match() {
        assert!(TaskStatus::new("started").is_started());
        assert!(TaskStatus::new("Started").is_terminal());
        assert!(TaskStatus::new(" started").is_terminal());
        assert!(TaskStatus::new("completed").is_terminal());
    }

    #[test]
    fn test_extra_fields_survive_decoding() {
        let body = json!({
            "status": "completed",
            "result": 42,
            "error_text": null,
        });

        let status: TaskStatus = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(status.status, "completed");
        assert_eq!(status.get("result"), Some(&json!(42)));
        assert_eq!(serde_json::to_value(&status).unwrap(), body);
    }

    #[test]
    fn test_missing_status_is_rejected() {
        let result = serde_json::from_value::<TaskStatus>(json!({ "result": 1 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_with_field() {
        let status = TaskStatus::new("completed").with_field("result", 42);
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            json!({ "status": "completed", "result": 42 })
        );
    }
}
