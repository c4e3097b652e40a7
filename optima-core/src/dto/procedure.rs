//! RPC procedure call payload

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a `POST /api/procedure` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureCall {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub kwargs: Map<String, Value>,
}

impl ProcedureCall {
    /// Creates a call with positional arguments only
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
            kwargs: Map::new(),
        }
    }

    /// Adds a keyword argument
    pub fn with_kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }
}
