//! Common types used across CLI modules

use anyhow::{Context, Result};
use serde_json::{Map, Value};

/// Parses positional procedure arguments given as a JSON array
///
/// A missing value means no arguments.
pub fn parse_args(input: Option<&str>) -> Result<Vec<Value>> {
    let Some(input) = input else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Value>(input).context("--args must be valid JSON")? {
        Value::Array(args) => Ok(args),
        other => anyhow::bail!("--args must be a JSON array, got {}", other),
    }
}

/// Parses keyword procedure arguments given as a JSON object
pub fn parse_kwargs(input: Option<&str>) -> Result<Map<String, Value>> {
    let Some(input) = input else {
        return Ok(Map::new());
    };

    match serde_json::from_str::<Value>(input).context("--kwargs must be valid JSON")? {
        Value::Object(kwargs) => Ok(kwargs),
        other => anyhow::bail!("--kwargs must be a JSON object, got {}", other),
    }
}
