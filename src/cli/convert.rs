//! Value <-> JSON and flag conversion utilities

use std::str::FromStr;

use super::CliError;
use crate::{Standard, Value};

/// Convert a filter value to serde_json::Value
pub fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::String(s) => serde_json::Value::String(s.clone()),
        // Written from the decimal's text so the scale survives (`22.40`).
        Value::Number(n) => serde_json::Number::from_str(&n.to_string())
            .map(serde_json::Value::Number)
            .unwrap_or_else(|_| serde_json::Value::String(n.to_string())),
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
        Value::List(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
    }
}

/// Convert a parameter list to a JSON array
pub fn params_to_json(params: &[Value]) -> serde_json::Value {
    serde_json::Value::Array(params.iter().map(value_to_json).collect())
}

/// Parse a `NAME=POLICY` flag into a field enabled with a named policy
pub fn parse_field(spec: &str) -> Result<(String, Standard), CliError> {
    match spec.split_once('=') {
        Some((name, policy)) if !name.is_empty() && !policy.is_empty() => {
            Ok((name.to_string(), Standard::from(policy)))
        }
        _ => Err(CliError::InvalidField(spec.to_string())),
    }
}
