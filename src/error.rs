//! Error types for facets-sql.
//!
//! Every failure is returned as data. Compilation stops at the first error.

use thiserror::Error;

use crate::value::{Value, ValueType};

/// Errors produced while compiling a query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("too many filters specified, max: {max} received: {observed}")]
    MaxFiltersExceeded { observed: usize, max: usize },

    #[error("unknown field '{field}' (operator '{operator}', value '{value}')")]
    InvalidField {
        field: String,
        operator: String,
        value: Value,
    },

    #[error("field '{field}' does not allow operator '{operator}' (value '{value}')")]
    InvalidOperator {
        field: String,
        operator: String,
        value: Value,
    },

    #[error(
        "field '{field}' must be type '{expected}', got '{}' (value '{value}')",
        .value.value_type()
    )]
    InvalidFilterType {
        field: String,
        operator: String,
        value: Value,
        expected: ValueType,
    },

    #[error("value '{value}' for field '{field}' does not match the pattern {pattern}")]
    PatternMismatch {
        field: String,
        operator: String,
        value: Value,
        pattern: String,
    },

    #[error("unsupported node kind '{kind}'")]
    UnsupportedNode { kind: String },

    #[error("invalid syntax: {message}")]
    Syntax { message: String },
}

/// Result type for compile operations
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors in policy configuration, reported when the configuration is loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid policy JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("field '{field}' refers to unknown policy '{name}'")]
    UnknownPolicy { field: String, name: String },

    #[error("field '{field}' declares no operators")]
    NoOperators { field: String },

    #[error("field '{field}' has an invalid pattern: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}
