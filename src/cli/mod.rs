//! CLI support for facets-sql
//!
//! Provides programmatic access to the `facets` command so other tools can
//! embed it.

mod compile;
mod convert;

pub use compile::{
    CompileOptions, CompileOutput, OutputMode, build_policies, execute_check, execute_compile,
    policies_json,
};
pub use convert::{params_to_json, parse_field, value_to_json};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Compile error: {0}")]
    Compile(#[from] crate::CompileError),

    #[error("Policy error: {0}")]
    Config(#[from] crate::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Invalid field '{0}', expected NAME=POLICY (e.g. age=number)")]
    InvalidField(String),
}
