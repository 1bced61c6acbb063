//! Compile facets queries from the command line

use std::collections::BTreeMap;

use super::{CliError, params_to_json, parse_field};
use crate::{
    Compiler, Options, Policies, available_policies, escape::format_sql, load_policies, parse,
    validate_policies,
};

/// How the compiled SQL is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Placeholder SQL and its parameters as JSON
    #[default]
    Escaped,
    /// Values inlined without escaping (trusted input only)
    Literal,
    /// Placeholder SQL with the escaped parameters substituted back in
    Inline,
}

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// The facets query to compile
    pub query: String,
    /// JSON policy table
    pub policies: Option<String>,
    /// Extra `NAME=POLICY` fields, applied over the policy table
    pub fields: Vec<String>,
    pub options: Options,
    pub mode: OutputMode,
}

/// Result of a compile operation
#[derive(Debug)]
pub enum CompileOutput {
    /// Plain SQL text
    Sql(String),
    /// `{"sql": ..., "params": [...]}`
    Escaped(serde_json::Value),
}

/// Assemble the enabled fields from the policy file and `--field` flags
pub fn build_policies(options: &CompileOptions) -> Result<Policies, CliError> {
    let available = available_policies();

    let mut enabled = match &options.policies {
        Some(json) => load_policies(json, &available)?,
        None => Policies::new(),
    };

    for spec in &options.fields {
        let (name, standard) = parse_field(spec)?;
        enabled.insert(name, standard);
    }

    validate_policies(&enabled, &available)?;
    Ok(enabled)
}

/// Execute a facets compile operation
pub fn execute_compile(options: &CompileOptions) -> Result<CompileOutput, CliError> {
    let enabled = build_policies(options)?;
    let compiler = Compiler::with_options(options.options);

    let output = match options.mode {
        OutputMode::Literal => CompileOutput::Sql(compiler.compile_literal(&enabled, &options.query)?),
        OutputMode::Inline => {
            let escaped = compiler.compile_params(&enabled, &options.query)?;
            CompileOutput::Sql(format_sql(&escaped.sql, &escaped.params))
        }
        OutputMode::Escaped => {
            let escaped = compiler.compile_params(&enabled, &options.query)?;
            CompileOutput::Escaped(serde_json::json!({
                "sql": escaped.sql,
                "params": params_to_json(&escaped.params),
            }))
        }
    };
    Ok(output)
}

/// Only validate the query syntax
pub fn execute_check(query: &str) -> Result<(), CliError> {
    parse(query)?;
    Ok(())
}

/// The built-in named policies, sorted by name
pub fn policies_json() -> Result<serde_json::Value, CliError> {
    let sorted: BTreeMap<_, _> = available_policies().into_iter().collect();
    serde_json::to_value(sorted).map_err(|e| CliError::Config(e.into()))
}
