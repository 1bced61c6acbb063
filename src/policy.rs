//! Per-field policies.
//!
//! A policy says what type a field's value must have, which operators may be
//! used on it, and which term builder compiles it. Fields can declare a
//! policy inline or refer to one of the shared named policies by name:
//!
//! ```json
//! {
//!   "name": "string",
//!   "age": { "type": "number", "operators": ["=", ">", "<"], "term": "operator" },
//!   "sku": { "type": "string", "operators": ["="], "pattern": "^[A-Z]{3}-[0-9]+$" }
//! }
//! ```
//!
//! Policy tables are plain configuration: build them once at startup and
//! share them read-only.

use std::collections::HashMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::term::TermKind;
use crate::value::ValueType;

/// Rules for a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Type the decoded value must have
    #[serde(rename = "type")]
    pub value_type: ValueType,

    /// Allowed operators. The first one replaces the `default` sentinel.
    pub operators: Vec<String>,

    /// Builder used to compile the filter
    #[serde(default)]
    pub term: TermKind,

    /// Regular expression the value's text must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
}

/// A policy's regular expression, compiled once when the policy is built.
///
/// An invalid expression is kept together with its error and reported by
/// [`validate_policies`]; it never matches.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Pattern {
    source: String,
    compiled: Result<Regex, regex::Error>,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let compiled = Regex::new(&source);
        Pattern { source, compiled }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn regex(&self) -> Result<&Regex, &regex::Error> {
        self.compiled.as_ref()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Pattern::new(source)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.source
    }
}

impl Policy {
    pub fn new<I, S>(value_type: ValueType, operators: I, term: TermKind) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Policy {
            value_type,
            operators: operators.into_iter().map(Into::into).collect(),
            term,
            pattern: None,
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(Pattern::new(pattern));
        self
    }

    /// The operator substituted for `default`.
    pub fn default_operator(&self) -> Option<&str> {
        self.operators.first().map(String::as_str)
    }

    pub fn allows(&self, operator: &str) -> bool {
        self.operators.iter().any(|op| op == operator)
    }
}

/// A field's policy: a shared policy referenced by name, or an inline one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Standard {
    Named(String),
    Policy(Policy),
}

impl From<&str> for Standard {
    fn from(name: &str) -> Self {
        Standard::Named(name.to_string())
    }
}

impl From<Policy> for Standard {
    fn from(policy: Policy) -> Self {
        Standard::Policy(policy)
    }
}

/// Fields enabled for a query, keyed by field name.
pub type Policies = HashMap<String, Standard>;

/// Shared policies that fields can refer to by name.
pub type PolicyMap = HashMap<String, Policy>;

const COMPARISON_OPERATORS: [&str; 6] = ["=", "!=", ">", ">=", "<", "<="];

/// The built-in named policies: `number`, `string`, `boolean` and `date`.
pub fn available_policies() -> PolicyMap {
    HashMap::from([
        (
            "number".to_string(),
            Policy::new(ValueType::Number, COMPARISON_OPERATORS, TermKind::Operator),
        ),
        (
            "string".to_string(),
            Policy::new(ValueType::String, ["="], TermKind::Like),
        ),
        (
            "boolean".to_string(),
            Policy::new(ValueType::Boolean, ["="], TermKind::Operator),
        ),
        (
            "date".to_string(),
            Policy::new(ValueType::Date, COMPARISON_OPERATORS, TermKind::Operator),
        ),
    ])
}

/// Resolve a field's standard to a concrete policy.
pub fn resolve_policy<'a>(standard: &'a Standard, available: &'a PolicyMap) -> Option<&'a Policy> {
    match standard {
        Standard::Named(name) => available.get(name),
        Standard::Policy(policy) => Some(policy),
    }
}

/// Check that every field resolves to a usable policy.
pub fn validate_policies(enabled: &Policies, available: &PolicyMap) -> Result<(), ConfigError> {
    // Sorted so the reported error does not depend on hash order.
    let mut fields: Vec<_> = enabled.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, standard) in fields {
        let policy = resolve_policy(standard, available).ok_or_else(|| {
            let name = match standard {
                Standard::Named(name) => name.clone(),
                Standard::Policy(_) => String::new(),
            };
            ConfigError::UnknownPolicy {
                field: field.clone(),
                name,
            }
        })?;

        if policy.operators.is_empty() {
            return Err(ConfigError::NoOperators {
                field: field.clone(),
            });
        }

        if let Some(pattern) = &policy.pattern {
            pattern.regex().map_err(|source| ConfigError::InvalidPattern {
                field: field.clone(),
                source: source.clone(),
            })?;
        }
    }
    Ok(())
}

/// Parse a JSON policy table and validate it against `available`.
pub fn load_policies(json: &str, available: &PolicyMap) -> Result<Policies, ConfigError> {
    let enabled: Policies = serde_json::from_str(json)?;
    validate_policies(&enabled, available)?;
    tracing::debug!(fields = enabled.len(), "loaded policy table");
    Ok(enabled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_named_and_inline() {
        let available = available_policies();

        let named = Standard::from("string");
        let policy = resolve_policy(&named, &available).unwrap();
        assert_eq!(policy.value_type, ValueType::String);
        assert_eq!(policy.term, TermKind::Like);

        let inline = Standard::from(Policy::new(ValueType::Number, [">"], TermKind::Operator));
        let policy = resolve_policy(&inline, &available).unwrap();
        assert_eq!(policy.operators, vec![">".to_string()]);

        assert!(resolve_policy(&Standard::from("missing"), &available).is_none());
    }

    #[test]
    fn test_pattern_compiled_with_policy() {
        let policy: Policy = serde_json::from_str(
            r#"{ "type": "string", "operators": ["="], "pattern": "^[a-z]+$" }"#,
        )
        .unwrap();
        let pattern = policy.pattern.as_ref().unwrap();
        assert_eq!(pattern.as_str(), "^[a-z]+$");
        assert!(pattern.regex().unwrap().is_match("abc"));

        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(json["pattern"], "^[a-z]+$");

        assert!(Pattern::new("([a-z").regex().is_err());
    }

    #[test]
    fn test_default_operator_is_first() {
        let policy = Policy::new(ValueType::Number, [">=", "="], TermKind::Operator);
        assert_eq!(policy.default_operator(), Some(">="));
        assert!(policy.allows("="));
        assert!(!policy.allows("<"));
    }
}
