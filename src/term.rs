//! Compiled SQL fragments.
//!
//! A [`Term`] renders itself two ways. [`Term::render_escaped`] produces SQL
//! with `?` placeholders and pushes the values onto a caller-owned list, in
//! the same left-to-right order as the placeholders. [`Term::render_literal`]
//! inlines values without any escaping. It is not safe for untrusted input
//! and exists for debugging and for values that are already known to be safe.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::escape::escape_id;
use crate::value::Value;

/// SQL code.
pub type Sql = String;

/// A compiled fragment.
pub trait Term: fmt::Debug {
    /// Render with values inlined as written. Unsafe for untrusted input.
    fn render_literal(&self) -> Sql;

    /// Render with `?` placeholders, appending each value to `params`.
    fn render_escaped(&self, params: &mut Vec<Value>) -> Sql;
}

/// A validated filter, handed to a leaf builder.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub field: String,
    pub operator: String,
    pub value: Value,
}

/// Compiles to nothing. Used for queries without conditions.
#[derive(Debug, Clone, Default)]
pub struct Empty;

impl Term for Empty {
    fn render_literal(&self) -> Sql {
        String::new()
    }

    fn render_escaped(&self, _params: &mut Vec<Value>) -> Sql {
        String::new()
    }
}

/// Compiles to a plain SQL comparison such as `age > 14`.
#[derive(Debug, Clone)]
pub struct Operator {
    pub field: String,
    pub operator: String,
    pub value: Value,
}

impl Operator {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: Value) -> Self {
        Operator {
            field: field.into(),
            operator: operator.into(),
            value,
        }
    }
}

impl Term for Operator {
    fn render_literal(&self) -> Sql {
        format!("{} {} {}", self.field, self.operator, self.value)
    }

    fn render_escaped(&self, params: &mut Vec<Value>) -> Sql {
        params.push(self.value.clone());
        format!("{} {} ?", escape_id(&self.field), self.operator)
    }
}

/// Compiles to a substring match: `field LIKE '%value%'`.
#[derive(Debug, Clone)]
pub struct Like {
    pub field: String,
    pub value: Value,
}

impl Like {
    pub fn new(field: impl Into<String>, value: Value) -> Self {
        Like {
            field: field.into(),
            value,
        }
    }
}

impl Term for Like {
    fn render_literal(&self) -> Sql {
        format!("{} LIKE '%{}%'", self.field, self.value)
    }

    fn render_escaped(&self, params: &mut Vec<Value>) -> Sql {
        params.push(self.value.clone());
        format!("{} LIKE CONCAT('%', ?, '%')", self.field)
    }
}

/// Boolean keyword joining the two sides of a [`Junction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
}

impl Conjunction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
        }
    }
}

/// Two terms combined with `AND` or `OR`, each side parenthesized.
#[derive(Debug)]
pub struct Junction {
    pub conjunction: Conjunction,
    pub left: Box<dyn Term>,
    pub right: Box<dyn Term>,
}

impl Term for Junction {
    fn render_literal(&self) -> Sql {
        format!(
            "({}) {} ({})",
            self.left.render_literal(),
            self.conjunction.as_sql(),
            self.right.render_literal()
        )
    }

    fn render_escaped(&self, params: &mut Vec<Value>) -> Sql {
        let left = self.left.render_escaped(params);
        let right = self.right.render_escaped(params);
        format!("({}) {} ({})", left, self.conjunction.as_sql(), right)
    }
}

/// Builds a composite term from two compiled children.
pub type Combine = fn(Box<dyn Term>, Box<dyn Term>) -> Box<dyn Term>;

/// Builders the compiler uses for the non-leaf parts of a query.
#[derive(Debug, Clone, Copy)]
pub struct Terms {
    pub and: Combine,
    pub or: Combine,
    pub empty: fn() -> Box<dyn Term>,
}

impl Default for Terms {
    fn default() -> Self {
        Terms { and, or, empty }
    }
}

pub fn and(left: Box<dyn Term>, right: Box<dyn Term>) -> Box<dyn Term> {
    Box::new(Junction {
        conjunction: Conjunction::And,
        left,
        right,
    })
}

pub fn or(left: Box<dyn Term>, right: Box<dyn Term>) -> Box<dyn Term> {
    Box::new(Junction {
        conjunction: Conjunction::Or,
        left,
        right,
    })
}

pub fn empty() -> Box<dyn Term> {
    Box::new(Empty)
}

pub fn operator(spec: FilterSpec) -> Box<dyn Term> {
    Box::new(Operator::new(spec.field, spec.operator, spec.value))
}

/// The operator is implied by `LIKE` and not carried over.
pub fn like(spec: FilterSpec) -> Box<dyn Term> {
    Box::new(Like::new(spec.field, spec.value))
}

/// Which leaf builder a policy uses for its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    #[default]
    Operator,
    Like,
}

impl TermKind {
    pub fn build(self, spec: FilterSpec) -> Box<dyn Term> {
        match self {
            TermKind::Operator => operator(spec),
            TermKind::Like => like(spec),
        }
    }
}
