use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::value::Value;

/// Operator recorded for filters written without one (`type:c`).
pub const DEFAULT_OPERATOR: &str = "default";

/// A single `field:[operator]value` comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub operator: String,
    pub value: FilterValue,
}

impl Filter {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: FilterValue,
    ) -> Self {
        Filter {
            field: field.into(),
            operator: operator.into(),
            value,
        }
    }
}

/// Scalar literal as written in the query.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(Decimal),
    Boolean(bool),
    Date(NaiveDate),
}

/// The value side of a filter: a literal or a bracketed list.
///
/// # Examples
/// ```text
/// tag:old            // Literal(String("old"))
/// tag:[old, new]     // List([Literal(..), Literal(..)])
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Literal(Literal),
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Decode into a host value. Lists decode member by member, in order.
    pub fn decode(&self) -> Value {
        match self {
            FilterValue::Literal(literal) => match literal {
                Literal::String(s) => Value::String(s.clone()),
                Literal::Number(n) => Value::Number(*n),
                Literal::Boolean(b) => Value::Boolean(*b),
                Literal::Date(d) => Value::Date(*d),
            },
            FilterValue::List(items) => Value::List(items.iter().map(FilterValue::decode).collect()),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Literal(Literal::String(s.to_string()))
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Literal(Literal::Number(Decimal::from(n)))
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Literal(Literal::Boolean(b))
    }
}
