use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A decoded filter value, ready to be embedded in SQL or bound as a parameter.
///
/// Values are produced from the literal nodes of a parsed query. Numbers are
/// kept as exact decimals so that `22.40` renders as written instead of
/// going through a binary float.
///
/// # Examples
///
/// ```
/// use facets_sql::Value;
///
/// let name = Value::from("johan");
/// let age = Value::from(42);
/// let tags = Value::List(vec![Value::from("old"), Value::from("new")]);
///
/// assert_eq!(name.to_string(), "johan");
/// assert_eq!(age.to_string(), "42");
/// assert_eq!(tags.to_string(), "(old, new)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 string (quoted or bare word in the query)
    String(String),

    /// Exact decimal number
    Number(Decimal),

    /// `true` or `false`
    Boolean(bool),

    /// Calendar date written as `YYYY-MM-DD`
    Date(NaiveDate),

    /// Ordered list of values, rendered parenthesized
    List(Vec<Value>),
}

/// The structural type a policy can require of a filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Date,
    Array,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Date => "date",
            ValueType::Array => "array",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Structural type of this value. Lists are always `array`.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::Number(_) => ValueType::Number,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Date(_) => ValueType::Date,
            Value::List(_) => ValueType::Array,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<Decimal> for Value {
    fn from(n: Decimal) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_decimal_keeps_scale() {
        let price = Value::Number(Decimal::from_str("22.40").unwrap());
        assert_eq!(price.to_string(), "22.40");
    }

    #[test]
    fn test_value_types() {
        assert_eq!(Value::from("a").value_type(), ValueType::String);
        assert_eq!(Value::from(1).value_type(), ValueType::Number);
        assert_eq!(Value::from(false).value_type(), ValueType::Boolean);
        assert_eq!(Value::List(vec![]).value_type(), ValueType::Array);
    }

    #[test]
    fn test_date_display() {
        let dob = Value::from(NaiveDate::from_ymd_opt(1989, 7, 24).unwrap());
        assert_eq!(dob.to_string(), "1989-07-24");
        assert_eq!(dob.value_type().to_string(), "date");
    }
}
