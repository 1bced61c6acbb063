//! SQL escaping for identifiers and parameter values (MySQL dialect).
//!
//! The placeholder rendering never inlines values; [`format_sql`] is the
//! inverse operation, substituting escaped values back into the `?`
//! placeholders for logging or for drivers without parameter binding.
//!
//! # Examples
//!
//! ```
//! use facets_sql::Value;
//! use facets_sql::escape::{escape_id, format_sql};
//!
//! assert_eq!(escape_id("user.name"), "`user`.`name`");
//!
//! let sql = format_sql("`age` > ?", &[Value::from(14)]);
//! assert_eq!(sql, "`age` > 14");
//! ```

use crate::value::Value;

/// Quote an identifier. Each dot-separated part is wrapped in backticks and
/// embedded backticks are doubled.
pub fn escape_id(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 2);
    result.push('`');
    for c in name.chars() {
        match c {
            '`' => result.push_str("``"),
            '.' => result.push_str("`.`"),
            c => result.push(c),
        }
    }
    result.push('`');
    result
}

/// Quote a string literal, backslash-escaping the characters MySQL treats
/// specially.
pub fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('\'');
    for c in s.chars() {
        match c {
            '\0' => result.push_str("\\0"),
            '\u{8}' => result.push_str("\\b"),
            '\t' => result.push_str("\\t"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\u{1a}' => result.push_str("\\Z"),
            '"' => result.push_str("\\\""),
            '\'' => result.push_str("\\'"),
            '\\' => result.push_str("\\\\"),
            c => result.push(c),
        }
    }
    result.push('\'');
    result
}

/// Render a value as an SQL literal.
pub fn escape_value(value: &Value) -> String {
    match value {
        Value::String(s) => escape_string(s),
        Value::Number(n) => n.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
        Value::List(items) => format!(
            "({})",
            items.iter().map(escape_value).collect::<Vec<_>>().join(", ")
        ),
    }
}

/// Substitute each `?` in `sql`, left to right, with the matching escaped
/// parameter. Placeholders without a parameter are left as they are.
pub fn format_sql(sql: &str, params: &[Value]) -> String {
    let mut params = params.iter();
    let mut result = String::with_capacity(sql.len());

    for c in sql.chars() {
        match c {
            '?' => match params.next() {
                Some(value) => result.push_str(&escape_value(value)),
                None => result.push('?'),
            },
            c => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_id() {
        assert_eq!(escape_id("age"), "`age`");
        assert_eq!(escape_id("a`b"), "`a``b`");
        assert_eq!(escape_id("t.col"), "`t`.`col`");
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("a OR 1=1"), "'a OR 1=1'");
        assert_eq!(escape_string("it's"), "'it\\'s'");
        assert_eq!(escape_string("line\nbreak"), "'line\\nbreak'");
        assert_eq!(escape_string("back\\slash"), "'back\\\\slash'");
    }

    #[test]
    fn test_escape_list() {
        let list = Value::List(vec![Value::from("a"), Value::from(2), Value::from(true)]);
        assert_eq!(escape_value(&list), "('a', 2, true)");
    }

    #[test]
    fn test_format_sql_fills_in_order() {
        let sql = "(`age` > ?) AND (name LIKE CONCAT('%', ?, '%'))";
        let params = vec![Value::from(14), Value::from("jo")];
        assert_eq!(
            format_sql(sql, &params),
            "(`age` > 14) AND (name LIKE CONCAT('%', 'jo', '%'))"
        );
    }

    #[test]
    fn test_format_sql_missing_params() {
        assert_eq!(format_sql("a = ? AND b = ?", &[Value::from(1)]), "a = 1 AND b = ?");
    }
}
