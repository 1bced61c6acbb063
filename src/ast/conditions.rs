use crate::ast::Filter;

/// Root of a parsed query.
///
/// An empty query (or one made only of whitespace) has no conditions and
/// compiles to an empty fragment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Conditions {
    pub conditions: Option<Condition>,
}

impl Conditions {
    pub fn new(condition: Condition) -> Self {
        Conditions {
            conditions: Some(condition),
        }
    }

    pub fn empty() -> Self {
        Conditions { conditions: None }
    }
}

/// A boolean tree whose leaves are filters.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Both sides must hold
    ///
    /// # Example
    /// ```text
    /// age:>14 rank:<23
    /// age:>14 AND rank:<23
    /// ```
    And {
        left: Box<Condition>,
        right: Box<Condition>,
    },

    /// Either side must hold
    ///
    /// # Example
    /// ```text
    /// tag:old OR tag:new
    /// ```
    Or {
        left: Box<Condition>,
        right: Box<Condition>,
    },

    /// Leaf `field:[operator]value`
    Filter(Filter),
}

impl Condition {
    pub fn and(left: Condition, right: Condition) -> Self {
        Condition::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Condition, right: Condition) -> Self {
        Condition::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}
