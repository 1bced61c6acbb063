use crate::ast::{Condition, Conditions, FilterValue};

/// Borrowed view over every kind of node in a parsed query.
///
/// The compiler dispatches on this type. Value nodes are part of the tree
/// but are not compilable on their own.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Conditions(&'a Conditions),
    Condition(&'a Condition),
    Value(&'a FilterValue),
}

impl Node<'_> {
    /// Name of the node kind, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Conditions(_) => "Conditions",
            Node::Condition(Condition::And { .. }) => "And",
            Node::Condition(Condition::Or { .. }) => "Or",
            Node::Condition(Condition::Filter(_)) => "Filter",
            Node::Value(FilterValue::Literal(_)) => "Literal",
            Node::Value(FilterValue::List(_)) => "List",
        }
    }
}

impl<'a> From<&'a Conditions> for Node<'a> {
    fn from(n: &'a Conditions) -> Self {
        Node::Conditions(n)
    }
}

impl<'a> From<&'a Condition> for Node<'a> {
    fn from(n: &'a Condition) -> Self {
        Node::Condition(n)
    }
}

impl<'a> From<&'a FilterValue> for Node<'a> {
    fn from(n: &'a FilterValue) -> Self {
        Node::Value(n)
    }
}
