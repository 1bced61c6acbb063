use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    ast::{Condition, Conditions, DEFAULT_OPERATOR, Filter, Node},
    error::{CompileError, CompileResult},
    lexer::Lexer,
    parser::{ParseError, Parser},
    policy::{PolicyMap, Policies, Policy, available_policies, resolve_policy},
    term::{FilterSpec, Sql, Term, Terms},
    value::{Value, ValueType},
};

/// Options that apply to every compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Largest number of filters a query may contain. `0` disables the check.
    pub max_filters: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options { max_filters: 100 }
    }
}

/// Everything a compile reads: options, composite builders and the shared
/// named policies.
#[derive(Debug, Clone)]
pub struct Context {
    pub options: Options,
    pub terms: Terms,
    pub available: PolicyMap,
}

impl Default for Context {
    fn default() -> Self {
        Context {
            options: Options::default(),
            terms: Terms::default(),
            available: available_policies(),
        }
    }
}

/// Placeholder SQL together with the values to bind, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Escaped {
    pub sql: Sql,
    pub params: Vec<Value>,
}

/// Count the filters in a condition tree.
pub fn count(condition: &Condition) -> usize {
    let mut pending = vec![condition];
    let mut filters = 0;

    while let Some(condition) = pending.pop() {
        match condition {
            Condition::And { left, right } | Condition::Or { left, right } => {
                pending.push(left);
                pending.push(right);
            }
            Condition::Filter(_) => filters += 1,
        }
    }
    filters
}

/// Reject queries with more than `max` filters. A `max` of zero allows any
/// number.
pub fn ensure_filter_limit(condition: &Condition, max: usize) -> CompileResult<&Condition> {
    if max == 0 {
        return Ok(condition);
    }

    let observed = count(condition);
    if observed > max {
        Err(CompileError::MaxFiltersExceeded { observed, max })
    } else {
        Ok(condition)
    }
}

fn check_type(value: &Value, expected: ValueType) -> bool {
    value.value_type() == expected
}

fn check_pattern(value: &Value, pattern: &Regex) -> bool {
    match value {
        Value::List(items) => items.iter().all(|item| check_pattern(item, pattern)),
        v => pattern.is_match(&v.to_string()),
    }
}

/// Compiles query trees into [`Term`]s and renders them.
///
/// A compiler holds read-only configuration and can be shared between
/// threads. The enabled fields are passed on every call.
///
/// # Examples
///
/// ```
/// use facets_sql::{Compiler, Policies, Standard, Value};
///
/// let compiler = Compiler::default();
/// let mut enabled = Policies::new();
/// enabled.insert("age".to_string(), Standard::from("number"));
///
/// let escaped = compiler.compile_params(&enabled, "age:>14").unwrap();
/// assert_eq!(escaped.sql, "`age` > ?");
/// assert_eq!(escaped.params, vec![Value::from(14)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    context: Context,
}

impl Compiler {
    pub fn new(context: Context) -> Self {
        Compiler { context }
    }

    /// A compiler with the default builders and named policies.
    pub fn with_options(options: Options) -> Self {
        Compiler {
            context: Context {
                options,
                ..Context::default()
            },
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Compile any node of a query tree into a term.
    pub fn code(&self, node: Node<'_>, enabled: &Policies) -> CompileResult<Box<dyn Term>> {
        match node {
            Node::Conditions(Conditions { conditions: None }) => Ok((self.context.terms.empty)()),
            Node::Conditions(Conditions {
                conditions: Some(condition),
            }) => {
                let condition = ensure_filter_limit(condition, self.context.options.max_filters)?;
                self.code(Node::Condition(condition), enabled)
            }
            Node::Condition(Condition::And { left, right }) => {
                let left = self.code(Node::Condition(left), enabled)?;
                let right = self.code(Node::Condition(right), enabled)?;
                Ok((self.context.terms.and)(left, right))
            }
            Node::Condition(Condition::Or { left, right }) => {
                let left = self.code(Node::Condition(left), enabled)?;
                let right = self.code(Node::Condition(right), enabled)?;
                Ok((self.context.terms.or)(left, right))
            }
            Node::Condition(Condition::Filter(filter)) => self.filter(filter, enabled),
            Node::Value(_) => Err(CompileError::UnsupportedNode {
                kind: node.kind().to_string(),
            }),
        }
    }

    fn filter(&self, filter: &Filter, enabled: &Policies) -> CompileResult<Box<dyn Term>> {
        let value = filter.value.decode();

        let Some(policy) = enabled
            .get(&filter.field)
            .and_then(|standard| resolve_policy(standard, &self.context.available))
        else {
            return Err(CompileError::InvalidField {
                field: filter.field.clone(),
                operator: filter.operator.clone(),
                value,
            });
        };

        let value = self.apply_policy(filter, policy, value)?;

        let operator = if filter.operator == DEFAULT_OPERATOR {
            policy.default_operator()
        } else if policy.allows(&filter.operator) {
            Some(filter.operator.as_str())
        } else {
            None
        };

        let Some(operator) = operator else {
            return Err(CompileError::InvalidOperator {
                field: filter.field.clone(),
                operator: filter.operator.clone(),
                value,
            });
        };

        tracing::trace!(field = %filter.field, operator, "built filter term");

        Ok(policy.term.build(FilterSpec {
            field: filter.field.clone(),
            operator: operator.to_string(),
            value,
        }))
    }

    /// Type and pattern checks, in that order.
    fn apply_policy(&self, filter: &Filter, policy: &Policy, value: Value) -> CompileResult<Value> {
        if !check_type(&value, policy.value_type) {
            return Err(CompileError::InvalidFilterType {
                field: filter.field.clone(),
                operator: filter.operator.clone(),
                value,
                expected: policy.value_type,
            });
        }

        if let Some(pattern) = &policy.pattern {
            let matched = pattern
                .regex()
                .map(|re| check_pattern(&value, re))
                .unwrap_or(false);
            if !matched {
                return Err(CompileError::PatternMismatch {
                    field: filter.field.clone(),
                    operator: filter.operator.clone(),
                    value,
                    pattern: pattern.as_str().to_string(),
                });
            }
        }

        Ok(value)
    }

    /// Compile a parsed query to a term tree.
    pub fn build(&self, enabled: &Policies, conditions: &Conditions) -> CompileResult<Box<dyn Term>> {
        self.code(conditions.into(), enabled)
    }

    /// Compile a parsed query with values inlined.
    ///
    /// Values are not escaped: never use the result with untrusted input.
    /// Prefer [`Compiler::compile_ast_escaped`].
    pub fn compile_ast_literal(&self, enabled: &Policies, conditions: &Conditions) -> CompileResult<Sql> {
        let sql = self.build(enabled, conditions)?.render_literal();
        tracing::debug!(mode = "literal", len = sql.len(), "compiled query");
        Ok(sql)
    }

    /// Compile a parsed query with `?` placeholders. Values are appended to
    /// `params` in placeholder order, after anything already in it.
    pub fn compile_ast_escaped(
        &self,
        enabled: &Policies,
        params: &mut Vec<Value>,
        conditions: &Conditions,
    ) -> CompileResult<Sql> {
        let sql = self.build(enabled, conditions)?.render_escaped(params);
        tracing::debug!(mode = "escaped", params = params.len(), "compiled query");
        Ok(sql)
    }

    /// Parse and compile `source` with values inlined.
    ///
    /// Values are not escaped: never use the result with untrusted input.
    /// Prefer [`Compiler::compile_escaped`].
    pub fn compile_literal(&self, enabled: &Policies, source: &str) -> CompileResult<Sql> {
        let conditions = self.parse_source(source)?;
        self.compile_ast_literal(enabled, &conditions)
    }

    /// Parse and compile `source` with `?` placeholders, appending the values
    /// to `params`.
    pub fn compile_escaped(
        &self,
        enabled: &Policies,
        params: &mut Vec<Value>,
        source: &str,
    ) -> CompileResult<Sql> {
        let conditions = self.parse_source(source)?;
        self.compile_ast_escaped(enabled, params, &conditions)
    }

    /// Like [`Compiler::compile_escaped`], collecting into a fresh list.
    pub fn compile_params(&self, enabled: &Policies, source: &str) -> CompileResult<Escaped> {
        let mut params = Vec::new();
        let sql = self.compile_escaped(enabled, &mut params, source)?;
        Ok(Escaped { sql, params })
    }

    /// The filter limit is applied while the tree is built.
    fn parse_source(&self, source: &str) -> CompileResult<Conditions> {
        let max = self.context.options.max_filters;
        Parser::new(Lexer::new(source))
            .and_then(|parser| parser.with_max_filters(max).parse())
            .map_err(|e| match e {
                ParseError::TooManyFilters { observed, max } => {
                    CompileError::MaxFiltersExceeded { observed, max }
                }
                e => CompileError::Syntax {
                    message: e.to_string(),
                },
            })
    }
}
