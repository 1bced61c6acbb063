//! Compiles facets filter queries into SQL fragments.
//!
//! A query such as `age:>14 tag:old OR tag:new` is parsed into a tree, each
//! filter is checked against a per-field [`Policy`], and the result is
//! rendered either with `?` placeholders plus a parameter list
//! ([`Compiler::compile_escaped`]) or with values inlined
//! ([`Compiler::compile_literal`], for trusted input only).
//!
//! ```
//! use facets_sql::{Compiler, Policies, Standard, Value};
//!
//! let mut enabled = Policies::new();
//! enabled.insert("age".to_string(), Standard::from("number"));
//! enabled.insert("tag".to_string(), Standard::from("string"));
//!
//! let compiler = Compiler::default();
//! let mut params = Vec::new();
//! let sql = compiler
//!     .compile_escaped(&enabled, &mut params, "age:>14 tag:old")
//!     .unwrap();
//!
//! assert_eq!(sql, "(`age` > ?) AND (tag LIKE CONCAT('%', ?, '%'))");
//! assert_eq!(params, vec![Value::from(14), Value::from("old")]);
//! ```
pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod compiler;
pub mod error;
pub mod escape;
pub mod lexer;
pub mod parser;
pub mod policy;
pub mod term;
pub mod value;

pub use ast::{Condition, Conditions, Filter, FilterValue, Literal, Node, Token};
pub use compiler::{Compiler, Context, Escaped, Options, count, ensure_filter_limit};
pub use error::{CompileError, CompileResult, ConfigError};
pub use escape::{escape_id, format_sql};
pub use lexer::{LexError, Lexer, Position};
pub use parser::{ParseError, Parser, parse};
pub use policy::{
    Pattern, Policies, Policy, PolicyMap, Standard, available_policies, load_policies,
    resolve_policy, validate_policies,
};
pub use term::{FilterSpec, Sql, Term, TermKind, Terms};
pub use value::{Value, ValueType};
