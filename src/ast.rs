//! # Facets Query Language - Abstract Syntax Tree
//!
//! This module defines the tree the parser produces and the compiler walks.
//! The tree is immutable once built: the compiler only ever borrows it.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[conditions]** - The root node and the boolean `And`/`Or` tree
//! - **[filter]** - Leaf filters and their literal/list values
//! - **[node]** - A borrowed view over every node kind, used for dispatch
//!
//! ## Quick Start
//!
//! ```text
//! age:>14 tag:old OR tag:new
//! ```
//!
//! parses to
//!
//! ```text
//! Conditions
//! └── Or
//!     ├── And
//!     │   ├── Filter(age > 14)
//!     │   └── Filter(tag default old)
//!     └── Filter(tag default new)
//! ```
//!
//! ## Core Concepts
//!
//! ### Filters
//!
//! Every leaf is `field:[operator]value`. When the operator is omitted the
//! filter carries the sentinel operator `default`, which the compiler later
//! replaces with the first operator the field's policy allows.
//!
//! ### Composition
//!
//! Filters written next to each other (or joined with `AND`) are combined
//! with `And`; `OR` binds looser than `AND`. Both are left-associative.
pub mod conditions;
pub mod filter;
pub mod node;
pub mod tokens;

pub use conditions::{Condition, Conditions};
pub use filter::{Filter, FilterValue, Literal, DEFAULT_OPERATOR};
pub use node::Node;
pub use tokens::Token;
