//! Fluent builder for boolean combinator trees.
//!
//! An [`ExpressionTree`] joins typed leaf values with AND/OR while staying
//! canonical: repeating an operator appends to a flat group, switching
//! operator splits the tree into a two-child group.
//!
//! ```
//! use exprchain::ExpressionTree;
//!
//! let tree = ExpressionTree::of("A").and("B").or_tree(ExpressionTree::of("C").and("D"));
//! assert_eq!(tree.to_string(), "((A && B) || (C && D))");
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{ExprResult, ExpressionError, ExpressionTree, Operator, RenderStyle, TreeConvert};
