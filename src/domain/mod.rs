//! Domain layer: the expression tree and its combine rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod operator;
pub mod preconditions;
pub mod render;
pub mod tree;

pub use error::{ExprResult, ExpressionError};
pub use operator::Operator;
pub use render::{RenderStyle, TreeConvert};
pub use tree::ExpressionTree;
