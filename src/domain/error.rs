//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Errors raised while building or combining expression trees.
///
/// Every check runs before a node is touched, so a failed call leaves
/// an existing receiver exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("{what} must contain at least one element")]
    EmptyInput { what: &'static str },

    #[error("{what} must be non-null if supplied")]
    NullValue { what: &'static str },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for expression tree operations.
pub type ExprResult<T> = Result<T, ExpressionError>;
