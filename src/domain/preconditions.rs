//! Argument checks shared by the tree factories.
//!
//! Pure precondition helpers: they either pass the input through or fail,
//! with no other side effects.

use crate::domain::error::{ExprResult, ExpressionError};

/// Fails with [`ExpressionError::EmptyInput`] when `items` is empty.
pub fn check_not_empty<I>(items: Vec<I>, what: &'static str) -> ExprResult<Vec<I>> {
    if items.is_empty() {
        return Err(ExpressionError::EmptyInput { what });
    }
    Ok(items)
}

/// Unwraps `reference`, failing with [`ExpressionError::NullValue`] when absent.
pub fn check_not_null<R>(reference: Option<R>, what: &'static str) -> ExprResult<R> {
    reference.ok_or(ExpressionError::NullValue { what })
}

/// Fails with [`ExpressionError::NullValue`] if any element is absent.
///
/// Nothing is unwrapped unless every element is present.
pub fn check_all_not_null<R>(items: Vec<Option<R>>, what: &'static str) -> ExprResult<Vec<R>> {
    if items.iter().any(Option::is_none) {
        return Err(ExpressionError::NullValue { what });
    }
    Ok(items.into_iter().flatten().collect())
}

/// Fails with [`ExpressionError::InvalidArgument`] unless `expression` holds.
pub fn check_argument(expression: bool, message: impl Into<String>) -> ExprResult<()> {
    if !expression {
        return Err(ExpressionError::InvalidArgument(message.into()));
    }
    Ok(())
}
