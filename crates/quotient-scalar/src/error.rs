//! Scalar construction and parsing errors.

use thiserror::Error;

/// Errors produced while building or parsing a [`Fraction`](crate::Fraction).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScalarError {
    /// A non-zero numerator over a zero denominator, or the reciprocal of zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Zero over zero.
    #[error("undefined")]
    Undefined,

    /// Text that is neither `<int>` nor `<int>/<int>`.
    #[error("inconvertible fraction text: {0:?}")]
    InvalidFormat(String),

    /// A normalized result that does not fit in `i64`.
    #[error("fraction overflows i64")]
    Overflow,
}

/// Result alias for scalar operations.
pub type Result<T> = std::result::Result<T, ScalarError>;
