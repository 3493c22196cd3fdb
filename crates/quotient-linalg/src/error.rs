//! Errors for matrix construction, algebra and elimination.

use std::fmt;

use quotient_scalar::ScalarError;
use thiserror::Error;

/// Matrix shape, rendered as `rowsxcols`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dims {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Why a matrix was rejected as input to elimination.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormViolation {
    /// Neither square nor augmented with exactly one extra column.
    #[error("{0} matrix is neither square nor augmented")]
    Shape(Dims),

    /// A row whose coefficient entries are all zero.
    #[error("row {0} is empty")]
    EmptyRow(usize),

    /// A coefficient column whose entries are all zero.
    #[error("column {0} is empty")]
    EmptyColumn(usize),

    /// More rows share the zero pattern of `row` than that pattern allows.
    #[error("{count} rows share the zero pattern of row {row}, at most {limit} allowed")]
    IdenticalRows {
        /// Row whose pattern is over-represented.
        row: usize,
        /// Rows sharing the pattern, `row` included.
        count: usize,
        /// Rows minus the zeros in the pattern.
        limit: usize,
    },
}

/// Errors produced by matrix operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LinalgError {
    /// Operand shapes are incompatible for the operation.
    #[error("cannot {op} a {left} matrix with a {right} matrix")]
    DimensionMismatch {
        /// Operation name.
        op: &'static str,
        /// Left operand shape.
        left: Dims,
        /// Right operand shape.
        right: Dims,
    },

    /// A square-only operation was called on a non-square matrix.
    #[error("matrix is not square ({0})")]
    NotSquare(Dims),

    /// Elimination precondition violated.
    #[error("improper form, no point solution: {0}")]
    InvalidForm(#[from] FormViolation),

    /// No non-zero pivot for `row`, even after reordering.
    #[error("unsolvable, row {row} has a zero leading entry")]
    Unsolvable {
        /// Row left without a pivot.
        row: usize,
    },

    /// A grid row whose length differs from the first row's.
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        /// Offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// Registered matrix names are single uppercase ASCII letters.
    #[error("matrix names must be a single uppercase letter, got {0:?}")]
    InvalidName(char),

    /// An operand name with no registered or temporary matrix behind it.
    #[error("unknown operand {0:?}")]
    UnknownOperand(String),

    /// Scalar construction, parsing or division failure.
    #[error(transparent)]
    Scalar(#[from] ScalarError),
}

/// Result alias for matrix operations.
pub type Result<T> = std::result::Result<T, LinalgError>;
