//! # Quotient
//!
//! Exact rational linear algebra written in Rust.
//!
//! Every value is a normalized fraction, so elimination, inversion and
//! determinants carry no rounding error.
//!
//! ## Features
//!
//! - **Exact Scalars**: `i64` fractions kept in lowest terms
//! - **Dense Matrices**: add, subtract, scale, multiply, power
//! - **Elimination**: row echelon and reduced forms with structural pivot
//!   reordering, inverses, determinants, linear solves
//! - **Front-end Support**: an operand table for expression evaluators
//!
//! ## Quick Start
//!
//! ```rust
//! use quotient::prelude::*;
//!
//! let a = Matrix::from_integer_rows(&[[1, 0], [0, 2]])?;
//! let inv = a.inverse()?;
//! assert_eq!(inv[(1, 1)], "1/2".parse::<Fraction>()?);
//! assert_eq!(a.determinant()?, Fraction::from(2));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use quotient_linalg as linalg;
pub use quotient_scalar as scalar;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use quotient_linalg::{
        EchelonForm, LinalgError, Matrix, MatrixOp, MatrixTable, ParallelConfig,
    };
    pub use quotient_scalar::{Fraction, ScalarError};
}
