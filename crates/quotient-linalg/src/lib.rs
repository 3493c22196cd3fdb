//! # quotient-linalg
//!
//! Exact dense linear algebra over `quotient_scalar::Fraction`.
//!
//! This crate provides:
//! - Dense row-major matrices with exact add, subtract, scale, multiply and
//!   power
//! - Row echelon and reduced row echelon forms with structural pivot
//!   reordering
//! - Cached inverses, determinants and linear solves
//! - Parallel products via rayon
//! - A plain-text dump format and an operand table for expression front-ends
//!
//! ## Elimination Inputs
//!
//! Elimination is defined for square matrices and for augmented systems
//! with exactly one extra column. Inputs with an empty row, an empty
//! coefficient column, or too many rows sharing a zero pattern are rejected
//! up front; other singular inputs fail during elimination.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dense_matrix;
pub mod dump;
pub mod echelon;
pub mod error;
pub mod parallel;
pub mod registry;

pub use dense_matrix::Matrix;
pub use echelon::EchelonForm;
pub use error::{Dims, FormViolation, LinalgError, Result};
pub use parallel::{ParallelConfig, multiply};
pub use registry::{MatrixOp, MatrixTable};

#[cfg(test)]
mod proptests;
