//! # quotient-scalar
//!
//! Exact fixed-width rational arithmetic for the quotient workspace.
//!
//! This crate provides:
//! - `Fraction`, an always-normalized `i64` rational
//! - Parsing from `<int>` / `<int>/<int>` text
//! - `ScalarError` for the construction and parse failures
//!
//! ## Overflow
//!
//! Numerators and denominators are `i64`. Intermediate products are formed in
//! `i128` and reduced before narrowing, so results that fit are always exact.
//! Results that do not fit panic through the operators, the same way std
//! integer arithmetic does; use the `checked_*` methods to observe overflow.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod fraction;

#[cfg(test)]
mod proptests;

pub use error::{Result, ScalarError};
pub use fraction::Fraction;
