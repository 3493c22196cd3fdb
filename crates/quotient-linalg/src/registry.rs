//! Operand storage for expression front-ends.
//!
//! A front-end that evaluates text such as `A*B+C^2` registers its input
//! matrices under single uppercase letters and evaluates one operation at a
//! time. Each intermediate result is kept in scratch storage under a generated
//! temporary name (`#0`, `#1`, ...) that later operations can refer to.

use quotient_scalar::Fraction;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::dense_matrix::Matrix;
use crate::error::{LinalgError, Result};

/// Prefix of generated temporary names. Never a valid registered name.
pub const TEMP_PREFIX: char = '#';

/// Binary matrix operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatrixOp {
    /// Elementwise sum.
    Add,
    /// Elementwise difference.
    Subtract,
    /// Matrix product.
    Multiply,
}

impl MatrixOp {
    /// Evaluates the operation.
    ///
    /// # Errors
    ///
    /// [`LinalgError::DimensionMismatch`] for incompatible shapes.
    pub fn apply(self, lhs: &Matrix, rhs: &Matrix) -> Result<Matrix> {
        match self {
            Self::Add => lhs.add(rhs),
            Self::Subtract => lhs.sub(rhs),
            Self::Multiply => lhs.mm(rhs),
        }
    }
}

/// Named matrices plus scratch storage for intermediate results.
#[derive(Debug, Default)]
pub struct MatrixTable {
    named: FxHashMap<char, Matrix>,
    scratch: FxHashMap<String, Matrix>,
    next_temp: usize,
}

impl MatrixTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `matrix` under `name`, returning the matrix it replaced.
    ///
    /// # Errors
    ///
    /// [`LinalgError::InvalidName`] unless `name` is in `'A'..='Z'`.
    pub fn register(&mut self, name: char, matrix: Matrix) -> Result<Option<Matrix>> {
        if !name.is_ascii_uppercase() {
            return Err(LinalgError::InvalidName(name));
        }
        Ok(self.named.insert(name, matrix))
    }

    /// Looks up a registered letter or a temporary name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Matrix> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_uppercase() => self.named.get(&letter),
            _ => self.scratch.get(name),
        }
    }

    fn resolve(&self, name: &str) -> Result<&Matrix> {
        self.get(name)
            .ok_or_else(|| LinalgError::UnknownOperand(name.to_owned()))
    }

    /// Stores an intermediate result under a fresh temporary name.
    pub fn store_temp(&mut self, matrix: Matrix) -> String {
        let name = format!("{TEMP_PREFIX}{}", self.next_temp);
        self.next_temp += 1;
        self.scratch.insert(name.clone(), matrix);
        name
    }

    /// Evaluates `lhs op rhs` and stores the result as a temporary.
    ///
    /// # Errors
    ///
    /// [`LinalgError::UnknownOperand`] if either name is unbound, or the
    /// error of the operation itself.
    pub fn apply(&mut self, op: MatrixOp, lhs: &str, rhs: &str) -> Result<String> {
        let result = op.apply(self.resolve(lhs)?, self.resolve(rhs)?)?;
        let name = self.store_temp(result);
        debug!(?op, lhs, rhs, result = %name, "evaluated matrix operation");
        Ok(name)
    }

    /// Evaluates `k * name` and stores the result as a temporary.
    ///
    /// # Errors
    ///
    /// [`LinalgError::UnknownOperand`] if `name` is unbound.
    pub fn apply_scale(&mut self, name: &str, k: Fraction) -> Result<String> {
        let result = self.resolve(name)?.scale(k);
        Ok(self.store_temp(result))
    }

    /// Evaluates `name ^ n` and stores the result as a temporary.
    ///
    /// # Errors
    ///
    /// [`LinalgError::UnknownOperand`] if `name` is unbound, or the error of
    /// [`Matrix::power`].
    pub fn apply_power(&mut self, name: &str, n: u32) -> Result<String> {
        let result = self.resolve(name)?.power(n)?;
        Ok(self.store_temp(result))
    }

    /// Number of stored temporaries.
    #[must_use]
    pub fn temp_count(&self) -> usize {
        self.scratch.len()
    }

    /// Drops every temporary. Registered matrices stay.
    ///
    /// Temporary names are not reused afterwards.
    pub fn clear_scratch(&mut self) {
        debug!(dropped = self.scratch.len(), "cleared scratch matrices");
        self.scratch.clear();
    }
}
