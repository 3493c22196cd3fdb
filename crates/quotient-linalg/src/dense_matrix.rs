//! Dense matrices over exact fractions.
//!
//! Matrices are stored row-major and never mutated once handed to a caller.
//! Every algebraic operation returns a fresh matrix; elimination works on a
//! private clone (see [`crate::echelon`]).

use std::fmt;
use std::ops::{Index, IndexMut, RangeInclusive};
use std::sync::Arc;

use num_traits::{One, Zero};
use parking_lot::Mutex;
use quotient_scalar::Fraction;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::error::{Dims, LinalgError, Result};

/// Lazily filled inverse of the owning matrix.
///
/// Filled at most once. Clones start empty.
#[derive(Default)]
pub(crate) struct InverseCache(Mutex<Option<Arc<Matrix>>>);

impl InverseCache {
    /// Returns the cached value, computing and storing it under the lock on
    /// first use. A failed computation leaves the cache empty.
    pub(crate) fn get_or_try_init<F>(&self, init: F) -> Result<Arc<Matrix>>
    where
        F: FnOnce() -> Result<Matrix>,
    {
        let mut slot = self.0.lock();
        if let Some(cached) = slot.as_ref() {
            return Ok(Arc::clone(cached));
        }
        let value = Arc::new(init()?);
        *slot = Some(Arc::clone(&value));
        Ok(value)
    }

    pub(crate) fn is_filled(&self) -> bool {
        self.0.lock().is_some()
    }
}

impl Clone for InverseCache {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl fmt::Debug for InverseCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_filled() { "cached" } else { "empty" })
    }
}

/// Dense matrix of fractions stored in row-major order.
#[derive(Debug, Clone)]
pub struct Matrix {
    /// Matrix entries in row-major order.
    data: Vec<Fraction>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
    inverse: InverseCache,
}

impl Matrix {
    fn from_parts(data: Vec<Fraction>, num_rows: usize, num_cols: usize) -> Self {
        debug_assert_eq!(data.len(), num_rows * num_cols);
        Self {
            data,
            num_rows,
            num_cols,
            inverse: InverseCache::default(),
        }
    }

    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self::from_parts(vec![Fraction::ZERO; num_rows * num_cols], num_rows, num_cols)
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = Fraction::ONE;
        }
        m
    }

    /// Creates a matrix from a 2D vector. An empty grid gives the 0x0 matrix.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RaggedRows`] if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<Fraction>>) -> Result<Self> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != num_cols)
        {
            return Err(LinalgError::RaggedRows {
                row,
                expected: num_cols,
                found,
            });
        }
        let data: Vec<Fraction> = rows.into_iter().flatten().collect();
        Ok(Self::from_parts(data, num_rows, num_cols))
    }

    /// Creates a matrix from rows of integers.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RaggedRows`] if the rows differ in length.
    pub fn from_integer_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self> {
        Self::from_rows(
            rows.iter()
                .map(|row| row.as_ref().iter().copied().map(Fraction::from).collect())
                .collect(),
        )
    }

    /// Generates a matrix of integers drawn uniformly from `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty.
    pub fn generate<G: Rng>(
        num_rows: usize,
        num_cols: usize,
        range: RangeInclusive<i64>,
        rng: &mut G,
    ) -> Self {
        let data = (0..num_rows * num_cols)
            .map(|_| Fraction::from_integer(rng.gen_range(range.clone())))
            .collect();
        Self::from_parts(data, num_rows, num_cols)
    }

    /// Like [`Matrix::generate`], with a `ChaCha8Rng` seeded from `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty.
    #[must_use]
    pub fn generate_seeded(
        num_rows: usize,
        num_cols: usize,
        range: RangeInclusive<i64>,
        seed: u64,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::generate(num_rows, num_cols, range, &mut rng)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns the shape.
    #[must_use]
    pub fn dims(&self) -> Dims {
        Dims {
            rows: self.num_rows,
            cols: self.num_cols,
        }
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns the entry at (row, col).
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Fraction> {
        if row < self.num_rows && col < self.num_cols {
            Some(self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Fraction] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Iterates over the rows as slices.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Fraction]> + '_ {
        (0..self.num_rows).map(move |row| self.row(row))
    }

    /// Returns a column as a vector.
    #[must_use]
    pub fn col(&self, col: usize) -> Vec<Fraction> {
        (0..self.num_rows).map(|row| self[(row, col)]).collect()
    }

    /// Returns `[self | column]`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] unless `column` has one
    /// entry per row.
    pub fn augment(&self, column: &[Fraction]) -> Result<Self> {
        if column.len() != self.num_rows {
            return Err(LinalgError::DimensionMismatch {
                op: "augment",
                left: self.dims(),
                right: Dims {
                    rows: column.len(),
                    cols: 1,
                },
            });
        }
        let data = self
            .rows()
            .zip(column)
            .flat_map(|(row, &extra)| row.iter().copied().chain(std::iter::once(extra)))
            .collect();
        Ok(Self::from_parts(data, self.num_rows, self.num_cols + 1))
    }

    fn require_same_dims(&self, other: &Self, op: &'static str) -> Result<()> {
        if self.num_rows == other.num_rows && self.num_cols == other.num_cols {
            Ok(())
        } else {
            Err(LinalgError::DimensionMismatch {
                op,
                left: self.dims(),
                right: other.dims(),
            })
        }
    }

    pub(crate) fn require_square(&self) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(LinalgError::NotSquare(self.dims()))
        }
    }

    fn zip_with(&self, other: &Self, f: impl Fn(Fraction, Fraction) -> Fraction) -> Self {
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Self::from_parts(data, self.num_rows, self.num_cols)
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] unless the shapes match.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.require_same_dims(other, "add")?;
        Ok(self.zip_with(other, |a, b| a + b))
    }

    /// Elementwise difference.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] unless the shapes match.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.require_same_dims(other, "subtract")?;
        Ok(self.zip_with(other, |a, b| a - b))
    }

    /// Scales all entries by a scalar.
    #[must_use]
    pub fn scale(&self, scalar: Fraction) -> Self {
        Self::from_parts(
            self.data.iter().map(|&v| v * scalar).collect(),
            self.num_rows,
            self.num_cols,
        )
    }

    fn require_product_dims(&self, other: &Self) -> Result<()> {
        if self.num_cols == other.num_rows {
            Ok(())
        } else {
            Err(LinalgError::DimensionMismatch {
                op: "multiply",
                left: self.dims(),
                right: other.dims(),
            })
        }
    }

    fn dot(&self, other: &Self, i: usize, j: usize) -> Fraction {
        (0..self.num_cols)
            .map(|k| self[(i, k)] * other[(k, j)])
            .sum()
    }

    /// Matrix-matrix multiply: C = A * B.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] unless `self.num_cols()`
    /// equals `other.num_rows()`.
    pub fn mm(&self, other: &Self) -> Result<Self> {
        self.require_product_dims(other)?;

        let mut result = Self::zeros(self.num_rows, other.num_cols);
        for i in 0..self.num_rows {
            for j in 0..other.num_cols {
                result[(i, j)] = self.dot(other, i, j);
            }
        }
        Ok(result)
    }

    /// Matrix-matrix multiply (parallel): C = A * B.
    ///
    /// # Errors
    ///
    /// Same as [`Matrix::mm`].
    pub fn mm_parallel(&self, other: &Self) -> Result<Self> {
        self.require_product_dims(other)?;

        let data: Vec<Fraction> = (0..self.num_rows)
            .into_par_iter()
            .flat_map_iter(|i| (0..other.num_cols).map(move |j| self.dot(other, i, j)))
            .collect();

        Ok(Self::from_parts(data, self.num_rows, other.num_cols))
    }

    /// Repeated product `A * (A * ... A)` with `n - 1` multiplications.
    ///
    /// `power(0)` and `power(1)` both return a copy of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] for a non-square matrix
    /// when `n >= 2`.
    pub fn power(&self, n: u32) -> Result<Self> {
        let mut product = self.clone();
        for _ in 1..n {
            product = self.mm(&product)?;
        }
        Ok(product)
    }

    /// Swaps two rows in-place.
    pub(crate) fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let i_start = i * self.num_cols;
        let j_start = j * self.num_cols;
        for k in 0..self.num_cols {
            self.data.swap(i_start + k, j_start + k);
        }
    }

    /// row[target] -= factor * row[source].
    pub(crate) fn sub_scaled_row(&mut self, target: usize, source: usize, factor: Fraction) {
        for k in 0..self.num_cols {
            let val = self[(source, k)] * factor;
            self[(target, k)] = self[(target, k)] - val;
        }
    }

    /// Scales a row by a scalar.
    pub(crate) fn scale_row(&mut self, row: usize, factor: Fraction) {
        for k in 0..self.num_cols {
            self[(row, k)] = self[(row, k)] * factor;
        }
    }

    /// Returns true if every entry is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(Zero::is_zero)
    }

    /// Returns true if this is an identity matrix.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.is_square()
            && (0..self.num_rows).all(|i| {
                (0..self.num_cols).all(|j| {
                    let v = self[(i, j)];
                    if i == j {
                        v.is_one()
                    } else {
                        v.is_zero()
                    }
                })
            })
    }

    pub(crate) fn inverse_cache(&self) -> &InverseCache {
        &self.inverse
    }

    /// The display text with every row terminated by `<br/>`, wrapped in
    /// `<html>` tags.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::from("<html>");
        for row in self.rows() {
            html.push_str(&RowText(row).to_string());
            html.push_str("<br/>");
        }
        html.push_str("</html>");
        html
    }
}

/// Cells of one row separated by single spaces.
pub(crate) struct RowText<'a>(pub(crate) &'a [Fraction]);

impl fmt::Display for RowText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, cell) in self.0.iter().enumerate() {
            if k > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", RowText(row))?;
        }
        Ok(())
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.num_rows == other.num_rows && self.num_cols == other.num_cols && self.data == other.data
    }
}

impl Eq for Matrix {}

impl Index<(usize, usize)> for Matrix {
    type Output = Fraction;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}
