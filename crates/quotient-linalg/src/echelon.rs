//! Exact Gaussian elimination.
//!
//! Elimination accepts square matrices and augmented systems (`cols == rows + 1`).
//! Before eliminating, rows are permuted so that no diagonal cell is a
//! structural zero whenever a legal swap exists. This is not magnitude
//! pivoting: arithmetic is exact, so the only goal is to avoid dividing by
//! zero later.
//!
//! All work happens on a private clone together with a tracking matrix that
//! starts as the identity and mirrors every row operation, so that after
//! reduction it holds the inverse of the coefficient block. A failure discards
//! both.

use std::sync::Arc;

use num_traits::{One, Zero};
use quotient_scalar::Fraction;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::dense_matrix::Matrix;
use crate::error::{FormViolation, LinalgError, Result};

/// Result of [`Matrix::row_echelon`] or [`Matrix::reduced_row_echelon`].
#[derive(Clone, Debug)]
pub struct EchelonForm {
    matrix: Matrix,
    transform: Matrix,
    row_swaps: usize,
    pivots: Vec<Fraction>,
    reduced: bool,
}

impl EchelonForm {
    /// The reduced matrix: unit diagonal, zeros below it (and above it too
    /// when reduced).
    #[must_use]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Consumes the form, returning the reduced matrix.
    #[must_use]
    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }

    /// The accumulated row operations, as a `rows x rows` matrix.
    ///
    /// After full reduction this is the inverse of the coefficient block.
    #[must_use]
    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Consumes the form, returning the accumulated row operations.
    #[must_use]
    pub fn into_transform(self) -> Matrix {
        self.transform
    }

    /// Number of row swaps made while reordering pivots.
    #[must_use]
    pub fn row_swaps(&self) -> usize {
        self.row_swaps
    }

    /// Diagonal values each row was divided by, top to bottom.
    #[must_use]
    pub fn pivots(&self) -> &[Fraction] {
        &self.pivots
    }

    /// Returns true for the fully reduced form.
    #[must_use]
    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    /// The solution column of a reduced augmented system.
    ///
    /// `None` unless the form is reduced and the input was augmented.
    #[must_use]
    pub fn solution(&self) -> Option<Vec<Fraction>> {
        let last = self.matrix.num_rows();
        (self.reduced && self.matrix.num_cols() == last + 1).then(|| self.matrix.col(last))
    }
}

/// Checks the elimination preconditions.
///
/// Returns the width of the coefficient block.
fn validate(m: &Matrix) -> std::result::Result<usize, FormViolation> {
    let rows = m.num_rows();
    let coef_cols = if m.is_square() || m.num_cols() == rows + 1 {
        rows
    } else {
        return Err(FormViolation::Shape(m.dims()));
    };

    if let Some(row) = (0..rows).find(|&i| (0..coef_cols).all(|j| m[(i, j)].is_zero())) {
        return Err(FormViolation::EmptyRow(row));
    }
    if let Some(col) = (0..coef_cols).find(|&j| (0..rows).all(|i| m[(i, j)].is_zero())) {
        return Err(FormViolation::EmptyColumn(col));
    }

    // k rows that vanish on the same z columns span at most rows - z dimensions.
    let patterns: Vec<Vec<usize>> = (0..rows)
        .map(|i| (0..coef_cols).filter(|&j| m[(i, j)].is_zero()).collect())
        .collect();
    let mut counts: FxHashMap<&[usize], usize> = FxHashMap::default();
    for pattern in &patterns {
        *counts.entry(pattern.as_slice()).or_default() += 1;
    }
    for (row, pattern) in patterns.iter().enumerate() {
        let count = counts[pattern.as_slice()];
        let limit = rows - pattern.len();
        if count > limit {
            return Err(FormViolation::IdenticalRows { row, count, limit });
        }
    }

    Ok(coef_cols)
}

/// Working state of one elimination run.
struct Eliminator {
    work: Matrix,
    transform: Matrix,
    coef_cols: usize,
    row_swaps: usize,
    pivots: Vec<Fraction>,
}

impl Eliminator {
    fn new(input: &Matrix) -> Result<Self> {
        let coef_cols = validate(input)?;
        Ok(Self {
            work: input.clone(),
            transform: Matrix::identity(input.num_rows()),
            coef_cols,
            row_swaps: 0,
            pivots: Vec::with_capacity(input.num_rows()),
        })
    }

    fn rows(&self) -> usize {
        self.work.num_rows()
    }

    fn is_structural_zero(&self, row: usize, col: usize) -> bool {
        self.work[(row, col)].is_zero()
    }

    /// Non-zero coefficients in `row`.
    fn row_weight(&self, row: usize) -> usize {
        (0..self.coef_cols)
            .filter(|&j| !self.is_structural_zero(row, j))
            .count()
    }

    /// Non-zero entries in coefficient column `col`.
    fn column_weight(&self, col: usize) -> usize {
        (0..self.rows())
            .filter(|&i| !self.is_structural_zero(i, col))
            .count()
    }

    fn swap_rows(&mut self, i: usize, j: usize) {
        self.work.swap_rows(i, j);
        self.transform.swap_rows(i, j);
        self.row_swaps += 1;
        debug!(i, j, "swapped rows to place a non-zero pivot");
    }

    /// Subtracts `factor * row source` from `row target`, where `factor` is
    /// the entry of `target` in the column of `source`'s unit pivot.
    fn clear_entry(&mut self, target: usize, source: usize) {
        let factor = self.work[(target, source)];
        if factor.is_zero() {
            return;
        }
        self.work.sub_scaled_row(target, source, factor);
        self.transform.sub_scaled_row(target, source, factor);
    }

    /// Permutes rows so no diagonal cell is zero, when a legal swap exists.
    ///
    /// A row with a single non-zero coefficient has only one valid placement,
    /// so it takes that column outright, provided the column has other
    /// candidates, and the column is marked solved. Otherwise a row trades
    /// places with any row that is non-zero at its diagonal. Solved columns
    /// are never disturbed again.
    fn reorder_pivots(&mut self) {
        let rows = self.rows();
        if self.work.has_nonzero_diagonal() {
            return;
        }

        let column_weights: Vec<usize> = (0..self.coef_cols).map(|j| self.column_weight(j)).collect();
        let mut solved: Vec<usize> = Vec::new();
        let mut i = 0;
        while i < rows {
            let mut revisit = false;
            if self.is_structural_zero(i, i) {
                let row_weight = self.row_weight(i);
                for j in 0..self.coef_cols {
                    if i == j || solved.contains(&j) || self.is_structural_zero(i, j) {
                        continue;
                    }
                    if row_weight == 1 && column_weights[j] != 1 {
                        self.swap_rows(i, j);
                        solved.push(j);
                        revisit = self.is_structural_zero(i, i);
                        break;
                    }
                    if !self.is_structural_zero(j, i) {
                        self.swap_rows(j, i);
                        break;
                    }
                }
            }
            if !revisit {
                i += 1;
            }
        }
    }

    /// Clears everything left of the diagonal and normalizes each pivot to one.
    fn eliminate(&mut self) -> Result<()> {
        for i in 0..self.rows() {
            for j in 0..i {
                self.clear_entry(i, j);
            }

            let pivot = self.work[(i, i)];
            if pivot.is_zero() {
                debug!(row = i, "no usable pivot after elimination");
                return Err(LinalgError::Unsolvable { row: i });
            }
            self.pivots.push(pivot);
            if !pivot.is_one() {
                let scale = pivot.recip()?;
                self.work.scale_row(i, scale);
                self.transform.scale_row(i, scale);
            }
            trace!(row = i, %pivot, "row normalized");
        }
        Ok(())
    }

    /// Clears everything right of the diagonal, bottom to top.
    fn back_substitute(&mut self) {
        let rows = self.rows();
        for current in (0..rows.saturating_sub(1)).rev() {
            for k in (current + 1..rows).rev() {
                self.clear_entry(current, k);
            }
        }
    }

    fn finish(self, reduced: bool) -> EchelonForm {
        EchelonForm {
            matrix: self.work,
            transform: self.transform,
            row_swaps: self.row_swaps,
            pivots: self.pivots,
            reduced,
        }
    }
}

impl Matrix {
    /// Returns true if no diagonal cell is zero.
    ///
    /// Only the leading square block is checked, so the extra column of an
    /// augmented system never counts.
    #[must_use]
    pub fn has_nonzero_diagonal(&self) -> bool {
        (0..self.num_rows().min(self.num_cols())).all(|i| !self[(i, i)].is_zero())
    }

    /// Row echelon form with unit diagonal.
    ///
    /// # Errors
    ///
    /// - [`LinalgError::InvalidForm`] if the matrix is neither square nor
    ///   augmented, has an empty row or coefficient column, or has more rows
    ///   sharing a zero pattern than the pattern allows
    /// - [`LinalgError::Unsolvable`] if a row has no usable pivot after
    ///   reordering
    pub fn row_echelon(&self) -> Result<EchelonForm> {
        let mut elim = Eliminator::new(self)?;
        elim.reorder_pivots();
        elim.eliminate()?;
        Ok(elim.finish(false))
    }

    /// Reduced row echelon form (RREF) using Gauss-Jordan elimination.
    ///
    /// The coefficient block becomes the identity; for augmented input the
    /// last column holds the solution.
    ///
    /// # Errors
    ///
    /// Same as [`Matrix::row_echelon`].
    pub fn reduced_row_echelon(&self) -> Result<EchelonForm> {
        let mut elim = Eliminator::new(self)?;
        elim.reorder_pivots();
        elim.eliminate()?;
        elim.back_substitute();
        Ok(elim.finish(true))
    }

    /// Computes the inverse (for square matrices).
    ///
    /// The first successful call stores the result; later calls return it
    /// without recomputing.
    ///
    /// # Errors
    ///
    /// [`LinalgError::NotSquare`], or any elimination error of
    /// [`Matrix::reduced_row_echelon`].
    pub fn inverse(&self) -> Result<Arc<Matrix>> {
        self.require_square()?;
        self.inverse_cache().get_or_try_init(|| {
            let inverse = self.reduced_row_echelon()?.into_transform();
            debug!(n = self.num_rows(), "inverse computed and cached");
            Ok(inverse)
        })
    }

    /// Computes the determinant (for square matrices).
    ///
    /// The product of the pivots divided out during elimination, negated
    /// once per row swap.
    ///
    /// # Errors
    ///
    /// [`LinalgError::NotSquare`], or any elimination error of
    /// [`Matrix::row_echelon`].
    pub fn determinant(&self) -> Result<Fraction> {
        self.require_square()?;
        let form = self.row_echelon()?;
        let product: Fraction = form.pivots().iter().copied().product();
        Ok(if form.row_swaps() % 2 == 1 {
            -product
        } else {
            product
        })
    }

    /// Solves the linear system Ax = b.
    ///
    /// # Errors
    ///
    /// [`LinalgError::NotSquare`], [`LinalgError::DimensionMismatch`] if `b`
    /// does not have one entry per row, or any elimination error.
    pub fn solve(&self, b: &[Fraction]) -> Result<Vec<Fraction>> {
        self.require_square()?;
        let augmented = self.augment(b)?;
        let form = augmented.reduced_row_echelon()?;
        Ok(form.matrix().col(self.num_cols()))
    }
}
