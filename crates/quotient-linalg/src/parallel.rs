//! Parallel matrix products.
//!
//! Products of large matrices are split by output row across the rayon
//! work-stealing pool. Small products stay sequential.

use crate::dense_matrix::Matrix;
use crate::error::Result;

/// Configuration for choosing between sequential and parallel products.
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    /// Minimum number of rows in the left operand to enable parallelism.
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
        }
    }
}

/// Matrix product, parallel once `a` has at least
/// `config.parallel_threshold` rows.
///
/// # Errors
///
/// Same as [`Matrix::mm`].
pub fn multiply(a: &Matrix, b: &Matrix, config: &ParallelConfig) -> Result<Matrix> {
    if a.num_rows() < config.parallel_threshold {
        // Fall back to sequential for small matrices
        return a.mm(b);
    }
    a.mm_parallel(b)
}
