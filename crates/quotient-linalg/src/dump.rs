//! Plain-text dump format for diagnostics.
//!
//! One row per line with cells separated by single spaces, and a blank line
//! after each matrix:
//!
//! ```text
//! 1 -1/2
//! 0 3
//!
//! 2
//!
//! ```

use std::io::{self, Write};

use quotient_scalar::Fraction;

use crate::dense_matrix::{Matrix, RowText};
use crate::error::Result;

/// Writes one matrix followed by a blank line.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_matrix<W: Write + ?Sized>(writer: &mut W, matrix: &Matrix) -> io::Result<()> {
    for row in matrix.rows() {
        writeln!(writer, "{}", RowText(row))?;
    }
    writeln!(writer)
}

/// Writes several matrices back to back.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_matrices<'a, W, I>(writer: &mut W, matrices: I) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = &'a Matrix>,
{
    for matrix in matrices {
        write_matrix(writer, matrix)?;
    }
    Ok(())
}

/// Parses dump text back into matrices.
///
/// Blocks are separated by blank lines; a final block need not be
/// terminated.
///
/// # Errors
///
/// [`LinalgError::Scalar`](crate::LinalgError::Scalar) for a malformed cell,
/// [`LinalgError::RaggedRows`](crate::LinalgError::RaggedRows) for a block
/// whose rows differ in length.
pub fn read_matrices(text: &str) -> Result<Vec<Matrix>> {
    let mut matrices = Vec::new();
    let mut block: Vec<Vec<Fraction>> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !block.is_empty() {
                matrices.push(Matrix::from_rows(std::mem::take(&mut block))?);
            }
            continue;
        }
        let row = line
            .split_whitespace()
            .map(str::parse::<Fraction>)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        block.push(row);
    }
    if !block.is_empty() {
        matrices.push(Matrix::from_rows(block)?);
    }

    Ok(matrices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LinalgError;
    use quotient_scalar::ScalarError;

    #[test]
    fn test_write_format() {
        let a = Matrix::from_rows(vec![
            vec![Fraction::from(1), Fraction::new(-1, 2).unwrap()],
            vec![Fraction::ZERO, Fraction::from(3)],
        ])
        .unwrap();
        let b = Matrix::from_integer_rows(&[[2]]).unwrap();

        let mut out = Vec::new();
        write_matrices(&mut out, [&a, &b]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 -1/2\n0 3\n\n2\n\n");
    }

    #[test]
    fn test_read_back() {
        let a = Matrix::generate_seeded(3, 4, -20..=20, 5).scale(Fraction::new(1, 3).unwrap());
        let b = Matrix::identity(2);

        let mut out = Vec::new();
        write_matrices(&mut out, [&a, &b]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(read_matrices(&text).unwrap(), vec![a, b]);
    }

    #[test]
    fn test_read_unterminated_block() {
        let matrices = read_matrices("1 2\n3 4").unwrap();
        assert_eq!(matrices, vec![Matrix::from_integer_rows(&[[1, 2], [3, 4]]).unwrap()]);
        assert!(read_matrices("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_read_errors() {
        assert_eq!(
            read_matrices("1 x\n").unwrap_err(),
            LinalgError::Scalar(ScalarError::InvalidFormat("x".to_string()))
        );
        assert!(matches!(
            read_matrices("1 2\n3\n"),
            Err(LinalgError::RaggedRows { row: 1, .. })
        ));
        assert_eq!(
            read_matrices("1/0\n").unwrap_err(),
            LinalgError::Scalar(ScalarError::DivisionByZero)
        );
    }
}
