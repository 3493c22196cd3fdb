//! Property-based tests for elimination.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;
    use quotient_scalar::Fraction;

    use crate::dense_matrix::Matrix;
    use crate::error::LinalgError;
    use crate::tests::cofactor_determinant;

    // Small entries with plenty of zeros, so pivot reordering gets exercised.
    fn entry() -> impl Strategy<Value = i64> {
        prop_oneof![Just(0i64), -6i64..=6i64]
    }

    fn square(n: usize) -> impl Strategy<Value = Matrix> {
        prop::collection::vec(entry(), n * n).prop_map(move |cells| {
            Matrix::from_rows(
                cells
                    .chunks(n)
                    .map(|row| row.iter().copied().map(Fraction::from).collect())
                    .collect(),
            )
            .unwrap()
        })
    }

    fn small_square() -> impl Strategy<Value = Matrix> {
        (1usize..=4).prop_flat_map(square)
    }

    proptest! {
        #[test]
        fn inverse_is_two_sided(a in small_square()) {
            match a.inverse() {
                Ok(inv) => {
                    let n = a.num_rows();
                    prop_assert_eq!(a.mm(&inv).unwrap(), Matrix::identity(n));
                    prop_assert_eq!(inv.mm(&a).unwrap(), Matrix::identity(n));
                }
                Err(LinalgError::InvalidForm(_)) => {
                    // Rejected shapes are structurally singular.
                    prop_assert!(cofactor_determinant(&a).is_zero());
                }
                Err(LinalgError::Unsolvable { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error {}", other),
            }
        }

        #[test]
        fn determinant_matches_cofactors(a in small_square()) {
            if let Ok(det) = a.determinant() {
                prop_assert_eq!(det, cofactor_determinant(&a));
                prop_assert!(!det.is_zero());
            }
        }

        #[test]
        fn row_echelon_is_unit_upper_triangular(a in small_square()) {
            let before = a.clone();
            if let Ok(form) = a.row_echelon() {
                let r = form.matrix();
                for i in 0..r.num_rows() {
                    prop_assert!(r[(i, i)].is_one());
                    for j in 0..i {
                        prop_assert!(r[(i, j)].is_zero());
                    }
                }
                // The transform replays every row operation.
                prop_assert_eq!(&form.transform().mm(&a).unwrap(), r);
            }
            prop_assert_eq!(a, before);
        }

        #[test]
        fn solve_satisfies_system(a in square(3), b in prop::collection::vec(-9i64..=9, 3)) {
            let b: Vec<Fraction> = b.into_iter().map(Fraction::from).collect();
            if let Ok(x) = a.solve(&b) {
                let x = Matrix::from_rows(x.into_iter().map(|v| vec![v]).collect()).unwrap();
                prop_assert_eq!(a.mm(&x).unwrap().col(0), b);
            }
        }

        #[test]
        fn add_then_subtract_round_trips(a in square(3), b in square(3)) {
            prop_assert_eq!(a.add(&b).unwrap().sub(&b).unwrap(), a);
        }

        #[test]
        fn product_is_associative(a in square(2), b in square(2), c in square(2)) {
            prop_assert_eq!(
                a.mm(&b).unwrap().mm(&c).unwrap(),
                a.mm(&b.mm(&c).unwrap()).unwrap()
            );
        }
    }
}
