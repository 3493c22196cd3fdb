//! Property-based tests for fraction arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{Fraction, ScalarError};

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Strategy for generating non-zero integers
    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn fraction() -> impl Strategy<Value = Fraction> {
        (small_int(), non_zero_int()).prop_map(|(n, d)| Fraction::new(n, d).unwrap())
    }

    fn non_zero_fraction() -> impl Strategy<Value = Fraction> {
        (non_zero_int(), non_zero_int()).prop_map(|(n, d)| Fraction::new(n, d).unwrap())
    }

    fn gcd(mut a: i64, mut b: i64) -> i64 {
        while b != 0 {
            (a, b) = (b, a % b);
        }
        a.abs()
    }

    fn assert_normalized(f: Fraction) -> Result<(), TestCaseError> {
        prop_assert!(f.denominator() > 0);
        prop_assert_eq!(gcd(f.numerator(), f.denominator()), 1);
        Ok(())
    }

    proptest! {
        // Normalization invariant

        #[test]
        fn construction_is_normalized(n in small_int(), d in non_zero_int()) {
            assert_normalized(Fraction::new(n, d).unwrap())?;
        }

        #[test]
        fn arithmetic_is_normalized(a in fraction(), b in fraction()) {
            assert_normalized(a + b)?;
            assert_normalized(a - b)?;
            assert_normalized(a * b)?;
            assert_normalized(-a)?;
        }

        #[test]
        fn scaled_pairs_are_equal(n in small_int(), d in non_zero_int(), k in non_zero_int()) {
            prop_assert_eq!(Fraction::new(n, d).unwrap(), Fraction::new(n * k, d * k).unwrap());
        }

        // Field axioms

        #[test]
        fn add_commutative(a in fraction(), b in fraction()) {
            prop_assert_eq!(a + b, b + a);
        }

        #[test]
        fn mul_commutative(a in fraction(), b in fraction()) {
            prop_assert_eq!(a * b, b * a);
        }

        #[test]
        fn add_associative(a in fraction(), b in fraction(), c in fraction()) {
            prop_assert_eq!((a + b) + c, a + (b + c));
        }

        #[test]
        fn distributive(a in fraction(), b in fraction(), c in fraction()) {
            prop_assert_eq!(a * (b + c), a * b + a * c);
        }

        #[test]
        fn additive_inverse(a in fraction()) {
            prop_assert!((a + (-a)).is_zero());
            prop_assert_eq!(a - a, Fraction::ZERO);
        }

        #[test]
        fn multiplicative_inverse(a in non_zero_fraction()) {
            let inv = a.recip().unwrap();
            prop_assert!((a * inv).is_one());
        }

        #[test]
        fn recip_is_involution(a in non_zero_fraction()) {
            prop_assert_eq!(a.recip().unwrap().recip().unwrap(), a);
        }

        #[test]
        fn division_undoes_multiplication(a in fraction(), b in non_zero_fraction()) {
            prop_assert_eq!((a * b).checked_div(&b).unwrap(), a);
        }

        #[test]
        fn zero_has_no_recip(d in non_zero_int()) {
            let zero = Fraction::new(0, d).unwrap();
            prop_assert_eq!(zero.recip(), Err(ScalarError::DivisionByZero));
        }

        // Ordering agrees with exact subtraction

        #[test]
        fn ordering_matches_difference_sign(a in fraction(), b in fraction()) {
            let diff = a - b;
            prop_assert_eq!(a.cmp(&b), diff.numerator().cmp(&0));
        }

        // Text form

        #[test]
        fn display_parses_back(a in fraction()) {
            prop_assert_eq!(a.to_string().parse::<Fraction>().unwrap(), a);
        }
    }
}
