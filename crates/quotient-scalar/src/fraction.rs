//! Fixed-width rational numbers.
//!
//! This module provides exact rational arithmetic over `i64` numerators and
//! denominators. Values are normalized on every construction, so structural
//! equality is value equality.

use std::cmp::Ordering;
use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_traits::{CheckedAdd, CheckedMul, CheckedSub, One, Zero};

use crate::error::{Result, ScalarError};

/// A rational number with `i64` numerator and denominator.
///
/// Fractions are always stored in lowest terms with a positive denominator,
/// and zero is always `0/1`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

impl Fraction {
    /// The fraction `0/1`.
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// The fraction `1/1`.
    pub const ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    /// Creates a new fraction from numerator and denominator.
    ///
    /// The sign is moved onto the numerator and both parts are divided by
    /// their greatest common divisor.
    ///
    /// # Errors
    ///
    /// - [`ScalarError::Undefined`] for `0/0`
    /// - [`ScalarError::DivisionByZero`] for `n/0` with `n != 0`
    /// - [`ScalarError::Overflow`] if the normalized value leaves the `i64`
    ///   range (only possible when negating `i64::MIN`)
    pub fn new(numerator: i64, denominator: i64) -> Result<Self> {
        if denominator == 0 {
            return Err(if numerator == 0 {
                ScalarError::Undefined
            } else {
                ScalarError::DivisionByZero
            });
        }
        Self::reduce(i128::from(numerator), i128::from(denominator)).ok_or(ScalarError::Overflow)
    }

    /// Creates a fraction from an integer (denominator = 1).
    #[must_use]
    pub const fn from_integer(n: i64) -> Self {
        Self {
            numerator: n,
            denominator: 1,
        }
    }

    /// Normalizes a wide numerator/denominator pair.
    ///
    /// `denominator` must be non-zero. Returns `None` if the reduced pair does
    /// not fit in `i64`.
    fn reduce(numerator: i128, denominator: i128) -> Option<Self> {
        debug_assert_ne!(denominator, 0);
        if numerator == 0 {
            return Some(Self::ZERO);
        }
        let (numerator, denominator) = if denominator < 0 {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        };
        let g = i128::try_from(gcd(numerator.unsigned_abs(), denominator.unsigned_abs())).ok()?;
        Some(Self {
            numerator: i64::try_from(numerator / g).ok()?,
            denominator: i64::try_from(denominator / g).ok()?,
        })
    }

    /// Returns the numerator. Carries the sign of the fraction.
    #[must_use]
    pub const fn numerator(&self) -> i64 {
        self.numerator
    }

    /// Returns the denominator. Always positive.
    #[must_use]
    pub const fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Returns true if the denominator is 1.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        self.denominator == 1
    }

    /// Converts to an integer if the denominator is 1.
    #[must_use]
    pub const fn to_integer(&self) -> Option<i64> {
        if self.is_integer() {
            Some(self.numerator)
        } else {
            None
        }
    }

    /// Integer part, rounded toward zero.
    #[must_use]
    pub const fn trunc(&self) -> i64 {
        self.numerator / self.denominator
    }

    /// Nearest `f64`. For display and diagnostics only.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Returns the absolute value.
    ///
    /// # Panics
    ///
    /// Panics on overflow, like [`Neg`], when the numerator is `i64::MIN`.
    #[must_use]
    #[track_caller]
    pub fn abs(&self) -> Self {
        if self.numerator < 0 {
            -*self
        } else {
            *self
        }
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub const fn signum(&self) -> i8 {
        if self.numerator == 0 {
            0
        } else if self.numerator > 0 {
            1
        } else {
            -1
        }
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Errors
    ///
    /// Returns [`ScalarError::DivisionByZero`] if the fraction is zero.
    pub fn recip(&self) -> Result<Self> {
        Self::new(self.denominator, self.numerator)
    }

    /// Divides by another fraction: `self * rhs.recip()`.
    ///
    /// # Errors
    ///
    /// Returns [`ScalarError::DivisionByZero`] if `rhs` is zero, or
    /// [`ScalarError::Overflow`] if the quotient leaves the `i64` range.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        let recip = rhs.recip()?;
        self.checked_mul(&recip).ok_or(ScalarError::Overflow)
    }
}

/// Euclid's algorithm.
fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cold]
#[track_caller]
fn overflow(op: &str) -> ! {
    panic!("attempt to {op} fractions with overflow")
}

impl CheckedAdd for Fraction {
    fn checked_add(&self, rhs: &Self) -> Option<Self> {
        let numerator = i128::from(self.numerator) * i128::from(rhs.denominator)
            + i128::from(rhs.numerator) * i128::from(self.denominator);
        Self::reduce(numerator, i128::from(self.denominator) * i128::from(rhs.denominator))
    }
}

impl CheckedSub for Fraction {
    fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        let numerator = i128::from(self.numerator) * i128::from(rhs.denominator)
            - i128::from(rhs.numerator) * i128::from(self.denominator);
        Self::reduce(numerator, i128::from(self.denominator) * i128::from(rhs.denominator))
    }
}

impl CheckedMul for Fraction {
    fn checked_mul(&self, rhs: &Self) -> Option<Self> {
        Self::reduce(
            i128::from(self.numerator) * i128::from(rhs.numerator),
            i128::from(self.denominator) * i128::from(rhs.denominator),
        )
    }
}

// Arithmetic operations. Like std integers, these panic on overflow.
impl Add for Fraction {
    type Output = Self;

    #[track_caller]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(&rhs).unwrap_or_else(|| overflow("add"))
    }
}

impl Sub for Fraction {
    type Output = Self;

    #[track_caller]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(&rhs).unwrap_or_else(|| overflow("subtract"))
    }
}

impl Mul for Fraction {
    type Output = Self;

    #[track_caller]
    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(&rhs).unwrap_or_else(|| overflow("multiply"))
    }
}

impl Neg for Fraction {
    type Output = Self;

    #[track_caller]
    fn neg(self) -> Self::Output {
        match self.numerator.checked_neg() {
            Some(numerator) => Self {
                numerator,
                denominator: self.denominator,
            },
            None => overflow("negate"),
        }
    }
}

impl Sum for Fraction {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Product for Fraction {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, Mul::mul)
    }
}

impl Zero for Fraction {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl One for Fraction {
    fn one() -> Self {
        Self::ONE
    }

    fn is_one(&self) -> bool {
        *self == Self::ONE
    }
}

impl Ord for Fraction {
    /// Cross-multiplied comparison; exact over the whole `i64` range.
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = i128::from(self.numerator) * i128::from(other.denominator);
        let rhs = i128::from(other.numerator) * i128::from(self.denominator);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<i64> for Fraction {
    fn eq(&self, other: &i64) -> bool {
        self.denominator == 1 && self.numerator == *other
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for Fraction {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl From<i32> for Fraction {
    fn from(n: i32) -> Self {
        Self::from_integer(i64::from(n))
    }
}

/// Parses an ASCII digit run, optionally preceded by `-`.
fn parse_int(text: &str, allow_sign: bool) -> Option<i64> {
    let digits = if allow_sign {
        text.strip_prefix('-').unwrap_or(text)
    } else {
        text
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl FromStr for Fraction {
    type Err = ScalarError;

    /// Accepts `<int>` or `<int>/<int>`; only the numerator may carry a `-`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ScalarError::InvalidFormat(s.to_owned());
        match s.split_once('/') {
            None => parse_int(s, true)
                .map(Self::from_integer)
                .ok_or_else(invalid),
            Some((numerator, denominator)) => {
                let numerator = parse_int(numerator, true).ok_or_else(invalid)?;
                let denominator = parse_int(denominator, false).ok_or_else(invalid)?;
                Self::new(numerator, denominator)
            }
        }
    }
}

impl fmt::Debug for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fraction({self})")
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}
