//! Exact rational number kernel
//!
//! Every numeric atom in the algebra is an arbitrary-precision rational.
//! There are no floats anywhere: results are exact or stay symbolic. The
//! symbolic constants pi and e are not numbers; they live in
//! [`MathConstant`](crate::core::MathConstant).

use num_bigint::BigInt;
use num_integer::Roots;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Exact rational number with bignum numerator and denominator
///
/// The denominator is always positive and the fraction is always reduced;
/// both invariants are maintained by the underlying [`BigRational`]. The
/// rational is boxed so that numeric atoms keep the expression enum small.
///
/// # Examples
///
/// ```rust
/// use antiderive_core::Number;
///
/// let half = Number::rational(1, 2);
/// let third = Number::rational(1, 3);
/// assert_eq!(half + third, Number::rational(5, 6));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Number(Box<BigRational>);

impl Number {
    /// Create an integer number
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::Number;
    ///
    /// let num = Number::integer(42);
    /// assert!(num.is_integer());
    /// ```
    pub fn integer(value: i64) -> Self {
        Self(Box::new(BigRational::from(BigInt::from(value))))
    }

    fn wrap(value: BigRational) -> Self {
        Self(Box::new(value))
    }

    /// Create a rational number from a numerator and denominator
    ///
    /// The fraction is reduced and the denominator sign is normalized.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero; a zero denominator is a programming defect.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::Number;
    ///
    /// assert_eq!(Number::rational(2, 4), Number::rational(1, 2));
    /// assert_eq!(Number::rational(1, -2), Number::rational(-1, 2));
    /// ```
    pub fn rational(numer: i64, denom: i64) -> Self {
        Self::wrap(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    /// Wrap an exact [`BigRational`]
    pub fn from_big_rational(value: BigRational) -> Self {
        Self::wrap(value)
    }

    /// Create a number from a big integer
    pub fn from_big_int(value: BigInt) -> Self {
        Self::wrap(BigRational::from(value))
    }

    /// The zero value
    pub fn zero() -> Self {
        Self::wrap(BigRational::zero())
    }

    /// The one value
    pub fn one() -> Self {
        Self::wrap(BigRational::one())
    }

    /// Borrow the underlying rational
    pub fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    /// Numerator (sign-carrying)
    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    /// Denominator (always positive)
    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_negative_one(&self) -> bool {
        self.0.is_integer() && self.0.numer() == &BigInt::from(-1)
    }

    /// Whether the denominator is one
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        Self::wrap(self.0.abs())
    }

    /// Multiplicative inverse, or `None` for zero
    pub fn recip(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Self::wrap(self.0.recip()))
        }
    }

    /// Checked division, `None` when dividing by zero
    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        if other.is_zero() {
            None
        } else {
            Some(Self::wrap(&*self.0 / &*other.0))
        }
    }

    /// Exact integer value when the number is an integer fitting in `i64`
    pub fn to_i64(&self) -> Option<i64> {
        if self.0.is_integer() {
            self.0.numer().to_i64()
        } else {
            None
        }
    }

    /// Exact integer exponent when this fits in `i32`
    ///
    /// Exponent-sized conversions are separate from [`Number::to_i64`] because
    /// power folding must refuse absurdly large exponents rather than loop.
    pub fn to_exponent(&self) -> Option<i32> {
        if self.0.is_integer() {
            self.0.numer().to_i32()
        } else {
            None
        }
    }

    /// Raise to an exact integer power
    ///
    /// Returns `None` for `0` raised to a negative power.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::Number;
    ///
    /// let base = Number::rational(2, 3);
    /// assert_eq!(base.pow_integer(2), Some(Number::rational(4, 9)));
    /// assert_eq!(base.pow_integer(-1), Some(Number::rational(3, 2)));
    /// assert_eq!(Number::zero().pow_integer(-1), None);
    /// ```
    pub fn pow_integer(&self, exponent: i32) -> Option<Self> {
        if self.is_zero() && exponent < 0 {
            return None;
        }
        Some(Self::wrap(num_traits::Pow::pow(&*self.0, exponent)))
    }

    /// Exact `self^(p/q)` when both the numerator and denominator of `self`
    /// have exact `q`-th roots
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::Number;
    ///
    /// let quarter = Number::rational(1, 4);
    /// let half = Number::rational(1, 2);
    /// assert_eq!(quarter.checked_pow(&half), Some(Number::rational(1, 2)));
    /// assert_eq!(Number::integer(8).checked_pow(&Number::rational(1, 3)),
    ///            Some(Number::integer(2)));
    /// assert_eq!(Number::integer(2).checked_pow(&half), None);
    /// ```
    pub fn checked_pow(&self, exponent: &Number) -> Option<Self> {
        if exponent.is_integer() {
            return self.pow_integer(exponent.to_exponent()?);
        }

        let p = exponent.numer().to_i32()?;
        let q = exponent.denom().to_u32()?;

        let numer_root = exact_nth_root(self.0.numer(), q)?;
        let denom_root = exact_nth_root(self.0.denom(), q)?;
        Self::wrap(BigRational::new(numer_root, denom_root)).pow_integer(p)
    }

    /// Floor-convention modulo, matching the sign of the divisor
    ///
    /// Used to reduce rational multiples of pi into `[0, 2)` before the
    /// special-angle tables are consulted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::Number;
    ///
    /// let n = Number::rational(7, 2);
    /// assert_eq!(n.modulo(&Number::integer(2)), Number::rational(3, 2));
    /// let m = Number::rational(-1, 2);
    /// assert_eq!(m.modulo(&Number::integer(2)), Number::rational(3, 2));
    /// ```
    pub fn modulo(&self, divisor: &Self) -> Self {
        let quotient = (&*self.0 / &*divisor.0).floor();
        Self::wrap(&*self.0 - &*divisor.0 * quotient)
    }
}

/// Exact integer `n`-th root, `None` when the root is irrational
///
/// Negative values admit odd roots only.
pub(crate) fn exact_nth_root(value: &BigInt, n: u32) -> Option<BigInt> {
    if n == 0 {
        return None;
    }
    if value.is_negative() {
        if n % 2 == 0 {
            return None;
        }
        return exact_nth_root(&-value, n).map(|root| -root);
    }
    let root = value.nth_root(n);
    if num_traits::Pow::pow(&root, n) == *value {
        Some(root)
    } else {
        None
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::integer(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self::integer(value as i64)
    }
}

impl From<BigRational> for Number {
    fn from(value: BigRational) -> Self {
        Self::wrap(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_integer() {
            write!(f, "{}", self.0.numer())
        } else {
            write!(f, "{}/{}", self.0.numer(), self.0.denom())
        }
    }
}

macro_rules! impl_number_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Number {
            type Output = Number;

            fn $method(self, other: Number) -> Number {
                Number::wrap(*self.0 $op *other.0)
            }
        }

        impl $trait for &Number {
            type Output = Number;

            fn $method(self, other: &Number) -> Number {
                Number::wrap(&*self.0 $op &*other.0)
            }
        }
    };
}

impl_number_binop!(Add, add, +);
impl_number_binop!(Sub, sub, -);
impl_number_binop!(Mul, mul, *);

/// Division panics on a zero divisor; use [`Number::checked_div`] when the
/// divisor is not known to be nonzero.
impl Div for Number {
    type Output = Number;

    fn div(self, other: Number) -> Number {
        assert!(!other.is_zero(), "BUG: Number division by zero");
        Number::wrap(*self.0 / *other.0)
    }
}

impl Div for &Number {
    type Output = Number;

    fn div(self, other: &Number) -> Number {
        assert!(!other.is_zero(), "BUG: Number division by zero");
        Number::wrap(&*self.0 / &*other.0)
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        Number::wrap(-*self.0)
    }
}

impl Neg for &Number {
    type Output = Number;

    fn neg(self) -> Number {
        Number::wrap(-&*self.0)
    }
}
