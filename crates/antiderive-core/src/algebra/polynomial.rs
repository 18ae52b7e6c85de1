//! Dense univariate polynomials over the exact rationals
//!
//! Coefficient vectors indexed by power, used by the polynomial-division and
//! partial-fraction transforms. Conversion from an expression fails unless
//! every term is a rational multiple of a non-negative integer power of the
//! variable.

use crate::core::{Expression, Number, Symbol};
use crate::error::{MathError, MathResult};
use crate::simplify::Simplify;

/// Dense coefficient vector; index is the power of the variable
///
/// The zero polynomial has an empty coefficient vector, and a nonzero
/// polynomial never carries trailing zero coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: Vec<Number>,
}

impl Polynomial {
    /// Build from coefficients, stripping trailing zeros
    pub fn new(coefficients: Vec<Number>) -> Self {
        let mut poly = Self { coefficients };
        poly.strip_trailing_zeros();
        poly
    }

    pub fn zero() -> Self {
        Self {
            coefficients: Vec::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Degree of the polynomial; the zero polynomial reports degree 0
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Number of coefficients (degree + 1 for nonzero polynomials)
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn coefficients(&self) -> &[Number] {
        &self.coefficients
    }

    /// Coefficient of the given power (zero beyond the degree)
    pub fn coefficient(&self, power: usize) -> Number {
        self.coefficients
            .get(power)
            .cloned()
            .unwrap_or_else(Number::zero)
    }

    fn leading(&self) -> &Number {
        self.coefficients
            .last()
            .expect("BUG: leading coefficient of the zero polynomial")
    }

    fn strip_trailing_zeros(&mut self) {
        while matches!(self.coefficients.last(), Some(c) if c.is_zero()) {
            self.coefficients.pop();
        }
    }

    /// Interpret a simplified expression as a polynomial in `var`
    ///
    /// Sums convert term-wise, products multiply through, and integer powers
    /// of convertible expressions are expanded by repeated multiplication, so
    /// an unexpanded denominator like `x*(x + 6)` converts directly.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidInput`] when any part is not polynomial in
    /// `var`: a foreign symbol, a negative or fractional power, or a
    /// transcendental function.
    pub fn from_expression(expr: &Expression, var: &Symbol) -> MathResult<Self> {
        let not_polynomial = || MathError::InvalidInput {
            reason: format!("{} is not a polynomial in {}", expr, var),
        };

        match expr {
            Expression::Number(num) => Ok(Self::new(vec![num.clone()])),
            Expression::Symbol(sym) if sym == var => {
                Ok(Self::new(vec![Number::zero(), Number::one()]))
            }
            Expression::Symbol(_) | Expression::Constant(_) => Err(not_polynomial()),
            Expression::Add(terms) => {
                let mut total = Self::zero();
                for term in terms.iter() {
                    total = total.add(&Self::from_expression(term, var)?);
                }
                Ok(total)
            }
            Expression::Mul(factors) => {
                let mut product = Self::new(vec![Number::one()]);
                for factor in factors.iter() {
                    product = product.multiply(&Self::from_expression(factor, var)?);
                }
                Ok(product)
            }
            Expression::Pow(base, exponent) => {
                let power = exponent
                    .as_number()
                    .filter(|num| num.is_integer() && !num.is_negative())
                    .and_then(Number::to_i64)
                    .ok_or_else(not_polynomial)?;
                let base_poly = Self::from_expression(base, var)?;
                let mut result = Self::new(vec![Number::one()]);
                for _ in 0..power {
                    result = result.multiply(&base_poly);
                }
                Ok(result)
            }
            Expression::Log(_) | Expression::Trig(_) => Err(not_polynomial()),
        }
    }

    /// Convert back to a simplified expression in `var`
    pub fn to_expression(&self, var: &Symbol) -> Expression {
        if self.is_zero() {
            return Expression::zero();
        }
        let terms: Vec<Expression> = self
            .coefficients
            .iter()
            .enumerate()
            .map(|(power, coefficient)| {
                let monomial = Expression::pow(
                    Expression::symbol(var.clone()),
                    Expression::integer(power as i64),
                );
                Expression::mul(vec![Expression::Number(coefficient.clone()), monomial])
            })
            .collect();
        Expression::add(terms).simplify()
    }

    fn add(&self, other: &Self) -> Self {
        let len = self.len().max(other.len());
        let coefficients = (0..len)
            .map(|i| &self.coefficient(i) + &other.coefficient(i))
            .collect();
        Self::new(coefficients)
    }

    fn subtract(&self, other: &Self) -> Self {
        let len = self.len().max(other.len());
        let coefficients = (0..len)
            .map(|i| &self.coefficient(i) - &other.coefficient(i))
            .collect();
        Self::new(coefficients)
    }

    fn multiply(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut coefficients = vec![Number::zero(); self.len() + other.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in other.coefficients.iter().enumerate() {
                coefficients[i + j] = &coefficients[i + j] + &(a * b);
            }
        }
        Self::new(coefficients)
    }

    /// Scale by a rational constant
    fn scale(&self, factor: &Number) -> Self {
        Self::new(
            self.coefficients
                .iter()
                .map(|c| c * factor)
                .collect(),
        )
    }

    /// Shift up by `powers` (multiply by `x^powers`)
    fn shift(&self, powers: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut coefficients = vec![Number::zero(); powers];
        coefficients.extend(self.coefficients.iter().cloned());
        Self::new(coefficients)
    }

    /// Euclidean long division: `self = quotient * divisor + remainder`
    ///
    /// # Panics
    ///
    /// Panics when dividing by the zero polynomial; that is a programming
    /// defect in the caller.
    pub fn long_division(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "BUG: polynomial division by zero");

        let mut remainder = self.clone();
        let mut quotient = Self::zero();
        while !remainder.is_zero() && remainder.len() >= divisor.len() {
            let shift = remainder.len() - divisor.len();
            let factor = remainder.leading() / divisor.leading();
            let term = Self::new(vec![factor.clone()]).shift(shift);
            quotient = quotient.add(&term);
            remainder = remainder.subtract(&divisor.scale(&factor).shift(shift));
        }
        (quotient, remainder)
    }
}
