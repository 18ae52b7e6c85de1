//! Expression constructor methods

use super::{Expression, LogData, TrigData, TrigKind};
use crate::core::{MathConstant, Number, Symbol};
use num_bigint::BigInt;

impl Expression {
    /// Create a number expression from anything convertible to [`Number`]
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::Expression;
    ///
    /// let expr = Expression::number(42);
    /// ```
    pub fn number<T: Into<Number>>(value: T) -> Self {
        Self::Number(value.into())
    }

    /// Create an integer expression
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::Expression;
    ///
    /// let expr = Expression::integer(42);
    /// ```
    pub fn integer(value: i64) -> Self {
        Self::Number(Number::integer(value))
    }

    /// Create an exact fraction expression
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::Expression;
    ///
    /// let half = Expression::rational(1, 2);
    /// ```
    pub fn rational(numer: i64, denom: i64) -> Self {
        Self::Number(Number::rational(numer, denom))
    }

    /// Create an expression from a big integer
    pub fn big_integer(value: BigInt) -> Self {
        Self::Number(Number::from_big_int(value))
    }

    /// Create a symbol expression
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::{Expression, Symbol};
    ///
    /// let expr = Expression::symbol(Symbol::new("x"));
    /// let expr = Expression::symbol("x");
    /// ```
    pub fn symbol<T: Into<Symbol>>(symbol: T) -> Self {
        Self::Symbol(symbol.into())
    }

    /// Create an addition expression
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::Expression;
    ///
    /// let expr = Expression::add(vec![
    ///     Expression::integer(1),
    ///     Expression::symbol("x"),
    /// ]);
    /// ```
    pub fn add(terms: Vec<Expression>) -> Self {
        Self::Add(Box::new(terms))
    }

    /// Create a multiplication expression
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::Expression;
    ///
    /// let expr = Expression::mul(vec![
    ///     Expression::integer(2),
    ///     Expression::symbol("x"),
    /// ]);
    /// ```
    pub fn mul(factors: Vec<Expression>) -> Self {
        Self::Mul(Box::new(factors))
    }

    /// Create a power expression
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::Expression;
    ///
    /// let expr = Expression::pow(Expression::symbol("x"), Expression::integer(2));
    /// ```
    pub fn pow(base: Expression, exponent: Expression) -> Self {
        Self::Pow(Box::new(base), Box::new(exponent))
    }

    /// Square root shorthand for `base^(1/2)`
    pub fn sqrt(base: Expression) -> Self {
        Self::pow(base, Expression::rational(1, 2))
    }

    /// Natural logarithm
    pub fn log(inner: Expression) -> Self {
        Self::Log(Box::new(LogData {
            inner,
            base: Expression::e(),
        }))
    }

    /// Logarithm with an explicit base
    pub fn log_base(inner: Expression, base: Expression) -> Self {
        Self::Log(Box::new(LogData { inner, base }))
    }

    /// Trigonometric function application
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::{Expression, TrigKind};
    ///
    /// let expr = Expression::trig(TrigKind::Sin, Expression::symbol("x"));
    /// ```
    pub fn trig(kind: TrigKind, inner: Expression) -> Self {
        Self::Trig(Box::new(TrigData { kind, inner }))
    }

    /// The constant pi
    pub fn pi() -> Self {
        Self::Constant(MathConstant::Pi)
    }

    /// The constant e
    pub fn e() -> Self {
        Self::Constant(MathConstant::E)
    }

    /// The zero expression
    pub fn zero() -> Self {
        Self::integer(0)
    }

    /// The one expression
    pub fn one() -> Self {
        Self::integer(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt_is_half_power() {
        let expr = Expression::sqrt(Expression::integer(2));
        assert_eq!(
            expr,
            Expression::pow(Expression::integer(2), Expression::rational(1, 2))
        );
    }

    #[test]
    fn test_log_defaults_to_natural_base() {
        if let Expression::Log(data) = Expression::log(Expression::symbol("x")) {
            assert_eq!(data.base, Expression::e());
        } else {
            panic!("expected a Log expression");
        }
    }
}
