//! Arithmetic operator sugar for building expressions
//!
//! Operators build raw (unsimplified) trees; call
//! [`simplify`](crate::Simplify::simplify) to canonicalize. Subtraction and
//! division desugar to `+ (-1)*rhs` and `* rhs^-1`, matching the canonical
//! representation used throughout the algebra.

use super::Expression;
use std::ops::{Add, Div, Mul, Neg, Sub};

impl Add for Expression {
    type Output = Expression;

    fn add(self, other: Expression) -> Expression {
        Expression::add(vec![self, other])
    }
}

impl Sub for Expression {
    type Output = Expression;

    fn sub(self, other: Expression) -> Expression {
        Expression::add(vec![
            self,
            Expression::mul(vec![Expression::integer(-1), other]),
        ])
    }
}

impl Mul for Expression {
    type Output = Expression;

    fn mul(self, other: Expression) -> Expression {
        Expression::mul(vec![self, other])
    }
}

impl Div for Expression {
    type Output = Expression;

    fn div(self, other: Expression) -> Expression {
        Expression::mul(vec![
            self,
            Expression::pow(other, Expression::integer(-1)),
        ])
    }
}

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        Expression::mul(vec![Expression::integer(-1), self])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplify::Simplify;

    #[test]
    fn test_operator_sugar_simplifies_to_expected_values() {
        let a = Expression::integer(6);
        let b = Expression::integer(4);
        assert_eq!((a.clone() + b.clone()).simplify(), Expression::integer(10));
        assert_eq!((a.clone() - b.clone()).simplify(), Expression::integer(2));
        assert_eq!((a.clone() * b.clone()).simplify(), Expression::integer(24));
        assert_eq!((a.clone() / b).simplify(), Expression::rational(3, 2));
        assert_eq!((-a).simplify(), Expression::integer(-6));
    }
}
