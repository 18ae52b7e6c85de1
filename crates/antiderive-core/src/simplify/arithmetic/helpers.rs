//! Shared decompositions used across arithmetic simplification

use crate::core::{Expression, Number};

/// Split an expression into `(base, exponent)`
///
/// `x^3` gives `(x, 3)`; anything else gives `(expr, 1)`.
pub(crate) fn deconstruct_power(expr: &Expression) -> (Expression, Expression) {
    match expr {
        Expression::Pow(base, exponent) => ((**base).clone(), (**exponent).clone()),
        _ => (expr.clone(), Expression::one()),
    }
}

/// Split a simplified term into `(rational coefficient, non-constant factors)`
///
/// `3*x^2*y` gives `(3, [x^2, y])`; a bare term gives `(1, [term])`.
pub(crate) fn deconstruct_product(expr: &Expression) -> (Number, Vec<Expression>) {
    match expr {
        Expression::Mul(factors) => {
            let mut coefficient = Number::one();
            let mut rest = Vec::with_capacity(factors.len());
            for factor in factors.iter() {
                match factor {
                    Expression::Number(num) => coefficient = &coefficient * num,
                    _ => rest.push(factor.clone()),
                }
            }
            (coefficient, rest)
        }
        Expression::Number(num) => (num.clone(), vec![]),
        _ => (Number::one(), vec![expr.clone()]),
    }
}

/// Rebuild a product from a factor list without simplifying
pub(crate) fn product_from(mut factors: Vec<Expression>) -> Expression {
    match factors.len() {
        0 => Expression::one(),
        1 => factors.remove(0),
        _ => Expression::mul(factors),
    }
}

/// Split a product's factor list across a fraction bar
///
/// Negative constant exponents move below the bar with their exponent
/// negated; rational constants contribute their numerator above and their
/// denominator below.
pub(crate) fn numerator_denominator(factors: &[Expression]) -> (Expression, Expression) {
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();

    for factor in factors {
        if let Expression::Number(num) = factor {
            if num.numer() != &num_bigint::BigInt::from(1) {
                numerator.push(Expression::Number(Number::from_big_int(num.numer().clone())));
            }
            if !num.is_integer() {
                denominator.push(Expression::Number(Number::from_big_int(num.denom().clone())));
            }
            continue;
        }

        let (base, exponent) = deconstruct_power(factor);
        match exponent.as_number() {
            Some(num) if num.is_negative() => {
                if num.is_negative_one() {
                    denominator.push(base);
                } else {
                    denominator.push(Expression::pow(base, Expression::Number(-num)));
                }
            }
            _ => numerator.push(factor.clone()),
        }
    }

    (product_from(numerator), product_from(denominator))
}

/// Negate a product with a negative leading coefficient
///
/// `-x` gives `x`, `-2*x` gives `2*x`; `None` when the expression is not a
/// product led by a negative rational.
pub(crate) fn strip_leading_minus_one(expr: &Expression) -> Option<Expression> {
    let factors = match expr {
        Expression::Mul(factors) => factors,
        _ => return None,
    };
    let leading = match factors.first() {
        Some(Expression::Number(num)) if num.is_negative() => num,
        _ => return None,
    };

    let positive = -leading;
    let rest: Vec<Expression> = factors.iter().skip(1).cloned().collect();
    if positive.is_one() {
        Some(product_from(rest))
    } else {
        let mut new_factors = vec![Expression::Number(positive)];
        new_factors.extend(rest);
        Some(product_from(new_factors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expression {
        Expression::symbol("x")
    }

    #[test]
    fn test_deconstruct_product() {
        let expr = Expression::mul(vec![
            Expression::integer(3),
            x(),
            Expression::rational(1, 2),
        ]);
        let (coeff, rest) = deconstruct_product(&expr);
        assert_eq!(coeff, Number::rational(3, 2));
        assert_eq!(rest, vec![x()]);

        let (coeff, rest) = deconstruct_product(&x());
        assert_eq!(coeff, Number::one());
        assert_eq!(rest, vec![x()]);
    }

    #[test]
    fn test_numerator_denominator_moves_negative_powers() {
        let factors = vec![
            Expression::rational(2, 3),
            x(),
            Expression::pow(Expression::symbol("y"), Expression::integer(-2)),
        ];
        let (num, den) = numerator_denominator(&factors);
        assert_eq!(num, Expression::mul(vec![Expression::integer(2), x()]));
        assert_eq!(
            den,
            Expression::mul(vec![
                Expression::integer(3),
                Expression::pow(Expression::symbol("y"), Expression::integer(2)),
            ])
        );
    }

    #[test]
    fn test_strip_leading_minus_one() {
        let neg_x = Expression::mul(vec![Expression::integer(-1), x()]);
        assert_eq!(strip_leading_minus_one(&neg_x), Some(x()));

        let neg_2x = Expression::mul(vec![Expression::integer(-2), x()]);
        assert_eq!(
            strip_leading_minus_one(&neg_2x),
            Some(Expression::mul(vec![Expression::integer(2), x()]))
        );

        assert_eq!(strip_leading_minus_one(&x()), None);
    }
}
