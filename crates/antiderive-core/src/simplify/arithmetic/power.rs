//! Power simplification

use super::multiplication::simplify_multiplication;
use crate::core::{Expression, Number};
use crate::simplify::Simplify;
use num_traits::ToPrimitive;

/// Simplify a power expression
///
/// Applies the exponent laws that keep the algebra canonical: unit and zero
/// exponents collapse, rational bases with rational exponents fold when the
/// result is exact, nested powers multiply exponents, powers distribute over
/// product bases, and `b^log_b(y)` collapses to `y`.
pub fn simplify_power(base: &Expression, exponent: &Expression) -> Expression {
    let x = exponent.simplify();
    let b = base.simplify();

    if x.is_zero() && !b.is_zero() {
        return Expression::one();
    }
    if x.is_one() {
        return b;
    }

    if let (Expression::Number(base_num), Expression::Number(exp_num)) = (&b, &x) {
        return simplify_rational_power(base_num, exp_num);
    }

    // (y^a)^b collapses to y^(a*b)
    if let Expression::Pow(inner_base, inner_exp) = &b {
        let combined = simplify_multiplication(&[(**inner_exp).clone(), x]);
        return simplify_power(inner_base, &combined);
    }

    // (a*b*c)^n distributes over the factors
    if let Expression::Mul(factors) = &b {
        let raised: Vec<Expression> = factors
            .iter()
            .map(|factor| simplify_power(factor, &x))
            .collect();
        return simplify_multiplication(&raised);
    }

    // b^log_b(y) = y
    if let Expression::Log(data) = &x {
        if data.base == b {
            return data.inner.clone();
        }
    }

    // b^(c*log_b(y)) = y^c
    if let Expression::Mul(factors) = &x {
        for (i, factor) in factors.iter().enumerate() {
            if let Expression::Log(data) = factor {
                if data.base == b {
                    let mut rest: Vec<Expression> = factors.to_vec();
                    rest.remove(i);
                    let rest = simplify_multiplication(&rest);
                    return simplify_power(&data.inner, &rest);
                }
            }
        }
    }

    Expression::pow(b, x)
}

/// Fold `base^exponent` for rational operands where the result is exact
///
/// Integer bases with irrational roots stay symbolic. Fractional bases fold
/// their numerator and denominator independently, so `(4/3)^(1/2)` becomes
/// `2 * 3^(-1/2)` even though `sqrt(3)` is irrational.
fn simplify_rational_power(base: &Number, exponent: &Number) -> Expression {
    if let Some(result) = base.checked_pow(exponent) {
        return Expression::Number(result);
    }

    if base.is_integer() {
        return Expression::pow(
            Expression::Number(base.clone()),
            Expression::Number(exponent.clone()),
        );
    }

    let numer = Number::from_big_int(base.numer().clone());
    let denom = Number::from_big_int(base.denom().clone());
    let numer_folded = numer.checked_pow(exponent);
    let denom_folded = denom.checked_pow(exponent);
    if numer_folded.is_none() && denom_folded.is_none() {
        return Expression::pow(
            Expression::Number(base.clone()),
            Expression::Number(exponent.clone()),
        );
    }

    let numer_expr = match numer_folded {
        Some(folded) => Expression::Number(folded),
        None => Expression::pow(
            Expression::Number(numer),
            Expression::Number(exponent.clone()),
        ),
    };
    let denom_expr = match denom_folded {
        Some(folded) => Expression::Number(folded),
        None => Expression::pow(
            Expression::Number(denom),
            Expression::Number(exponent.clone()),
        ),
    };
    let reciprocal = invert_exact(denom_expr);
    simplify_multiplication(&[numer_expr, reciprocal])
}

fn invert_exact(expr: Expression) -> Expression {
    match expr {
        Expression::Number(num) => match num.recip() {
            Some(inverse) => Expression::Number(inverse),
            None => Expression::pow(Expression::Number(num), Expression::integer(-1)),
        },
        Expression::Pow(base, exponent) => {
            let negated = match exponent.as_number() {
                Some(num) => Expression::Number(-num),
                None => Expression::mul(vec![Expression::integer(-1), *exponent]).simplify(),
            };
            Expression::pow(*base, negated)
        }
        other => Expression::pow(other, Expression::integer(-1)),
    }
}

/// Integer exponent of a power when small enough to expand
pub(crate) fn small_integer_exponent(exponent: &Expression) -> Option<i32> {
    exponent
        .as_number()
        .filter(|num| num.is_integer())
        .and_then(|num| num.numer().to_i32())
}
