//! Logarithm and trigonometric simplification

use super::arithmetic::helpers::strip_leading_minus_one;
use super::arithmetic::multiplication::simplify_multiplication;
use super::Simplify;
use crate::algebra::factor::factor_sum;
use crate::core::{Expression, LogData, Number, TrigData, TrigKind};

/// Simplify a logarithm
///
/// `log(1) = 0` and `log_b(b) = 1`; powers pull their exponent out, products
/// split into sums of logarithms (after factoring, for factorable sums), and
/// logarithms of the reciprocal trig functions normalize to the negated
/// logarithm of the underlying function.
pub fn simplify_log(data: &LogData) -> Expression {
    let inner = data.inner.simplify();
    let base = data.base.simplify();

    if inner.is_one() {
        return Expression::zero();
    }
    if inner == base {
        return Expression::one();
    }

    // log(a^n) = n*log(a)
    if let Expression::Pow(pow_base, pow_exponent) = &inner {
        return simplify_multiplication(&[
            (**pow_exponent).clone(),
            Expression::log_base((**pow_base).clone(), base),
        ]);
    }

    // log(a*b) = log(a) + log(b)
    if let Expression::Mul(factors) = &inner {
        let logs: Vec<Expression> = factors
            .iter()
            .map(|factor| Expression::log_base(factor.clone(), base.clone()))
            .collect();
        return Expression::add(logs).simplify();
    }

    // a factorable sum splits the same way
    if let Expression::Add(terms) = &inner {
        let factored = factor_sum(terms);
        if let Expression::Mul(factors) = &factored {
            let logs: Vec<Expression> = factors
                .iter()
                .map(|factor| Expression::log_base(factor.clone(), base.clone()))
                .collect();
            return Expression::add(logs).simplify();
        }
    }

    // log(sec u) = -log(cos u), and likewise for csc and cot
    if let Expression::Trig(trig) = &inner {
        if matches!(trig.kind, TrigKind::Sec | TrigKind::Csc | TrigKind::Cot) {
            let reciprocal = trig.kind.reciprocal().expect("reciprocal trig pairs");
            let log = Expression::log_base(
                Expression::trig(reciprocal, trig.inner.clone()),
                base,
            );
            return simplify_multiplication(&[Expression::integer(-1), log]);
        }
    }

    Expression::log_base(inner, base)
}

/// Simplify a trigonometric function application
pub fn simplify_trig(data: &TrigData) -> Expression {
    let inner = data.inner.simplify();
    let kind = data.kind;

    // compositions with the inverse functions
    if let Expression::Trig(inner_trig) = &inner {
        if inner_trig.kind.is_inverse() != kind.is_inverse() {
            if let Some(result) = simplify_composition(kind, inner_trig.kind, &inner_trig.inner)
            {
                return result;
            }
        }
    }

    match kind {
        TrigKind::Sin => {
            if inner.is_zero() {
                return Expression::zero();
            }
            if let Some(coefficient) = pi_coefficient(&inner) {
                if let Some(value) = sin_special_value(&coefficient) {
                    return value;
                }
            }
        }
        TrigKind::Cos => {
            // cos is even
            if let Some(positive) = strip_leading_minus_one(&inner) {
                return simplify_trig(&TrigData {
                    kind: TrigKind::Cos,
                    inner: positive,
                });
            }
            if inner.is_zero() {
                return Expression::one();
            }
            if let Some(coefficient) = pi_coefficient(&inner) {
                if let Some(value) = cos_special_value(&coefficient) {
                    return value;
                }
            }
        }
        TrigKind::Tan => {
            if inner.is_zero() {
                return Expression::zero();
            }
            if let Some(coefficient) = pi_coefficient(&inner) {
                if is_special_key(&coefficient) {
                    let ratio = Expression::trig(TrigKind::Sin, inner.clone())
                        / Expression::trig(TrigKind::Cos, inner);
                    return ratio.simplify();
                }
            }
        }
        TrigKind::Sec => {
            if let Some(coefficient) = pi_coefficient(&inner) {
                if is_special_key(&coefficient) {
                    let reciprocal =
                        Expression::one() / Expression::trig(TrigKind::Cos, inner);
                    return reciprocal.simplify();
                }
            }
        }
        // csc and cot at special angles are deliberately left symbolic; the
        // rewrite transforms reach them through sin and cos instead
        _ => {}
    }

    Expression::trig(kind, inner)
}

/// Simplify `f(g(u))` where exactly one of `f`, `g` is an inverse function
fn simplify_composition(
    outer: TrigKind,
    inner_kind: TrigKind,
    argument: &Expression,
) -> Option<Expression> {
    // same function: sin(asin u) = u and asin(sin u) = u
    if outer.direct() == Some(inner_kind) || inner_kind.direct() == Some(outer) {
        return Some(argument.clone());
    }

    if outer.is_inverse() {
        // mixed arc-of-direct compositions such as asin(cos u) stay symbolic
        return None;
    }

    // reciprocal pairs: sec(acos u) = csc(asin u) = cot(atan u) = 1/u
    if let (Some(partner), Some(direct)) = (outer.reciprocal(), inner_kind.direct()) {
        if partner == direct {
            return Some((Expression::one() / argument.clone()).simplify());
        }
    }

    if matches!(outer, TrigKind::Sin | TrigKind::Cos | TrigKind::Tan) {
        return direct_arc_surd(outer, inner_kind, argument);
    }

    // sec, csc and cot go through their reciprocal partner
    let partner = outer.reciprocal().expect("direct trig has a reciprocal");
    let inverted =
        Expression::one() / direct_arc_surd(partner, inner_kind, argument)?;
    Some(inverted.simplify())
}

/// Closed surd forms for sin/cos/tan over a different arc function
fn direct_arc_surd(
    outer: TrigKind,
    arc: TrigKind,
    u: &Expression,
) -> Option<Expression> {
    let u = u.clone();
    let one = Expression::one;
    let u_squared = || Expression::pow(u.clone(), Expression::integer(2));
    let result = match (outer, arc) {
        (TrigKind::Sin, TrigKind::ArcCos) => Expression::sqrt(one() - u_squared()),
        (TrigKind::Sin, TrigKind::ArcTan) => {
            u.clone() / Expression::sqrt(one() + u_squared())
        }
        (TrigKind::Cos, TrigKind::ArcSin) => Expression::sqrt(one() - u_squared()),
        (TrigKind::Cos, TrigKind::ArcTan) => {
            one() / Expression::sqrt(one() + u_squared())
        }
        (TrigKind::Tan, TrigKind::ArcSin) => {
            u.clone() / Expression::sqrt(one() - u_squared())
        }
        (TrigKind::Tan, TrigKind::ArcCos) => {
            Expression::sqrt(one() - u_squared()) / u.clone()
        }
        _ => return None,
    };
    Some(result.simplify())
}

/// Rational multiple of pi, when the argument is exactly `q * pi`
fn pi_coefficient(inner: &Expression) -> Option<Number> {
    let quotient = simplify_multiplication(&[
        inner.clone(),
        Expression::pow(Expression::pi(), Expression::integer(-1)),
    ]);
    match quotient {
        Expression::Number(num) => Some(num.modulo(&Number::integer(2))),
        _ => None,
    }
}

/// The 12 special keys in `[0, 2)` at which trig functions fold exactly
fn is_special_key(coefficient: &Number) -> bool {
    special_key(coefficient).is_some()
}

/// Map a reduced coefficient onto `(numerator, denominator)` for the tables
fn special_key(coefficient: &Number) -> Option<(i64, i64)> {
    use num_traits::ToPrimitive;
    let numer = coefficient.numer().to_i64()?;
    let denom = coefficient.denom().to_i64()?;
    match (numer, denom) {
        (0, 1)
        | (1, 4)
        | (1, 3)
        | (1, 2)
        | (2, 3)
        | (3, 4)
        | (1, 1)
        | (5, 4)
        | (4, 3)
        | (3, 2)
        | (5, 3)
        | (7, 4) => Some((numer, denom)),
        _ => None,
    }
}

/// `sqrt(2)/2` in canonical form
fn half_sqrt(radicand: i64) -> Expression {
    (Expression::sqrt(Expression::integer(radicand)) / Expression::integer(2)).simplify()
}

fn sin_special_value(coefficient: &Number) -> Option<Expression> {
    let value = match special_key(coefficient)? {
        (0, 1) | (1, 1) => Expression::zero(),
        (1, 4) | (3, 4) => half_sqrt(2),
        (1, 3) | (2, 3) => half_sqrt(3),
        (1, 2) => Expression::one(),
        (5, 4) | (7, 4) => (-half_sqrt(2)).simplify(),
        (4, 3) | (5, 3) => (-half_sqrt(3)).simplify(),
        (3, 2) => Expression::integer(-1),
        _ => return None,
    };
    Some(value)
}

fn cos_special_value(coefficient: &Number) -> Option<Expression> {
    let value = match special_key(coefficient)? {
        (0, 1) => Expression::one(),
        (1, 4) | (7, 4) => half_sqrt(2),
        (1, 3) | (5, 3) => Expression::rational(1, 2),
        (1, 2) | (3, 2) => Expression::zero(),
        (2, 3) | (4, 3) => Expression::rational(-1, 2),
        (3, 4) | (5, 4) => (-half_sqrt(2)).simplify(),
        (1, 1) => Expression::integer(-1),
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expression {
        Expression::symbol("x")
    }

    fn pi_times(numer: i64, denom: i64) -> Expression {
        Expression::mul(vec![Expression::rational(numer, denom), Expression::pi()])
    }

    #[test]
    fn test_log_identities() {
        assert_eq!(Expression::log(Expression::one()).simplify(), Expression::zero());
        assert_eq!(Expression::log(Expression::e()).simplify(), Expression::one());
        assert_eq!(
            Expression::log_base(Expression::integer(2), Expression::integer(2)).simplify(),
            Expression::one()
        );
    }

    #[test]
    fn test_log_of_power_pulls_exponent() {
        let expr = Expression::log(Expression::pow(x(), Expression::integer(3)));
        assert_eq!(
            expr.simplify(),
            Expression::mul(vec![Expression::integer(3), Expression::log(x())])
        );
    }

    #[test]
    fn test_log_of_product_splits() {
        let expr = Expression::log(Expression::mul(vec![x(), Expression::symbol("y")]));
        let expected = Expression::add(vec![
            Expression::log(x()),
            Expression::log(Expression::symbol("y")),
        ])
        .simplify();
        assert_eq!(expr.simplify(), expected);
    }

    #[test]
    fn test_log_of_sec_normalizes() {
        let expr = Expression::log(Expression::trig(TrigKind::Sec, x()));
        let expected = Expression::mul(vec![
            Expression::integer(-1),
            Expression::log(Expression::trig(TrigKind::Cos, x())),
        ]);
        assert_eq!(expr.simplify(), expected);
    }

    #[test]
    fn test_sin_special_values() {
        assert_eq!(
            Expression::trig(TrigKind::Sin, Expression::zero()).simplify(),
            Expression::zero()
        );
        assert_eq!(
            Expression::trig(TrigKind::Sin, pi_times(1, 2)).simplify(),
            Expression::one()
        );
        assert_eq!(
            Expression::trig(TrigKind::Sin, pi_times(3, 2)).simplify(),
            Expression::integer(-1)
        );
        assert_eq!(
            Expression::trig(TrigKind::Sin, Expression::pi()).simplify(),
            Expression::zero()
        );
    }

    #[test]
    fn test_cos_special_values() {
        assert_eq!(
            Expression::trig(TrigKind::Cos, Expression::zero()).simplify(),
            Expression::one()
        );
        assert_eq!(
            Expression::trig(TrigKind::Cos, Expression::pi()).simplify(),
            Expression::integer(-1)
        );
        assert_eq!(
            Expression::trig(TrigKind::Cos, pi_times(3, 2)).simplify(),
            Expression::zero()
        );
        assert_eq!(
            Expression::trig(TrigKind::Cos, pi_times(1, 3)).simplify(),
            Expression::rational(1, 2)
        );
    }

    #[test]
    fn test_negative_angles_reduce_modulo_period() {
        // cos(-pi/2) reduces through evenness and the period
        let expr = Expression::trig(
            TrigKind::Cos,
            Expression::mul(vec![Expression::rational(-1, 2), Expression::pi()]),
        );
        assert_eq!(expr.simplify(), Expression::zero());
        // sin(5pi/2) wraps to sin(pi/2)
        let expr = Expression::trig(TrigKind::Sin, pi_times(5, 2));
        assert_eq!(expr.simplify(), Expression::one());
    }

    #[test]
    fn test_sec_at_special_angle() {
        let expr = Expression::trig(TrigKind::Sec, pi_times(1, 3));
        assert_eq!(expr.simplify(), Expression::integer(2));
    }

    #[test]
    fn test_tan_at_special_angle() {
        let expr = Expression::trig(TrigKind::Tan, pi_times(1, 1));
        assert_eq!(expr.simplify(), Expression::zero());
    }

    #[test]
    fn test_inverse_compositions() {
        let sin_asin = Expression::trig(
            TrigKind::Sin,
            Expression::trig(TrigKind::ArcSin, x()),
        );
        assert_eq!(sin_asin.simplify(), x());

        let sin_acos = Expression::trig(
            TrigKind::Sin,
            Expression::trig(TrigKind::ArcCos, x()),
        );
        let expected = Expression::sqrt(
            (Expression::one() - Expression::pow(x(), Expression::integer(2))).simplify(),
        );
        assert_eq!(sin_acos.simplify(), expected);
    }

    #[test]
    fn test_unknown_angles_stay_symbolic() {
        let expr = Expression::trig(TrigKind::Sin, Expression::one());
        assert_eq!(
            expr.simplify(),
            Expression::trig(TrigKind::Sin, Expression::one())
        );
        let expr = Expression::trig(TrigKind::Sin, pi_times(1, 5));
        assert_eq!(
            expr.simplify(),
            Expression::trig(TrigKind::Sin, pi_times(1, 5))
        );
    }
}
