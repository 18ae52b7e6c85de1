//! Pythagorean identity rewrites
//!
//! Applied once per sum simplification, by structural pattern on the
//! simplified terms. Two-term sums rewrite `1 + tan^2`, `1 + cot^2`,
//! `1 - sin^2` and `1 - cos^2` into single squared functions; inside sums of
//! any width, a `sin^2 + cos^2` or `sec^2 - tan^2` pair collapses to 1.

use super::arithmetic::addition::simplify_addition;
use crate::core::{Expression, TrigKind};

/// Try the Pythagorean rewrites on a simplified term list
///
/// Returns the fully simplified replacement, or `None` when no identity
/// applies.
pub(crate) fn rewrite(terms: &[Expression]) -> Option<Expression> {
    if terms.len() == 2 {
        if let Some(result) = rewrite_pair(&terms[0], &terms[1]) {
            return Some(result);
        }
        if let Some(result) = rewrite_pair(&terms[1], &terms[0]) {
            return Some(result);
        }
    }

    rewrite_subset(terms)
}

/// Two-term identities anchored on a literal 1
fn rewrite_pair(one: &Expression, other: &Expression) -> Option<Expression> {
    if !one.is_one() {
        return None;
    }

    if let Some((kind, inner)) = trig_square(other) {
        // 1 + tan^2 = sec^2, 1 + cot^2 = csc^2
        let replacement = match kind {
            TrigKind::Tan => TrigKind::Sec,
            TrigKind::Cot => TrigKind::Csc,
            _ => return None,
        };
        return Some(squared(replacement, inner.clone()));
    }

    if let Some((kind, inner)) = negated_trig_square(other) {
        // 1 - sin^2 = cos^2, 1 - cos^2 = sin^2
        let replacement = match kind {
            TrigKind::Sin => TrigKind::Cos,
            TrigKind::Cos => TrigKind::Sin,
            _ => return None,
        };
        return Some(squared(replacement, inner.clone()));
    }

    None
}

/// Collapse a `sin^2(u) + cos^2(u)` or `sec^2(u) - tan^2(u)` pair anywhere
/// in the sum
fn rewrite_subset(terms: &[Expression]) -> Option<Expression> {
    for (i, a) in terms.iter().enumerate() {
        for (j, b) in terms.iter().enumerate() {
            if i == j {
                continue;
            }

            let matched = match (trig_square(a), trig_square(b)) {
                (Some((TrigKind::Sin, u)), Some((TrigKind::Cos, v))) => u == v,
                _ => false,
            } || match (trig_square(a), negated_trig_square(b)) {
                (Some((TrigKind::Sec, u)), Some((TrigKind::Tan, v))) => u == v,
                _ => false,
            };

            if matched {
                let mut rest = vec![Expression::one()];
                for (k, term) in terms.iter().enumerate() {
                    if k != i && k != j {
                        rest.push(term.clone());
                    }
                }
                return Some(simplify_addition(&rest));
            }
        }
    }
    None
}

/// Match `f^2(u)` for a direct trig function
fn trig_square(expr: &Expression) -> Option<(TrigKind, &Expression)> {
    if let Expression::Pow(base, exponent) = expr {
        if **exponent == Expression::integer(2) {
            if let Expression::Trig(data) = base.as_ref() {
                if !data.kind.is_inverse() {
                    return Some((data.kind, &data.inner));
                }
            }
        }
    }
    None
}

/// Match `-f^2(u)`, represented as the product `-1 * f^2(u)`
fn negated_trig_square(expr: &Expression) -> Option<(TrigKind, &Expression)> {
    if let Expression::Mul(factors) = expr {
        if factors.len() == 2 && factors[0] == Expression::integer(-1) {
            return trig_square(&factors[1]);
        }
    }
    None
}

fn squared(kind: TrigKind, inner: Expression) -> Expression {
    Expression::pow(Expression::trig(kind, inner), Expression::integer(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplify::Simplify;

    fn x() -> Expression {
        Expression::symbol("x")
    }

    fn sq(kind: TrigKind) -> Expression {
        squared(kind, x())
    }

    fn neg(expr: Expression) -> Expression {
        Expression::mul(vec![Expression::integer(-1), expr])
    }

    #[test]
    fn test_one_plus_tan_squared() {
        let expr = Expression::add(vec![Expression::one(), sq(TrigKind::Tan)]);
        assert_eq!(expr.simplify(), sq(TrigKind::Sec));
    }

    #[test]
    fn test_one_plus_cot_squared() {
        let expr = Expression::add(vec![Expression::one(), sq(TrigKind::Cot)]);
        assert_eq!(expr.simplify(), sq(TrigKind::Csc));
    }

    #[test]
    fn test_one_minus_sin_squared() {
        let expr = Expression::add(vec![Expression::one(), neg(sq(TrigKind::Sin))]);
        assert_eq!(expr.simplify(), sq(TrigKind::Cos));
    }

    #[test]
    fn test_one_minus_cos_squared() {
        let expr = Expression::add(vec![Expression::one(), neg(sq(TrigKind::Cos))]);
        assert_eq!(expr.simplify(), sq(TrigKind::Sin));
    }

    #[test]
    fn test_sin_cos_pair_inside_larger_sum() {
        let expr = Expression::add(vec![sq(TrigKind::Sin), sq(TrigKind::Cos), x()]);
        assert_eq!(
            expr.simplify(),
            Expression::add(vec![Expression::one(), x()])
        );
    }

    #[test]
    fn test_sec_minus_tan_squared() {
        let expr = Expression::add(vec![sq(TrigKind::Sec), neg(sq(TrigKind::Tan))]);
        assert_eq!(expr.simplify(), Expression::one());
    }

    #[test]
    fn test_mismatched_arguments_do_not_rewrite() {
        let sin2_x = sq(TrigKind::Sin);
        let cos2_y = squared(TrigKind::Cos, Expression::symbol("y"));
        let expr = Expression::add(vec![sin2_x.clone(), cos2_y.clone()]);
        let simplified = expr.simplify();
        assert_eq!(simplified.count(&sin2_x), 1);
        assert_eq!(simplified.count(&cos2_y), 1);
    }
}
