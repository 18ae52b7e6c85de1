//! Elementary antiderivative table
//!
//! Direct lookups the search engine recognizes without any transform:
//! constants, powers of the variable, exponentials with a constant base and
//! affine exponent, and the four standard trig entries. Trig entries are
//! keyed by the canonical text of the integrand with the variable renamed to
//! a placeholder.

use crate::calculus::derivatives::diff;
use crate::core::{Expression, Symbol, TrigKind};
use crate::pattern::Substitutable;
use crate::simplify::Simplify;

/// Simplified antiderivative of `integrand` with respect to `var`, when the
/// integrand is elementary
pub(crate) fn lookup(integrand: &Expression, var: &Symbol) -> Option<Expression> {
    let var_expr = Expression::symbol(var.clone());

    // a constant integrates to constant * x
    if !integrand.contains(var) {
        return Some((integrand.clone() * var_expr).simplify());
    }

    if let Expression::Pow(base, exponent) = integrand {
        // power rule: x^n for n != -1, log for n = -1
        if **base == var_expr && !exponent.contains(var) {
            let bumped = ((**exponent).clone() + Expression::one()).simplify();
            if bumped.is_zero() {
                return Some(Expression::log((**base).clone()).simplify());
            }
            let result = Expression::pow(var_expr, bumped.clone()) / bumped;
            return Some(result.simplify());
        }

        // exponential rule: b^(a*x + c) -> b^(a*x + c) / (a * log b)
        if !base.contains(var) && exponent.contains(var) {
            if let Some(slope) = affine_slope(exponent, var) {
                let scale = slope * Expression::log((**base).clone());
                return Some((integrand.clone() / scale).simplify());
            }
        }
    }

    // the bare variable
    if *integrand == var_expr {
        let result = Expression::rational(1, 2) * Expression::pow(var_expr, Expression::integer(2));
        return Some(result.simplify());
    }

    // standard trig entries, matched on the canonical text form
    let placeholder = Expression::symbol("x");
    let key = integrand.subs(&var_expr, &placeholder).to_string();
    let result = match key.as_str() {
        "sin(x)" => Some(-Expression::trig(TrigKind::Cos, var_expr.clone())),
        "cos(x)" => Some(Expression::trig(TrigKind::Sin, var_expr.clone())),
        "sec(x)^2" => Some(Expression::trig(TrigKind::Tan, var_expr.clone())),
        "sec(x)" => Some(Expression::log(
            Expression::trig(TrigKind::Sec, var_expr.clone())
                + Expression::trig(TrigKind::Tan, var_expr.clone()),
        )),
        _ => None,
    };
    if let Some(result) = result {
        return Some(result.simplify());
    }

    // the same trig entries with an affine argument divide by its slope
    affine_trig_entry(integrand, var)
}

/// `sin(a*x + b)` and friends, scaled by the reciprocal slope
fn affine_trig_entry(integrand: &Expression, var: &Symbol) -> Option<Expression> {
    let (kind, inner) = match integrand {
        Expression::Trig(data) => (data.kind, &data.inner),
        Expression::Pow(base, exponent) if **exponent == Expression::integer(2) => {
            match base.as_ref() {
                Expression::Trig(data) if data.kind == TrigKind::Sec => {
                    (TrigKind::Sec, &data.inner)
                }
                _ => return None,
            }
        }
        _ => return None,
    };
    let scale = affine_slope(inner, var)?;

    let unscaled = match (integrand, kind) {
        (Expression::Pow(..), TrigKind::Sec) => {
            Expression::trig(TrigKind::Tan, inner.clone())
        }
        (_, TrigKind::Sin) => -Expression::trig(TrigKind::Cos, inner.clone()),
        (_, TrigKind::Cos) => Expression::trig(TrigKind::Sin, inner.clone()),
        (_, TrigKind::Sec) => Expression::log(
            Expression::trig(TrigKind::Sec, inner.clone())
                + Expression::trig(TrigKind::Tan, inner.clone()),
        ),
        _ => return None,
    };
    Some((unscaled / scale).simplify())
}

/// Constant nonzero slope of an expression affine in `var`, `None` otherwise
///
/// The slope may be any constant expression, so arguments like `pi*x`
/// qualify alongside rational multiples.
fn affine_slope(expr: &Expression, var: &Symbol) -> Option<Expression> {
    let derivative = diff(expr, var).ok()?;
    if derivative.is_zero() || derivative.contains(var) {
        return None;
    }
    Some(derivative)
}
