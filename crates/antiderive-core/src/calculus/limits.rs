//! Limits at infinity for antiderivative evaluation
//!
//! Improper definite integrals need the limit of the antiderivative at an
//! infinite bound. The evaluator here is deliberately structural: it
//! recognizes exponential decay and growth, polynomial growth, and constant
//! terms. Anything it cannot classify is an error, which the definite
//! integrator surfaces as an integration failure.

use crate::core::{Expression, Number, Symbol};
use crate::error::{MathError, MathResult};
use crate::simplify::arithmetic::helpers::deconstruct_product;
use crate::simplify::Simplify;

/// A real value extended with the two signed infinities
///
/// Used both for the bounds of a definite integral and for its value.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtendedReal {
    Finite(Expression),
    PosInfinity,
    NegInfinity,
}

impl ExtendedReal {
    /// The finite expression, if this is finite
    pub fn finite(self) -> Option<Expression> {
        match self {
            ExtendedReal::Finite(expr) => Some(expr),
            _ => None,
        }
    }

    fn negate(self) -> Self {
        match self {
            ExtendedReal::Finite(expr) => ExtendedReal::Finite((-expr).simplify()),
            ExtendedReal::PosInfinity => ExtendedReal::NegInfinity,
            ExtendedReal::NegInfinity => ExtendedReal::PosInfinity,
        }
    }
}

impl std::fmt::Display for ExtendedReal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtendedReal::Finite(expr) => write!(f, "{}", expr),
            ExtendedReal::PosInfinity => write!(f, "oo"),
            ExtendedReal::NegInfinity => write!(f, "-oo"),
        }
    }
}

/// Limit of `expr` as `var` approaches positive or negative infinity
///
/// # Errors
///
/// Returns [`MathError::NotImplemented`] for forms the evaluator cannot
/// classify (oscillation, indeterminate sums, unknown growth).
pub fn limit_at_infinity(
    expr: &Expression,
    var: &Symbol,
    towards_positive: bool,
) -> MathResult<ExtendedReal> {
    let simplified = expr.simplify();
    limit_inner(&simplified, var, towards_positive)
}

fn unresolved(expr: &Expression) -> MathError {
    MathError::NotImplemented {
        feature: format!("limit of {} at infinity", expr),
    }
}

fn limit_inner(
    expr: &Expression,
    var: &Symbol,
    towards_positive: bool,
) -> MathResult<ExtendedReal> {
    if !expr.contains(var) {
        return Ok(ExtendedReal::Finite(expr.clone()));
    }

    match expr {
        Expression::Symbol(_) => Ok(if towards_positive {
            ExtendedReal::PosInfinity
        } else {
            ExtendedReal::NegInfinity
        }),

        Expression::Add(terms) => {
            let mut finite_terms = Vec::new();
            let mut infinite_sign: Option<bool> = None;
            for term in terms.iter() {
                match limit_inner(term, var, towards_positive)? {
                    ExtendedReal::Finite(value) => finite_terms.push(value),
                    ExtendedReal::PosInfinity => match infinite_sign {
                        Some(false) => return Err(unresolved(expr)),
                        _ => infinite_sign = Some(true),
                    },
                    ExtendedReal::NegInfinity => match infinite_sign {
                        Some(true) => return Err(unresolved(expr)),
                        _ => infinite_sign = Some(false),
                    },
                }
            }
            match infinite_sign {
                Some(true) => Ok(ExtendedReal::PosInfinity),
                Some(false) => Ok(ExtendedReal::NegInfinity),
                None => Ok(ExtendedReal::Finite(
                    Expression::add(finite_terms).simplify(),
                )),
            }
        }

        Expression::Mul(factors) => {
            let mut result = ExtendedReal::Finite(Expression::one());
            let mut pending_finite = vec![];
            for factor in factors.iter() {
                match limit_inner(factor, var, towards_positive)? {
                    ExtendedReal::Finite(value) => {
                        if value.is_zero() && !matches!(result, ExtendedReal::Finite(_)) {
                            return Err(unresolved(expr));
                        }
                        pending_finite.push(value);
                    }
                    infinite => {
                        if pending_finite.iter().any(Expression::is_zero) {
                            return Err(unresolved(expr));
                        }
                        result = match result {
                            ExtendedReal::Finite(_) => infinite,
                            // two infinite factors multiply signs
                            ExtendedReal::PosInfinity => infinite,
                            ExtendedReal::NegInfinity => infinite.negate(),
                        };
                    }
                }
            }
            match result {
                ExtendedReal::Finite(_) => Ok(ExtendedReal::Finite(
                    Expression::mul(pending_finite).simplify(),
                )),
                infinite => {
                    if sign_is_negative(&pending_finite)? {
                        Ok(infinite.negate())
                    } else {
                        Ok(infinite)
                    }
                }
            }
        }

        Expression::Pow(base, exponent) => limit_of_power(expr, base, exponent, var, towards_positive),

        Expression::Log(data) => match limit_inner(&data.inner, var, towards_positive)? {
            ExtendedReal::PosInfinity => Ok(ExtendedReal::PosInfinity),
            ExtendedReal::Finite(value) if !value.is_zero() => Ok(ExtendedReal::Finite(
                Expression::log_base(value, data.base.clone()).simplify(),
            )),
            _ => Err(unresolved(expr)),
        },

        // trig functions oscillate; only a finite inner limit is usable
        Expression::Trig(data) => match limit_inner(&data.inner, var, towards_positive)? {
            ExtendedReal::Finite(value) => Ok(ExtendedReal::Finite(
                Expression::trig(data.kind, value).simplify(),
            )),
            _ => Err(unresolved(expr)),
        },

        _ => Err(unresolved(expr)),
    }
}

fn limit_of_power(
    whole: &Expression,
    base: &Expression,
    exponent: &Expression,
    var: &Symbol,
    towards_positive: bool,
) -> MathResult<ExtendedReal> {
    // exponential in the variable: b^(a*x + c) with constant b > 1
    if !base.contains(var) && exponent.contains(var) {
        let growing = base_grows(base).ok_or_else(|| unresolved(whole))?;
        let slope = linear_slope(exponent, var).ok_or_else(|| unresolved(whole))?;
        let exponent_to_infinity = slope.is_negative() != towards_positive;
        return Ok(match (growing, exponent_to_infinity) {
            (true, true) => ExtendedReal::PosInfinity,
            (true, false) => ExtendedReal::Finite(Expression::zero()),
            // a base in (0, 1) decays where a growing base explodes
            (false, true) => ExtendedReal::Finite(Expression::zero()),
            (false, false) => ExtendedReal::PosInfinity,
        });
    }

    // polynomial growth or decay: u^n for constant rational n
    let power = match exponent.as_number() {
        Some(num) => num.clone(),
        None => return Err(unresolved(whole)),
    };
    match limit_inner(base, var, towards_positive)? {
        ExtendedReal::PosInfinity => {
            if power.is_negative() {
                Ok(ExtendedReal::Finite(Expression::zero()))
            } else {
                Ok(ExtendedReal::PosInfinity)
            }
        }
        ExtendedReal::NegInfinity => {
            if power.is_negative() {
                return Ok(ExtendedReal::Finite(Expression::zero()));
            }
            let exponent_int = power.to_i64().ok_or_else(|| unresolved(whole))?;
            Ok(if exponent_int % 2 == 0 {
                ExtendedReal::PosInfinity
            } else {
                ExtendedReal::NegInfinity
            })
        }
        ExtendedReal::Finite(value) => Ok(ExtendedReal::Finite(
            Expression::pow(value, exponent.clone()).simplify(),
        )),
    }
}

/// Whether a constant base is greater than one (growth) or in (0, 1) (decay)
fn base_grows(base: &Expression) -> Option<bool> {
    match base {
        Expression::Constant(crate::core::MathConstant::E) => Some(true),
        Expression::Number(num) => {
            if num > &Number::one() {
                Some(true)
            } else if num > &Number::zero() {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Slope of an expression linear in `var`, `None` otherwise
fn linear_slope(expr: &Expression, var: &Symbol) -> Option<Number> {
    let derivative = crate::calculus::derivatives::diff(expr, var).ok()?;
    match derivative {
        Expression::Number(num) if !num.is_zero() => Some(num),
        _ => None,
    }
}

/// Sign heuristic for a list of constant factors: counts negative rational
/// coefficients and treats the symbolic constants as positive
fn sign_is_negative(factors: &[Expression]) -> MathResult<bool> {
    let product = Expression::mul(factors.to_vec()).simplify();
    let (coefficient, _) = deconstruct_product(&product);
    Ok(coefficient.is_negative())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Symbol {
        Symbol::new("x")
    }

    fn sym() -> Expression {
        Expression::symbol(x())
    }

    #[test]
    fn test_exponential_decay() {
        // e^x -> 0 as x -> -oo
        let expr = Expression::pow(Expression::e(), sym());
        assert_eq!(
            limit_at_infinity(&expr, &x(), false).unwrap(),
            ExtendedReal::Finite(Expression::zero())
        );
        assert_eq!(
            limit_at_infinity(&expr, &x(), true).unwrap(),
            ExtendedReal::PosInfinity
        );
    }

    #[test]
    fn test_negative_exponent_decays_forward() {
        // e^(-2x) -> 0 as x -> +oo
        let expr = Expression::pow(
            Expression::e(),
            (Expression::integer(-2) * sym()).simplify(),
        );
        assert_eq!(
            limit_at_infinity(&expr, &x(), true).unwrap(),
            ExtendedReal::Finite(Expression::zero())
        );
    }

    #[test]
    fn test_polynomial_growth() {
        let expr = Expression::pow(sym(), Expression::integer(2));
        assert_eq!(
            limit_at_infinity(&expr, &x(), false).unwrap(),
            ExtendedReal::PosInfinity
        );
        let cubed = Expression::pow(sym(), Expression::integer(3));
        assert_eq!(
            limit_at_infinity(&cubed, &x(), false).unwrap(),
            ExtendedReal::NegInfinity
        );
    }

    #[test]
    fn test_reciprocal_decay() {
        let expr = Expression::pow(sym(), Expression::integer(-1));
        assert_eq!(
            limit_at_infinity(&expr, &x(), true).unwrap(),
            ExtendedReal::Finite(Expression::zero())
        );
    }

    #[test]
    fn test_negated_exponential() {
        // -e^x -> 0 as x -> -oo, -oo as x -> +oo
        let expr = (-Expression::pow(Expression::e(), sym())).simplify();
        assert_eq!(
            limit_at_infinity(&expr, &x(), false).unwrap(),
            ExtendedReal::Finite(Expression::zero())
        );
        assert_eq!(
            limit_at_infinity(&expr, &x(), true).unwrap(),
            ExtendedReal::NegInfinity
        );
    }

    #[test]
    fn test_constant_passes_through() {
        let expr = Expression::integer(7);
        assert_eq!(
            limit_at_infinity(&expr, &x(), true).unwrap(),
            ExtendedReal::Finite(Expression::integer(7))
        );
    }

    #[test]
    fn test_oscillation_is_unresolved() {
        let expr = Expression::trig(crate::core::TrigKind::Sin, sym());
        assert!(limit_at_infinity(&expr, &x(), true).is_err());
    }
}
