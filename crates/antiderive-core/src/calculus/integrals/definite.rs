//! Definite integrals over finite and infinite bounds

use super::{integrate_with_config, IntegratorConfig};
use crate::calculus::limits::{limit_at_infinity, ExtendedReal};
use crate::core::{Expression, Symbol};
use crate::error::{MathError, MathResult};
use crate::pattern::Substitutable;
use crate::simplify::Simplify;

/// Definite integral with explicit resource limits
///
/// Computes an antiderivative, evaluates it at both bounds (limits for the
/// infinite ones), and subtracts. An indeterminate difference of two
/// infinities is an integration failure.
pub fn integrate_bounded_with_config(
    expr: &Expression,
    var: &Symbol,
    lower: ExtendedReal,
    upper: ExtendedReal,
    config: &IntegratorConfig,
) -> MathResult<ExtendedReal> {
    let failure = || MathError::IntegrationFailed {
        integrand: expr.clone(),
        variable: var.name().to_string(),
    };

    let antiderivative = integrate_with_config(expr, var, config)?;
    let upper_value = evaluate_at(&antiderivative, var, &upper).map_err(|_| failure())?;
    let lower_value = evaluate_at(&antiderivative, var, &lower).map_err(|_| failure())?;

    match (upper_value, lower_value) {
        (ExtendedReal::Finite(hi), ExtendedReal::Finite(lo)) => {
            Ok(ExtendedReal::Finite((hi - lo).simplify()))
        }
        (ExtendedReal::PosInfinity, ExtendedReal::PosInfinity)
        | (ExtendedReal::NegInfinity, ExtendedReal::NegInfinity) => Err(failure()),
        (ExtendedReal::PosInfinity, _) | (_, ExtendedReal::NegInfinity) => {
            Ok(ExtendedReal::PosInfinity)
        }
        (ExtendedReal::NegInfinity, _) | (_, ExtendedReal::PosInfinity) => {
            Ok(ExtendedReal::NegInfinity)
        }
    }
}

fn evaluate_at(
    antiderivative: &Expression,
    var: &Symbol,
    bound: &ExtendedReal,
) -> MathResult<ExtendedReal> {
    match bound {
        ExtendedReal::Finite(value) => Ok(ExtendedReal::Finite(
            antiderivative
                .subs(&Expression::symbol(var.clone()), value)
                .simplify(),
        )),
        ExtendedReal::PosInfinity => limit_at_infinity(antiderivative, var, true),
        ExtendedReal::NegInfinity => limit_at_infinity(antiderivative, var, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculus::integrate_bounded;
    use crate::core::TrigKind;

    fn x() -> Symbol {
        Symbol::new("x")
    }

    fn sym() -> Expression {
        Expression::symbol(x())
    }

    fn finite(expr: Expression) -> ExtendedReal {
        ExtendedReal::Finite(expr)
    }

    #[test]
    fn test_polynomial_between_finite_bounds() {
        // integral of x^2 from 0 to 3 is 9
        let expr = Expression::pow(sym(), Expression::integer(2));
        let result = integrate_bounded(
            &expr,
            &x(),
            finite(Expression::integer(0)),
            finite(Expression::integer(3)),
        )
        .expect("solvable");
        assert_eq!(result, finite(Expression::integer(9)));
    }

    #[test]
    fn test_sine_over_half_period() {
        // integral of sin from 0 to pi is 2
        let expr = Expression::trig(TrigKind::Sin, sym());
        let result = integrate_bounded(
            &expr,
            &x(),
            finite(Expression::integer(0)),
            finite(Expression::pi()),
        )
        .expect("solvable");
        assert_eq!(result, finite(Expression::integer(2)));
    }

    #[test]
    fn test_negative_exponential_from_minus_infinity() {
        // integral of -e^x from -oo to 1 is -e
        let expr = (-Expression::pow(Expression::e(), sym())).simplify();
        let result = integrate_bounded(
            &expr,
            &x(),
            ExtendedReal::NegInfinity,
            finite(Expression::one()),
        )
        .expect("solvable");
        assert_eq!(result, finite((-Expression::e()).simplify()));
    }

    #[test]
    fn test_divergent_integral_reports_infinity() {
        // integral of x from 0 to oo diverges to +oo
        let result = integrate_bounded(
            &sym(),
            &x(),
            finite(Expression::integer(0)),
            ExtendedReal::PosInfinity,
        )
        .expect("classifiable");
        assert_eq!(result, ExtendedReal::PosInfinity);
    }
}
