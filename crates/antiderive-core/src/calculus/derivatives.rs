//! Symbolic differentiation
//!
//! Total over the algebra with one exception: a power whose base and
//! exponent both contain the variable (like `x^x`) is outside the supported
//! algebra and reports [`MathError::UnsupportedDerivative`].

use crate::core::{Expression, Symbol, TrigKind};
use crate::error::{MathError, MathResult};
use crate::simplify::Simplify;

/// Trait for differentiable values
pub trait Differentiate {
    /// Derivative with respect to `var`, not simplified
    ///
    /// # Errors
    ///
    /// Returns [`MathError::UnsupportedDerivative`] for mixed powers
    /// `f(x)^g(x)` and for logarithms whose base contains the variable.
    fn diff(&self, var: &Symbol) -> MathResult<Expression>;
}

/// Differentiate and simplify
///
/// # Examples
///
/// ```rust
/// use antiderive_core::calculus::diff;
/// use antiderive_core::{Expression, Symbol};
///
/// let x = Symbol::new("x");
/// let expr = Expression::pow(Expression::symbol(x.clone()), Expression::integer(3));
/// let result = diff(&expr, &x).expect("differentiable");
/// let expected = Expression::mul(vec![
///     Expression::integer(3),
///     Expression::pow(Expression::symbol(x), Expression::integer(2)),
/// ]);
/// assert_eq!(result, expected);
/// ```
pub fn diff(expr: &Expression, var: &Symbol) -> MathResult<Expression> {
    Ok(expr.diff(var)?.simplify())
}

impl Differentiate for Expression {
    fn diff(&self, var: &Symbol) -> MathResult<Expression> {
        match self {
            Expression::Number(_) | Expression::Constant(_) => Ok(Expression::zero()),

            Expression::Symbol(sym) => Ok(if sym == var {
                Expression::one()
            } else {
                Expression::zero()
            }),

            // d/dx (f + g) = f' + g'
            Expression::Add(terms) => {
                let derivatives = terms
                    .iter()
                    .map(|term| term.diff(var))
                    .collect::<MathResult<Vec<_>>>()?;
                Ok(Expression::add(derivatives))
            }

            // product rule, n-ary
            Expression::Mul(factors) => {
                let mut terms = Vec::with_capacity(factors.len());
                for (i, factor) in factors.iter().enumerate() {
                    let mut parts = vec![factor.diff(var)?];
                    for (j, other) in factors.iter().enumerate() {
                        if i != j {
                            parts.push(other.clone());
                        }
                    }
                    terms.push(Expression::mul(parts));
                }
                Ok(Expression::add(terms))
            }

            Expression::Pow(base, exponent) => diff_power(base, exponent, var),

            Expression::Log(data) => {
                if data.base.contains(var) {
                    return Err(MathError::UnsupportedDerivative {
                        expression: self.clone(),
                    });
                }
                // d/dx log_b(u) = u' / (u * log(b)); log(e) folds to 1
                let derivative = data.inner.diff(var)?
                    / (data.inner.clone() * Expression::log(data.base.clone()));
                Ok(derivative)
            }

            Expression::Trig(data) => {
                let inner = &data.inner;
                let chain = inner.diff(var)?;
                let outer = match data.kind {
                    TrigKind::Sin => Expression::trig(TrigKind::Cos, inner.clone()),
                    TrigKind::Cos => -Expression::trig(TrigKind::Sin, inner.clone()),
                    TrigKind::Tan => Expression::pow(
                        Expression::trig(TrigKind::Sec, inner.clone()),
                        Expression::integer(2),
                    ),
                    TrigKind::Sec => Expression::trig(TrigKind::Sec, inner.clone())
                        * Expression::trig(TrigKind::Tan, inner.clone()),
                    TrigKind::Csc => {
                        -(Expression::trig(TrigKind::Csc, inner.clone())
                            * Expression::trig(TrigKind::Cot, inner.clone()))
                    }
                    TrigKind::Cot => -Expression::pow(
                        Expression::trig(TrigKind::Csc, inner.clone()),
                        Expression::integer(2),
                    ),
                    TrigKind::ArcSin => {
                        Expression::pow(one_minus_square(inner), Expression::rational(-1, 2))
                    }
                    TrigKind::ArcCos => {
                        -Expression::pow(one_minus_square(inner), Expression::rational(-1, 2))
                    }
                    TrigKind::ArcTan => Expression::pow(
                        Expression::one()
                            + Expression::pow(inner.clone(), Expression::integer(2)),
                        Expression::integer(-1),
                    ),
                };
                Ok(outer * chain)
            }
        }
    }
}

fn diff_power(base: &Expression, exponent: &Expression, var: &Symbol) -> MathResult<Expression> {
    let base_has_var = base.contains(var);
    let exponent_has_var = exponent.contains(var);

    if base_has_var && exponent_has_var {
        return Err(MathError::UnsupportedDerivative {
            expression: Expression::pow(base.clone(), exponent.clone()),
        });
    }

    if !exponent_has_var {
        // power rule with chain: e * b^(e-1) * b'
        let reduced = Expression::pow(
            base.clone(),
            (exponent.clone() - Expression::one()).simplify(),
        );
        Ok(exponent.clone() * reduced * base.diff(var)?)
    } else {
        // constant base: log(b) * b^g * g'
        Ok(Expression::log(base.clone())
            * Expression::pow(base.clone(), exponent.clone())
            * exponent.diff(var)?)
    }
}

fn one_minus_square(inner: &Expression) -> Expression {
    Expression::one() - Expression::pow(inner.clone(), Expression::integer(2))
}
