//! Core substitution trait and trig-function rewriting

use crate::core::{Expression, TrigData};

/// Trait for types that support substitution operations
pub trait Substitutable {
    /// Substitute a single expression with another
    ///
    /// Recursively walks the expression tree and replaces every occurrence
    /// of `old` with `new`. The comparison is structural; matched subtrees
    /// are not searched further.
    ///
    /// # Examples
    ///
    /// ```
    /// use antiderive_core::pattern::Substitutable;
    /// use antiderive_core::Expression;
    ///
    /// let expr = Expression::add(vec![
    ///     Expression::symbol("x"),
    ///     Expression::integer(1),
    /// ]);
    /// let result = expr.subs(&Expression::symbol("x"), &Expression::integer(5));
    /// let expected = Expression::add(vec![
    ///     Expression::integer(5),
    ///     Expression::integer(1),
    /// ]);
    /// assert_eq!(result, expected);
    /// ```
    fn subs(&self, old: &Expression, new: &Expression) -> Expression;

    /// Apply several substitutions in a single traversal
    fn subs_multiple(&self, substitutions: &[(Expression, Expression)]) -> Expression;
}

impl Substitutable for Expression {
    fn subs(&self, old: &Expression, new: &Expression) -> Expression {
        if self == old {
            return new.clone();
        }

        match self {
            Expression::Number(_) | Expression::Constant(_) | Expression::Symbol(_) => {
                self.clone()
            }
            Expression::Add(terms) => {
                Expression::add(terms.iter().map(|t| t.subs(old, new)).collect())
            }
            Expression::Mul(factors) => {
                Expression::mul(factors.iter().map(|f| f.subs(old, new)).collect())
            }
            Expression::Pow(base, exponent) => {
                Expression::pow(base.subs(old, new), exponent.subs(old, new))
            }
            Expression::Log(data) => {
                Expression::log_base(data.inner.subs(old, new), data.base.subs(old, new))
            }
            Expression::Trig(data) => {
                Expression::trig(data.kind, data.inner.subs(old, new))
            }
        }
    }

    fn subs_multiple(&self, substitutions: &[(Expression, Expression)]) -> Expression {
        for (old, new) in substitutions {
            if self == old {
                return new.clone();
            }
        }

        match self {
            Expression::Number(_) | Expression::Constant(_) | Expression::Symbol(_) => {
                self.clone()
            }
            Expression::Add(terms) => Expression::add(
                terms.iter().map(|t| t.subs_multiple(substitutions)).collect(),
            ),
            Expression::Mul(factors) => Expression::mul(
                factors
                    .iter()
                    .map(|f| f.subs_multiple(substitutions))
                    .collect(),
            ),
            Expression::Pow(base, exponent) => Expression::pow(
                base.subs_multiple(substitutions),
                exponent.subs_multiple(substitutions),
            ),
            Expression::Log(data) => Expression::log_base(
                data.inner.subs_multiple(substitutions),
                data.base.subs_multiple(substitutions),
            ),
            Expression::Trig(data) => {
                Expression::trig(data.kind, data.inner.subs_multiple(substitutions))
            }
        }
    }
}

/// Rewrite trig applications throughout an expression
///
/// Inner arguments are rebuilt first; `map` then sees each trig node
/// bottom-up and replaces the ones it returns `Some` for. Used by the
/// trig-rewriting transforms and the compound-angle expansion.
pub fn replace_trig_functions(
    expr: &Expression,
    map: &dyn Fn(&TrigData) -> Option<Expression>,
) -> Expression {
    match expr {
        Expression::Number(_) | Expression::Constant(_) | Expression::Symbol(_) => expr.clone(),
        Expression::Add(terms) => Expression::add(
            terms.iter().map(|t| replace_trig_functions(t, map)).collect(),
        ),
        Expression::Mul(factors) => Expression::mul(
            factors
                .iter()
                .map(|f| replace_trig_functions(f, map))
                .collect(),
        ),
        Expression::Pow(base, exponent) => Expression::pow(
            replace_trig_functions(base, map),
            replace_trig_functions(exponent, map),
        ),
        Expression::Log(data) => Expression::log_base(
            replace_trig_functions(&data.inner, map),
            replace_trig_functions(&data.base, map),
        ),
        Expression::Trig(data) => {
            let rebuilt = TrigData {
                kind: data.kind,
                inner: replace_trig_functions(&data.inner, map),
            };
            match map(&rebuilt) {
                Some(replacement) => replacement,
                None => Expression::Trig(Box::new(rebuilt)),
            }
        }
    }
}
