//! Structural queries over expressions

use super::Expression;
use crate::core::{Number, Symbol};
use crate::simplify::Simplify;
use std::collections::{BTreeSet, HashMap};

impl Expression {
    /// Immediate sub-expressions
    ///
    /// A logarithm exposes its base only when the base is not e, so that
    /// natural logarithms behave as single-argument functions in traversals.
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::Number(_) | Expression::Constant(_) | Expression::Symbol(_) => vec![],
            Expression::Add(terms) | Expression::Mul(terms) => terms.iter().collect(),
            Expression::Pow(base, exponent) => vec![base, exponent],
            Expression::Log(data) => {
                if data.base == Expression::e() {
                    vec![&data.inner]
                } else {
                    vec![&data.inner, &data.base]
                }
            }
            Expression::Trig(data) => vec![&data.inner],
        }
    }

    /// Whether the expression mentions the given variable
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::{Expression, Symbol};
    ///
    /// let x = Symbol::new("x");
    /// let expr = Expression::pow(Expression::symbol(x.clone()), Expression::integer(2));
    /// assert!(expr.contains(&x));
    /// assert!(!expr.contains(&Symbol::new("y")));
    /// ```
    pub fn contains(&self, var: &Symbol) -> bool {
        match self {
            Expression::Symbol(sym) => sym == var,
            _ => self.children().iter().any(|child| child.contains(var)),
        }
    }

    /// All distinct symbols in the expression, sorted by name
    pub fn symbols(&self) -> Vec<Symbol> {
        fn collect(expr: &Expression, names: &mut BTreeSet<String>) {
            if let Expression::Symbol(sym) = expr {
                names.insert(sym.name().to_string());
            }
            for child in expr.children() {
                collect(child, names);
            }
        }

        let mut names = BTreeSet::new();
        collect(self, &mut names);
        names.into_iter().map(Symbol::new).collect()
    }

    /// Number of structural occurrences of `query`
    ///
    /// A matching node is counted once and not searched further.
    pub fn count(&self, query: &Expression) -> usize {
        if self == query {
            return 1;
        }
        self.children().iter().map(|child| child.count(query)).sum()
    }

    /// Borrow the rational value of a numeric atom
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Expression::Number(num) => Some(num),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expression::Number(num) if num.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expression::Number(num) if num.is_one())
    }

    /// Substitute rational values for symbols by name, then simplify
    ///
    /// Symbols absent from the map pass through unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::{Expression, Number};
    /// use std::collections::HashMap;
    ///
    /// let expr = Expression::add(vec![
    ///     Expression::symbol("x"),
    ///     Expression::integer(1),
    /// ]);
    /// let mut subs = HashMap::new();
    /// subs.insert("x".to_string(), Number::integer(2));
    /// assert_eq!(expr.evalf(&subs), Expression::integer(3));
    /// ```
    pub fn evalf(&self, subs: &HashMap<String, Number>) -> Expression {
        self.substitute_numbers(subs).simplify()
    }

    fn substitute_numbers(&self, subs: &HashMap<String, Number>) -> Expression {
        match self {
            Expression::Symbol(sym) => match subs.get(sym.name()) {
                Some(value) => Expression::Number(value.clone()),
                None => self.clone(),
            },
            Expression::Number(_) | Expression::Constant(_) => self.clone(),
            Expression::Add(terms) => Expression::add(
                terms.iter().map(|t| t.substitute_numbers(subs)).collect(),
            ),
            Expression::Mul(factors) => Expression::mul(
                factors.iter().map(|f| f.substitute_numbers(subs)).collect(),
            ),
            Expression::Pow(base, exponent) => Expression::pow(
                base.substitute_numbers(subs),
                exponent.substitute_numbers(subs),
            ),
            Expression::Log(data) => Expression::log_base(
                data.inner.substitute_numbers(subs),
                data.base.substitute_numbers(subs),
            ),
            Expression::Trig(data) => {
                Expression::trig(data.kind, data.inner.substitute_numbers(subs))
            }
        }
    }
}

/// Nesting depth of the parts of an expression containing `var`
///
/// This is the complexity measure steering the integration search: constants
/// score 0, a bare occurrence of the variable scores 1, and every enclosing
/// operation adds one. A product `-1 * t` scores as `t` so that negation does
/// not look deeper than its operand.
///
/// With `None`, every symbol counts.
///
/// # Examples
///
/// ```rust
/// use antiderive_core::core::expression::methods::nesting;
/// use antiderive_core::{Expression, Symbol};
///
/// let x = Symbol::new("x");
/// let expr = Expression::pow(Expression::symbol(x.clone()), Expression::integer(2));
/// assert_eq!(nesting(&expr, Some(&x)), 2);
/// assert_eq!(nesting(&Expression::symbol("y"), Some(&x)), 0);
/// ```
pub fn nesting(expr: &Expression, var: Option<&Symbol>) -> u32 {
    if let Some(var) = var {
        if !expr.contains(var) {
            return 0;
        }
    }

    if let Expression::Mul(factors) = expr {
        if factors.len() == 2 && factors[0] == Expression::integer(-1) {
            return nesting(&factors[1], var);
        }
    }

    match expr {
        Expression::Symbol(sym) => {
            if var.is_none() || Some(sym) == var {
                1
            } else {
                0
            }
        }
        _ => {
            let children = expr.children();
            if children.is_empty() {
                0
            } else {
                1 + children
                    .iter()
                    .map(|child| nesting(child, var))
                    .max()
                    .unwrap_or(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TrigKind;

    fn x() -> Symbol {
        Symbol::new("x")
    }

    #[test]
    fn test_contains_and_symbols() {
        let expr = Expression::mul(vec![
            Expression::symbol("x"),
            Expression::trig(TrigKind::Sin, Expression::symbol("y")),
        ]);
        assert!(expr.contains(&x()));
        let syms = expr.symbols();
        assert_eq!(syms.len(), 2);
        assert_eq!(syms[0].name(), "x");
        assert_eq!(syms[1].name(), "y");
    }

    #[test]
    fn test_count_does_not_descend_into_matches() {
        let sin_x = Expression::trig(TrigKind::Sin, Expression::symbol("x"));
        let expr = Expression::mul(vec![
            sin_x.clone(),
            Expression::pow(sin_x.clone(), Expression::integer(2)),
        ]);
        assert_eq!(expr.count(&sin_x), 2);
        // the symbol occurrences inside sin(x) are hidden by the matches
        assert_eq!(expr.count(&Expression::symbol("x")), 2);
    }

    #[test]
    fn test_nesting_ignores_foreign_branches() {
        let expr = Expression::mul(vec![
            Expression::symbol("x"),
            Expression::pow(Expression::symbol("y"), Expression::integer(2)),
        ]);
        assert_eq!(nesting(&expr, Some(&x())), 2);
    }

    #[test]
    fn test_nesting_skips_leading_negation() {
        let expr = Expression::mul(vec![
            Expression::integer(-1),
            Expression::symbol("x"),
        ]);
        assert_eq!(nesting(&expr, Some(&x())), 1);
    }

    #[test]
    fn test_evalf_passthrough_for_missing_symbols() {
        let expr = Expression::add(vec![
            Expression::symbol("x"),
            Expression::symbol("y"),
        ]);
        let mut subs = HashMap::new();
        subs.insert("x".to_string(), Number::integer(1));
        let result = expr.evalf(&subs);
        assert!(result.contains(&Symbol::new("y")));
        assert!(!result.contains(&x()));
    }
}
