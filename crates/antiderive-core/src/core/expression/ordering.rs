//! Canonical ordering of terms inside sums and products
//!
//! Primary key is nesting depth, so constants come before symbols, symbols
//! before functions, functions before compounds. Ties break on the constant
//! exponent of a power, then on the normal-form text. The order is total and
//! deterministic, which makes simplified forms (and therefore the whole
//! integration search) deterministic.

use super::methods::nesting;
use super::Expression;
use crate::core::Number;
use std::cmp::Ordering;

/// Compare two expressions by the canonical sort key
pub fn compare_expressions(a: &Expression, b: &Expression) -> Ordering {
    let depth_a = nesting(a, None);
    let depth_b = nesting(b, None);
    if depth_a != depth_b {
        return depth_a.cmp(&depth_b);
    }

    let power_a = constant_exponent(a);
    let power_b = constant_exponent(b);
    if power_a != power_b {
        return power_a.cmp(&power_b);
    }

    a.to_string().cmp(&b.to_string())
}

/// Sort a term list in place by the canonical order
pub fn sort_terms(terms: &mut [Expression]) {
    terms.sort_by(compare_expressions);
}

fn constant_exponent(expr: &Expression) -> Number {
    if let Expression::Pow(_, exponent) = expr {
        if let Expression::Number(num) = exponent.as_ref() {
            return num.clone();
        }
    }
    Number::one()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TrigKind;

    #[test]
    fn test_constants_sort_before_symbols_before_functions() {
        let mut terms = vec![
            Expression::trig(TrigKind::Sin, Expression::symbol("x")),
            Expression::symbol("x"),
            Expression::integer(3),
        ];
        sort_terms(&mut terms);
        assert_eq!(terms[0], Expression::integer(3));
        assert_eq!(terms[1], Expression::symbol("x"));
        assert_eq!(
            terms[2],
            Expression::trig(TrigKind::Sin, Expression::symbol("x"))
        );
    }

    #[test]
    fn test_powers_sort_by_exponent() {
        let x = Expression::symbol("x");
        let mut terms = vec![
            Expression::pow(x.clone(), Expression::integer(3)),
            Expression::pow(x.clone(), Expression::integer(2)),
        ];
        sort_terms(&mut terms);
        assert_eq!(terms[0], Expression::pow(x.clone(), Expression::integer(2)));
    }

    #[test]
    fn test_tie_breaks_alphabetically() {
        let mut terms = vec![Expression::symbol("y"), Expression::symbol("x")];
        sort_terms(&mut terms);
        assert_eq!(terms[0], Expression::symbol("x"));
    }

    #[test]
    fn test_order_is_deterministic() {
        let a = Expression::trig(TrigKind::Cos, Expression::symbol("x"));
        let b = Expression::trig(TrigKind::Sin, Expression::symbol("x"));
        assert_eq!(compare_expressions(&a, &b), Ordering::Less);
        assert_eq!(compare_expressions(&b, &a), Ordering::Greater);
        assert_eq!(compare_expressions(&a, &a), Ordering::Equal);
    }
}
