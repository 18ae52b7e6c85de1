//! Multiplication simplification

use super::helpers::deconstruct_power;
use super::power::simplify_power;
use crate::core::expression::ordering::sort_terms;
use crate::core::{Expression, Number};
use crate::simplify::Simplify;
use std::collections::VecDeque;

/// Simplify a product with minimal overhead
///
/// Simplifies every factor, flattens nested products, merges factors sharing
/// a base by adding exponents, applies the zero-product law, folds rational
/// factors into a single leading constant, and sorts canonically.
pub fn simplify_multiplication(factors: &[Expression]) -> Expression {
    if factors.is_empty() {
        return Expression::one();
    }
    if factors.len() == 1 {
        return factors[0].simplify();
    }

    // Iteratively flatten nested products
    let mut flat: Vec<Expression> = Vec::with_capacity(factors.len());
    let mut queue: VecDeque<Expression> = factors.iter().map(|f| f.simplify()).collect();
    while let Some(factor) = queue.pop_front() {
        match factor {
            Expression::Mul(inner) => {
                for nested in inner.into_iter().rev() {
                    queue.push_front(nested);
                }
            }
            _ => flat.push(factor),
        }
    }

    // Merge factors with a shared base by adding exponents
    let mut merged: Vec<Expression> = Vec::with_capacity(flat.len());
    let mut consumed = vec![false; flat.len()];
    for i in 0..flat.len() {
        if consumed[i] {
            continue;
        }
        let (base, first_exponent) = deconstruct_power(&flat[i]);
        let mut exponents = vec![first_exponent];
        for j in (i + 1)..flat.len() {
            if consumed[j] {
                continue;
            }
            let (other_base, other_exponent) = deconstruct_power(&flat[j]);
            if other_base == base {
                exponents.push(other_exponent);
                consumed[j] = true;
            }
        }
        if exponents.len() == 1 {
            merged.push(flat[i].clone());
        } else {
            let total = Expression::add(exponents).simplify();
            merged.push(simplify_power(&base, &total));
        }
    }

    if merged.iter().any(Expression::is_zero) {
        return Expression::zero();
    }

    // Fold rational factors into one leading constant
    let mut constant = Number::one();
    let mut rest: Vec<Expression> = Vec::with_capacity(merged.len());
    for factor in merged {
        match factor {
            Expression::Number(num) => constant = &constant * &num,
            other => rest.push(other),
        }
    }

    if rest.is_empty() {
        return Expression::Number(constant);
    }

    let mut result = if constant.is_one() {
        rest
    } else {
        let mut with_constant = vec![Expression::Number(constant)];
        with_constant.extend(rest);
        with_constant
    };

    if result.len() == 1 {
        return result.remove(0);
    }
    sort_terms(&mut result);
    Expression::Mul(Box::new(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expression {
        Expression::symbol("x")
    }

    #[test]
    fn test_numeric_folding() {
        let result = simplify_multiplication(&[
            Expression::integer(6),
            Expression::rational(1, 2),
            x(),
        ]);
        assert_eq!(
            result,
            Expression::mul(vec![Expression::integer(3), x()])
        );
    }

    #[test]
    fn test_zero_annihilates() {
        let result = simplify_multiplication(&[Expression::integer(0), x()]);
        assert_eq!(result, Expression::zero());
    }

    #[test]
    fn test_like_bases_merge() {
        let result = simplify_multiplication(&[
            x(),
            Expression::pow(x(), Expression::integer(2)),
        ]);
        assert_eq!(result, Expression::pow(x(), Expression::integer(3)));
    }

    #[test]
    fn test_reciprocal_cancels() {
        let result = simplify_multiplication(&[
            x(),
            Expression::pow(x(), Expression::integer(-1)),
        ]);
        assert_eq!(result, Expression::one());
    }

    #[test]
    fn test_surds_combine() {
        let root_two = Expression::sqrt(Expression::integer(2));
        let result = simplify_multiplication(&[root_two.clone(), root_two]);
        assert_eq!(result, Expression::integer(2));
    }

    #[test]
    fn test_nested_products_flatten() {
        let inner = Expression::mul(vec![Expression::integer(2), x()]);
        let result = simplify_multiplication(&[inner, Expression::integer(3)]);
        assert_eq!(
            result,
            Expression::mul(vec![Expression::integer(6), x()])
        );
    }

    #[test]
    fn test_unit_factor_drops() {
        let result = simplify_multiplication(&[Expression::integer(1), x()]);
        assert_eq!(result, x());
    }
}
