//! Addition simplification

use super::helpers::deconstruct_product;
use super::multiplication::simplify_multiplication;
use crate::core::expression::ordering::sort_terms;
use crate::core::{Expression, Number};
use crate::simplify::pythagorean;
use crate::simplify::Simplify;
use std::collections::VecDeque;

/// Simplify a sum with minimal overhead
///
/// Simplifies every term, flattens nested sums, merges like terms (equal
/// non-constant factor lists) by adding their rational coefficients, folds
/// numeric terms into one leading constant, applies the Pythagorean trig
/// rewrites once when trig functions are present, and sorts canonically.
pub fn simplify_addition(terms: &[Expression]) -> Expression {
    if terms.is_empty() {
        return Expression::zero();
    }
    if terms.len() == 1 {
        return terms[0].simplify();
    }

    // Iteratively flatten nested sums
    let mut flat: Vec<Expression> = Vec::with_capacity(terms.len());
    let mut queue: VecDeque<Expression> = terms.iter().map(|t| t.simplify()).collect();
    while let Some(term) = queue.pop_front() {
        match term {
            Expression::Add(inner) => {
                for nested in inner.into_iter().rev() {
                    queue.push_front(nested);
                }
            }
            _ => flat.push(term),
        }
    }

    // Merge like terms by structural equality of their non-constant factors
    let mut numeric_sum = Number::zero();
    let mut combined: Vec<Expression> = Vec::with_capacity(flat.len());
    let mut consumed = vec![false; flat.len()];
    for i in 0..flat.len() {
        if consumed[i] {
            continue;
        }
        if let Expression::Number(num) = &flat[i] {
            numeric_sum = &numeric_sum + num;
            continue;
        }

        let (mut coefficient, factors) = deconstruct_product(&flat[i]);
        for j in (i + 1)..flat.len() {
            if consumed[j] || matches!(flat[j], Expression::Number(_)) {
                continue;
            }
            let (other_coefficient, other_factors) = deconstruct_product(&flat[j]);
            if other_factors == factors {
                coefficient = &coefficient + &other_coefficient;
                consumed[j] = true;
            }
        }

        let mut rebuilt_factors = vec![Expression::Number(coefficient)];
        rebuilt_factors.extend(factors);
        let rebuilt = simplify_multiplication(&rebuilt_factors);
        match rebuilt {
            Expression::Number(num) => numeric_sum = &numeric_sum + &num,
            other => combined.push(other),
        }
    }

    if combined.is_empty() {
        return Expression::Number(numeric_sum);
    }

    let mut final_terms = if numeric_sum.is_zero() {
        combined
    } else {
        let mut with_constant = vec![Expression::Number(numeric_sum)];
        with_constant.extend(combined);
        with_constant
    };

    if final_terms.len() == 1 {
        return final_terms.remove(0);
    }

    if final_terms.iter().any(contains_direct_trig) {
        if let Some(rewritten) = pythagorean::rewrite(&final_terms) {
            return rewritten;
        }
    }

    sort_terms(&mut final_terms);
    Expression::Add(Box::new(final_terms))
}

/// Whether any sub-expression is a non-inverse trig function
fn contains_direct_trig(expr: &Expression) -> bool {
    match expr {
        Expression::Trig(data) if !data.kind.is_inverse() => true,
        _ => expr.children().iter().any(|child| contains_direct_trig(child)),
    }
}
