//! Common-factor extraction from sums

use crate::core::{Expression, Number};
use crate::simplify::arithmetic::helpers::deconstruct_product;
use crate::simplify::Simplify;

/// One multiplicand of a term, tracked with an unsigned exponent
#[derive(Clone)]
struct FactorPart {
    base: Expression,
    exponent: Number,
    positive: bool,
}

/// Factor a simplified sum by its common structural and numeric factors
///
/// `x^2 + 6*x` becomes `x * (x + 6)`; a sum with no common factor is
/// returned unchanged. Only single common factors are extracted; there is no
/// polynomial root finding here.
pub fn factor_sum(terms: &[Expression]) -> Expression {
    if terms.len() < 2 {
        return Expression::add(terms.to_vec()).simplify();
    }

    let decompositions: Vec<(Number, Vec<FactorPart>)> =
        terms.iter().map(decompose_term).collect();

    // Intersect the factor lists, keeping the smallest exponent seen
    let mut common: Vec<Option<FactorPart>> =
        decompositions[0].1.iter().cloned().map(Some).collect();
    for (_, parts) in &decompositions[1..] {
        for slot in common.iter_mut() {
            let survived = match slot {
                Some(candidate) => {
                    let matched = parts.iter().find(|part| {
                        part.base == candidate.base && part.positive == candidate.positive
                    });
                    match matched {
                        Some(part) => {
                            if part.exponent < candidate.exponent {
                                candidate.exponent = part.exponent.clone();
                            }
                            true
                        }
                        None => false,
                    }
                }
                None => continue,
            };
            if !survived {
                *slot = None;
            }
        }
    }

    let common_coefficient = common_coefficient(
        &decompositions.iter().map(|(c, _)| c.clone()).collect::<Vec<_>>(),
    );

    let mut common_factors: Vec<Expression> = Vec::new();
    if let Some(coefficient) = &common_coefficient {
        if !coefficient.is_one() {
            common_factors.push(Expression::Number(coefficient.clone()));
        }
    }
    for part in common.into_iter().flatten() {
        let exponent = if part.positive {
            part.exponent
        } else {
            -&part.exponent
        };
        common_factors.push(if exponent.is_one() {
            part.base
        } else {
            Expression::pow(part.base, Expression::Number(exponent))
        });
    }

    if common_factors.is_empty() {
        return Expression::add(terms.to_vec());
    }

    let common_expr = if common_factors.len() == 1 {
        common_factors.remove(0)
    } else {
        Expression::mul(common_factors)
    };

    let reduced: Vec<Expression> = terms
        .iter()
        .map(|term| (term.clone() / common_expr.clone()).simplify())
        .collect();
    let reduced_sum = Expression::add(reduced).simplify();
    Expression::mul(vec![common_expr, reduced_sum]).simplify()
}

fn decompose_term(term: &Expression) -> (Number, Vec<FactorPart>) {
    let (coefficient, factors) = deconstruct_product(term);
    let parts = factors.iter().map(factor_part).collect();
    (coefficient, parts)
}

fn factor_part(factor: &Expression) -> FactorPart {
    if let Expression::Pow(base, exponent) = factor {
        if let Expression::Number(num) = exponent.as_ref() {
            return FactorPart {
                base: (**base).clone(),
                exponent: num.abs(),
                positive: !num.is_negative(),
            };
        }
    }
    FactorPart {
        base: factor.clone(),
        exponent: Number::one(),
        positive: true,
    }
}

/// Largest rational dividing all coefficients an integral number of times
fn common_coefficient(coefficients: &[Number]) -> Option<Number> {
    let mut common = coefficients[0].abs();
    for coefficient in &coefficients[1..] {
        let forward = (coefficient / &common).is_integer();
        let backward = (&common / coefficient).is_integer();
        if forward || backward {
            let candidate = coefficient.abs();
            if candidate < common {
                common = candidate;
            }
        } else {
            return None;
        }
    }
    if coefficients.iter().all(Number::is_negative) {
        common = -common;
    }
    Some(common)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expression {
        Expression::symbol("x")
    }

    #[test]
    fn test_monomial_common_factor() {
        // x^2 + 6x = x * (x + 6)
        let terms = vec![
            Expression::pow(x(), Expression::integer(2)),
            Expression::mul(vec![Expression::integer(6), x()]),
        ];
        let factored = factor_sum(&terms);
        let expected = Expression::mul(vec![
            x(),
            Expression::add(vec![Expression::integer(6), x()]),
        ])
        .simplify();
        assert_eq!(factored, expected);
    }

    #[test]
    fn test_numeric_common_factor() {
        // 2x + 4 = 2 * (x + 2)
        let terms = vec![
            Expression::mul(vec![Expression::integer(2), x()]),
            Expression::integer(4),
        ];
        let factored = factor_sum(&terms);
        if let Expression::Mul(factors) = &factored {
            assert!(factors.contains(&Expression::integer(2)));
        } else {
            panic!("expected a product, got {}", factored);
        }
    }

    #[test]
    fn test_unfactorable_sum_unchanged() {
        let terms = vec![x(), Expression::integer(1)];
        let factored = factor_sum(&terms);
        assert_eq!(factored, Expression::add(terms));
    }
}
