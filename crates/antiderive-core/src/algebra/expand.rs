//! Distribution of products and powers over sums

use super::multinomial::{compositions, multinomial_coefficient};
use crate::core::Expression;
use crate::simplify::arithmetic::helpers::numerator_denominator;
use crate::simplify::arithmetic::power::small_integer_exponent;
use crate::simplify::Simplify;

impl Expression {
    /// Whether [`expand`](Expression::expand) would change this expression
    ///
    /// A product is expandable when its numerator contains a sum, or its
    /// denominator is a product one of whose factors is a sum (a lone sum in
    /// a denominator stays put). A power is expandable when the exponent is a
    /// positive integer and the base is a sum. Anything with an expandable
    /// sub-expression is itself expandable.
    pub fn expandable(&self) -> bool {
        match self {
            Expression::Add(terms) => terms.iter().any(Expression::expandable),
            Expression::Mul(factors) => {
                let (numerator, denominator) = numerator_denominator(factors);
                let numerator_has_sum = match &numerator {
                    Expression::Mul(inner) => {
                        inner.iter().any(|f| matches!(f, Expression::Add(_)))
                    }
                    Expression::Add(_) => true,
                    _ => false,
                };
                let denominator_has_sum = match &denominator {
                    Expression::Mul(inner) => {
                        inner.iter().any(|f| matches!(f, Expression::Add(_)))
                    }
                    _ => false,
                };
                numerator_has_sum
                    || denominator_has_sum
                    || factors.iter().any(Expression::expandable)
            }
            Expression::Pow(base, exponent) => {
                matches!(base.as_ref(), Expression::Add(_))
                    && small_integer_exponent(exponent).is_some_and(|n| n >= 1)
                    || base.expandable()
                    || exponent.expandable()
            }
            Expression::Log(data) => data.inner.expandable() || data.base.expandable(),
            Expression::Trig(data) => data.inner.expandable(),
            _ => false,
        }
    }

    /// Distribute products and integer powers over sums
    ///
    /// The result is simplified. Calling this on an expression for which
    /// [`expandable`](Expression::expandable) is false is a programming
    /// defect.
    pub fn expand(&self) -> Expression {
        assert!(self.expandable(), "BUG: expand on a non-expandable expression");
        self.expand_unchecked()
    }

    fn expand_if_expandable(&self) -> Expression {
        if self.expandable() {
            self.expand_unchecked()
        } else {
            self.clone()
        }
    }

    fn expand_unchecked(&self) -> Expression {
        match self {
            Expression::Add(terms) => {
                let expanded: Vec<Expression> = terms
                    .iter()
                    .map(Expression::expand_if_expandable)
                    .collect();
                Expression::add(expanded).simplify()
            }
            Expression::Mul(factors) => expand_product(factors),
            Expression::Pow(base, exponent) => expand_power(base, exponent),
            Expression::Log(data) => Expression::log_base(
                data.inner.expand_if_expandable(),
                data.base.expand_if_expandable(),
            )
            .simplify(),
            Expression::Trig(data) => Expression::trig(
                data.kind,
                data.inner.expand_if_expandable(),
            )
            .simplify(),
            _ => self.clone(),
        }
    }
}

fn expand_product(factors: &[Expression]) -> Expression {
    let (numerator, denominator) = numerator_denominator(factors);
    let denominator = denominator.expand_if_expandable();
    let inverse_denominator =
        Expression::pow(denominator, Expression::integer(-1));

    let numerator_factors: Vec<Expression> = match numerator {
        Expression::Mul(inner) => *inner,
        other => vec![other],
    };

    let expanded: Vec<Expression> = numerator_factors
        .iter()
        .map(Expression::expand_if_expandable)
        .collect();
    let (sums, others): (Vec<Expression>, Vec<Expression>) = expanded
        .into_iter()
        .partition(|f| matches!(f, Expression::Add(_)));

    if sums.is_empty() {
        let mut factors = others;
        factors.push(inverse_denominator);
        return Expression::mul(factors).simplify();
    }

    // one term from each sum, every combination
    let mut combinations: Vec<Vec<Expression>> = vec![vec![]];
    for sum in &sums {
        let terms = match sum {
            Expression::Add(terms) => terms,
            _ => unreachable!("partitioned on Add"),
        };
        let mut next = Vec::with_capacity(combinations.len() * terms.len());
        for combination in &combinations {
            for term in terms.iter() {
                let mut extended = combination.clone();
                extended.push(term.clone());
                next.push(extended);
            }
        }
        combinations = next;
    }

    let distributed: Vec<Expression> = combinations
        .into_iter()
        .map(|combination| {
            let mut factors = others.clone();
            factors.extend(combination);
            factors.push(inverse_denominator.clone());
            Expression::mul(factors)
        })
        .collect();
    Expression::add(distributed).simplify()
}

fn expand_power(base: &Expression, exponent: &Expression) -> Expression {
    let (Expression::Add(terms), Some(n)) = (base, small_integer_exponent(exponent)) else {
        // not the multinomial case: expand inside and re-simplify
        return Expression::pow(
            base.expand_if_expandable(),
            exponent.expand_if_expandable(),
        )
        .simplify();
    };
    if n < 1 {
        return Expression::pow(base.expand_if_expandable(), exponent.clone()).simplify();
    }

    let n = n as u32;
    let mut expanded = Vec::new();
    for composition in compositions(terms.len(), n) {
        let mut factors = vec![Expression::big_integer(multinomial_coefficient(
            &composition,
            n,
        ))];
        for (term, &power) in terms.iter().zip(&composition) {
            factors.push(Expression::pow(
                term.clone(),
                Expression::integer(power as i64),
            ));
        }
        expanded.push(Expression::mul(factors));
    }
    Expression::add(expanded).simplify()
}
