//! Canonicalizing simplification
//!
//! [`Simplify::simplify`] is the canonicalizer for the whole algebra: it is
//! idempotent, value-preserving wherever the expression is defined, and its
//! output satisfies the structural invariants every integration transform
//! assumes (flattened ordered sums and products, folded constants, collapsed
//! trivial powers, evaluated special angles).

pub mod arithmetic;
pub mod functions;
pub(crate) mod pythagorean;

use crate::core::Expression;

/// Trait for canonicalizing expressions
pub trait Simplify {
    fn simplify(&self) -> Self;
}

impl Simplify for Expression {
    fn simplify(&self) -> Self {
        match self {
            Expression::Number(_) | Expression::Constant(_) | Expression::Symbol(_) => {
                self.clone()
            }

            Expression::Add(terms) => arithmetic::simplify_addition(terms),
            Expression::Mul(factors) => arithmetic::simplify_multiplication(factors),
            Expression::Pow(base, exponent) => arithmetic::simplify_power(base, exponent),

            Expression::Log(data) => functions::simplify_log(data),
            Expression::Trig(data) => functions::simplify_trig(data),
        }
    }
}
