//! Canonical text form
//!
//! The `Display` output is the normal-form text: deterministic, fully
//! parenthesized where grouping matters, with `sqrt(..)` and `1/..`
//! shorthands for the half and minus-one powers. Canonically ordered
//! expressions are equal exactly when their text forms are equal, and the
//! text form is the tie-breaking sort key inside sums and products.

use super::Expression;
use crate::simplify::arithmetic::helpers::{
    numerator_denominator, strip_leading_minus_one,
};
use std::fmt;

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(num) => {
                if num.is_integer() {
                    write!(f, "{}", num)
                } else {
                    write!(f, "({})", num)
                }
            }
            Expression::Constant(c) => write!(f, "{}", c),
            Expression::Symbol(sym) => write!(f, "{}", sym.name()),
            Expression::Add(terms) => {
                if terms.is_empty() {
                    return write!(f, "0");
                }
                for (i, term) in terms.iter().enumerate() {
                    if i == 0 {
                        write!(f, "{}", term)?;
                    } else if let Some(positive) = strip_leading_minus_one(term) {
                        write!(f, " - {}", positive)?;
                    } else {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            }
            Expression::Mul(factors) => {
                if factors.is_empty() {
                    return write!(f, "1");
                }
                if let Some(positive) = strip_leading_minus_one(self) {
                    return write!(f, "-{}", grouped(&positive));
                }

                let (numerator, denominator) = numerator_denominator(factors);
                if !denominator.is_one() {
                    return write!(
                        f,
                        "{}/{}",
                        fraction_part(&numerator),
                        fraction_part(&denominator)
                    );
                }

                let rendered: Vec<String> = factors.iter().map(|t| grouped(t)).collect();
                write!(f, "{}", rendered.join("*"))
            }
            Expression::Pow(base, exponent) => {
                if **exponent == Expression::integer(-1) {
                    return write!(f, "1/{}", grouped_base(base));
                }
                if **exponent == Expression::rational(1, 2) {
                    return write!(f, "{}", wrap_function("sqrt", &base.to_string()));
                }
                if **exponent == Expression::rational(-1, 2) {
                    return write!(f, "1/{}", wrap_function("sqrt", &base.to_string()));
                }
                write!(f, "{}^{}", grouped_base(base), grouped_base(exponent))
            }
            Expression::Log(data) => {
                if data.base == Expression::e() {
                    write!(f, "{}", wrap_function("log", &data.inner.to_string()))
                } else {
                    write!(f, "log({}, {})", data.inner, data.base)
                }
            }
            Expression::Trig(data) => {
                write!(f, "{}", wrap_function(data.kind.name(), &data.inner.to_string()))
            }
        }
    }
}

/// Parenthesize sums when they appear as factors
fn grouped(expr: &Expression) -> String {
    match expr {
        Expression::Add(_) => format!("({})", expr),
        _ => expr.to_string(),
    }
}

/// Parenthesize sums and products when they appear as power operands
fn grouped_base(expr: &Expression) -> String {
    match expr {
        Expression::Add(_) | Expression::Mul(_) => format!("({})", expr),
        _ => expr.to_string(),
    }
}

/// Render one side of a fraction bar
fn fraction_part(expr: &Expression) -> String {
    match expr {
        Expression::Mul(factors) if factors.len() > 1 => format!("({})", expr),
        Expression::Add(_) => format!("({})", expr),
        _ => expr.to_string(),
    }
}

/// `label(inner)`, without doubling parentheses the inner text already has
fn wrap_function(label: &str, inner: &str) -> String {
    if is_fully_wrapped(inner) {
        format!("{}{}", label, inner)
    } else {
        format!("{}({})", label, inner)
    }
}

/// Whether the first `(` pairs with the final `)`
fn is_fully_wrapped(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'(') || bytes.last() != Some(&b')') {
        return false;
    }
    let mut depth = 0usize;
    for (i, b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return i == bytes.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}
