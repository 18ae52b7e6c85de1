//! LaTeX rendering
//!
//! Display-only typesetting: fractions, radicals, `\cdot` products and
//! `\left( \right)` grouping. The canonical text form, not this output, is
//! the equality fingerprint.

use crate::core::{Expression, MathConstant, TrigKind};
use crate::simplify::arithmetic::helpers::{
    numerator_denominator, strip_leading_minus_one,
};

/// Renders expressions as LaTeX source
pub struct LatexFormatter;

impl LatexFormatter {
    /// Format an expression as LaTeX
    ///
    /// # Examples
    ///
    /// ```rust
    /// use antiderive_core::formatter::LatexFormatter;
    /// use antiderive_core::Expression;
    ///
    /// let half = Expression::rational(1, 2);
    /// assert_eq!(LatexFormatter::format(&half), "\\frac{1}{2}");
    /// ```
    pub fn format(expr: &Expression) -> String {
        match expr {
            Expression::Number(num) => {
                if num.is_integer() {
                    num.to_string()
                } else if num.is_negative() {
                    format!("-\\frac{{{}}}{{{}}}", num.abs().numer(), num.denom())
                } else {
                    format!("\\frac{{{}}}{{{}}}", num.numer(), num.denom())
                }
            }

            Expression::Constant(MathConstant::Pi) => "\\pi".to_string(),
            Expression::Constant(MathConstant::E) => "e".to_string(),

            Expression::Symbol(sym) => sym.name().to_string(),

            Expression::Add(terms) => {
                let mut rendered = String::new();
                for (i, term) in terms.iter().enumerate() {
                    if i == 0 {
                        rendered.push_str(&Self::format(term));
                    } else if let Some(positive) = strip_leading_minus_one(term) {
                        rendered.push_str(" - ");
                        rendered.push_str(&Self::format(&positive));
                    } else {
                        rendered.push_str(" + ");
                        rendered.push_str(&Self::format(term));
                    }
                }
                rendered
            }

            Expression::Mul(factors) => {
                if let Some(positive) = strip_leading_minus_one(expr) {
                    return format!("-{}", Self::grouped(&positive));
                }
                let (numerator, denominator) = numerator_denominator(factors);
                if !denominator.is_one() {
                    return format!(
                        "\\frac{{{}}}{{{}}}",
                        Self::format(&numerator),
                        Self::format(&denominator)
                    );
                }
                factors
                    .iter()
                    .map(|factor| Self::grouped(factor))
                    .collect::<Vec<_>>()
                    .join(" \\cdot ")
            }

            Expression::Pow(base, exponent) => {
                if **exponent == Expression::rational(1, 2) {
                    return format!("\\sqrt{{{}}}", Self::format(base));
                }
                if **exponent == Expression::rational(-1, 2) {
                    return format!("{{\\sqrt{{{}}}}}^{{-1}}", Self::format(base));
                }
                format!(
                    "{{{}}}^{{{}}}",
                    Self::grouped(base),
                    Self::grouped(exponent)
                )
            }

            Expression::Log(data) => {
                if data.base == Expression::e() {
                    format!("\\ln\\left({}\\right)", Self::format(&data.inner))
                } else {
                    format!(
                        "\\log_{{{}}}\\left({}\\right)",
                        Self::format(&data.base),
                        Self::format(&data.inner)
                    )
                }
            }

            Expression::Trig(data) => {
                let name = match data.kind {
                    TrigKind::Sin => "\\sin",
                    TrigKind::Cos => "\\cos",
                    TrigKind::Tan => "\\tan",
                    TrigKind::Sec => "\\sec",
                    TrigKind::Csc => "\\csc",
                    TrigKind::Cot => "\\cot",
                    TrigKind::ArcSin => "\\arcsin",
                    TrigKind::ArcCos => "\\arccos",
                    TrigKind::ArcTan => "\\arctan",
                };
                format!("{}\\left({}\\right)", name, Self::format(&data.inner))
            }
        }
    }

    /// Wrap sums and products that appear inside another operation
    fn grouped(expr: &Expression) -> String {
        match expr {
            Expression::Add(_) | Expression::Mul(_) => {
                format!("\\left({}\\right)", Self::format(expr))
            }
            _ => Self::format(expr),
        }
    }
}

impl Expression {
    /// LaTeX rendering of this expression; see [`LatexFormatter`]
    pub fn latex(&self) -> String {
        LatexFormatter::format(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplify::Simplify;

    fn x() -> Expression {
        Expression::symbol("x")
    }

    #[test]
    fn test_fraction() {
        let expr = (x() / Expression::integer(2)).simplify();
        assert_eq!(expr.latex(), "\\frac{x}{2}");
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(Expression::sqrt(x()).latex(), "\\sqrt{x}");
    }

    #[test]
    fn test_power_grouping() {
        let expr = Expression::pow(
            (Expression::one() + x()).simplify(),
            Expression::integer(2),
        );
        assert_eq!(expr.latex(), "{\\left(1 + x\\right)}^{2}");
    }

    #[test]
    fn test_trig_and_pi() {
        let expr = Expression::trig(crate::core::TrigKind::Sin, Expression::pi());
        assert_eq!(expr.latex(), "\\sin\\left(\\pi\\right)");
    }

    #[test]
    fn test_subtraction() {
        let expr = (Expression::one() - x()).simplify();
        assert_eq!(expr.latex(), "1 - x");
    }

    #[test]
    fn test_product_uses_cdot() {
        let expr = (Expression::integer(2) * x()).simplify();
        assert_eq!(expr.latex(), "2 \\cdot x");
    }
}
