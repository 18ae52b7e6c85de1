//! Expression type and core functionality

pub mod constructors;
pub mod display;
pub mod methods;
pub mod operators;
pub mod ordering;

use crate::core::{MathConstant, Number, Symbol};
use serde::{Deserialize, Serialize};

/// Symbolic expression over exact rationals
///
/// A closed algebra: rational constants, the symbolic constants pi and e,
/// named variables, n-ary sums and products, powers, logarithms, the six
/// trigonometric functions and the three inverse trigonometric functions.
///
/// Expressions are immutable value objects; [`simplify`](crate::Simplify)
/// returns a new expression in canonical form. Sub-expressions may be shared
/// freely.
///
/// Hot-path variants are kept inline; compound variants are boxed to keep the
/// enum small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    Number(Number),
    Constant(MathConstant),
    Symbol(Symbol),
    Add(Box<Vec<Expression>>),
    Mul(Box<Vec<Expression>>),
    Pow(Box<Expression>, Box<Expression>),
    Log(Box<LogData>),
    Trig(Box<TrigData>),
}

/// Logarithm payload: `log_base(inner)`
///
/// The base defaults to e, in which case this is the natural logarithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogData {
    pub inner: Expression,
    pub base: Expression,
}

/// Trigonometric function payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrigData {
    pub kind: TrigKind,
    pub inner: Expression,
}

/// The six trigonometric functions and their three inverses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrigKind {
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    ArcSin,
    ArcCos,
    ArcTan,
}

impl TrigKind {
    /// Function name as printed in the canonical text form
    pub fn name(self) -> &'static str {
        match self {
            TrigKind::Sin => "sin",
            TrigKind::Cos => "cos",
            TrigKind::Tan => "tan",
            TrigKind::Sec => "sec",
            TrigKind::Csc => "csc",
            TrigKind::Cot => "cot",
            TrigKind::ArcSin => "asin",
            TrigKind::ArcCos => "acos",
            TrigKind::ArcTan => "atan",
        }
    }

    /// Whether this is an inverse trigonometric function
    pub fn is_inverse(self) -> bool {
        matches!(self, TrigKind::ArcSin | TrigKind::ArcCos | TrigKind::ArcTan)
    }

    /// Reciprocal partner of a direct trig function: sin and csc, cos and
    /// sec, tan and cot
    pub fn reciprocal(self) -> Option<TrigKind> {
        match self {
            TrigKind::Sin => Some(TrigKind::Csc),
            TrigKind::Cos => Some(TrigKind::Sec),
            TrigKind::Tan => Some(TrigKind::Cot),
            TrigKind::Sec => Some(TrigKind::Cos),
            TrigKind::Csc => Some(TrigKind::Sin),
            TrigKind::Cot => Some(TrigKind::Tan),
            _ => None,
        }
    }

    /// The direct function an inverse undoes: asin pairs with sin, and so on
    pub fn direct(self) -> Option<TrigKind> {
        match self {
            TrigKind::ArcSin => Some(TrigKind::Sin),
            TrigKind::ArcCos => Some(TrigKind::Cos),
            TrigKind::ArcTan => Some(TrigKind::Tan),
            _ => None,
        }
    }

    /// The inverse of a direct function, where one is supported
    pub fn inverse(self) -> Option<TrigKind> {
        match self {
            TrigKind::Sin => Some(TrigKind::ArcSin),
            TrigKind::Cos => Some(TrigKind::ArcCos),
            TrigKind::Tan => Some(TrigKind::ArcTan),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trig_kind_tables_are_involutions() {
        for kind in [
            TrigKind::Sin,
            TrigKind::Cos,
            TrigKind::Tan,
            TrigKind::Sec,
            TrigKind::Csc,
            TrigKind::Cot,
        ] {
            let partner = kind.reciprocal().expect("direct trig has a reciprocal");
            assert_eq!(partner.reciprocal(), Some(kind));
        }
        for kind in [TrigKind::ArcSin, TrigKind::ArcCos, TrigKind::ArcTan] {
            assert!(kind.is_inverse());
            let direct = kind.direct().expect("inverse trig has a direct partner");
            assert_eq!(direct.inverse(), Some(kind));
        }
    }
}
