//! Builder functions for the supported function algebra
//!
//! Free-function constructors mirroring the usual mathematical notation, so
//! call sites read like the formulas they build. None of these simplify;
//! call [`simplify`](crate::Simplify::simplify) on the assembled expression.

use crate::core::{Expression, TrigKind};

macro_rules! trig_builder {
    ($(#[$doc:meta])* $name:ident, $kind:expr) => {
        $(#[$doc])*
        pub fn $name(inner: Expression) -> Expression {
            Expression::trig($kind, inner)
        }
    };
}

trig_builder!(
    /// Sine
    sin,
    TrigKind::Sin
);
trig_builder!(
    /// Cosine
    cos,
    TrigKind::Cos
);
trig_builder!(
    /// Tangent
    tan,
    TrigKind::Tan
);
trig_builder!(
    /// Secant
    sec,
    TrigKind::Sec
);
trig_builder!(
    /// Cosecant
    csc,
    TrigKind::Csc
);
trig_builder!(
    /// Cotangent
    cot,
    TrigKind::Cot
);
trig_builder!(
    /// Inverse sine
    asin,
    TrigKind::ArcSin
);
trig_builder!(
    /// Inverse cosine
    acos,
    TrigKind::ArcCos
);
trig_builder!(
    /// Inverse tangent
    atan,
    TrigKind::ArcTan
);

/// Natural logarithm
pub fn log(inner: Expression) -> Expression {
    Expression::log(inner)
}

/// Logarithm with an explicit base
pub fn log_base(inner: Expression, base: Expression) -> Expression {
    Expression::log_base(inner, base)
}

/// Square root, shorthand for the one-half power
pub fn sqrt(inner: Expression) -> Expression {
    Expression::sqrt(inner)
}

/// The constant pi
pub fn pi() -> Expression {
    Expression::pi()
}

/// The constant e
pub fn e() -> Expression {
    Expression::e()
}
