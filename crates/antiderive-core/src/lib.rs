//! Core engine for Antiderive
//!
//! An exact symbolic expression algebra in one variable at a time, with a
//! canonicalizing simplifier and a transform-driven integration search. All
//! arithmetic is exact rational arithmetic over bignum integers; results are
//! exact or the engine fails cleanly.
//!
//! # Quick start
//!
//! ```rust
//! use antiderive_core::prelude::*;
//!
//! let x = Symbol::new("x");
//! // d/dx sin(x^2) = 2x cos(x^2)
//! let expr = sin(Expression::pow(Expression::symbol(x.clone()), Expression::integer(2)));
//! let derivative = diff(&expr, &x).expect("differentiable");
//! assert!(derivative.contains(&x));
//!
//! // an antiderivative of 2x is x^2
//! let integrand = Expression::mul(vec![Expression::integer(2), Expression::symbol(x.clone())]);
//! let antiderivative = integrate(&integrand, &x).expect("solvable");
//! assert_eq!(
//!     antiderivative,
//!     Expression::pow(Expression::symbol(x), Expression::integer(2))
//! );
//! ```

pub mod algebra;
pub mod calculus;
pub mod core;
pub mod error;
pub mod formatter;
pub mod functions;
pub mod pattern;
pub mod simplify;

// Core types (most commonly used)
pub use crate::core::{symbols, Expression, MathConstant, Number, Symbol, TrigKind};

// Calculus operations
pub use calculus::{
    diff, integrate, integrate_bounded, Differentiate, ExtendedReal, Integrate,
    IntegratorConfig,
};

// Pattern matching and substitution
pub use pattern::Substitutable;

// Simplification
pub use simplify::Simplify;

// Error types
pub use error::{MathError, MathResult};

// Formatter types
pub use formatter::LatexFormatter;

/// Convenience prelude for common imports
///
/// Import with `use antiderive_core::prelude::*;` to get the expression
/// types, the operation traits, and the builder functions.
pub mod prelude {
    pub use crate::core::{symbols, Expression, MathConstant, Number, Symbol, TrigKind};

    pub use crate::calculus::{
        diff, integrate, integrate_bounded, Differentiate, ExtendedReal, Integrate,
        IntegratorConfig,
    };

    pub use crate::functions::{
        acos, asin, atan, cos, cot, csc, e, log, log_base, pi, sec, sin, sqrt, tan,
    };

    pub use crate::pattern::Substitutable;
    pub use crate::simplify::Simplify;

    pub use crate::error::{MathError, MathResult};

    pub use crate::formatter::LatexFormatter;
}
