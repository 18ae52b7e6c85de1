//! Antiderive: symbolic indefinite and definite integration
//!
//! Antiderive is an exact symbolic integrator for an algebra of real-valued
//! expressions in one variable at a time. Given an integrand and a variable
//! it searches for a closed-form antiderivative over an AND/OR tree of
//! integral transforms; all arithmetic is exact rational arithmetic, so
//! results are exact or the search fails cleanly.
//!
//! # Quick start
//!
//! ```rust
//! use antiderive::prelude::*;
//!
//! let x = Symbol::new("x");
//! let sym = || Expression::symbol(x.clone());
//!
//! // an antiderivative of x cos x, found by parts
//! let integrand = sym() * cos(sym());
//! let antiderivative = integrate(&integrand.simplify(), &x).expect("solvable");
//! let expected = (sym() * sin(sym()) + cos(sym())).simplify();
//! assert_eq!(antiderivative, expected);
//! ```

pub use antiderive_core as core;

pub use antiderive_core::{
    diff, integrate, integrate_bounded, symbols, Differentiate, Expression, ExtendedReal,
    Integrate, IntegratorConfig, LatexFormatter, MathConstant, MathError, MathResult, Number,
    Simplify, Substitutable, Symbol, TrigKind,
};

pub use num_bigint;
pub use num_rational;
pub use serde_json;

/// Convenience prelude for common imports
///
/// # Examples
///
/// ```rust
/// use antiderive::prelude::*;
///
/// let vars = symbols("x y");
/// assert_eq!(vars.len(), 2);
/// ```
pub mod prelude {
    pub use antiderive_core::prelude::*;
}
