//! Error types for algebra and integration failures
//!
//! Errors are values at every API boundary. An internal invariant violation
//! is a programming defect and panics instead of being represented here.

use crate::core::Expression;
use std::fmt;

/// Errors surfaced by the public API
///
/// Covers malformed input, constructs outside the supported algebra, and
/// integrands the search engine cannot solve. A search failure is an expected
/// outcome for inputs outside the system's competence, not a bug.
#[derive(Debug, Clone, PartialEq)]
pub enum MathError {
    /// Malformed construction, e.g. a non-symbol where a variable was required
    InvalidInput {
        reason: String,
    },

    /// The construct is outside the supported algebra
    ///
    /// # Examples
    ///
    /// - differentiating `x^x` (variable in both base and exponent)
    UnsupportedDerivative {
        expression: Expression,
    },

    /// The feature exists in the algebra but is not implemented
    NotImplemented {
        feature: String,
    },

    /// The integration engine exhausted its transforms without a solution
    IntegrationFailed {
        integrand: Expression,
        variable: String,
    },
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MathError::InvalidInput { reason } => {
                write!(f, "Invalid input: {}", reason)
            }
            MathError::UnsupportedDerivative { expression } => {
                write!(f, "Unsupported derivative: {}", expression)
            }
            MathError::NotImplemented { feature } => {
                write!(f, "Not yet implemented: {}", feature)
            }
            MathError::IntegrationFailed {
                integrand,
                variable,
            } => {
                write!(f, "Failed to integrate {} with respect to {}", integrand, variable)
            }
        }
    }
}

impl std::error::Error for MathError {}

/// Type alias for operations that can fail with a [`MathError`]
pub type MathResult<T> = Result<T, MathError>;
