//! Distinguished symbolic constants

use serde::{Deserialize, Serialize};
use std::fmt;

/// The transcendental constants pi and e
///
/// These are exact symbolic atoms, never numeric approximations. They pass
/// through arithmetic and substitution unchanged; the trig and logarithm
/// simplifiers give them their meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MathConstant {
    Pi,
    E,
}

impl fmt::Display for MathConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathConstant::Pi => write!(f, "pi"),
            MathConstant::E => write!(f, "e"),
        }
    }
}
