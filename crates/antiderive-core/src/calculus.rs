//! Calculus operations: differentiation, limits at infinity, integration

pub mod derivatives;
pub mod integrals;
pub mod limits;

pub use derivatives::{diff, Differentiate};
pub use integrals::{integrate, integrate_bounded, Integrate, IntegratorConfig};
pub use limits::ExtendedReal;
