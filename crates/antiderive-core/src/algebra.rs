//! Algebra utilities: factoring, expansion, polynomials, linear algebra

pub mod expand;
pub mod factor;
pub mod linalg;
pub mod multinomial;
pub mod polynomial;

pub use linalg::{invert, solve_2x2, Matrix2};
pub use polynomial::Polynomial;
