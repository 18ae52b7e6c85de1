//! Minimal exact linear algebra: 2x2 rational matrices
//!
//! Just enough to solve the cover-up system behind the partial-fraction
//! transform.

use crate::core::Number;

/// Row-major 2x2 rational matrix
pub type Matrix2 = [[Number; 2]; 2];

/// Inverse of a 2x2 matrix, or `None` when singular
///
/// # Examples
///
/// ```rust
/// use antiderive_core::algebra::{invert, Matrix2};
/// use antiderive_core::Number;
///
/// let m: Matrix2 = [
///     [Number::integer(2), Number::integer(0)],
///     [Number::integer(0), Number::integer(4)],
/// ];
/// let inv = invert(&m).expect("nonsingular");
/// assert_eq!(inv[0][0], Number::rational(1, 2));
/// assert_eq!(inv[1][1], Number::rational(1, 4));
/// ```
pub fn invert(matrix: &Matrix2) -> Option<Matrix2> {
    let determinant = &(&matrix[0][0] * &matrix[1][1]) - &(&matrix[0][1] * &matrix[1][0]);
    let inverse_det = determinant.recip()?;
    Some([
        [
            &matrix[1][1] * &inverse_det,
            &(-&matrix[0][1]) * &inverse_det,
        ],
        [
            &(-&matrix[1][0]) * &inverse_det,
            &matrix[0][0] * &inverse_det,
        ],
    ])
}

/// Solve `matrix * x = rhs`, or `None` when the matrix is singular
pub fn solve_2x2(matrix: &Matrix2, rhs: &[Number; 2]) -> Option<[Number; 2]> {
    let inverse = invert(matrix)?;
    Some([
        &(&inverse[0][0] * &rhs[0]) + &(&inverse[0][1] * &rhs[1]),
        &(&inverse[1][0] * &rhs[0]) + &(&inverse[1][1] * &rhs[1]),
    ])
}
