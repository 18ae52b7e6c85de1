//! Multinomial expansion support
//!
//! Enumerates the exponent patterns of `(t_1 + ... + t_k)^n` and computes
//! their exact coefficients.

use num_bigint::BigInt;

/// All ways to write `total` as an ordered sum of `parts` non-negative
/// integers
///
/// # Examples
///
/// ```rust
/// use antiderive_core::algebra::multinomial::compositions;
///
/// let all = compositions(2, 2);
/// assert_eq!(all, vec![vec![0, 2], vec![1, 1], vec![2, 0]]);
/// ```
pub fn compositions(parts: usize, total: u32) -> Vec<Vec<u32>> {
    assert!(parts > 0, "BUG: compositions over zero parts");
    if parts == 1 {
        return vec![vec![total]];
    }
    let mut result = Vec::new();
    for first in 0..=total {
        for mut rest in compositions(parts - 1, total - first) {
            let mut composition = Vec::with_capacity(parts);
            composition.push(first);
            composition.append(&mut rest);
            result.push(composition);
        }
    }
    result
}

/// Exact multinomial coefficient `n! / (p_1! * ... * p_k!)`
///
/// # Examples
///
/// ```rust
/// use antiderive_core::algebra::multinomial::multinomial_coefficient;
/// use num_bigint::BigInt;
///
/// assert_eq!(multinomial_coefficient(&[1, 1], 2), BigInt::from(2));
/// assert_eq!(multinomial_coefficient(&[2, 3, 5], 10), BigInt::from(2520));
/// ```
pub fn multinomial_coefficient(composition: &[u32], total: u32) -> BigInt {
    debug_assert_eq!(
        composition.iter().sum::<u32>(),
        total,
        "BUG: composition does not sum to the exponent"
    );
    let mut result = factorial(total);
    for &part in composition {
        result /= factorial(part);
    }
    result
}

fn factorial(n: u32) -> BigInt {
    (1..=n).fold(BigInt::from(1), |acc, i| acc * BigInt::from(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composition_count() {
        // number of compositions of n into k parts is C(n + k - 1, k - 1)
        assert_eq!(compositions(2, 10).len(), 11);
        assert_eq!(compositions(3, 4).len(), 15);
    }

    #[test]
    fn test_binomial_special_case() {
        // row 4 of Pascal's triangle
        let coefficients: Vec<BigInt> = compositions(2, 4)
            .iter()
            .map(|c| multinomial_coefficient(c, 4))
            .collect();
        let expected: Vec<BigInt> = [1, 4, 6, 4, 1].iter().map(|&c| BigInt::from(c)).collect();
        assert_eq!(coefficients, expected);
    }
}
