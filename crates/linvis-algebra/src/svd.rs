//! Singular values of 2x2, 2x3, 3x2 and 3x3 matrices.
//!
//! # Mathematical Background
//!
//! For any matrix A ∈ ℝᵐˣⁿ the Gram matrix
//!
//! ```text
//! G = Aᵀ A
//! ```
//!
//! is an n×n symmetric positive semi-definite matrix whose eigenvalues are the
//! squared singular values of A. Because G is symmetric the eigen solver
//! always finds n real eigenvalues; rounding can still leave some of them
//! slightly negative, so they are clamped to zero before the square root.
//!
//! # Example
//!
//! ```
//! use linvis_algebra::{svd, Matrix};
//!
//! let m = Matrix::from_rows(&[[3.0, 0.0], [0.0, -2.0]]).unwrap();
//! assert_eq!(svd::singular_values(&m), vec![3.0, 2.0]);
//! ```

use crate::{eigen, ops, AlgebraError, Matrix};

/// Compute the singular values of a matrix in descending order.
///
/// The result has `m.cols()` entries, all non-negative.
pub fn singular_values(m: &Matrix) -> Vec<f64> {
    // the Gram matrix is square and symmetric, so every root is real
    let eigenvalues = match gram_matrix(m).and_then(|gram| eigen::eigenvalues(&gram)) {
        Ok(values) => values,
        Err(e) => {
            log::debug!("cannot compute the Gram eigenvalues: {e}");
            return Vec::new();
        }
    };
    debug_assert_eq!(eigenvalues.len(), m.cols());

    let mut values = eigenvalues
        .into_iter()
        .map(|e| e.max(0.0).sqrt())
        .collect::<Vec<_>>();
    values.sort_by(|a, b| b.total_cmp(a));
    values
}

/// Compute the Gram matrix `Aᵀ A`.
pub fn gram_matrix(m: &Matrix) -> Result<Matrix, AlgebraError> {
    ops::matmul(&ops::transpose(m), m)
}

/// Ratio of the largest to the smallest singular value.
///
/// Returns `None` for rank-deficient matrices.
pub fn condition_number(m: &Matrix) -> Option<f64> {
    if ops::rank(m) < m.cols() {
        return None;
    }
    let values = singular_values(m);
    Some(*values.first()? / *values.last()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::is_orthogonal;
    use approx::assert_relative_eq;
    use rand::Rng;

    #[test]
    fn test_diagonal() -> Result<(), Box<dyn std::error::Error>> {
        let m = Matrix::from_rows(&[[1.0, 0.0, 0.0], [0.0, -2.0, 0.0], [0.0, 0.0, 3.0]])?;
        let s = singular_values(&m);
        assert_eq!(s.len(), 3);
        assert_relative_eq!(s[0], 3.0, epsilon = 1e-9);
        assert_relative_eq!(s[1], 2.0, epsilon = 1e-9);
        assert_relative_eq!(s[2], 1.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_orthogonal_has_unit_singular_values() -> Result<(), Box<dyn std::error::Error>> {
        let (c, s) = (0.3_f64.cos(), 0.3_f64.sin());
        let m = Matrix::from_rows(&[[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])?;
        assert!(is_orthogonal(&m));
        for sv in singular_values(&m) {
            assert_relative_eq!(sv, 1.0, epsilon = 1e-7);
        }
        Ok(())
    }

    #[test]
    fn test_rectangular() -> Result<(), Box<dyn std::error::Error>> {
        // 2x3: the Gram matrix is 3x3 with one zero eigenvalue
        let m = Matrix::new(2, 3, &[3.0, 0.0, 0.0, 0.0, 4.0, 0.0])?;
        let s = singular_values(&m);
        assert_eq!(s.len(), 3);
        assert_relative_eq!(s[0], 4.0, epsilon = 1e-9);
        assert_relative_eq!(s[1], 3.0, epsilon = 1e-9);
        assert_relative_eq!(s[2], 0.0, epsilon = 1e-6);
        assert_eq!(ops::rank(&m), 2);
        assert_eq!(condition_number(&m), None);
        Ok(())
    }

    #[test]
    fn test_singular_matrix_clamps_to_zero() -> Result<(), Box<dyn std::error::Error>> {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [3.0, 6.0, 9.0]])?;
        let s = singular_values(&m);
        assert!(s.iter().all(|v| *v >= 0.0));
        assert_relative_eq!(s[0], 14.0, epsilon = 1e-8);
        assert_eq!(ops::rank(&m), 1);
        assert_eq!(condition_number(&m), None);
        Ok(())
    }

    #[test]
    fn test_random_sorted_non_negative() -> Result<(), Box<dyn std::error::Error>> {
        let mut rng = rand::rng();
        for (rows, cols) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
            for _ in 0..25 {
                let data = (0..rows * cols)
                    .map(|_| rng.random_range(-5.0..5.0))
                    .collect::<Vec<f64>>();
                let m = Matrix::new(rows, cols, &data)?;
                let s = singular_values(&m);
                assert_eq!(s.len(), cols);
                assert!(s.iter().all(|v| *v >= 0.0));
                assert!(s.windows(2).all(|w| w[0] >= w[1]));
            }
        }
        Ok(())
    }

    #[test]
    fn test_matches_nalgebra() -> Result<(), Box<dyn std::error::Error>> {
        let rows = [[2.0, -1.0, 0.5], [0.0, 3.0, 1.0], [1.0, 1.0, -2.0]];
        let m = Matrix::from_rows(&rows)?;
        let na = nalgebra::Matrix3::new(2.0, -1.0, 0.5, 0.0, 3.0, 1.0, 1.0, 1.0, -2.0);
        let mut expected = na.singular_values().iter().copied().collect::<Vec<f64>>();
        expected.sort_by(|a, b| b.total_cmp(a));
        for (got, want) in singular_values(&m).iter().zip(&expected) {
            assert_relative_eq!(*got, *want, epsilon = 1e-8);
        }
        assert_relative_eq!(
            condition_number(&m).ok_or("singular")?,
            expected[0] / expected[2],
            epsilon = 1e-6
        );
        Ok(())
    }
}
