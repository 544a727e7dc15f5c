//! Structural classification of square matrices.
//!
//! Every predicate is total: it answers `false` for rectangular input instead
//! of failing. Entries are compared against zero (or one) with the absolute
//! tolerance [`EPSILON`]; the orthogonality check uses the looser
//! [`ORTHOGONAL_EPSILON`] because column dot products accumulate more error.

use std::fmt;

use serde::Serialize;

use crate::ops::{self, EPSILON};
use crate::Matrix;

/// Tolerance for the column dot products in [`is_orthogonal`].
pub const ORTHOGONAL_EPSILON: f64 = 1e-8;

/// A structural property a matrix can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixKind {
    /// Equal to the identity.
    Identity,
    /// All off-diagonal entries vanish.
    Diagonal,
    /// Equal to its transpose.
    Symmetric,
    /// All entries below the diagonal vanish.
    UpperTriangular,
    /// All entries above the diagonal vanish.
    LowerTriangular,
    /// Columns form an orthonormal set.
    Orthogonal,
    /// Determinant within tolerance of zero.
    Singular,
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatrixKind::Identity => "identity",
            MatrixKind::Diagonal => "diagonal",
            MatrixKind::Symmetric => "symmetric",
            MatrixKind::UpperTriangular => "upper triangular",
            MatrixKind::LowerTriangular => "lower triangular",
            MatrixKind::Orthogonal => "orthogonal",
            MatrixKind::Singular => "singular",
        };
        f.write_str(name)
    }
}

#[inline]
fn near(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Check that `pred(i, j)` holds for every index pair of a square matrix.
fn all_entries(m: &Matrix, pred: impl Fn(usize, usize) -> bool) -> bool {
    m.is_square() && (0..m.rows()).all(|i| (0..m.cols()).all(|j| pred(i, j)))
}

/// Check whether every off-diagonal entry is zero.
pub fn is_diagonal(m: &Matrix) -> bool {
    all_entries(m, |i, j| i == j || near(m.get(i, j), 0.0, EPSILON))
}

/// Check whether the matrix is the identity.
pub fn is_identity(m: &Matrix) -> bool {
    all_entries(m, |i, j| {
        let expected = if i == j { 1.0 } else { 0.0 };
        near(m.get(i, j), expected, EPSILON)
    })
}

/// Check whether `m[i][j] == m[j][i]` for every pair.
pub fn is_symmetric(m: &Matrix) -> bool {
    all_entries(m, |i, j| near(m.get(i, j), m.get(j, i), EPSILON))
}

/// Check whether every entry below the diagonal is zero.
pub fn is_upper_triangular(m: &Matrix) -> bool {
    all_entries(m, |i, j| i <= j || near(m.get(i, j), 0.0, EPSILON))
}

/// Check whether every entry above the diagonal is zero.
pub fn is_lower_triangular(m: &Matrix) -> bool {
    all_entries(m, |i, j| i >= j || near(m.get(i, j), 0.0, EPSILON))
}

/// Check whether the columns are orthonormal.
///
/// For every pair of columns `i, j` the dot product must equal the Kronecker
/// delta within [`ORTHOGONAL_EPSILON`].
pub fn is_orthogonal(m: &Matrix) -> bool {
    all_entries(m, |i, j| {
        let dot = (0..m.rows()).map(|k| m.get(k, i) * m.get(k, j)).sum::<f64>();
        let delta = if i == j { 1.0 } else { 0.0 };
        near(dot, delta, ORTHOGONAL_EPSILON)
    })
}

/// Collect every structural property that holds for `m`.
///
/// Rectangular matrices have no properties.
pub fn classify(m: &Matrix) -> Vec<MatrixKind> {
    let checks: [(MatrixKind, fn(&Matrix) -> bool); 6] = [
        (MatrixKind::Identity, is_identity),
        (MatrixKind::Diagonal, is_diagonal),
        (MatrixKind::Symmetric, is_symmetric),
        (MatrixKind::UpperTriangular, is_upper_triangular),
        (MatrixKind::LowerTriangular, is_lower_triangular),
        (MatrixKind::Orthogonal, is_orthogonal),
    ];

    let mut kinds = checks
        .iter()
        .filter(|(_, check)| check(m))
        .map(|(kind, _)| *kind)
        .collect::<Vec<_>>();

    if let Ok(false) = ops::is_invertible(m) {
        kinds.push(MatrixKind::Singular);
    }

    kinds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::determinant;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_has_every_shape_property() -> Result<(), Box<dyn std::error::Error>> {
        let m = Matrix::identity(3)?;
        assert_eq!(
            classify(&m),
            vec![
                MatrixKind::Identity,
                MatrixKind::Diagonal,
                MatrixKind::Symmetric,
                MatrixKind::UpperTriangular,
                MatrixKind::LowerTriangular,
                MatrixKind::Orthogonal,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_triangular() -> Result<(), Box<dyn std::error::Error>> {
        let upper = Matrix::from_rows(&[[1.0, 2.0, 3.0], [0.0, 4.0, 5.0], [0.0, 0.0, 6.0]])?;
        assert!(is_upper_triangular(&upper));
        assert!(!is_lower_triangular(&upper));
        assert!(!is_diagonal(&upper));
        assert!(is_lower_triangular(&crate::ops::transpose(&upper)));
        Ok(())
    }

    #[test]
    fn test_symmetric_within_tolerance() -> Result<(), Box<dyn std::error::Error>> {
        let m = Matrix::from_rows(&[[1.0, 2.0 + 1e-12], [2.0, 5.0]])?;
        assert!(is_symmetric(&m));
        let m = Matrix::from_rows(&[[1.0, 2.0 + 1e-6], [2.0, 5.0]])?;
        assert!(!is_symmetric(&m));
        Ok(())
    }

    #[test]
    fn test_rotation_is_orthogonal() -> Result<(), Box<dyn std::error::Error>> {
        let theta = 0.7_f64;
        let m = Matrix::from_rows(&[[theta.cos(), -theta.sin()], [theta.sin(), theta.cos()]])?;
        assert!(is_orthogonal(&m));
        assert_relative_eq!(determinant(&m)?.abs(), 1.0, epsilon = 1e-12);

        let shear = Matrix::from_rows(&[[1.0, 1.0], [0.0, 1.0]])?;
        assert!(!is_orthogonal(&shear));
        Ok(())
    }

    #[test]
    fn test_rectangular_is_unclassified() -> Result<(), Box<dyn std::error::Error>> {
        let m = Matrix::new(2, 3, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0])?;
        assert!(!is_identity(&m));
        assert!(!is_orthogonal(&m));
        assert!(classify(&m).is_empty());
        Ok(())
    }

    #[test]
    fn test_singular_tag() -> Result<(), Box<dyn std::error::Error>> {
        let m = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]])?;
        assert_eq!(classify(&m), vec![MatrixKind::Symmetric, MatrixKind::Singular]);
        assert_eq!(MatrixKind::UpperTriangular.to_string(), "upper triangular");
        Ok(())
    }
}
