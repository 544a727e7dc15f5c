use serde::Serialize;

use crate::classify::{classify, MatrixKind};
use crate::eigen::{eigen_decomposition, EigenDecomposition};
use crate::{ops, svd, Dimension, Matrix};

/// Everything the analysis panels show for one matrix.
///
/// Fields that only exist for square matrices are `None` for rectangular input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixAnalysis {
    /// Shape of the analyzed matrix.
    pub dimension: Dimension,
    /// Determinant, square only.
    pub determinant: Option<f64>,
    /// Trace, square only.
    pub trace: Option<f64>,
    /// Whether `|det| > EPSILON`, square only.
    pub invertible: Option<bool>,
    /// Inverse when it exists.
    pub inverse: Option<Matrix>,
    /// Real eigen decomposition, square only.
    pub eigen: Option<EigenDecomposition>,
    /// Singular values in descending order.
    pub singular_values: Vec<f64>,
    /// Rank by row reduction.
    pub rank: usize,
    /// Largest over smallest singular value, `None` when rank-deficient.
    pub condition_number: Option<f64>,
    /// Structural properties.
    pub kinds: Vec<MatrixKind>,
}

/// Analyze a matrix.
///
/// The analysis is cheap and recomputed from scratch on every call.
///
/// Example:
///
/// ```
/// use linvis_algebra::{analyze, Matrix};
///
/// let a = analyze(&Matrix::identity(3).unwrap());
/// assert_eq!(a.determinant, Some(1.0));
/// assert_eq!(a.trace, Some(3.0));
/// assert_eq!(a.invertible, Some(true));
/// ```
pub fn analyze(m: &Matrix) -> MatrixAnalysis {
    MatrixAnalysis {
        dimension: m.dimension(),
        determinant: ops::determinant(m).ok(),
        trace: ops::trace(m).ok(),
        invertible: ops::is_invertible(m).ok(),
        inverse: ops::inverse(m).ok(),
        eigen: eigen_decomposition(m).ok(),
        singular_values: svd::singular_values(m),
        rank: ops::rank(m),
        condition_number: svd::condition_number(m),
        kinds: classify(m),
    }
}
