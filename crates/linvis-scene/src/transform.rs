use std::fmt;

use linvis_algebra::{ops, Matrix};
use serde::Serialize;

use crate::{DerivedVector, SourceVector, VectorId};

/// A source vector whose length does not match the matrix column count.
///
/// This is a diagnostic, not a failure: the vector simply has no image
/// until either the vector or the matrix changes shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncompatibleVector {
    /// Id of the skipped source vector.
    pub vector_id: VectorId,
    /// Number of components of the vector.
    pub vector_dimension: usize,
    /// Number of columns of the matrix.
    pub required_dimension: usize,
}

impl fmt::Display for IncompatibleVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vector {} has {} components but the matrix expects {}",
            self.vector_id, self.vector_dimension, self.required_dimension
        )
    }
}

impl std::error::Error for IncompatibleVector {}

/// Apply `matrix` to `source` and build the derived vector.
///
/// The derived vector has `matrix.rows()` components and copies the label,
/// colour and visibility of the source.
///
/// # Arguments
///
/// * `matrix` - The transformation, `rows x cols`.
/// * `source` - The vector to transform, `cols` components.
///
/// Example:
///
/// ```
/// use linvis_algebra::Matrix;
/// use linvis_scene::{transform, Color, SourceVector, VectorId};
///
/// let m = Matrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]]).unwrap();
/// let v = SourceVector::new(VectorId(1), vec![1.0, 0.0], "v1", Color::WHITE).unwrap();
/// let derived = transform(&m, &v).unwrap();
/// assert_eq!(derived.components(), &[0.0, 1.0]);
/// ```
pub fn transform(
    matrix: &Matrix,
    source: &SourceVector,
) -> Result<DerivedVector, IncompatibleVector> {
    let components =
        ops::mul_vector(matrix, source.components()).map_err(|_| IncompatibleVector {
            vector_id: source.id(),
            vector_dimension: source.dimension(),
            required_dimension: matrix.cols(),
        })?;
    Ok(DerivedVector::from_source(source, components))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_transform_rectangular() -> Result<(), Box<dyn std::error::Error>> {
        // projection of 3d onto the xy plane
        let m = Matrix::from_rows(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])?;
        let v = SourceVector::new(VectorId(3), vec![1.0, 2.0, 3.0], "p", Color::WHITE)?;
        let derived = transform(&m, &v)?;
        assert_eq!(derived.components(), &[1.0, 2.0]);
        assert_eq!(derived.source_id(), VectorId(3));
        Ok(())
    }

    #[test]
    fn test_transform_incompatible() -> Result<(), Box<dyn std::error::Error>> {
        let m = Matrix::identity(2)?;
        let v = SourceVector::new(VectorId(4), vec![1.0, 2.0, 3.0], "v4", Color::WHITE)?;
        let err = transform(&m, &v).unwrap_err();
        assert_eq!(
            err,
            IncompatibleVector {
                vector_id: VectorId(4),
                vector_dimension: 3,
                required_dimension: 2,
            }
        );
        assert_eq!(
            err.to_string(),
            "vector #4 has 3 components but the matrix expects 2"
        );
        Ok(())
    }
}
