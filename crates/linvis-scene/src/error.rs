use linvis_algebra::{AlgebraError, Dimension};

use crate::VectorId;

/// An error type for the scene module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// No source vector carries the given id.
    #[error("Vector {0} not found")]
    VectorNotFound(VectorId),

    /// A matrix entry outside of the current shape was addressed.
    #[error("Entry ({row}, {col}) is outside of the {dimension} matrix")]
    IndexOutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Shape of the matrix.
        dimension: Dimension,
    },

    /// A colour string is not of the form `#rrggbb`.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Error coming from the algebra layer.
    #[error(transparent)]
    Algebra(#[from] AlgebraError),
}
