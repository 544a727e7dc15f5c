use crate::Dimension;

/// An error type for the algebra module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AlgebraError {
    /// A square-only operation was invoked on a rectangular matrix.
    #[error("Operation requires a square matrix, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows of the offending matrix.
        rows: usize,
        /// Number of columns of the offending matrix.
        cols: usize,
    },

    /// Two vectors of different lengths were combined.
    #[error("Vector lengths do not match: {left} != {right}")]
    LengthMismatch {
        /// Length of the left-hand vector.
        left: usize,
        /// Length of the right-hand vector.
        right: usize,
    },

    /// The inner dimensions of a product do not agree.
    #[error("Incompatible shapes for product: {lhs} * {rhs}")]
    IncompatibleShapes {
        /// Shape of the left-hand operand.
        lhs: Dimension,
        /// Shape of the right-hand operand.
        rhs: Dimension,
    },

    /// A row, column or component count outside of 2..=3.
    #[error("Unsupported dimension {0}, only 2 and 3 are supported")]
    UnsupportedDimension(usize),

    /// The data length does not match the requested shape.
    #[error("Data length ({actual}) does not match the matrix size ({expected})")]
    InvalidData {
        /// Number of entries required by the shape.
        expected: usize,
        /// Number of entries provided.
        actual: usize,
    },

    /// The matrix has no inverse.
    #[error("Matrix is singular")]
    Singular,

    /// Cross product requested for a vector that is not 3-dimensional.
    #[error("Cross product is only defined for 3-dimensional vectors, got {0}")]
    NotThreeDimensional(usize),

    /// A direction was requested from a zero-length vector.
    #[error("Vector has zero length")]
    ZeroVector,

    /// A dimension tag could not be parsed.
    #[error("Invalid dimension tag: {0}")]
    ParseDimension(String),
}
