#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

mod error;
mod matrix;

/// Matrix summary recomputed on demand for the analysis panels.
pub mod analysis;

/// Structural predicates on square matrices.
pub mod classify;

/// Real eigenvalues and eigenvectors.
pub mod eigen;

/// Determinant, trace, inverse and products.
pub mod ops;

/// Common transformation matrices.
pub mod presets;

/// Singular values through the Gram matrix.
pub mod svd;

/// Operations on plain component slices.
pub mod vector;

pub use analysis::{analyze, MatrixAnalysis};
pub use classify::MatrixKind;
pub use eigen::{DecompositionKind, EigenDecomposition, EigenPair};
pub use error::AlgebraError;
pub use matrix::{check_dim, Dimension, Matrix, MAX_DIM, MIN_DIM};
