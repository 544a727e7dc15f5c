#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

mod error;
mod record;

/// Settings for a new scene.
pub mod config;

/// The scene: one matrix, the user's vectors and their images.
pub mod scene;

/// Fingerprint-based recomputation of derived vectors.
pub mod sync;

/// Applying the matrix to a single source vector.
pub mod transform;

pub use config::SceneConfig;
pub use error::SceneError;
pub use record::{Color, DerivedVector, SourceVector, VectorId};
pub use scene::Scene;
pub use sync::{SyncCoordinator, SyncOutcome, SyncReport, SyncState};
pub use transform::{transform, IncompatibleVector};
