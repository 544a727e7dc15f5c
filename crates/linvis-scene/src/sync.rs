use linvis_algebra::Matrix;
use serde::Serialize;

use crate::{transform, DerivedVector, IncompatibleVector, SourceVector, VectorId};

/// Where the coordinator stands between two notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Nothing pending.
    Idle,
    /// Inputs were reported as changed since the last sync.
    Dirty,
    /// Derived vectors are being rebuilt.
    Recomputing,
}

/// Summary of a recompute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    /// Number of derived vectors produced.
    pub derived: usize,
    /// Source vectors skipped because of a shape mismatch.
    pub incompatible: Vec<IncompatibleVector>,
}

/// Result of a call to [`SyncCoordinator::sync`].
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Inputs match the last applied fingerprint, nothing was touched.
    Unchanged,
    /// Derived vectors were rebuilt.
    Recomputed(SyncReport),
    /// Derived display is off, the collection stays empty.
    Disabled,
}

/// Snapshot of everything that feeds the derived collection.
///
/// Floats are compared by bit pattern so that a NaN entered by the user
/// does not defeat the no-op check.
#[derive(Debug, Clone)]
struct Fingerprint {
    matrix: Matrix,
    sources: Vec<SourceVector>,
}

impl Fingerprint {
    fn capture(sources: &[SourceVector], matrix: &Matrix) -> Self {
        Self {
            matrix: *matrix,
            sources: sources.to_vec(),
        }
    }
}

fn same_bits(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
}

impl PartialEq for Fingerprint {
    fn eq(&self, other: &Self) -> bool {
        let matrix_eq = self.matrix.dimension() == other.matrix.dimension()
            && self
                .matrix
                .iter_rows()
                .zip(other.matrix.iter_rows())
                .all(|(a, b)| same_bits(a, b));

        matrix_eq
            && self.sources.len() == other.sources.len()
            && self.sources.iter().zip(&other.sources).all(|(a, b)| {
                a.id() == b.id()
                    && a.label() == b.label()
                    && a.color() == b.color()
                    && a.is_visible() == b.is_visible()
                    && same_bits(a.components(), b.components())
            })
    }
}

/// Keeps the derived vectors consistent with the sources and the matrix.
///
/// The coordinator owns the derived collection and the last applied
/// fingerprint. A sync with inputs equal to that fingerprint is a no-op, so
/// a caller reacting to derived changes cannot loop.
#[derive(Debug, Clone)]
pub struct SyncCoordinator {
    enabled: bool,
    state: SyncState,
    last_applied: Option<Fingerprint>,
    derived: Vec<DerivedVector>,
    incompatible: Vec<IncompatibleVector>,
    recompute_count: u64,
}

impl Default for SyncCoordinator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SyncCoordinator {
    /// Create a coordinator with derived display on or off.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            state: SyncState::Idle,
            last_applied: None,
            derived: Vec::new(),
            incompatible: Vec::new(),
            recompute_count: 0,
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Whether derived display is on.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of recomputes performed so far.
    #[inline]
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// The derived vectors, in source order.
    #[inline]
    pub fn derived(&self) -> &[DerivedVector] {
        &self.derived
    }

    /// The derived vector of a given source, if any.
    pub fn derived_for(&self, id: VectorId) -> Option<&DerivedVector> {
        self.derived.iter().find(|d| d.source_id() == id)
    }

    /// Source vectors skipped by the last recompute.
    #[inline]
    pub fn incompatible(&self) -> &[IncompatibleVector] {
        &self.incompatible
    }

    /// Record that the sources or the matrix changed.
    pub fn mark_dirty(&mut self) {
        if self.state == SyncState::Idle {
            self.state = SyncState::Dirty;
        }
    }

    /// Turn derived display on or off.
    ///
    /// Turning it off clears the derived collection and forgets the last
    /// fingerprint, so turning it back on always recomputes.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            self.mark_dirty();
        } else {
            self.derived.clear();
            self.incompatible.clear();
            self.last_applied = None;
            self.state = SyncState::Idle;
        }
        log::debug!("derived display {}", if enabled { "on" } else { "off" });
    }

    /// Bring the derived vectors up to date with `sources` and `matrix`.
    ///
    /// # Arguments
    ///
    /// * `sources` - The source vectors, in display order.
    /// * `matrix` - The current transformation.
    ///
    /// # Returns
    ///
    /// What the call did: nothing, a recompute, or nothing because derived
    /// display is off.
    pub fn sync(&mut self, sources: &[SourceVector], matrix: &Matrix) -> SyncOutcome {
        debug_assert_ne!(self.state, SyncState::Recomputing);

        if !self.enabled {
            self.state = SyncState::Idle;
            return SyncOutcome::Disabled;
        }

        let fingerprint = Fingerprint::capture(sources, matrix);
        if self.last_applied.as_ref() == Some(&fingerprint) {
            log::debug!("sync skipped, inputs unchanged");
            self.state = SyncState::Idle;
            return SyncOutcome::Unchanged;
        }

        self.state = SyncState::Recomputing;

        let mut derived = Vec::with_capacity(sources.len());
        let mut incompatible = Vec::new();
        for source in sources {
            match transform(matrix, source) {
                Ok(d) => derived.push(d),
                Err(diagnostic) => {
                    log::debug!("skipping incompatible vector: {diagnostic}");
                    incompatible.push(diagnostic);
                }
            }
        }

        self.derived = derived;
        self.incompatible = incompatible;
        self.last_applied = Some(fingerprint);
        self.recompute_count += 1;
        self.state = SyncState::Idle;

        log::debug!(
            "recompute #{}: {} derived, {} incompatible, matrix {}",
            self.recompute_count,
            self.derived.len(),
            self.incompatible.len(),
            matrix.dimension()
        );

        SyncOutcome::Recomputed(SyncReport {
            derived: self.derived.len(),
            incompatible: self.incompatible.clone(),
        })
    }
}
