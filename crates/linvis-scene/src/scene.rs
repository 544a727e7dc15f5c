use linvis_algebra::{analyze, ops, Dimension, Matrix, MatrixAnalysis};

use crate::{
    Color, DerivedVector, IncompatibleVector, SceneConfig, SceneError, SourceVector,
    SyncCoordinator, SyncOutcome, VectorId,
};

/// One transformation matrix, the user's vectors and their images.
///
/// Every mutation marks the sync coordinator dirty and synchronises before
/// returning, so queries always see derived vectors matching the current
/// inputs.
#[derive(Debug, Clone)]
pub struct Scene {
    config: SceneConfig,
    matrix: Matrix,
    sources: Vec<SourceVector>,
    next_id: u64,
    coordinator: SyncCoordinator,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl Scene {
    /// Create an empty scene with an identity-filled matrix.
    pub fn new(config: SceneConfig) -> Self {
        Self {
            matrix: Matrix::eye(config.dimension),
            coordinator: SyncCoordinator::new(config.show_derived),
            sources: Vec::new(),
            next_id: 1,
            config,
        }
    }

    /// The current matrix.
    #[inline]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// The source vectors, in insertion order.
    #[inline]
    pub fn source_vectors(&self) -> &[SourceVector] {
        &self.sources
    }

    /// Look up a source vector.
    pub fn source_vector(&self, id: VectorId) -> Option<&SourceVector> {
        self.sources.iter().find(|v| v.id() == id)
    }

    /// The derived vectors, empty when derived display is off.
    #[inline]
    pub fn derived_vectors(&self) -> &[DerivedVector] {
        self.coordinator.derived()
    }

    /// The derived vector of a source, if it is compatible with the matrix.
    pub fn derived_for(&self, id: VectorId) -> Option<&DerivedVector> {
        self.coordinator.derived_for(id)
    }

    /// Source vectors whose length does not match the matrix column count.
    #[inline]
    pub fn incompatible(&self) -> &[IncompatibleVector] {
        self.coordinator.incompatible()
    }

    /// Whether derived vectors are shown.
    #[inline]
    pub fn show_derived(&self) -> bool {
        self.coordinator.is_enabled()
    }

    /// Read access to the sync coordinator.
    #[inline]
    pub fn coordinator(&self) -> &SyncCoordinator {
        &self.coordinator
    }

    /// Analysis of the current matrix.
    pub fn analysis(&self) -> MatrixAnalysis {
        analyze(&self.matrix)
    }

    /// Add a visible source vector labelled `v<n>` with the next palette colour.
    pub fn add_source_vector(&mut self, components: Vec<f64>) -> Result<VectorId, SceneError> {
        let id = VectorId(self.next_id);
        let palette = &self.config.palette;
        let color = if palette.is_empty() {
            Color::default()
        } else {
            palette[self.sources.len() % palette.len()]
        };
        let vector = SourceVector::new(id, components, format!("v{}", id.0), color)?;

        self.next_id += 1;
        self.sources.push(vector);
        self.resync();
        Ok(id)
    }

    /// Remove a source vector along with its derived vector.
    pub fn remove_source_vector(&mut self, id: VectorId) -> Result<SourceVector, SceneError> {
        let index = self
            .sources
            .iter()
            .position(|v| v.id() == id)
            .ok_or(SceneError::VectorNotFound(id))?;
        let removed = self.sources.remove(index);
        self.resync();
        Ok(removed)
    }

    /// Replace the coordinates of a source vector.
    pub fn update_components(
        &mut self,
        id: VectorId,
        components: Vec<f64>,
    ) -> Result<(), SceneError> {
        self.source_mut(id)?.set_components(components)?;
        self.resync();
        Ok(())
    }

    /// Rename a source vector.
    pub fn set_label(&mut self, id: VectorId, label: impl Into<String>) -> Result<(), SceneError> {
        self.source_mut(id)?.set_label(label);
        self.resync();
        Ok(())
    }

    /// Show or hide a source vector and its derived vector.
    pub fn set_visible(&mut self, id: VectorId, visible: bool) -> Result<(), SceneError> {
        self.source_mut(id)?.set_visible(visible);
        self.resync();
        Ok(())
    }

    /// Recolour a source vector and its derived vector.
    pub fn set_color(&mut self, id: VectorId, color: Color) -> Result<(), SceneError> {
        self.source_mut(id)?.set_color(color);
        self.resync();
        Ok(())
    }

    /// Reshape the matrix, keeping overlapping entries.
    pub fn set_matrix_dimension(&mut self, dimension: Dimension) {
        self.matrix = self.matrix.resized(dimension);
        self.resync();
    }

    /// Set a single matrix entry.
    pub fn set_matrix_value(&mut self, row: usize, col: usize, value: f64) -> Result<(), SceneError> {
        self.matrix = self
            .matrix
            .with_value(row, col, value)
            .ok_or(SceneError::IndexOutOfBounds {
                row,
                col,
                dimension: self.matrix.dimension(),
            })?;
        self.resync();
        Ok(())
    }

    /// Replace the whole matrix.
    pub fn set_matrix(&mut self, matrix: Matrix) {
        self.matrix = matrix;
        self.resync();
    }

    /// Replace the matrix by its transpose.
    pub fn transpose_matrix(&mut self) {
        self.matrix = ops::transpose(&self.matrix);
        self.resync();
    }

    /// Turn derived display on or off.
    pub fn set_derived_display(&mut self, show: bool) {
        self.config.show_derived = show;
        self.coordinator.set_enabled(show);
        self.resync();
    }

    /// Mark the coordinator dirty and synchronise it with the current inputs.
    ///
    /// Calling this without an intervening change returns
    /// [`SyncOutcome::Unchanged`].
    pub fn resync(&mut self) -> SyncOutcome {
        self.coordinator.mark_dirty();
        self.coordinator.sync(&self.sources, &self.matrix)
    }

    fn source_mut(&mut self, id: VectorId) -> Result<&mut SourceVector, SceneError> {
        self.sources
            .iter_mut()
            .find(|v| v.id() == id)
            .ok_or(SceneError::VectorNotFound(id))
    }
}
