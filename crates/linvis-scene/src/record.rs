use std::fmt;
use std::str::FromStr;

use linvis_algebra::{check_dim, AlgebraError};
use serde::{Deserialize, Serialize};

use crate::SceneError;

/// Identifier of a source vector, unique within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VectorId(pub u64);

impl fmt::Display for VectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An opaque RGB colour, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White.
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SceneError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = SceneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// A vector entered and edited by the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceVector {
    id: VectorId,
    components: Vec<f64>,
    label: String,
    color: Color,
    visible: bool,
}

impl SourceVector {
    /// Create a visible source vector with 2 or 3 components.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifier, unique within the owning scene.
    /// * `components` - The coordinates of the vector.
    /// * `label` - Display label.
    /// * `color` - Display colour.
    pub fn new(
        id: VectorId,
        components: Vec<f64>,
        label: impl Into<String>,
        color: Color,
    ) -> Result<Self, AlgebraError> {
        check_dim(components.len())?;
        Ok(Self {
            id,
            components,
            label: label.into(),
            color,
            visible: true,
        })
    }

    /// The identifier of the vector.
    #[inline]
    pub fn id(&self) -> VectorId {
        self.id
    }

    /// The coordinates of the vector.
    #[inline]
    pub fn components(&self) -> &[f64] {
        &self.components
    }

    /// Number of components.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.components.len()
    }

    /// Display label.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Display colour.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether the vector is drawn.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Replace the coordinates, keeping the component count within 2..=3.
    pub fn set_components(&mut self, components: Vec<f64>) -> Result<(), AlgebraError> {
        check_dim(components.len())?;
        self.components = components;
        Ok(())
    }

    /// Replace the display label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Replace the display colour.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Show or hide the vector.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// The image of a [`SourceVector`] under the current matrix.
///
/// Derived vectors are produced only by the sync coordinator and expose no
/// setters. Every attribute except the components mirrors the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedVector {
    source_id: VectorId,
    components: Vec<f64>,
    label: String,
    color: Color,
    visible: bool,
    derived: bool,
}

impl DerivedVector {
    pub(crate) fn from_source(source: &SourceVector, components: Vec<f64>) -> Self {
        Self {
            source_id: source.id,
            components,
            label: source.label.clone(),
            color: source.color,
            visible: source.visible,
            derived: true,
        }
    }

    /// Id of the source vector this one was computed from.
    #[inline]
    pub fn source_id(&self) -> VectorId {
        self.source_id
    }

    /// The transformed coordinates.
    #[inline]
    pub fn components(&self) -> &[f64] {
        &self.components
    }

    /// Display label, copied from the source.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Display colour, copied from the source.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Visibility, copied from the source.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Always `true`: derived vectors cannot be edited.
    #[inline]
    pub fn is_derived(&self) -> bool {
        self.derived
    }
}
