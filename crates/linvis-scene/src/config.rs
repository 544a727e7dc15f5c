use linvis_algebra::Dimension;
use serde::{Deserialize, Serialize};

use crate::Color;

/// Colours handed out to new vectors, in order.
pub const DEFAULT_PALETTE: [Color; 6] = [
    Color::new(0x1f, 0x77, 0xb4),
    Color::new(0xff, 0x7f, 0x0e),
    Color::new(0x2c, 0xa0, 0x2c),
    Color::new(0xd6, 0x27, 0x28),
    Color::new(0x94, 0x67, 0xbd),
    Color::new(0x8c, 0x56, 0x4b),
];

/// Parameters for [`crate::Scene::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Whether derived vectors are computed and shown.
    pub show_derived: bool,
    /// Shape of the initial matrix, filled from the identity.
    pub dimension: Dimension,
    /// Colours cycled through by newly added vectors.
    pub palette: Vec<Color>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            show_derived: true,
            dimension: Dimension::D3X3,
            palette: DEFAULT_PALETTE.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_partial_json() -> Result<(), Box<dyn std::error::Error>> {
        let config: SceneConfig = serde_json::from_str(r#"{"dimension": "2x3"}"#)?;
        assert_eq!(config.dimension, Dimension::new(2, 3)?);
        assert!(config.show_derived);
        assert_eq!(config.palette.len(), 6);

        let config: SceneConfig =
            serde_json::from_str(r##"{"show_derived": false, "palette": ["#000000"]}"##)?;
        assert!(!config.show_derived);
        assert_eq!(config.palette, vec![Color::new(0, 0, 0)]);

        assert!(serde_json::from_str::<SceneConfig>(r#"{"dimension": "4x4"}"#).is_err());
        Ok(())
    }
}
