//! Runtime configuration
//!
//! [`OrreryConfig`] gathers everything needed to start an [`Orrery`](crate::Orrery):
//! the animation settings, the scene description and the detail of the
//! shared sphere mesh. Every field has a default, so a config file only needs
//! to list what it changes.
//!
//! ```rust,ignore
//! use orrery::OrreryConfig;
//!
//! // Built-in solar system with default speeds
//! let config = OrreryConfig::default();
//!
//! // Or from JSON
//! let config = OrreryConfig::from_json_str(r#"{ "animation": { "mode": "phased" } }"#)?;
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::animation::AnimationSettings;
use crate::errors::Result;
use crate::resources::SphereOptions;
use crate::scene::SceneDescription;

/// Tessellation of the sphere every body is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshDetail {
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for MeshDetail {
    fn default() -> Self {
        let options = SphereOptions::default();
        Self {
            width_segments: options.width_segments,
            height_segments: options.height_segments,
        }
    }
}

impl MeshDetail {
    #[must_use]
    pub fn sphere_options(&self) -> SphereOptions {
        SphereOptions {
            radius: 1.0,
            width_segments: self.width_segments,
            height_segments: self.height_segments,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    pub animation: AnimationSettings,
    pub scene: SceneDescription,
    pub mesh: MeshDetail,
}

impl OrreryConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
