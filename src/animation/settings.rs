use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How per-frame rotation is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationMode {
    /// Each frame's delta is multiplied into the stored local transforms.
    /// Order dependent; the state at frame `k` can only be reached by
    /// replaying every frame before it.
    #[default]
    Incremental,
    /// Each animated node keeps one wrapped phase plus the transform it had
    /// at registration; local transforms are rebuilt from them every frame.
    /// Supports seek and reset.
    Phased,
}

/// Which orbital step a body's holder uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinClass {
    Planet,
    Moon,
}

/// Animation configuration.
///
/// Defaults reproduce the reference solar system: planets revolve by
/// 0.001 rad per frame, moons by 0.005, and every body spins by 0.009.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Orbital step (radians per frame) for non-moon bodies.
    pub planet_orbit_step: f32,
    /// Orbital step (radians per frame) for moons.
    pub moon_orbit_step: f32,
    /// Axial spin step (radians per frame) for every body.
    pub spin_step: f32,
    /// Rotation axis shared by orbit and spin.
    pub axis: [f32; 3],
    /// Name substring identifying a moon.
    pub moon_marker: String,
    pub mode: AnimationMode,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            planet_orbit_step: 0.001,
            moon_orbit_step: 0.005,
            spin_step: 0.009,
            axis: [0.0, 1.0, 0.0],
            moon_marker: "moon".to_string(),
            mode: AnimationMode::Incremental,
        }
    }
}

impl AnimationSettings {
    /// Normalized rotation axis; a degenerate axis falls back to +Y.
    #[must_use]
    pub fn axis(&self) -> Vec3 {
        Vec3::from_array(self.axis).try_normalize().unwrap_or_else(|| {
            log::warn!("Degenerate animation axis {:?}, using +Y", self.axis);
            Vec3::Y
        })
    }

    #[must_use]
    pub fn classify(&self, name: &str) -> SpinClass {
        if !self.moon_marker.is_empty() && name.contains(self.moon_marker.as_str()) {
            SpinClass::Moon
        } else {
            SpinClass::Planet
        }
    }

    #[must_use]
    pub fn orbit_step(&self, class: SpinClass) -> f32 {
        match class {
            SpinClass::Planet => self.planet_orbit_step,
            SpinClass::Moon => self.moon_orbit_step,
        }
    }
}
