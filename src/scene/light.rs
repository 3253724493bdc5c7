use glam::Vec3;

/// Emission attributes of a point light node.
///
/// The light's position is not stored here: it is the world transform of the
/// owning node applied to the local origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub color: Vec3,
    intensity: f32,
}

impl PointLight {
    #[must_use]
    pub fn new(color: Vec3, intensity: f32) -> Self {
        let mut light = Self {
            color,
            intensity: 0.0,
        };
        light.set_intensity(intensity);
        light
    }

    #[inline]
    #[must_use]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Sets the intensity; negative values are clamped to zero.
    pub fn set_intensity(&mut self, intensity: f32) {
        if intensity < 0.0 {
            log::warn!("Negative light intensity {intensity} clamped to 0");
        }
        self.intensity = intensity.max(0.0);
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vec3::ONE, 1.0)
    }
}

/// Per-frame light data handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightDescriptor {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}
