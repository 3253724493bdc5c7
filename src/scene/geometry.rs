use glam::Vec3;
use std::sync::Arc;

use crate::resources::MeshData;

/// Renderable attributes of a geometry node.
#[derive(Debug, Clone)]
pub struct Geometry {
    color: Vec3,
    mesh: Arc<MeshData>,
}

impl Geometry {
    /// Creates the component. Color channels are clamped to `[0, 1]`.
    #[must_use]
    pub fn new(color: Vec3, mesh: Arc<MeshData>) -> Self {
        Self {
            color: color.clamp(Vec3::ZERO, Vec3::ONE),
            mesh,
        }
    }

    #[inline]
    #[must_use]
    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn set_color(&mut self, color: Vec3) {
        self.color = color.clamp(Vec3::ZERO, Vec3::ONE);
    }

    /// The shared mesh this body is drawn with.
    #[inline]
    #[must_use]
    pub fn mesh(&self) -> &Arc<MeshData> {
        &self.mesh
    }

    pub fn set_mesh(&mut self, mesh: Arc<MeshData>) {
        self.mesh = mesh;
    }
}
