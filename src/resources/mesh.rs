use glam::Vec3;

/// Immutable triangle mesh shared between geometry nodes.
///
/// Built once (procedurally or by an external loader) and handed out as
/// `Arc<MeshData>`; nodes never mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshData {
    #[must_use]
    pub fn new(name: &str, positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        if positions.len() != normals.len() {
            log::warn!(
                "Mesh '{}' has {} positions but {} normals",
                name,
                positions.len(),
                normals.len()
            );
        }
        Self {
            name: name.to_string(),
            positions,
            normals,
            indices,
        }
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Radius of the smallest origin-centred sphere enclosing every vertex.
    #[must_use]
    pub fn bounding_radius(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| p.length())
            .fold(0.0, f32::max)
    }
}
