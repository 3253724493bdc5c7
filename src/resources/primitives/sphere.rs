use glam::Vec3;
use std::f32::consts::PI;

use crate::resources::mesh::MeshData;

/// Upper bound for either segment count.
pub const MAX_SPHERE_SEGMENTS: u32 = 512;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereOptions {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 32,
            height_segments: 16,
        }
    }
}

/// Builds a UV sphere centred on the origin.
///
/// Segment counts are clamped to `3..=MAX_SPHERE_SEGMENTS` around and
/// `2..=MAX_SPHERE_SEGMENTS` from pole to pole.
pub fn create_sphere(options: &SphereOptions) -> MeshData {
    let radius = options.radius;
    let width_segments = options.width_segments.clamp(3, MAX_SPHERE_SEGMENTS);
    let height_segments = options.height_segments.clamp(2, MAX_SPHERE_SEGMENTS);
    if width_segments != options.width_segments || height_segments != options.height_segments {
        log::warn!(
            "Sphere segments {}x{} clamped to {}x{}",
            options.width_segments,
            options.height_segments,
            width_segments,
            height_segments
        );
    }

    let vertex_count = ((width_segments + 1) * (height_segments + 1)) as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity((width_segments * height_segments * 6) as usize);

    for y in 0..=height_segments {
        let v_ratio = y as f32 / height_segments as f32;
        // Latitude: 0 at the south pole, PI at the north pole
        let theta = v_ratio * PI;

        let py = -radius * theta.cos();
        let ring_radius = radius * theta.sin();

        for x in 0..=width_segments {
            let u_ratio = x as f32 / width_segments as f32;
            let phi = u_ratio * 2.0 * PI;

            let position = Vec3::new(-ring_radius * phi.cos(), py, ring_radius * phi.sin());
            positions.push(position);
            normals.push(position.normalize_or_zero());
        }
    }

    // Two triangles per grid cell; the pole rows produce degenerate triangles
    let stride = width_segments + 1;
    for y in 0..height_segments {
        for x in 0..width_segments {
            let v0 = y * stride + x;
            let v1 = v0 + 1;
            let v2 = (y + 1) * stride + x;
            let v3 = v2 + 1;

            indices.extend_from_slice(&[v0, v1, v2]);
            indices.extend_from_slice(&[v1, v3, v2]);
        }
    }

    MeshData::new("sphere", positions, normals, indices)
}
