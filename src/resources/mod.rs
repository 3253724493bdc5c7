//! Shared resource definitions
//!
//! CPU-side data shared read-only by many scene nodes:
//! - MeshData: positions, normals and triangle indices prepared once at load time
//! - primitives: procedural meshes (the sphere every body is drawn with)

pub mod mesh;
pub mod primitives;

pub use mesh::MeshData;
pub use primitives::{MAX_SPHERE_SEGMENTS, SphereOptions, create_sphere};
