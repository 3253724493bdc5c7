//! Scene graph module
//!
//! Manages the node hierarchy and the components attached to it:
//! - Node: hierarchy element carrying a local transform, name, depth and path
//! - SceneGraph: named container owning the node arena and exactly one root
//! - Geometry: surface color and shared mesh data for renderable bodies
//! - PointLight: emission color and intensity
//! - Camera: projection matrix and enable/perspective flags
//! - SceneDescription: declarative list of bodies used to build a graph

pub mod camera;
pub mod description;
pub mod geometry;
pub mod light;
pub mod node;
pub mod scene;
pub mod solar;

// 重新导出常用类型
pub use camera::{Camera, CameraDescriptor};
pub use description::{BodyDescription, BodyKind, BuiltScene, SceneDescription, TransformDescription};
pub use geometry::Geometry;
pub use light::{LightDescriptor, PointLight};
pub use node::{Node, PATH_SEPARATOR};
pub use scene::{NodeBuilder, ROOT_NAME, SceneGraph};
pub use solar::solar_system;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct GeometryKey;
    pub struct LightKey;
    pub struct CameraKey;
}
