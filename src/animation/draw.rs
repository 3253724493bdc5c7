use glam::{Mat4, Vec3};
use std::sync::Arc;

use crate::resources::MeshData;
use crate::scene::NodeHandle;

/// One body to draw this frame.
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub node: NodeHandle,
    /// World transform of the geometry node.
    pub model: Mat4,
    pub color: Vec3,
    pub mesh: Arc<MeshData>,
}

impl DrawItem {
    /// Matrix for transforming normals into view space:
    /// `inverse(view * model)` transposed.
    #[must_use]
    pub fn normal_matrix(&self, view: Mat4) -> Mat4 {
        (view * self.model).inverse().transpose()
    }
}

/// Receives draw items in registry order.
pub trait DrawSink {
    fn draw(&mut self, item: DrawItem);
}

impl DrawSink for Vec<DrawItem> {
    fn draw(&mut self, item: DrawItem) {
        self.push(item);
    }
}

/// Discards every item; used when only the mutation is wanted.
impl DrawSink for () {
    fn draw(&mut self, _item: DrawItem) {}
}
