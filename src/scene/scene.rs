use glam::{Mat4, Vec3};
use slotmap::SlotMap;

use crate::errors::{OrreryError, Result};
use crate::scene::camera::{Camera, CameraDescriptor};
use crate::scene::geometry::Geometry;
use crate::scene::light::{LightDescriptor, PointLight};
use crate::scene::node::Node;
use crate::scene::{CameraKey, GeometryKey, LightKey, NodeHandle};

/// Name given to the root node of every new graph.
pub const ROOT_NAME: &str = "root";

/// Scene graph structure
///
/// A named container owning the node arena and exactly one root node.
/// Nodes that are not reachable from the root (freshly created, detached or
/// removed by name) stay in the arena until [`remove_node`](Self::remove_node)
/// deletes them.
///
/// Component data (geometry, lights, cameras) lives in separate arenas and is
/// referenced from nodes by key.
pub struct SceneGraph {
    name: String,
    root: NodeHandle,

    pub(crate) nodes: SlotMap<NodeHandle, Node>,

    // ==== Component pools ====
    pub(crate) geometries: SlotMap<GeometryKey, Geometry>,
    pub(crate) lights: SlotMap<LightKey, PointLight>,
    pub(crate) cameras: SlotMap<CameraKey, Camera>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new("Scene")
    }
}

impl SceneGraph {
    #[must_use]
    pub fn new(name: &str) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(ROOT_NAME));
        Self {
            name: name.to_string(),
            root,
            nodes,
            geometries: SlotMap::with_key(),
            lights: SlotMap::with_key(),
            cameras: SlotMap::with_key(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Makes an existing node the root. A parented node is detached first;
    /// the previous root stays in the arena as a detached node.
    pub fn set_root(&mut self, handle: NodeHandle) -> Result<()> {
        if !self.nodes.contains_key(handle) {
            return Err(OrreryError::NodeNotFound(handle));
        }
        self.detach(handle)?;
        log::debug!("Scene '{}': root replaced by {:?}", self.name, handle);
        self.root = handle;
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    /// 获取只读引用
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    /// 获取可变引用 (用于修改变换)
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    // ========================================================================
    // Node creation
    // ========================================================================

    /// Creates a detached node (no parent, not reachable from the root).
    pub fn create_node(&mut self, name: &str) -> NodeHandle {
        self.nodes.insert(Node::new(name))
    }

    /// Inserts a node under the root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let root = self.root;
        let handle = self.nodes.insert(node);
        self.link(handle, root);
        handle
    }

    /// Inserts a node under `parent`.
    pub fn add_to_parent(&mut self, node: Node, parent: NodeHandle) -> Result<NodeHandle> {
        if !self.nodes.contains_key(parent) {
            return Err(OrreryError::NodeNotFound(parent));
        }
        let handle = self.nodes.insert(node);
        self.link(handle, parent);
        Ok(handle)
    }

    /// Starts building a node.
    pub fn build_node(&mut self, name: &str) -> NodeBuilder<'_> {
        NodeBuilder::new(self, name)
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Establishes a parent/child relationship in one step.
    ///
    /// The child leaves its previous parent, is appended to `parent`'s
    /// children, and depth/path are recomputed for the whole moved subtree.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) -> Result<()> {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return Err(OrreryError::AttachToSelf(child));
        }
        if !self.nodes.contains_key(child) {
            return Err(OrreryError::NodeNotFound(child));
        }
        if !self.nodes.contains_key(parent) {
            return Err(OrreryError::NodeNotFound(parent));
        }

        self.unlink_from_parent(child);
        self.link(child, parent);
        Ok(())
    }

    /// Clears both sides of the child's parent link. The node becomes a
    /// detached root (depth 0, empty path) together with its subtree.
    pub fn detach(&mut self, child: NodeHandle) -> Result<()> {
        if !self.nodes.contains_key(child) {
            return Err(OrreryError::NodeNotFound(child));
        }
        self.unlink_from_parent(child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.clear_structure();
        }
        self.refresh_descendants(child);
        Ok(())
    }

    /// Appends `child` to `parent`'s child list without touching the child's
    /// parent, depth or path.
    ///
    /// Low-level construction step; [`attach`](Self::attach) keeps both
    /// sides in sync and should be preferred.
    pub fn push_child(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<()> {
        if !self.nodes.contains_key(child) {
            return Err(OrreryError::NodeNotFound(child));
        }
        let node = self
            .nodes
            .get_mut(parent)
            .ok_or(OrreryError::NodeNotFound(parent))?;
        node.push_child(child);
        Ok(())
    }

    /// First child of `parent` named `name`.
    #[must_use]
    pub fn get_child(&self, parent: NodeHandle, name: &str) -> Option<NodeHandle> {
        let node = self.nodes.get(parent)?;
        node.children
            .iter()
            .copied()
            .find(|&c| self.nodes.get(c).is_some_and(|n| n.name == name))
    }

    /// Unlinks the first child of `parent` named `name` and returns it.
    ///
    /// The removed subtree stays in the arena as a detached node; its parent
    /// link is cleared so it no longer reports its former parent.
    pub fn remove_child(&mut self, parent: NodeHandle, name: &str) -> Option<NodeHandle> {
        let child = self.get_child(parent, name)?;
        if let Some(p) = self.nodes.get_mut(parent)
            && let Some(pos) = p.children.iter().position(|&c| c == child)
        {
            p.children.remove(pos);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
            node.clear_structure();
        }
        self.refresh_descendants(child);
        Some(child)
    }

    /// Deletes a node, its whole subtree and their components from the arena.
    ///
    /// Returns false if the handle is stale or refers to the root.
    pub fn remove_node(&mut self, handle: NodeHandle) -> bool {
        if handle == self.root {
            log::warn!("Refusing to remove the root node of scene '{}'", self.name);
            return false;
        }
        if !self.nodes.contains_key(handle) {
            return false;
        }

        self.unlink_from_parent(handle);

        let mut stack = vec![handle];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.remove(current) else {
                continue;
            };
            stack.extend_from_slice(&node.children);

            if let Some(key) = node.geometry {
                self.geometries.remove(key);
            }
            if let Some(key) = node.light {
                self.lights.remove(key);
            }
            if let Some(key) = node.camera {
                self.cameras.remove(key);
            }
        }
        true
    }

    // ========================================================================
    // Transforms
    // ========================================================================

    /// Absolute placement of a node.
    ///
    /// A node with a parent resolves to `world(parent) * local`; a node
    /// without one resolves to its stored global transform. Nothing is
    /// cached: every call walks the ancestor chain, so the result always
    /// reflects the latest local transforms.
    #[must_use]
    pub fn world_transform(&self, handle: NodeHandle) -> Option<Mat4> {
        let node = self.nodes.get(handle)?;
        match node.parent {
            Some(parent) => Some(self.world_transform(parent)? * node.local_transform),
            None => Some(node.global_transform),
        }
    }

    /// World transform applied to the local origin.
    #[must_use]
    pub fn world_position(&self, handle: NodeHandle) -> Option<Vec3> {
        self.world_transform(handle)
            .map(|m| m.transform_point3(Vec3::ZERO))
    }

    #[must_use]
    pub fn local_transform(&self, handle: NodeHandle) -> Option<Mat4> {
        self.nodes.get(handle).map(|n| n.local_transform)
    }

    pub fn set_local_transform(&mut self, handle: NodeHandle, transform: Mat4) -> Result<()> {
        self.node_mut_or_err(handle)?.set_local_transform(transform);
        Ok(())
    }

    pub fn set_world_transform(&mut self, handle: NodeHandle, transform: Mat4) -> Result<()> {
        self.node_mut_or_err(handle)?.set_world_transform(transform);
        Ok(())
    }

    /// `local = delta * local` on the given node.
    pub fn pre_multiply_local(&mut self, handle: NodeHandle, delta: Mat4) -> Result<()> {
        self.node_mut_or_err(handle)?.pre_multiply_local(delta);
        Ok(())
    }

    // ========================================================================
    // Components
    // ========================================================================

    /// Attaches geometry to a node, replacing any previous geometry.
    pub fn set_geometry(&mut self, handle: NodeHandle, geometry: Geometry) -> Result<GeometryKey> {
        let previous = self.node_mut_or_err(handle)?.geometry.take();
        if let Some(key) = previous {
            self.geometries.remove(key);
        }
        let key = self.geometries.insert(geometry);
        self.node_mut_or_err(handle)?.geometry = Some(key);
        Ok(key)
    }

    #[must_use]
    pub fn geometry(&self, handle: NodeHandle) -> Option<&Geometry> {
        let key = self.nodes.get(handle)?.geometry?;
        self.geometries.get(key)
    }

    pub fn geometry_mut(&mut self, handle: NodeHandle) -> Option<&mut Geometry> {
        let key = self.nodes.get(handle)?.geometry?;
        self.geometries.get_mut(key)
    }

    /// Attaches a point light to a node, replacing any previous light.
    pub fn set_light(&mut self, handle: NodeHandle, light: PointLight) -> Result<LightKey> {
        let previous = self.node_mut_or_err(handle)?.light.take();
        if let Some(key) = previous {
            self.lights.remove(key);
        }
        let key = self.lights.insert(light);
        self.node_mut_or_err(handle)?.light = Some(key);
        Ok(key)
    }

    #[must_use]
    pub fn light(&self, handle: NodeHandle) -> Option<&PointLight> {
        let key = self.nodes.get(handle)?.light?;
        self.lights.get(key)
    }

    pub fn light_mut(&mut self, handle: NodeHandle) -> Option<&mut PointLight> {
        let key = self.nodes.get(handle)?.light?;
        self.lights.get_mut(key)
    }

    /// World position, color and intensity of a light node.
    #[must_use]
    pub fn light_descriptor(&self, handle: NodeHandle) -> Option<LightDescriptor> {
        let light = self.light(handle)?;
        Some(LightDescriptor {
            position: self.world_position(handle)?,
            color: light.color,
            intensity: light.intensity(),
        })
    }

    /// Attaches a camera to a node, replacing any previous camera.
    pub fn set_camera(&mut self, handle: NodeHandle, camera: Camera) -> Result<CameraKey> {
        let previous = self.node_mut_or_err(handle)?.camera.take();
        if let Some(key) = previous {
            self.cameras.remove(key);
        }
        let key = self.cameras.insert(camera);
        self.node_mut_or_err(handle)?.camera = Some(key);
        Ok(key)
    }

    #[must_use]
    pub fn camera(&self, handle: NodeHandle) -> Option<&Camera> {
        let key = self.nodes.get(handle)?.camera?;
        self.cameras.get(key)
    }

    pub fn camera_mut(&mut self, handle: NodeHandle) -> Option<&mut Camera> {
        let key = self.nodes.get(handle)?.camera?;
        self.cameras.get_mut(key)
    }

    /// View and projection of an enabled camera node.
    #[must_use]
    pub fn camera_descriptor(&self, handle: NodeHandle) -> Option<CameraDescriptor> {
        let camera = self.camera(handle)?;
        if !camera.is_enabled() {
            return None;
        }
        Some(CameraDescriptor {
            view: self.world_transform(handle)?.inverse(),
            projection: camera.projection_matrix(),
        })
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn node_mut_or_err(&mut self, handle: NodeHandle) -> Result<&mut Node> {
        self.nodes
            .get_mut(handle)
            .ok_or(OrreryError::NodeNotFound(handle))
    }

    /// Removes `child` from its current parent's child list and clears its
    /// parent link. Structure metadata is left to the caller.
    fn unlink_from_parent(&mut self, child: NodeHandle) {
        let old_parent = self.nodes.get_mut(child).and_then(|n| n.parent.take());
        if let Some(p) = old_parent
            && let Some(n) = self.nodes.get_mut(p)
            && let Some(i) = n.children.iter().position(|&x| x == child)
        {
            n.children.remove(i);
        }
    }

    /// Links an unparented node under `parent` and refreshes the subtree.
    /// Both handles must be live.
    fn link(&mut self, child: NodeHandle, parent: NodeHandle) {
        let Some(p) = self.nodes.get_mut(parent) else {
            return;
        };
        p.children.push(child);

        let Some([p, c]) = self.nodes.get_disjoint_mut([parent, child]) else {
            return;
        };
        c.parent = Some(parent);
        c.inherit_structure(p);
        self.refresh_descendants(child);
    }

    /// Recomputes depth and path for every descendant of `handle`, whose own
    /// structure must already be correct.
    fn refresh_descendants(&mut self, handle: NodeHandle) {
        let mut stack = vec![handle];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            let children = node.children.clone();
            for child in children {
                if let Some([p, c]) = self.nodes.get_disjoint_mut([current, child]) {
                    c.inherit_structure(p);
                    stack.push(child);
                }
            }
        }
    }
}

pub struct NodeBuilder<'a> {
    scene: &'a mut SceneGraph,
    node: Node,
    parent: Option<NodeHandle>,
    geometry: Option<Geometry>,
    light: Option<PointLight>,
    camera: Option<Camera>,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(scene: &'a mut SceneGraph, name: &str) -> Self {
        Self {
            scene,
            node: Node::new(name),
            parent: None,
            geometry: None,
            light: None,
            camera: None,
        }
    }

    // === 链式配置方法 ===

    #[must_use]
    pub fn with_local_transform(mut self, transform: Mat4) -> Self {
        self.node.local_transform = transform;
        self
    }

    /// Pre-multiplies a translation onto the local transform.
    #[must_use]
    pub fn with_translation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.node
            .pre_multiply_local(Mat4::from_translation(Vec3::new(x, y, z)));
        self
    }

    /// Pre-multiplies a rotation about +Y onto the local transform.
    #[must_use]
    pub fn with_rotation_y(mut self, angle: f32) -> Self {
        self.node.pre_multiply_local(Mat4::from_rotation_y(angle));
        self
    }

    /// Pre-multiplies a uniform scale onto the local transform.
    #[must_use]
    pub fn with_scale(mut self, s: f32) -> Self {
        self.node.pre_multiply_local(Mat4::from_scale(Vec3::splat(s)));
        self
    }

    /// 设置父节点
    #[must_use]
    pub fn with_parent(mut self, parent: NodeHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    #[must_use]
    pub fn with_light(mut self, light: PointLight) -> Self {
        self.light = Some(light);
        self
    }

    #[must_use]
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    // === 终结方法 ===

    /// Inserts the node (under the root unless a parent was given) and
    /// returns its handle.
    pub fn build(self) -> Result<NodeHandle> {
        let parent = self.parent.unwrap_or(self.scene.root);
        let handle = self.scene.add_to_parent(self.node, parent)?;

        if let Some(geometry) = self.geometry {
            self.scene.set_geometry(handle, geometry)?;
        }
        if let Some(light) = self.light {
            self.scene.set_light(handle, light)?;
        }
        if let Some(camera) = self.camera {
            self.scene.set_camera(handle, camera)?;
        }

        Ok(handle)
    }
}
