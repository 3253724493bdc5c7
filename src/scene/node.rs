use glam::Mat4;

use crate::scene::{CameraKey, GeometryKey, LightKey, NodeHandle};

/// Separator used when rendering a node path as a single string.
pub const PATH_SEPARATOR: &str = ".";

/// A scene node: one element of the transform hierarchy.
///
/// # Hierarchy
///
/// Nodes live in the [`SceneGraph`](crate::scene::SceneGraph) arena and refer
/// to each other by [`NodeHandle`]:
/// - `parent`: non-owning handle to the parent (None for the root and for
///   detached nodes)
/// - `children`: child handles in insertion order; names need not be unique
///
/// # Structure metadata
///
/// `depth` and `path` describe the node's position in the tree. They are
/// written by the graph whenever the node (or one of its ancestors) is given
/// a new parent, so they always reflect the current hierarchy.
///
/// # Transform
///
/// - `local_transform`: placement relative to the parent's frame
/// - `global_transform`: absolute placement, used only while the node has no
///   parent
#[derive(Debug, Clone)]
pub struct Node {
    // === Identity & Structure ===
    pub(crate) name: String,
    pub(crate) depth: usize,
    pub(crate) path: Vec<String>,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    // === Core Spatial Data ===
    pub(crate) local_transform: Mat4,
    pub(crate) global_transform: Mat4,

    // === Components ===
    pub(crate) geometry: Option<GeometryKey>,
    pub(crate) light: Option<LightKey>,
    pub(crate) camera: Option<CameraKey>,
}

impl Node {
    /// Creates a detached node with identity transforms.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            depth: 0,
            path: Vec::new(),
            parent: None,
            children: Vec::new(),
            local_transform: Mat4::IDENTITY,
            global_transform: Mat4::IDENTITY,
            geometry: None,
            light: None,
            camera: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the node. Paths already recorded on descendants keep the old
    /// name until the subtree is re-attached.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Distance, in parent hops, from the root.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Ancestor names from the root down to this node (empty for a root).
    #[inline]
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The path joined with [`PATH_SEPARATOR`].
    #[must_use]
    pub fn path_string(&self) -> String {
        self.path.join(PATH_SEPARATOR)
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns a read-only slice of child node handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Appends a child handle without touching the child's parent, depth or
    /// path. Prefer [`SceneGraph::attach`](crate::scene::SceneGraph::attach),
    /// which keeps both sides in sync.
    #[inline]
    pub fn push_child(&mut self, child: NodeHandle) {
        self.children.push(child);
    }

    #[inline]
    #[must_use]
    pub fn local_transform(&self) -> &Mat4 {
        &self.local_transform
    }

    /// Replaces the local transform. Any matrix is accepted.
    #[inline]
    pub fn set_local_transform(&mut self, transform: Mat4) {
        self.local_transform = transform;
    }

    /// Pre-multiplies the local transform: `local = delta * local`.
    #[inline]
    pub fn pre_multiply_local(&mut self, delta: Mat4) {
        self.local_transform = delta * self.local_transform;
    }

    /// The stored absolute placement, meaningful only while the node has no
    /// parent.
    #[inline]
    #[must_use]
    pub fn global_transform(&self) -> &Mat4 {
        &self.global_transform
    }

    /// Replaces the stored absolute placement. Any matrix is accepted.
    #[inline]
    pub fn set_world_transform(&mut self, transform: Mat4) {
        self.global_transform = transform;
    }

    #[inline]
    #[must_use]
    pub fn geometry_key(&self) -> Option<GeometryKey> {
        self.geometry
    }

    #[inline]
    #[must_use]
    pub fn light_key(&self) -> Option<LightKey> {
        self.light
    }

    #[inline]
    #[must_use]
    pub fn camera_key(&self) -> Option<CameraKey> {
        self.camera
    }

    /// Recomputes depth and path for a node whose parent is `parent`.
    ///
    /// A parent with an empty path is a root (or detached), so its own name
    /// starts the path.
    pub(crate) fn inherit_structure(&mut self, parent: &Node) {
        self.depth = parent.depth + 1;
        self.path.clear();
        if parent.path.is_empty() {
            self.path.push(parent.name.clone());
        } else {
            self.path.extend(parent.path.iter().cloned());
        }
        self.path.push(self.name.clone());
    }

    /// Resets depth and path to those of a root.
    pub(crate) fn clear_structure(&mut self) {
        self.depth = 0;
        self.path.clear();
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("node")
    }
}
