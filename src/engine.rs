//! Runtime Module
//!
//! [`Orrery`] ties the pieces together: it builds the scene graph from an
//! [`OrreryConfig`], registers every geometry node with the
//! [`OrbitAnimator`], and produces one [`Frame`] per call to
//! [`Orrery::update`]. It owns no window or GPU state, so any frontend can
//! drive it and consume the frames.
//!
//! # Example
//!
//! ```rust,ignore
//! use orrery::{Orrery, OrreryConfig};
//!
//! let mut orrery = Orrery::new(&OrreryConfig::default())?;
//! loop {
//!     let frame = orrery.update();
//!     let view = frame.camera.map(|c| c.view).unwrap_or_default();
//!     for item in &frame.draws {
//!         // upload item.model, item.normal_matrix(view), item.color; draw item.mesh
//!     }
//! }
//! ```

use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::animation::{DrawItem, OrbitAnimator};
use crate::config::OrreryConfig;
use crate::errors::{OrreryError, Result};
use crate::resources::{MeshData, create_sphere};
use crate::scene::{BuiltScene, CameraDescriptor, LightDescriptor, NodeHandle, SceneGraph};
use crate::utils::Timer;

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame number, starting at 1 for the first update.
    pub index: u64,
    pub draws: Vec<DrawItem>,
    pub lights: Vec<LightDescriptor>,
    pub camera: Option<CameraDescriptor>,
}

/// The animated solar system.
///
/// # Lifecycle
///
/// 1. Create with [`Orrery::new`] from a config
/// 2. Call [`Orrery::update`] once per frame
/// 3. Forward input with [`Orrery::translate_camera`] and [`Orrery::resize`]
pub struct Orrery {
    pub scene: SceneGraph,
    pub animator: OrbitAnimator,

    mesh: Arc<MeshData>,
    lights: Vec<NodeHandle>,
    cameras: Vec<NodeHandle>,
    active_camera: Option<NodeHandle>,
    names: FxHashMap<String, NodeHandle>,
    timer: Timer,
}

impl Orrery {
    pub fn new(config: &OrreryConfig) -> Result<Self> {
        let mesh = Arc::new(create_sphere(&config.mesh.sphere_options()));
        let built = config.scene.build(Arc::clone(&mesh))?;

        let mut animator = OrbitAnimator::new(config.animation.clone());
        animator.register_all(&built.graph, &built.geometry_nodes)?;

        let names = built.names().clone();
        let BuiltScene {
            graph,
            light_nodes,
            camera_nodes,
            ..
        } = built;

        log::info!(
            "Orrery '{}' ready: {} bodies, {} lights, {} cameras, {:?} mode",
            graph.name(),
            animator.len(),
            light_nodes.len(),
            camera_nodes.len(),
            animator.mode()
        );

        Ok(Self {
            scene: graph,
            animator,
            mesh,
            lights: light_nodes,
            active_camera: camera_nodes.first().copied(),
            cameras: camera_nodes,
            names,
            timer: Timer::new(),
        })
    }

    /// Advances the animation one frame and collects what to draw.
    pub fn update(&mut self) -> Frame {
        let mut draws = Vec::with_capacity(self.animator.len());
        self.animator.step(&mut self.scene, &mut draws);
        self.timer.tick();

        if self.timer.frame_count % 1000 == 0 {
            log::debug!(
                "Frame {}: {:.1} fps average",
                self.animator.frame(),
                self.timer.average_fps()
            );
        }

        Frame {
            index: self.animator.frame(),
            draws,
            lights: self.light_descriptors(),
            camera: self.camera_descriptor(),
        }
    }

    /// Handle of a body by name (the root is `"root"`).
    #[must_use]
    pub fn handle(&self, name: &str) -> Option<NodeHandle> {
        self.names.get(name).copied()
    }

    /// The sphere mesh shared by every body.
    #[must_use]
    pub fn mesh(&self) -> &Arc<MeshData> {
        &self.mesh
    }

    #[must_use]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    #[must_use]
    pub fn light_descriptors(&self) -> Vec<LightDescriptor> {
        self.lights
            .iter()
            .filter_map(|&h| self.scene.light_descriptor(h))
            .collect()
    }

    #[must_use]
    pub fn camera_descriptor(&self) -> Option<CameraDescriptor> {
        self.scene.camera_descriptor(self.active_camera?)
    }

    #[must_use]
    pub fn active_camera(&self) -> Option<NodeHandle> {
        self.active_camera
    }

    /// Cameras defined by the scene description, in order.
    #[must_use]
    pub fn cameras(&self) -> &[NodeHandle] {
        &self.cameras
    }

    pub fn set_active_camera(&mut self, handle: NodeHandle) -> Result<()> {
        if self.scene.camera(handle).is_none() {
            return Err(OrreryError::NodeNotFound(handle));
        }
        self.active_camera = Some(handle);
        Ok(())
    }

    /// Moves the active camera along its own axes.
    pub fn translate_camera(&mut self, offset: Vec3) {
        let Some(node) = self.active_camera.and_then(|h| self.scene.get_node_mut(h)) else {
            return;
        };
        let local = *node.local_transform() * Mat4::from_translation(offset);
        node.set_local_transform(local);
    }

    /// Recomputes the active camera's projection for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let aspect = width as f32 / height as f32;
        if let Some(camera) = self.active_camera.and_then(|h| self.scene.camera_mut(h)) {
            camera.set_aspect(aspect);
        }
    }
}
