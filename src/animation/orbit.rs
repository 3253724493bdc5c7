//! Per-frame orbit driver
//!
//! Every frame, for each registered geometry node `G` (in registration order):
//!
//! 1. classify `G` by name as planet or moon
//! 2. revolve its holder `H = parent(G)`: `H.local = rotate(axis, orbit_step) * H.local`
//! 3. spin `G` in place: `G.local = rotate(axis, spin_step) * G.local`
//! 4. resolve `world(G)` and hand it to the [`DrawSink`]
//!
//! The holder rotation is a pre-multiplication, so it turns the holder's
//! whole offset around the holder's parent frame (revolution), while the
//! geometry rotation sits below it in the chain (spin).
//!
//! In phased mode every touched node keeps a single phase, wrapped to
//! `[0, TAU)`, that sums its own spin and the orbit steps of the bodies it
//! holds. A geometry node that is also the holder of another body therefore
//! accumulates both rotations, as it does in incremental mode.

use glam::{Mat4, Vec3};
use std::f32::consts::TAU;
use rustc_hash::FxHashMap;

use crate::animation::draw::{DrawItem, DrawSink};
use crate::animation::settings::{AnimationMode, AnimationSettings, SpinClass};
use crate::errors::{OrreryError, Result};
use crate::scene::{NodeHandle, SceneGraph};

#[derive(Debug, Clone)]
struct OrbitBody {
    node: NodeHandle,
    class: SpinClass,
}

/// Phased-mode state of one node: `local = rotate(axis, phase) * base`.
#[derive(Debug, Clone)]
struct NodePhase {
    base: Mat4,
    phase: f32,
}

pub struct OrbitAnimator {
    settings: AnimationSettings,
    axis: Vec3,
    bodies: Vec<OrbitBody>,
    phases: FxHashMap<NodeHandle, NodePhase>,
    frame: u64,
}

impl Default for OrbitAnimator {
    fn default() -> Self {
        Self::new(AnimationSettings::default())
    }
}

impl OrbitAnimator {
    #[must_use]
    pub fn new(settings: AnimationSettings) -> Self {
        Self {
            axis: settings.axis(),
            settings,
            bodies: Vec::new(),
            phases: FxHashMap::default(),
            frame: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> AnimationMode {
        self.settings.mode
    }

    /// Number of frames stepped (or the frame last sought to).
    #[inline]
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Registered geometry nodes in registration order.
    pub fn bodies(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.bodies.iter().map(|b| b.node)
    }

    /// Spin class the body was registered with.
    #[must_use]
    pub fn class_of(&self, node: NodeHandle) -> Option<SpinClass> {
        self.bodies.iter().find(|b| b.node == node).map(|b| b.class)
    }

    /// Registers a geometry node for animation.
    ///
    /// The node must carry geometry and have a holder parent. Its spin class
    /// is decided from its name now. In phased mode the current local
    /// transforms of the node and its holder become the phase-zero bases.
    pub fn register(&mut self, scene: &SceneGraph, node: NodeHandle) -> Result<()> {
        let n = scene.get_node(node).ok_or(OrreryError::NodeNotFound(node))?;
        if n.geometry_key().is_none() {
            return Err(OrreryError::MissingGeometry(n.name().to_string()));
        }
        let holder = n
            .parent()
            .ok_or_else(|| OrreryError::MissingHolder(n.name().to_string()))?;

        if self.bodies.iter().any(|b| b.node == node) {
            log::warn!("Geometry node '{}' is already registered", n.name());
            return Ok(());
        }

        let class = self.settings.classify(n.name());
        log::debug!("Registered '{}' as {:?} (depth {})", n.name(), class, n.depth());

        self.bodies.push(OrbitBody { node, class });
        for handle in [node, holder] {
            if let Some(target) = scene.get_node(handle) {
                self.phases.entry(handle).or_insert_with(|| NodePhase {
                    base: *target.local_transform(),
                    phase: 0.0,
                });
            }
        }
        Ok(())
    }

    pub fn register_all(&mut self, scene: &SceneGraph, nodes: &[NodeHandle]) -> Result<()> {
        for &node in nodes {
            self.register(scene, node)?;
        }
        Ok(())
    }

    /// Advances one frame and emits a draw item per registered body.
    pub fn step<S: DrawSink + ?Sized>(&mut self, scene: &mut SceneGraph, sink: &mut S) {
        self.frame += 1;

        let Self {
            settings,
            axis,
            bodies,
            phases,
            ..
        } = self;
        let axis = *axis;
        let spin_step = settings.spin_step;

        for body in bodies.iter() {
            let Some(node) = scene.get_node(body.node) else {
                log::warn!("Registered node {:?} no longer exists, skipping", body.node);
                continue;
            };
            let holder = node.parent();
            let orbit_step = settings.orbit_step(body.class);

            // 1. Revolve the holder
            match holder {
                Some(h) => rotate(scene, phases, settings.mode, axis, h, orbit_step),
                None => log::warn!("Registered node {:?} lost its holder", body.node),
            }

            // 2. Spin the body in place
            rotate(scene, phases, settings.mode, axis, body.node, spin_step);

            // 3. Resolve and emit
            if let Some(item) = draw_item(scene, body.node) {
                sink.draw(item);
            }
        }
    }

    /// Advances one frame without collecting draw items.
    pub fn advance(&mut self, scene: &mut SceneGraph) {
        self.step(scene, &mut ());
    }

    /// Rebuilds every registered transform as it is after `frame` frames.
    ///
    /// Only available in [`AnimationMode::Phased`].
    pub fn seek(&mut self, scene: &mut SceneGraph, frame: u64) -> Result<()> {
        if self.settings.mode != AnimationMode::Phased {
            return Err(OrreryError::SeekUnsupported);
        }

        // Radians per frame for every phased node: its own spin plus the
        // orbit step of each body it holds.
        let mut rates: FxHashMap<NodeHandle, f64> = FxHashMap::default();
        for body in &self.bodies {
            let Some(node) = scene.get_node(body.node) else {
                continue;
            };
            *rates.entry(body.node).or_insert(0.0) += f64::from(self.settings.spin_step);
            if let Some(h) = node.parent() {
                *rates.entry(h).or_insert(0.0) += f64::from(self.settings.orbit_step(body.class));
            }
        }

        let frames = frame as f64;
        for (&handle, state) in &mut self.phases {
            let rate = rates.get(&handle).copied().unwrap_or(0.0);
            state.phase = (rate * frames).rem_euclid(std::f64::consts::TAU) as f32;
            if let Some(n) = scene.get_node_mut(handle) {
                n.set_local_transform(Mat4::from_axis_angle(self.axis, state.phase) * state.base);
            }
        }

        log::debug!("Seeked from frame {} to {}", self.frame, frame);
        self.frame = frame;
        Ok(())
    }

    /// Restores the transforms captured at registration.
    pub fn reset(&mut self, scene: &mut SceneGraph) -> Result<()> {
        self.seek(scene, 0)
    }

    /// Draw items for the current state without advancing.
    pub fn extract<S: DrawSink + ?Sized>(&self, scene: &SceneGraph, sink: &mut S) {
        for body in &self.bodies {
            if let Some(item) = draw_item(scene, body.node) {
                sink.draw(item);
            }
        }
    }
}

/// Applies one frame's rotation of `angle` to `handle`.
fn rotate(
    scene: &mut SceneGraph,
    phases: &mut FxHashMap<NodeHandle, NodePhase>,
    mode: AnimationMode,
    axis: Vec3,
    handle: NodeHandle,
    angle: f32,
) {
    let Some(node) = scene.get_node_mut(handle) else {
        return;
    };
    match mode {
        AnimationMode::Incremental => node.pre_multiply_local(Mat4::from_axis_angle(axis, angle)),
        AnimationMode::Phased => {
            let state = phases.entry(handle).or_insert_with(|| NodePhase {
                base: *node.local_transform(),
                phase: 0.0,
            });
            state.phase = (state.phase + angle).rem_euclid(TAU);
            node.set_local_transform(Mat4::from_axis_angle(axis, state.phase) * state.base);
        }
    }
}

fn draw_item(scene: &SceneGraph, node: NodeHandle) -> Option<DrawItem> {
    let geometry = scene.geometry(node)?;
    Some(DrawItem {
        node,
        model: scene.world_transform(node)?,
        color: geometry.color(),
        mesh: geometry.mesh().clone(),
    })
}
