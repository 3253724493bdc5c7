//! Declarative scene descriptions
//!
//! A [`SceneDescription`] is an ordered list of bodies, each naming its parent,
//! its initial local transform and (optionally) a color. Building it produces a
//! [`SceneGraph`] plus the flat registries the animation driver and renderer
//! work from.
//!
//! ```rust,ignore
//! let description = SceneDescription::from_json_str(r#"{
//!     "name": "Tiny",
//!     "bodies": [
//!         { "name": "earth_hold", "transform": { "translation": [13, 0, 0], "rotation_y": 1.0 } },
//!         { "name": "earth_geo", "parent": "earth_hold", "kind": "geometry", "color": [0.2, 0.4, 1.0] }
//!     ]
//! }"#)?;
//! let built = description.build(mesh)?;
//! ```

use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::{OrreryError, Result};
use crate::resources::MeshData;
use crate::scene::camera::Camera;
use crate::scene::geometry::Geometry;
use crate::scene::light::PointLight;
use crate::scene::scene::{ROOT_NAME, SceneGraph};
use crate::scene::NodeHandle;

/// What a body contributes besides its transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// Plain node carrying an orbit offset.
    #[default]
    Holder,
    /// Renderable body, registered for animation.
    Geometry,
    /// Point light.
    Light,
    /// Camera.
    Camera,
}

/// Initial local transform, composed as `rotate_y(rotation_y) * translate * scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformDescription {
    pub translation: [f32; 3],
    /// Orbital phase offset about +Y, in radians.
    pub rotation_y: f32,
    pub scale: f32,
}

impl Default for TransformDescription {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation_y: 0.0,
            scale: 1.0,
        }
    }
}

impl TransformDescription {
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
            * Mat4::from_translation(Vec3::from_array(self.translation))
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescription {
    pub name: String,
    /// Parent body name; `None` (or the root's name) places the body under the root.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub transform: TransformDescription,
    #[serde(default)]
    pub kind: BodyKind,
    /// Surface color for geometry, emission color for lights.
    #[serde(default)]
    pub color: Option<[f32; 3]>,
    /// Light intensity; ignored for other kinds.
    #[serde(default)]
    pub intensity: Option<f32>,
}

impl BodyDescription {
    #[must_use]
    pub fn new(name: &str, parent: Option<&str>, kind: BodyKind) -> Self {
        Self {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            transform: TransformDescription::default(),
            kind,
            color: None,
            intensity: None,
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: TransformDescription) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = Some(intensity);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default = "default_scene_name")]
    pub name: String,
    pub bodies: Vec<BodyDescription>,
}

fn default_scene_name() -> String {
    "Scene".to_string()
}

impl Default for SceneDescription {
    fn default() -> Self {
        crate::scene::solar::solar_system()
    }
}

/// A graph built from a description, plus registries by kind.
///
/// Registries hold handles in description order.
pub struct BuiltScene {
    pub graph: SceneGraph,
    pub geometry_nodes: Vec<NodeHandle>,
    pub light_nodes: Vec<NodeHandle>,
    pub camera_nodes: Vec<NodeHandle>,
    handles: FxHashMap<String, NodeHandle>,
}

impl BuiltScene {
    /// Handle of the body with the given name (the root is named `"root"`).
    #[must_use]
    pub fn handle(&self, name: &str) -> Option<NodeHandle> {
        self.handles.get(name).copied()
    }

    /// Name → handle map of every body, including the root.
    #[must_use]
    pub fn names(&self) -> &FxHashMap<String, NodeHandle> {
        &self.handles
    }
}

impl SceneDescription {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the graph. Parents must be defined before their children and
    /// body names must be unique within the description.
    pub fn build(&self, mesh: Arc<MeshData>) -> Result<BuiltScene> {
        let mut graph = SceneGraph::new(&self.name);
        let mut handles = FxHashMap::default();
        handles.insert(ROOT_NAME.to_string(), graph.root());

        let mut geometry_nodes = Vec::new();
        let mut light_nodes = Vec::new();
        let mut camera_nodes = Vec::new();

        for body in &self.bodies {
            if handles.contains_key(&body.name) {
                return Err(OrreryError::DuplicateName(body.name.clone()));
            }

            let parent = match body.parent.as_deref() {
                None => graph.root(),
                Some(name) => *handles.get(name).ok_or_else(|| OrreryError::UnknownParent {
                    body: body.name.clone(),
                    parent: name.to_string(),
                })?,
            };

            let color = body.color.map_or(Vec3::ONE, Vec3::from_array);
            let mut builder = graph
                .build_node(&body.name)
                .with_parent(parent)
                .with_local_transform(body.transform.to_matrix());

            builder = match body.kind {
                BodyKind::Holder => builder,
                BodyKind::Geometry => builder.with_geometry(Geometry::new(color, Arc::clone(&mesh))),
                BodyKind::Light => {
                    builder.with_light(PointLight::new(color, body.intensity.unwrap_or(1.0)))
                }
                BodyKind::Camera => builder.with_camera(Camera::default()),
            };
            let handle = builder.build()?;

            match body.kind {
                BodyKind::Holder => {}
                BodyKind::Geometry => geometry_nodes.push(handle),
                BodyKind::Light => light_nodes.push(handle),
                BodyKind::Camera => camera_nodes.push(handle),
            }
            handles.insert(body.name.clone(), handle);
        }

        log::debug!(
            "Built scene '{}': {} nodes, {} geometry, {} lights, {} cameras",
            self.name,
            graph.node_count(),
            geometry_nodes.len(),
            light_nodes.len(),
            camera_nodes.len()
        );

        Ok(BuiltScene {
            graph,
            geometry_nodes,
            light_nodes,
            camera_nodes,
            handles,
        })
    }
}
