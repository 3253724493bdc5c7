#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod config;
pub mod engine;
pub mod errors;
pub mod resources;
pub mod scene;
pub mod utils;

pub use animation::{AnimationMode, AnimationSettings, DrawItem, DrawSink, OrbitAnimator, SpinClass};
pub use config::{MeshDetail, OrreryConfig};
pub use engine::{Frame, Orrery};
pub use errors::{OrreryError, Result};
pub use resources::{MeshData, SphereOptions, create_sphere};
pub use scene::{
    Camera, Geometry, Node, NodeHandle, PointLight, SceneDescription, SceneGraph, solar_system,
};
