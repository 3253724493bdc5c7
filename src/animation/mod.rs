//! Orbital animation
//!
//! Advances a registry of geometry nodes every frame: each body's holder
//! revolves around its parent and the body spins about its own position.
//!
//! - [`AnimationSettings`]: angular steps, rotation axis, moon marker, mode
//! - [`OrbitAnimator`]: the per-frame driver
//! - [`DrawItem`] / [`DrawSink`]: what the driver hands to the renderer

pub mod draw;
pub mod orbit;
pub mod settings;

pub use draw::{DrawItem, DrawSink};
pub use orbit::OrbitAnimator;
pub use settings::{AnimationMode, AnimationSettings, SpinClass};
