//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The scene graph itself reports lookup misses as `Option`, never as errors.
//! [`OrreryError`] covers the operations that can genuinely fail:
//! - Structural edits addressed with stale handles
//! - Scene descriptions that reference unknown or duplicated bodies
//! - Animation registration of nodes that cannot be animated
//! - Configuration loading
//!
//! # Usage
//!
//! ```rust,ignore
//! use orrery::errors::{OrreryError, Result};
//!
//! fn build() -> Result<()> {
//!     let config = orrery::OrreryConfig::from_path("system.json")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::scene::NodeHandle;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum OrreryError {
    // ========================================================================
    // Hierarchy Errors
    // ========================================================================
    /// The handle does not refer to a live node of this scene graph.
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeHandle),

    /// A node cannot become its own parent.
    #[error("Cannot attach node {0:?} to itself")]
    AttachToSelf(NodeHandle),

    // ========================================================================
    // Scene Description Errors
    // ========================================================================
    /// A body references a parent name that was not defined before it.
    #[error("Unknown parent '{parent}' for body '{body}'")]
    UnknownParent {
        /// Body being built
        body: String,
        /// Parent name that could not be resolved
        parent: String,
    },

    /// The same body name is defined twice in one description.
    #[error("Duplicate body name in scene description: {0}")]
    DuplicateName(String),

    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// A geometry node registered for animation has no holder parent.
    #[error("Geometry node '{0}' has no holder parent")]
    MissingHolder(String),

    /// A node registered for animation carries no geometry component.
    #[error("Node '{0}' has no geometry component")]
    MissingGeometry(String),

    /// Seeking requires the phased animation mode.
    #[error("Seek and reset are only available in phased animation mode")]
    SeekUnsupported,

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, OrreryError>`.
pub type Result<T> = std::result::Result<T, OrreryError>;
