//! Utility Module
//!
//! - [`time`]: frame timing for the runtime loop

pub mod time;

pub use time::Timer;
