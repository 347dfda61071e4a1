//! Core data types, presentation mapping and matrix animation for spikewx
//!
//! This crate holds the weather snapshot model shared by every stage of the
//! dashboard: the acquisition seam (`SnapshotSource`), the fixed fallback
//! snapshot shown in degraded mode, and the pure mapping from a snapshot to
//! display attributes.

pub mod display;
pub mod matrix;
pub mod pipeline;
pub mod types;

pub use display::*;
pub use matrix::*;
pub use pipeline::*;
pub use types::*;
