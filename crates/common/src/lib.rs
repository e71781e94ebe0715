//! Shared leaf types for the mapwalk workspace.
//!
//! # Invariants
//! - Types here are plain data: no I/O, no host dependencies.

pub mod types;

pub use types::{Color, Segment};
