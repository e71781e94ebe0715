//! Input State: boolean flags for the five tracked movement keys.
//!
//! # Invariants
//! - The player update consumes flags, never raw host key events.
//! - Press and release transitions are idempotent.

pub mod state;

pub use state::{InputState, Key};
