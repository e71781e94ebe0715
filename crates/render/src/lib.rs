//! Renderer-agnostic drawing: the [`Canvas`] trait, the per-frame draw
//! routines, and the [`FrameLoop`] that sequences them.
//!
//! # Invariants
//! - Draw routines read world state, they never mutate it; the frame loop is
//!   the only caller of `Player::update`.
//! - A backend sees only [`Canvas`] calls; it never touches the scene.

pub mod canvas;
pub mod frame;

pub use canvas::{Canvas, DrawCmd, RecordingCanvas};
pub use frame::{FrameLoop, MARKER_SIZE, TICK_LENGTH, WALL_STROKE_WIDTH};

pub fn crate_info() -> &'static str {
    "mapwalk-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
