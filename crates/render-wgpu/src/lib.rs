//! wgpu canvas backend for the mapwalk frame loop.
//!
//! Strokes and rectangles are tessellated into screen-space triangles and
//! drawn in one pass with a pixel-to-clip orthographic projection.
//!
//! # Invariants
//! - The backend never touches the scene; it consumes canvas calls only.
//! - Draw order on the GPU matches canvas call order.

mod canvas;
mod gpu;
mod shaders;

pub use canvas::WgpuCanvas;
pub use gpu::{Gpu, GpuError};

pub fn crate_info() -> &'static str {
    "mapwalk-render-wgpu v0.1.0"
}
