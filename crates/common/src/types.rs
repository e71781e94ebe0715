use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Canvas background.
    pub const BACKGROUND: Color = Color::rgb(0.0, 0.0, 0.0);
    /// Wall gray (#888).
    pub const WALL_GRAY: Color = Color::rgb(0.533, 0.533, 0.533);
    /// Player marker fill.
    pub const MARKER_FILL: Color = Color::rgb(1.0, 1.0, 1.0);
    /// Player marker outline and heading tick (#777).
    pub const MARKER_OUTLINE: Color = Color::rgb(0.467, 0.467, 0.467);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A directed line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }
}
