use glam::Vec2;
use mapwalk_common::{Color, Segment};
use mapwalk_input::InputState;
use mapwalk_kernel::Scene;

use crate::canvas::Canvas;

/// Stroke width for wall segments, in pixels.
pub const WALL_STROKE_WIDTH: f32 = 4.0;
/// Side length of the square player marker, in pixels.
pub const MARKER_SIZE: f32 = 4.0;
/// Length of the heading tick above the marker, in pixels.
pub const TICK_LENGTH: f32 = 10.0;

/// Project and stroke every wall relative to the given pose.
pub fn draw_walls(scene: &Scene, center: Vec2, canvas: &mut dyn Canvas) {
    for wall in scene.walls() {
        let segment = wall.project(&scene.player, center);
        canvas.stroke_line(segment, WALL_STROKE_WIDTH, wall.color);
    }
}

/// Draw the player marker at the screen center.
///
/// The marker is a filled white square with a gray outline and a gray tick
/// pointing straight up. The tick does not rotate with the heading; the
/// walls rotate around the marker instead.
pub fn draw_player_marker(center: Vec2, canvas: &mut dyn Canvas) {
    let half = MARKER_SIZE / 2.0;
    canvas.fill_rect(
        center.x - half,
        center.y - half,
        MARKER_SIZE,
        MARKER_SIZE,
        Color::MARKER_FILL,
    );
    canvas.stroke_rect(
        center.x - half,
        center.y - half,
        MARKER_SIZE,
        MARKER_SIZE,
        1.0,
        Color::MARKER_OUTLINE,
    );
    canvas.stroke_line(
        Segment::new(center, Vec2::new(center.x, center.y - TICK_LENGTH)),
        1.0,
        Color::MARKER_OUTLINE,
    );
}

/// Sequences one frame: clear, walls, update, marker.
///
/// Walls are drawn with the pose as it stood at the start of the frame; the
/// update runs after, so the wall image trails the pose by one frame.
#[derive(Debug)]
pub struct FrameLoop {
    pub scene: Scene,
    center: Vec2,
    frame: u64,
}

impl FrameLoop {
    /// Build a loop for a surface of the given size. The marker sits at the
    /// surface center for the lifetime of the loop.
    pub fn new(scene: Scene, width: f32, height: f32) -> Self {
        Self {
            scene,
            center: Vec2::new(width / 2.0, height / 2.0),
            frame: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run one frame against the current input flags.
    pub fn advance(&mut self, input: &InputState, canvas: &mut dyn Canvas) {
        canvas.clear(Color::BACKGROUND);
        draw_walls(&self.scene, self.center, canvas);
        self.scene.player.update(input);
        draw_player_marker(self.center, canvas);
        self.frame += 1;
        tracing::trace!(
            frame = self.frame,
            x = self.scene.player.x,
            y = self.scene.player.y,
            angle = self.scene.player.angle,
            "frame advanced"
        );
    }
}
