use glam::Vec2;
use mapwalk_common::{Color, Segment};
use serde::{Deserialize, Serialize};

use crate::player::Player;

/// An immutable wall segment in world space.
///
/// Walls carry their own color so a renderer needs nothing beyond the
/// projected endpoints and the stored color to draw them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub color: Color,
}

impl Wall {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            color,
        }
    }

    /// Project both endpoints into screen space relative to the player pose.
    ///
    /// Endpoints are first translated so the player sits at the origin, then
    /// rotated into the player's frame. The rotation pairs the axes
    /// asymmetrically: depth takes `tx*cos + ty*sin`, lateral takes
    /// `tx*sin - ty*cos`. Both screen coordinates subtract from the center,
    /// so depth grows upward and lateral offset grows leftward.
    pub fn project(&self, player: &Player, center: Vec2) -> Segment {
        let (sin, cos) = player.angle.sin_cos();

        let tx1 = self.x1 - player.x;
        let ty1 = self.y1 - player.y;
        let tz1 = tx1 * cos + ty1 * sin;
        let tx1 = tx1 * sin - ty1 * cos;

        let tx2 = self.x2 - player.x;
        let ty2 = self.y2 - player.y;
        let tz2 = tx2 * cos + ty2 * sin;
        let tx2 = tx2 * sin - ty2 * cos;

        Segment::new(
            Vec2::new(center.x - tx1, center.y - tz1),
            Vec2::new(center.x - tx2, center.y - tz2),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Vec2 = Vec2::new(320.0, 200.0);

    #[test]
    fn endpoint_at_player_projects_to_center() {
        let player = Player::new(50.0, 60.0, 1.3);
        let wall = Wall::new(50.0, 60.0, 50.0, 60.0, Color::WALL_GRAY);
        let seg = wall.project(&player, CENTER);
        assert!((seg.a - CENTER).length() < 1e-4);
        assert!((seg.b - CENTER).length() < 1e-4);
    }

    #[test]
    fn zero_angle_maps_world_x_to_screen_up() {
        // At angle 0: sin = 0, cos = 1, so depth = tx and lateral = -ty.
        let player = Player::new(0.0, 0.0, 0.0);
        let wall = Wall::new(10.0, 0.0, 0.0, 10.0, Color::WALL_GRAY);
        let seg = wall.project(&player, CENTER);
        // (10, 0): depth 10, lateral 0 -> straight up from center.
        assert_eq!(seg.a, Vec2::new(CENTER.x, CENTER.y - 10.0));
        // (0, 10): depth 0, lateral -10 -> right of center.
        assert_eq!(seg.b, Vec2::new(CENTER.x + 10.0, CENTER.y));
    }

    #[test]
    fn projection_is_relative_to_player_position() {
        let wall = Wall::new(100.0, 100.0, 120.0, 100.0, Color::WALL_GRAY);
        let near = Player::new(90.0, 100.0, 0.0);
        let far = Player::new(40.0, 100.0, 0.0);
        let seg_near = wall.project(&near, CENTER);
        let seg_far = wall.project(&far, CENTER);
        // Moving the player back pushes the projected wall further up.
        assert!(seg_far.a.y < seg_near.a.y);
    }

    #[test]
    fn rotation_pairs_axes_asymmetrically() {
        // A quarter turn does not produce the symmetric-rotation image; pin
        // the exact axis pairing instead.
        let angle = std::f32::consts::FRAC_PI_2;
        let player = Player::new(0.0, 0.0, angle);
        let wall = Wall::new(10.0, 0.0, 10.0, 0.0, Color::WALL_GRAY);
        let seg = wall.project(&player, CENTER);
        let (sin, cos) = angle.sin_cos();
        let tz = 10.0 * cos;
        let tx = 10.0 * sin;
        assert_eq!(seg.a, Vec2::new(CENTER.x - tx, CENTER.y - tz));
    }

    #[test]
    fn color_is_carried_unchanged() {
        let wall = Wall::new(0.0, 0.0, 1.0, 1.0, Color::WALL_GRAY);
        assert_eq!(wall.color, Color::WALL_GRAY);
    }
}
