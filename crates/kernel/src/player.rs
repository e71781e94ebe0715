use glam::Vec2;
use mapwalk_input::{InputState, Key};
use serde::{Deserialize, Serialize};

/// Heading change per frame while a turn key is held, in radians.
pub const ANGULAR_SPEED: f32 = 0.04;

/// The player: world-space position, heading, and current speed factor.
///
/// `angle` is never normalized; it accumulates without bound and only its
/// cosine and sine are ever consumed. Created once at startup and mutated
/// exclusively by [`Player::update`] for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Heading in radians, unbounded.
    pub angle: f32,
    /// Per-frame displacement factor: 2.0 while boost is held, else 1.0.
    pub speed: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            x,
            y,
            angle,
            speed: 1.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Advance the pose by one frame of input.
    ///
    /// Forward and backward are applied independently and additively: with
    /// both held they cancel. Movement uses the speed computed on the
    /// previous frame; the boost flag is folded into `speed` last, so a
    /// modifier press lands on the following frame's displacement.
    pub fn update(&mut self, input: &InputState) {
        let (sin, cos) = self.angle.sin_cos();

        if input.is_pressed(Key::Forward) {
            self.x += cos * self.speed;
            self.y += sin * self.speed;
        }
        if input.is_pressed(Key::Backward) {
            self.x -= cos * self.speed;
            self.y -= sin * self.speed;
        }
        if input.is_pressed(Key::TurnLeft) {
            self.angle -= ANGULAR_SPEED;
        }
        if input.is_pressed(Key::TurnRight) {
            self.angle += ANGULAR_SPEED;
        }

        self.speed = if input.is_pressed(Key::Boost) { 2.0 } else { 1.0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &[Key]) -> InputState {
        let mut input = InputState::new();
        for &key in keys {
            input.press(key);
        }
        input
    }

    #[test]
    fn idle_input_leaves_pose_unchanged() {
        let mut player = Player::new(100.0, 50.0, 0.7);
        let before = player;
        for _ in 0..10 {
            player.update(&InputState::new());
        }
        assert_eq!(player.x, before.x);
        assert_eq!(player.y, before.y);
        assert_eq!(player.angle, before.angle);
    }

    #[test]
    fn forward_moves_along_heading() {
        let mut player = Player::new(10.0, 20.0, 0.5);
        let (x0, y0, a0) = (player.x, player.y, player.angle);
        player.update(&held(&[Key::Forward]));
        assert_eq!(player.x, x0 + 0.5_f32.cos());
        assert_eq!(player.y, y0 + 0.5_f32.sin());
        assert_eq!(player.angle, a0);
    }

    #[test]
    fn backward_moves_against_heading() {
        let mut player = Player::new(10.0, 20.0, 0.5);
        let (x0, y0) = (player.x, player.y);
        player.update(&held(&[Key::Backward]));
        assert_eq!(player.x, x0 - 0.5_f32.cos());
        assert_eq!(player.y, y0 - 0.5_f32.sin());
    }

    #[test]
    fn forward_and_backward_cancel() {
        let mut player = Player::new(10.0, 20.0, 1.2);
        let before = player;
        player.update(&held(&[Key::Forward, Key::Backward]));
        assert!((player.x - before.x).abs() < 1e-5);
        assert!((player.y - before.y).abs() < 1e-5);
    }

    #[test]
    fn turn_left_decrements_angle_only() {
        let mut player = Player::new(10.0, 20.0, 0.0);
        player.update(&held(&[Key::TurnLeft]));
        assert_eq!(player.angle, -ANGULAR_SPEED);
        assert_eq!(player.x, 10.0);
        assert_eq!(player.y, 20.0);
    }

    #[test]
    fn turn_right_increments_angle() {
        let mut player = Player::new(0.0, 0.0, 1.0);
        player.update(&held(&[Key::TurnRight]));
        assert_eq!(player.angle, 1.0 + ANGULAR_SPEED);
    }

    #[test]
    fn boost_sets_speed_two_else_one() {
        let mut player = Player::new(0.0, 0.0, 0.0);
        player.update(&held(&[Key::Boost]));
        assert_eq!(player.speed, 2.0);
        player.update(&held(&[Key::Boost, Key::Forward]));
        assert_eq!(player.speed, 2.0);
        player.update(&InputState::new());
        assert_eq!(player.speed, 1.0);
    }

    #[test]
    fn boost_affects_the_following_frame() {
        let mut player = Player::new(0.0, 0.0, 0.0);
        let input = held(&[Key::Forward, Key::Boost]);
        // First frame still moves at the pre-boost speed.
        player.update(&input);
        assert_eq!(player.x, 1.0);
        // Second frame moves at the doubled speed.
        player.update(&input);
        assert_eq!(player.x, 3.0);
    }

    #[test]
    fn angle_accumulates_without_wrapping() {
        let mut player = Player::new(0.0, 0.0, 0.0);
        let input = held(&[Key::TurnRight]);
        for _ in 0..1000 {
            player.update(&input);
        }
        assert!((player.angle - 1000.0 * ANGULAR_SPEED).abs() < 1e-2);
    }
}
