use mapwalk_common::Color;
use serde::{Deserialize, Serialize};

use crate::player::Player;
use crate::wall::Wall;

/// The complete world: one player and a fixed set of walls.
///
/// Walls never change after construction; only the player mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub player: Player,
    walls: Vec<Wall>,
}

impl Scene {
    /// The built-in demo map: six gray walls forming a partial enclosure,
    /// player starting a third of the way across and vertically centered,
    /// facing along +x.
    pub fn demo(width: f32, height: f32) -> Self {
        let gray = Color::WALL_GRAY;
        Self {
            player: Player::new(width / 3.0, height / 2.0, 0.0),
            walls: vec![
                Wall::new(160.0, 30.0, 160.0, 170.0, gray),
                Wall::new(161.0, 31.0, 100.0, 11.0, gray),
                Wall::new(101.0, 10.0, 30.0, 81.0, gray),
                Wall::new(31.0, 80.0, 30.0, 150.0, gray),
                Wall::new(29.0, 148.0, 81.0, 170.0, gray),
                Wall::new(80.0, 170.0, 162.0, 170.0, gray),
            ],
        }
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }
}
