//! World kernel: the player pose, the fixed wall set, and the operations the
//! frame loop drives each frame.
//!
//! # Invariants
//! - All state mutation happens in `Player::update`; projection is pure.
//! - Renderers read world truth, they never mutate it.

pub mod player;
pub mod scene;
pub mod wall;

pub use player::{ANGULAR_SPEED, Player};
pub use scene::Scene;
pub use wall::Wall;
