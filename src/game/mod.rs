//! The side-scroller itself.
//!
//! A bird flies at a fixed column while obstacle pairs scroll in from the
//! right. Gravity pulls it down each tick and a flap sets an upward velocity.
//! Touching an obstacle starts a short death countdown, after which the
//! round resets.

pub mod logic;
pub mod spawner;
pub mod types;

pub use logic::*;
pub use spawner::ObstacleSpawner;
pub use types::*;
