//! Flapper - a terminal side-scroller.
//!
//! The library holds the game simulation, settings and persistence so they
//! can be tested without a terminal. The binary wires them to crossterm.

pub mod build_info;
pub mod config;
pub mod constants;
pub mod game;
pub mod geometry;
pub mod input;
pub mod scores;
pub mod ui;
pub mod utils;

pub use config::{CliOptions, Command, Settings};
pub use constants::*;
pub use game::{Difficulty, Game, GameEvent, GameInput, GameMode, Phase};
pub use scores::HighScores;
