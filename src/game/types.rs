//! Flapper data structures: difficulty, bird, obstacle pairs and the game state.

use super::spawner::ObstacleSpawner;
use crate::constants::*;
use crate::geometry::{Aabb, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Difficulty levels. Only obstacle tuning changes; bird physics is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Novice,
    Apprentice,
    Journeyman,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Novice,
        Difficulty::Apprentice,
        Difficulty::Journeyman,
        Difficulty::Master,
    ];

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Apprentice => "Apprentice",
            Self::Journeyman => "Journeyman",
            Self::Master => "Master",
        }
    }

    /// Vertical opening between the two halves of a pair, in world units.
    pub fn gap_size(&self) -> f64 {
        match self {
            Self::Novice => 1.1,
            Self::Apprentice => 0.95,
            Self::Journeyman => 0.8,
            Self::Master => 0.7,
        }
    }

    /// Leftward obstacle movement per tick.
    pub fn scroll_speed(&self) -> f64 {
        match self {
            Self::Novice => 0.012,
            Self::Apprentice => 0.015,
            Self::Journeyman => 0.018,
            Self::Master => 0.021,
        }
    }

    /// Horizontal distance between consecutive pairs (left edge to left edge).
    pub fn pipe_spacing(&self) -> f64 {
        match self {
            Self::Novice => 1.8,
            Self::Apprentice => 1.6,
            Self::Journeyman => 1.45,
            Self::Master => 1.3,
        }
    }
}

/// How the bird is steered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Gravity pulls the bird down; a flap sets an upward velocity.
    #[default]
    Flappy,
    /// No gravity; the bird moves in four directions while a key is held.
    Hover,
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flappy => "Flappy",
            Self::Hover => "Hover",
        }
    }
}

/// Movement directions for hover mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }

    /// Unit step in world space (y up).
    pub fn offset(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, 1.0),
            Self::Down => Vec2::new(0.0, -1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Lifecycle of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Physics frozen until the first flap or move.
    WaitingToStart,
    Playing,
    Paused,
    /// Bird hit an obstacle; the round resets when the countdown reaches zero.
    Dying { ticks_left: u32 },
}

/// Which sprite the bird shows this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WingFrame {
    Rest,
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct Bird {
    /// Center of the bird in world units.
    pub pos: Vec2,
    /// Vertical velocity per tick (positive = upward).
    pub velocity: f64,
    /// Ticks remaining of the flap animation.
    pub flap_timer: u32,
    pub wing: WingFrame,
}

impl Bird {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(BIRD_START_X, BIRD_START_Y),
            velocity: 0.0,
            flap_timer: 0,
            wing: WingFrame::Rest,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, Vec2::new(BIRD_WIDTH, BIRD_HEIGHT))
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

/// A top and bottom obstacle sharing one gap.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstaclePair {
    /// Left edge in world units.
    pub x: f64,
    /// World y of the middle of the gap.
    pub gap_center: f64,
    pub gap_size: f64,
    pub width: f64,
    /// Whether the bird has already been credited for this pair.
    pub scored: bool,
}

impl ObstaclePair {
    pub fn new(x: f64, gap_center: f64, gap_size: f64, width: f64) -> Self {
        Self {
            x,
            gap_center,
            gap_size,
            width,
            scored: false,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn gap_top(&self) -> f64 {
        self.gap_center + self.gap_size / 2.0
    }

    pub fn gap_bottom(&self) -> f64 {
        self.gap_center - self.gap_size / 2.0
    }

    pub fn top_box(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.gap_top()),
            Vec2::new(self.right(), VIEW_HALF_HEIGHT + OBSTACLE_OVERHANG),
        )
    }

    pub fn bottom_box(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, -VIEW_HALF_HEIGHT - OBSTACLE_OVERHANG),
            Vec2::new(self.right(), self.gap_bottom()),
        )
    }

    pub fn boxes(&self) -> [Aabb; 2] {
        [self.top_box(), self.bottom_box()]
    }
}

/// Complete state of a running game.
#[derive(Debug, Clone)]
pub struct Game {
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub phase: Phase,

    pub bird: Bird,
    /// Oldest (leftmost) pair first.
    pub obstacles: VecDeque<ObstaclePair>,
    pub spawner: ObstacleSpawner,

    // Scoring
    pub score: u32,
    /// Best score seen this session, seeded from the saved high score.
    pub best_score: u32,
    pub deaths: u32,

    // Timing
    /// Sub-tick time accumulator (milliseconds).
    pub accumulated_time_ms: u64,
    pub tick_count: u64,

    // Input buffer
    /// Flap waiting to be consumed by the next physics tick.
    pub flap_queued: bool,
    /// Remaining hold ticks per direction, indexed by `Direction::index`.
    pub held: [u32; 4],

    /// Draw collision boxes over the sprites.
    pub show_hitboxes: bool,
}

impl Game {
    /// Create a game waiting for its first input, with obstacles already queued
    /// off the right edge.
    pub fn new<R: Rng>(difficulty: Difficulty, mode: GameMode, rng: &mut R) -> Self {
        let spawner = ObstacleSpawner::new(difficulty);
        let mut obstacles = VecDeque::new();
        spawner.seed(&mut obstacles, rng);

        Self {
            difficulty,
            mode,
            phase: Phase::WaitingToStart,
            bird: Bird::new(),
            obstacles,
            spawner,
            score: 0,
            best_score: 0,
            deaths: 0,
            accumulated_time_ms: 0,
            tick_count: 0,
            flap_queued: false,
            held: [0; 4],
            show_hitboxes: false,
        }
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.held[dir.index()] > 0
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.phase, Phase::Dying { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_game_defaults() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let game = Game::new(Difficulty::Novice, GameMode::Flappy, &mut rng);
        assert_eq!(game.phase, Phase::WaitingToStart);
        assert_eq!(game.score, 0);
        assert_eq!(game.deaths, 0);
        assert!(!game.flap_queued);
        assert_eq!(game.bird.pos, Vec2::new(BIRD_START_X, BIRD_START_Y));
        assert_eq!(game.bird.velocity, 0.0);
        assert!(!game.obstacles.is_empty());
        // Everything starts off-screen to the right
        assert!(game.obstacles.iter().all(|p| p.x >= VIEW_HALF_WIDTH));
    }

    #[test]
    fn test_difficulty_from_name() {
        assert_eq!(Difficulty::from_name("master"), Some(Difficulty::Master));
        assert_eq!(
            Difficulty::from_name(" Journeyman "),
            Some(Difficulty::Journeyman)
        );
        assert_eq!(Difficulty::from_name("impossible"), None);
    }

    #[test]
    fn test_harder_levels_are_tighter() {
        for pair in Difficulty::ALL.windows(2) {
            let (easier, harder) = (pair[0], pair[1]);
            assert!(harder.gap_size() < easier.gap_size());
            assert!(harder.scroll_speed() > easier.scroll_speed());
            assert!(harder.pipe_spacing() < easier.pipe_spacing());
        }
    }

    #[test]
    fn test_gap_always_fits_bird() {
        for d in Difficulty::ALL {
            assert!(d.gap_size() > BIRD_HEIGHT * 2.0);
        }
    }

    #[test]
    fn test_obstacle_boxes_frame_the_gap() {
        let pair = ObstaclePair::new(1.0, 0.2, 0.8, OBSTACLE_WIDTH);
        let top = pair.top_box();
        let bottom = pair.bottom_box();
        assert!((top.min.y - 0.6).abs() < 1e-9);
        assert!((bottom.max.y - (-0.2)).abs() < 1e-9);
        assert!(top.max.y > VIEW_HALF_HEIGHT);
        assert!(bottom.min.y < -VIEW_HALF_HEIGHT);
        assert_eq!(top.min.x, 1.0);
        assert!((top.max.x - pair.right()).abs() < 1e-9);
    }

    #[test]
    fn test_bird_bounds_centered_on_position() {
        let bird = Bird::new();
        let b = bird.bounds();
        assert!((b.width() - BIRD_WIDTH).abs() < 1e-9);
        assert!((b.height() - BIRD_HEIGHT).abs() < 1e-9);
        assert!((b.center().x - bird.pos.x).abs() < 1e-9);
        assert!((b.center().y - bird.pos.y).abs() < 1e-9);
    }

    #[test]
    fn test_direction_indices_unique() {
        let mut seen = [false; 4];
        for d in Direction::ALL {
            assert!(!seen[d.index()]);
            seen[d.index()] = true;
        }
    }
}
