//! Procedural placement of obstacle pairs.
//!
//! Pairs sit at a fixed horizontal increment from one another. Each new pair
//! gets a gap center drawn uniformly from the range that keeps the whole gap
//! inside the view. When the leftmost pair scrolls past the despawn line it
//! is dropped and a fresh one is appended one increment behind the last.

use super::types::{Difficulty, ObstaclePair};
use crate::constants::*;
use rand::Rng;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleSpawner {
    pub spacing: f64,
    pub gap_size: f64,
    pub width: f64,
}

impl ObstacleSpawner {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            spacing: difficulty.pipe_spacing(),
            gap_size: difficulty.gap_size(),
            width: OBSTACLE_WIDTH,
        }
    }

    /// Number of pairs kept alive: enough to cover the span from the spawn
    /// line to the despawn line, plus one.
    pub fn pair_count(&self) -> usize {
        ((SPAWN_START_X - DESPAWN_X) / self.spacing).ceil() as usize + 1
    }

    /// Inclusive range a gap center may take.
    pub fn gap_center_range(&self) -> (f64, f64) {
        let half_gap = self.gap_size / 2.0;
        let lo = -VIEW_HALF_HEIGHT + GAP_MARGIN + half_gap;
        let hi = VIEW_HALF_HEIGHT - GAP_MARGIN - half_gap;
        (lo, hi.max(lo))
    }

    pub fn make_pair<R: Rng>(&self, x: f64, rng: &mut R) -> ObstaclePair {
        let (lo, hi) = self.gap_center_range();
        let gap_center = if hi > lo { rng.gen_range(lo..=hi) } else { lo };
        ObstaclePair::new(x, gap_center, self.gap_size, self.width)
    }

    /// Replace the contents of `obstacles` with a fresh run of pairs starting
    /// at the spawn line.
    pub fn seed<R: Rng>(&self, obstacles: &mut VecDeque<ObstaclePair>, rng: &mut R) {
        obstacles.clear();
        for i in 0..self.pair_count() {
            let x = SPAWN_START_X + i as f64 * self.spacing;
            obstacles.push_back(self.make_pair(x, rng));
        }
    }

    /// Drop pairs whose right edge is past the despawn line and append one
    /// replacement for each. Returns how many were replaced.
    pub fn replace_passed<R: Rng>(
        &self,
        obstacles: &mut VecDeque<ObstaclePair>,
        rng: &mut R,
    ) -> usize {
        let mut replaced = 0;
        while obstacles.front().is_some_and(|p| p.right() < DESPAWN_X) {
            obstacles.pop_front();
            let x = obstacles
                .back()
                .map(|last| last.x + self.spacing)
                .unwrap_or(SPAWN_START_X);
            obstacles.push_back(self.make_pair(x, rng));
            replaced += 1;
        }
        replaced
    }
}
