//! Best scores, one per difficulty and mode, kept in ~/.flapper/scores.json.

use crate::constants::SCORES_FILE;
use crate::game::{Difficulty, Game, GameMode};
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub score: u32,
    /// Unix timestamp (UTC seconds) when the score was set.
    pub achieved_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    #[serde(default)]
    pub entries: Vec<ScoreEntry>,
    /// Set when an unreadable file could not be moved aside. Saving is then
    /// skipped so the file is not replaced.
    #[serde(skip)]
    read_only: bool,
}

impl HighScores {
    pub fn load() -> Self {
        match persistence::data_path(SCORES_FILE) {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                log::warn!("no data directory for scores: {}", e);
                Self::default()
            }
        }
    }

    /// Load scores from `path`. A file that fails to parse is renamed to
    /// `<name>.bak` and the session starts from an empty table.
    pub fn load_from(path: &Path) -> Self {
        let err = match persistence::read_json(path) {
            Ok(scores) => return scores.unwrap_or_default(),
            Err(e) => e,
        };
        log::warn!("could not load {}: {}", path.display(), err);

        match persistence::set_aside(path) {
            Ok(backup) => {
                log::warn!("moved unreadable scores to {}", backup.display());
                Self::default()
            }
            Err(e) => {
                log::warn!(
                    "could not move {} aside, scores will not be saved: {}",
                    path.display(),
                    e
                );
                Self {
                    read_only: true,
                    ..Self::default()
                }
            }
        }
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(&persistence::data_path(SCORES_FILE)?)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if self.read_only {
            log::debug!("not saving scores over unreadable {}", path.display());
            return Ok(());
        }
        persistence::save_json_to(path, self)
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn entry(&self, difficulty: Difficulty, mode: GameMode) -> Option<&ScoreEntry> {
        self.entries
            .iter()
            .find(|e| e.difficulty == difficulty && e.mode == mode)
    }

    pub fn best(&self, difficulty: Difficulty, mode: GameMode) -> u32 {
        self.entry(difficulty, mode).map(|e| e.score).unwrap_or(0)
    }

    /// Record a finished round. Returns true if it beat the stored best.
    pub fn record(&mut self, difficulty: Difficulty, mode: GameMode, score: u32) -> bool {
        self.record_at(difficulty, mode, score, chrono::Utc::now().timestamp())
    }

    /// Record the score of the current round, whether it ended in a crash or
    /// the player quit mid-run.
    pub fn record_round(&mut self, game: &Game) -> bool {
        self.record(game.difficulty, game.mode, game.score)
    }

    pub fn record_at(
        &mut self,
        difficulty: Difficulty,
        mode: GameMode,
        score: u32,
        achieved_at: i64,
    ) -> bool {
        if score == 0 || score <= self.best(difficulty, mode) {
            return false;
        }

        self.entries
            .retain(|e| !(e.difficulty == difficulty && e.mode == mode));
        self.entries.push(ScoreEntry {
            difficulty,
            mode,
            score,
            achieved_at,
        });
        true
    }
}
