//! Runtime settings and command-line parsing.
//!
//! Settings live in ~/.flapper/settings.json. Command-line flags override
//! them for one session without being written back.

use crate::constants::SETTINGS_FILE;
use crate::game::{Difficulty, GameMode};
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Persisted player settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub mode: GameMode,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
    pub show_hitboxes: bool,
}

/// Where the startup settings came from.
#[derive(Debug)]
pub enum SettingsSource {
    Saved,
    /// No settings file yet.
    FirstRun,
    /// The file exists but could not be read. It is left as it is.
    Unreadable(io::Error),
}

impl SettingsSource {
    /// Defaults are only written out when there was no file at all.
    pub fn should_write_defaults(&self) -> bool {
        matches!(self, SettingsSource::FirstRun)
    }
}

impl Settings {
    pub fn path() -> io::Result<PathBuf> {
        persistence::data_path(SETTINGS_FILE)
    }

    /// Load the saved settings. Nothing is logged here because this runs
    /// before the logger exists; the caller reports the source.
    pub fn load() -> (Self, SettingsSource) {
        match Self::path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => (Self::default(), SettingsSource::Unreadable(e)),
        }
    }

    pub fn load_from(path: &Path) -> (Self, SettingsSource) {
        match persistence::read_json(path) {
            Ok(Some(settings)) => (settings, SettingsSource::Saved),
            Ok(None) => (Self::default(), SettingsSource::FirstRun),
            Err(e) => (Self::default(), SettingsSource::Unreadable(e)),
        }
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        persistence::save_json_to(path, self)
    }

    /// Apply command-line overrides on top of the saved settings.
    pub fn with_overrides(mut self, opts: &CliOptions) -> Self {
        if let Some(difficulty) = opts.difficulty {
            self.difficulty = difficulty;
        }
        if opts.hover {
            self.mode = GameMode::Hover;
        }
        if opts.hitboxes {
            self.show_hitboxes = true;
        }
        self
    }
}

/// Flags accepted when launching a game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub hover: bool,
    pub difficulty: Option<Difficulty>,
    /// Fixed RNG seed for reproducible obstacle layouts.
    pub seed: Option<u64>,
    pub hitboxes: bool,
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play(CliOptions),
    Help,
    Version,
}

pub const USAGE: &str = "\
Flapper - terminal side-scroller

Usage: flapper [options]

Options:
  --hover               Free four-way movement instead of gravity
  --difficulty <level>  novice, apprentice, journeyman or master
  --seed <n>            Fixed seed for obstacle gaps
  --hitboxes            Draw collision boxes
  --version             Show version information
  --help                Show this help message";

/// Parse arguments (without the program name).
pub fn parse_args<I, S>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut opts = CliOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_ref() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-v" => return Ok(Command::Version),
            "--hover" => opts.hover = true,
            "--hitboxes" => opts.hitboxes = true,
            "--difficulty" | "-d" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--difficulty needs a value".to_string())?;
                let value = value.as_ref();
                opts.difficulty = Some(
                    Difficulty::from_name(value)
                        .ok_or_else(|| format!("Unknown difficulty: {}", value))?,
                );
            }
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--seed needs a value".to_string())?;
                let value = value.as_ref();
                opts.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid seed: {}", value))?,
                );
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(Command::Play(opts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_plays_with_defaults() {
        assert_eq!(
            parse_args(Vec::<String>::new()),
            Ok(Command::Play(CliOptions::default()))
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_args(["--help"]), Ok(Command::Help));
        assert_eq!(parse_args(["-h"]), Ok(Command::Help));
        assert_eq!(parse_args(["--version"]), Ok(Command::Version));
        // Help wins even after other flags
        assert_eq!(parse_args(["--hover", "-h"]), Ok(Command::Help));
    }

    #[test]
    fn test_play_flags() {
        let cmd = parse_args(["--hover", "--difficulty", "Master", "--seed", "42", "--hitboxes"]);
        assert_eq!(
            cmd,
            Ok(Command::Play(CliOptions {
                hover: true,
                difficulty: Some(Difficulty::Master),
                seed: Some(42),
                hitboxes: true,
            }))
        );
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse_args(["--bogus"]).is_err());
        assert!(parse_args(["--difficulty"]).is_err());
        assert!(parse_args(["--difficulty", "legendary"]).is_err());
        assert!(parse_args(["--seed", "abc"]).is_err());
        assert!(parse_args(["--seed"]).is_err());
    }

    #[test]
    fn test_overrides_apply_on_top_of_settings() {
        let saved = Settings {
            difficulty: Difficulty::Journeyman,
            ..Default::default()
        };
        let opts = CliOptions {
            hover: true,
            ..Default::default()
        };
        let merged = saved.clone().with_overrides(&opts);
        assert_eq!(merged.difficulty, Difficulty::Journeyman);
        assert_eq!(merged.mode, GameMode::Hover);
        assert!(!merged.show_hitboxes);

        let merged = saved.with_overrides(&CliOptions {
            difficulty: Some(Difficulty::Novice),
            hitboxes: true,
            ..Default::default()
        });
        assert_eq!(merged.difficulty, Difficulty::Novice);
        assert!(merged.show_hitboxes);
    }

    #[test]
    fn test_missing_settings_file_is_first_run() {
        let dir = persistence::scratch_dir("settings-missing");
        let path = dir.join("settings.json");
        let (settings, source) = Settings::load_from(&path);
        assert_eq!(settings, Settings::default());
        assert!(source.should_write_defaults());

        settings.save_to(&path).expect("save");
        let (_, source) = Settings::load_from(&path);
        assert!(matches!(source, SettingsSource::Saved));
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_malformed_settings_file_is_never_overwritten() {
        let dir = persistence::scratch_dir("settings-malformed");
        let path = dir.join("settings.json");
        let broken = r#"{"difficulty":"Master","show_hitboxes":true,}"#;
        std::fs::write(&path, broken).unwrap();

        let (settings, source) = Settings::load_from(&path);
        assert_eq!(settings, Settings::default());
        assert!(matches!(source, SettingsSource::Unreadable(_)));
        assert!(!source.should_write_defaults());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_partial_settings_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"difficulty":"Master"}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Master);
        assert_eq!(settings.mode, GameMode::Flappy);
        assert!(settings.log_filter.is_none());
    }
}
