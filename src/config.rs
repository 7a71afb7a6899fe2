//! Startup configuration, loaded from `config.ron` in the current directory.
//!
//! Every field has a default, so a missing or partial file just works and an
//! invalid one logs a warning and falls back to defaults. This is startup
//! choice only (difficulty, seed, storage path, bell). The game's tuning
//! constants are not a level-design surface and stay compiled in.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Starting difficulty level, 1-3.
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    /// Fixed RNG seed; omit for a clock-derived one.
    #[serde(default)]
    pub seed: Option<u32>,
    /// Where the high-score table lives.
    #[serde(default = "default_scores_path")]
    pub scores_path: String,
    /// Ring the terminal bell on explosions and bumps.
    #[serde(default = "default_true")]
    pub bell: bool,
}

fn default_difficulty() -> u8 {
    2
}

fn default_scores_path() -> String {
    "rockfall-scores.txt".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            seed: None,
            scores_path: default_scores_path(),
            bell: default_true(),
        }
    }
}

impl Config {
    /// Load from `config.ron`; missing or invalid files yield defaults.
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(data) = std::fs::read_to_string(&path) {
            match ron::from_str(&data) {
                Ok(config) => return config,
                Err(err) => log::warn!("invalid config at {:?}: {}, using defaults", path, err),
            }
        }
        Self::default()
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.ron")
}
