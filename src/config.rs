//! Process configuration read from environment variables.
//!
//! - `MEMORY_SEED`: deck seed (u64). Unset or unparsable means a random seed.
//! - `MEMORY_LOG_DIR`: directory for the log file (default: `logs`)
//! - `MEMORY_LOG_DISABLED`: set to "1" or "true" to turn logging off

use std::env;
use std::path::PathBuf;

use rand::Rng;

pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: Option<u64>,
    pub log_dir: PathBuf,
    pub log_disabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_disabled: false,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a map instead of the process env).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = lookup("MEMORY_SEED").and_then(|s| s.trim().parse().ok());

        let log_dir = lookup("MEMORY_LOG_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        let log_disabled = lookup("MEMORY_LOG_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            seed,
            log_dir,
            log_disabled,
        }
    }

    /// The configured seed, or a fresh one from the thread RNG.
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }
}
