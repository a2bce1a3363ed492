//! Runtime configuration read from the environment.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::FRAME_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seed for the piece bag.
    pub seed: u32,
    /// Frame cadence of the terminal scheduler, at least 1.
    pub frame_ms: u64,
    /// Optional JSONL event log.
    pub log_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            frame_ms: FRAME_MS,
            log_path: None,
        }
    }
}

impl Config {
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("TETRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let frame_ms = lookup("TETRIS_FRAME_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(FRAME_MS)
            .max(1);

        let log_path = lookup("TETRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            seed,
            frame_ms,
            log_path,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}
