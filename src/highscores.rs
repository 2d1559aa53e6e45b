//! High score persistence
//!
//! A single numeric value in a small JSON file, read at the menu and written
//! at game over - always outside the simulation tick. A missing or corrupt
//! file degrades to zero with a logged note; it never fails the game.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default file name next to the executable
pub const HIGH_SCORE_FILE: &str = "high_score.json";

/// The persisted best score
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HighScore {
    #[serde(rename = "high_score")]
    pub score: u64,
}

impl HighScore {
    /// Load from a JSON file; missing or unreadable data yields zero
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(scores) => scores,
                Err(err) => {
                    log::warn!("corrupt high score file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no high score file at {}, starting fresh", path.display());
                Self::default()
            }
        }
    }

    /// Persist to a JSON file; best-effort, errors are logged
    pub fn save(&self, path: &Path) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("failed to save high score to {}: {err}", path.display());
                } else {
                    log::info!("high score saved ({})", self.score);
                }
            }
            Err(err) => log::warn!("failed to encode high score: {err}"),
        }
    }

    /// Whether a run's final score beats the stored best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.score
    }

    /// Record a final score; returns true if it became the new best
    pub fn record(&mut self, score: u64) -> bool {
        if self.qualifies(score) {
            self.score = score;
            true
        } else {
            false
        }
    }
}
