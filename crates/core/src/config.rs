//! Round configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.
//!
//! ```
//! use memory_match_core::RoundConfig;
//! use memory_match_core::types::Difficulty;
//!
//! let config = RoundConfig::from_json_str(r#"{ "difficulty": "hard", "seed": 7 }"#).unwrap();
//! assert_eq!(config.difficulty, Difficulty::Hard);
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.match_points, 10);
//! assert_eq!(config.high_score_scope(), "hard");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    Difficulty, HIDE_DELAY_MS, MATCH_HOLD_MS, MATCH_POINTS, MISMATCH_PENALTY,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoundConfig {
    pub difficulty: Difficulty,
    /// Gates audio cues only
    pub sound_enabled: bool,
    pub match_points: u32,
    /// Zero or negative
    pub mismatch_penalty: i32,
    pub hide_delay_ms: u32,
    /// `0` resolves matches synchronously
    pub match_hold_ms: u32,
    /// Deck seed; `None` draws one from entropy
    pub seed: Option<u64>,
    /// High score key; `None` uses the difficulty name
    pub high_score_scope: Option<String>,
}

impl RoundConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn high_score_scope(&self) -> &str {
        self.high_score_scope
            .as_deref()
            .unwrap_or_else(|| self.difficulty.as_str())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mismatch_penalty > 0 {
            return Err(ConfigError::PositivePenalty(self.mismatch_penalty));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            sound_enabled: true,
            match_points: MATCH_POINTS,
            mismatch_penalty: MISMATCH_PENALTY,
            hide_delay_ms: HIDE_DELAY_MS,
            match_hold_ms: MATCH_HOLD_MS,
            seed: None,
            high_score_scope: None,
        }
    }
}
