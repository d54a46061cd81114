//! Error types for the core crate.
//!
//! `BoardError` marks contract violations by a caller (bad position, illegal
//! state transition). Expected gameplay no-ops never produce errors; see
//! [`crate::round::IgnoreReason`].

use std::path::PathBuf;

use crate::types::{CellState, Position};

/// Board contract violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("position {position} is outside a board of {len} cells")]
    InvalidPosition { position: Position, len: usize },

    #[error("card at position {0} is already face up")]
    AlreadyRevealed(Position),

    #[error("card at position {0} is already matched")]
    AlreadyMatched(Position),

    #[error("card at position {position} cannot go from {from:?} to {to:?}")]
    InvalidTransition {
        position: Position,
        from: CellState,
        to: CellState,
    },
}

/// Symbol catalog construction error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("symbol catalog must contain at least one symbol")]
    Empty,
}

/// Round configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("mismatch penalty must be zero or negative, got {0}")]
    PositivePenalty(i32),
}

/// Persistence backend error
///
/// Raised by [`crate::hooks::PersistenceStore`] implementations. The round
/// controller logs and swallows these so a broken store never aborts a round.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("high score storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("high score storage is corrupt: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("high score storage unavailable: {0}")]
    Backend(String),
}
