//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond lookups, making them
//! usable in any context (core logic, autoplay engines, persistence, hosts).
//!
//! # Board Dimensions
//!
//! | Difficulty | Cards | Pairs | Grid (columns x rows) |
//! |------------|-------|-------|------------------------|
//! | Easy       | 12    | 6     | 4 x 3                  |
//! | Hard       | 20    | 10    | 5 x 4                  |
//!
//! Positions are row-major: `position = row * columns + column`.
//!
//! # Gameplay Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep used by headless drivers |
//! | `HIDE_DELAY_MS` | 1000 | Time a mismatched pair stays face up |
//! | `MATCH_HOLD_MS` | 300 | Presentation hold before a pair locks as matched |
//! | `MATCH_POINTS` | 10 | Score awarded per matched pair |
//! | `MISMATCH_PENALTY` | -2 | Score change per mismatch (floored at zero) |
//!
//! # Examples
//!
//! ```
//! use memory_match_types::{CellState, Difficulty, Phase};
//!
//! let difficulty = Difficulty::from_str("HARD").unwrap();
//! assert_eq!(difficulty, Difficulty::Hard);
//! assert_eq!(difficulty.card_count(), 20);
//! assert_eq!(difficulty.pair_count(), 10);
//! assert_eq!(difficulty.grid_coords(7), Some((2, 1)));
//!
//! assert!(CellState::Matched.is_face_up());
//! assert!(Phase::AwaitingSecond.accepts_selection());
//! assert!(!Phase::Processing.accepts_selection());
//! ```

use serde::{Deserialize, Serialize};

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Delay before a mismatched pair is turned face down again
pub const HIDE_DELAY_MS: u32 = 1000;

/// Display hold before a matched pair is locked in
pub const MATCH_HOLD_MS: u32 = 300;

/// Points awarded for each matched pair
pub const MATCH_POINTS: u32 = 10;

/// Score delta applied on a mismatch
pub const MISMATCH_PENALTY: i32 = -2;

/// Largest card count of any difficulty
pub const MAX_CARDS: usize = 20;

/// Index of a cell on the board, `0..card_count`
pub type Position = u8;

/// Opaque symbol id, an index into a symbol catalog
pub type Symbol = u16;

/// Board size presets
///
/// - **Easy**: 12 cards (6 pairs) on a 4x3 grid
/// - **Hard**: 20 cards (10 pairs) on a 5x4 grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    /// Parse difficulty from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use memory_match_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_str("Hard"), Some(Difficulty::Hard));
    /// assert_eq!(Difficulty::from_str("expert"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        }
    }

    /// Total number of cards on the board
    pub fn card_count(&self) -> usize {
        match self {
            Difficulty::Easy => 12,
            Difficulty::Hard => 20,
        }
    }

    /// Number of pairs to find
    pub fn pair_count(&self) -> usize {
        self.card_count() / 2
    }

    /// Grid columns
    pub fn columns(&self) -> u8 {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Hard => 5,
        }
    }

    /// Grid rows
    pub fn rows(&self) -> u8 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Hard => 4,
        }
    }

    /// Map a position to its `(column, row)` on the grid
    ///
    /// Returns `None` when the position is outside the board.
    pub fn grid_coords(&self, position: Position) -> Option<(u8, u8)> {
        if position as usize >= self.card_count() {
            return None;
        }
        let columns = self.columns();
        Some((position % columns, position / columns))
    }
}

/// Visibility state of a single card
///
/// The only legal transitions are:
/// - `Hidden -> Revealed` (reveal)
/// - `Revealed -> Hidden` (hide after a mismatch)
/// - `Revealed -> Matched` (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Matched,
}

impl CellState {
    /// Whether the symbol is visible to the player
    pub fn is_face_up(&self) -> bool {
        !matches!(self, CellState::Hidden)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CellState::Hidden => "hidden",
            CellState::Revealed => "revealed",
            CellState::Matched => "matched",
        }
    }
}

/// Turn phase of a round
///
/// - **Idle**: no card is face up for the current turn
/// - **AwaitingSecond**: one card is face up, waiting for its partner
/// - **Processing**: a hide or match-hold timer is pending; selections are ignored
/// - **Complete**: every pair has been found (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Idle,
    AwaitingSecond,
    Processing,
    Complete,
}

impl Phase {
    /// Whether `select` can change state in this phase
    pub fn accepts_selection(&self) -> bool {
        matches!(self, Phase::Idle | Phase::AwaitingSecond)
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::AwaitingSecond => "awaitingSecond",
            Phase::Processing => "processing",
            Phase::Complete => "complete",
        }
    }
}
