//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of a memory card-matching round: the board,
//! the turn state machine, scoring and high-score bookkeeping. It does no
//! rendering, audio or file I/O itself; those go through the collaborator
//! traits in [`hooks`].
//!
//! - **Deterministic**: the same seed deals the same board
//! - **Non-blocking**: timed transitions are scheduled tokens, never sleeps
//! - **Headless**: runs in tests, simulators and any host event loop
//!
//! # Module Structure
//!
//! - [`board`]: card grid with per-cell visibility state
//! - [`catalog`]: symbol labels and how pair slots map onto them
//! - [`round`]: turn state machine, match evaluation, completion
//! - [`scoring`]: score deltas and high-score submission
//! - [`timer`]: timer tokens and the host-driven timer queue
//! - [`hooks`]: render, audio and persistence interfaces
//! - [`config`]: JSON round configuration
//!
//! # Round Rules
//!
//! | Event          | Score             | Cards                          |
//! |----------------|-------------------|--------------------------------|
//! | Pair matches   | +10               | locked as matched after 300ms  |
//! | Pair mismatch  | -2 (floor 0)      | turned face down after 1000ms  |
//! | Last pair      | -                 | round complete, high score set |
//!
//! # Example
//!
//! ```
//! use memory_match_core::{Board, Hooks, RoundConfig, RoundController, Selection};
//! use memory_match_core::types::{Difficulty, MATCH_HOLD_MS};
//!
//! let board = Board::from_layout(Difficulty::Easy, &[0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5]).unwrap();
//! let mut round = RoundController::with_board(RoundConfig::default(), Hooks::default(), board);
//!
//! round.select(0).unwrap();
//! let second = round.select(1).unwrap();
//! assert!(matches!(second, Selection::Matched { score: 10, .. }));
//!
//! round.tick(MATCH_HOLD_MS).unwrap();
//! assert_eq!(round.pairs_matched(), 1);
//! ```
//!
//! # Timing
//!
//! Call [`RoundController::tick`] every frame with the elapsed time, or
//! plug in a [`TimerService`] backed by a real event loop and call
//! [`RoundController::fire`] when a token comes due.

pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub mod hooks;
pub mod rng;
pub mod round;
pub mod scoring;
pub mod snapshot;
pub mod timer;

pub use memory_match_types as types;

pub use board::{Board, Cell};
pub use catalog::{SymbolCatalog, DEFAULT_SYMBOLS};
pub use config::RoundConfig;
pub use error::{BoardError, CatalogError, ConfigError, StoreError};
pub use hooks::{
    AudioSink, EventLog, Hooks, MemoryStore, NullSink, PersistenceStore, RenderSink, RoundEvent,
};
pub use rng::DeckRng;
pub use round::{IgnoreReason, RoundController, RoundOutcome, RoundState, RoundStats, Selection};
pub use scoring::{apply_delta, is_new_high_score, submit_high_score, HighScoreUpdate};
pub use snapshot::{CellSnapshot, RoundSnapshot};
pub use timer::{TimerQueue, TimerService, TimerToken};
