//! Scoring module - match rewards, mismatch penalties and high scores
//!
//! The score is unsigned and a penalty can never push it below zero.

use crate::error::StoreError;
use crate::hooks::PersistenceStore;

/// Apply a signed score delta, clamping at zero
pub fn apply_delta(score: u32, delta: i32) -> u32 {
    score.saturating_add_signed(delta)
}

/// Whether a finished round beats the stored high score
pub fn is_new_high_score(final_score: u32, stored: u32) -> bool {
    final_score > stored
}

/// Result of offering a final score to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighScoreUpdate {
    /// High score before this submission
    pub previous: u32,
    /// High score after this submission
    pub current: u32,
    /// Whether `set_high_score` was called
    pub written: bool,
}

/// Offer a final score for `scope`, writing it only when it beats the stored value
///
/// Replaying the same or a lower score reads the store and writes nothing.
pub fn submit_high_score(
    store: &mut dyn PersistenceStore,
    scope: &str,
    final_score: u32,
) -> Result<HighScoreUpdate, StoreError> {
    let previous = store.get_high_score(scope)?;
    if !is_new_high_score(final_score, previous) {
        return Ok(HighScoreUpdate {
            previous,
            current: previous,
            written: false,
        });
    }

    store.set_high_score(scope, final_score)?;
    Ok(HighScoreUpdate {
        previous,
        current: final_score,
        written: true,
    })
}
