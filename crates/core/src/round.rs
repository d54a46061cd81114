//! Round controller - the turn state machine
//!
//! One `RoundController` drives one round at a time over a [`Board`]:
//! it accepts selections, compares pairs, applies scoring, schedules the
//! timed hide / match-hold transitions and reports completion.
//!
//! ```text
//!            select             select (match)          hold fires
//!   Idle ────────────▶ AwaitingSecond ──────────▶ Processing ──────────▶ Idle / Complete
//!     ▲                      │ select (mismatch)        ▲
//!     │                      └──────────────────────────┘
//!     └──────────────────────── hide fires ─────────────┘
//! ```
//!
//! While `Processing` or `Complete`, selections are ignored. Resetting
//! swaps in a fresh round with the next epoch; any timer token from an
//! earlier epoch is dropped when it fires. Tokens also carry the id of the
//! controller that scheduled them, so a timer service shared between
//! controllers never hands one controller's transition to another.

use std::sync::atomic::{AtomicU32, Ordering};

use log::{debug, info, warn};
use serde::Serialize;

use crate::board::Board;
use crate::catalog::SymbolCatalog;
use crate::config::RoundConfig;
use crate::error::BoardError;
use crate::hooks::Hooks;
use crate::rng::DeckRng;
use crate::scoring::{apply_delta, submit_high_score};
use crate::snapshot::{CellSnapshot, RoundSnapshot};
use crate::timer::TimerToken;
use crate::types::{CellState, Phase, Position, Symbol};

static NEXT_CONTROLLER_ID: AtomicU32 = AtomicU32::new(0);

/// Mutable turn state of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundState {
    pub first_selection: Option<Position>,
    pub score: u32,
    pub pairs_matched: usize,
    /// A hide or hold timer is pending
    pub processing: bool,
}

/// Per-round counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RoundStats {
    pub selections: u32,
    pub matches: u32,
    pub mismatches: u32,
}

/// Why a selection changed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Processing,
    Complete,
    SameCard,
    AlreadyRevealed,
    AlreadyMatched,
}

/// Result of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Ignored(IgnoreReason),
    /// First card of a turn is face up
    First { position: Position, symbol: Symbol },
    /// Second card matched the first; the pair locks when the hold ends
    Matched {
        first: Position,
        second: Position,
        symbol: Symbol,
        score: u32,
    },
    /// Second card differs; both hide when the delay ends
    Mismatched {
        first: Position,
        second: Position,
        score: u32,
    },
}

impl Selection {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Selection::Ignored(_))
    }
}

/// Final report of a completed round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundOutcome {
    pub epoch: u32,
    pub final_score: u32,
    /// High score stored before this round; `None` if the store failed
    pub previous_high_score: Option<u32>,
    pub new_high_score: bool,
    /// The store accepted the submission
    pub high_score_saved: bool,
    pub stats: RoundStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingKind {
    Hide,
    Hold,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    token: TimerToken,
    kind: PendingKind,
    pair: [Position; 2],
}

/// Everything that belongs to a single round
#[derive(Debug, Clone)]
struct Round {
    epoch: u32,
    /// `None` for prepared boards
    seed: Option<u64>,
    board: Board,
    state: RoundState,
    stats: RoundStats,
    pending: Option<Pending>,
    outcome: Option<RoundOutcome>,
}

impl Round {
    fn new(epoch: u32, seed: Option<u64>, board: Board) -> Self {
        Self {
            epoch,
            seed,
            board,
            state: RoundState::default(),
            stats: RoundStats::default(),
            pending: None,
            outcome: None,
        }
    }
}

/// Drives rounds over a board and reports to the injected collaborators
pub struct RoundController {
    /// Process-unique, stamped on every timer token
    id: u32,
    config: RoundConfig,
    catalog: SymbolCatalog,
    /// Session stream; each reset draws the next round seed from it
    session_rng: DeckRng,
    round: Round,
    next_timer_id: u32,
    hooks: Hooks,
}

impl RoundController {
    /// Start a round with the default symbol catalog
    pub fn new(config: RoundConfig, hooks: Hooks) -> Self {
        Self::with_catalog(config, SymbolCatalog::default(), hooks)
    }

    /// Start a round dealing from `catalog`
    pub fn with_catalog(config: RoundConfig, catalog: SymbolCatalog, hooks: Hooks) -> Self {
        let seed = config.seed.unwrap_or_else(|| DeckRng::from_entropy().seed());
        let session_rng = DeckRng::new(seed);
        let board = Board::generate(config.difficulty, &catalog, &mut DeckRng::new(seed));
        debug!(
            "round 0: dealt {} cards (seed {seed})",
            config.difficulty.card_count()
        );

        Self {
            id: NEXT_CONTROLLER_ID.fetch_add(1, Ordering::Relaxed),
            config,
            catalog,
            session_rng,
            round: Round::new(0, Some(seed), board),
            next_timer_id: 0,
            hooks,
        }
    }

    /// Start a round on a prepared board
    ///
    /// The board's difficulty overrides `config.difficulty`. Later resets
    /// deal from the default catalog, seeded like [`Self::with_catalog`].
    pub fn with_board(mut config: RoundConfig, hooks: Hooks, board: Board) -> Self {
        config.difficulty = board.difficulty();
        let seed = config.seed.unwrap_or_else(|| DeckRng::from_entropy().seed());
        Self {
            id: NEXT_CONTROLLER_ID.fetch_add(1, Ordering::Relaxed),
            config,
            catalog: SymbolCatalog::default(),
            session_rng: DeckRng::new(seed),
            round: Round::new(0, None, board),
            next_timer_id: 0,
            hooks,
        }
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    pub fn board(&self) -> &Board {
        &self.round.board
    }

    pub fn state(&self) -> &RoundState {
        &self.round.state
    }

    pub fn stats(&self) -> RoundStats {
        self.round.stats
    }

    pub fn score(&self) -> u32 {
        self.round.state.score
    }

    pub fn pairs_matched(&self) -> usize {
        self.round.state.pairs_matched
    }

    pub fn pair_count(&self) -> usize {
        self.round.board.len() / 2
    }

    /// Round generation, incremented on every reset
    pub fn epoch(&self) -> u32 {
        self.round.epoch
    }

    /// Seed the current board was dealt from; `None` for a prepared board
    pub fn seed(&self) -> Option<u64> {
        self.round.seed
    }

    /// Seed of the session stream that deals boards on reset
    pub fn session_seed(&self) -> u64 {
        self.session_rng.seed()
    }

    pub fn is_complete(&self) -> bool {
        self.round.state.pairs_matched == self.pair_count()
    }

    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.round.outcome.as_ref()
    }

    /// Token of the pending hide / hold transition
    pub fn pending_token(&self) -> Option<TimerToken> {
        self.round.pending.map(|p| p.token)
    }

    pub fn phase(&self) -> Phase {
        let state = &self.round.state;
        if self.is_complete() {
            Phase::Complete
        } else if state.processing {
            Phase::Processing
        } else if state.first_selection.is_some() {
            Phase::AwaitingSecond
        } else {
            Phase::Idle
        }
    }

    /// Select the card at `position`
    ///
    /// Expected no-ops (busy, finished, same card, face-up card) return
    /// `Selection::Ignored`. An out-of-range position is an error.
    pub fn select(&mut self, position: Position) -> Result<Selection, BoardError> {
        let Some(cell_state) = self.round.board.state(position) else {
            return Err(BoardError::InvalidPosition {
                position,
                len: self.round.board.len(),
            });
        };

        if let Some(reason) = self.ignore_reason(position, cell_state) {
            debug!("select {position} ignored: {reason:?}");
            return Ok(Selection::Ignored(reason));
        }

        let symbol = self.round.board.reveal(position)?;
        self.round.stats.selections += 1;
        if self.config.sound_enabled {
            self.hooks.audio.card_flip();
        }
        self.hooks.render.on_card_revealed(position, symbol);

        let Some(first) = self.round.state.first_selection else {
            self.round.state.first_selection = Some(position);
            debug!("select {position}: first card, symbol {symbol}");
            return Ok(Selection::First { position, symbol });
        };

        let first_symbol = self
            .round
            .board
            .symbol(first)
            .ok_or(BoardError::InvalidPosition {
                position: first,
                len: self.round.board.len(),
            })?;
        self.round.state.processing = true;

        if symbol == first_symbol {
            self.on_pair_matched(first, position, symbol)
        } else {
            Ok(self.on_pair_mismatched(first, position))
        }
    }

    fn ignore_reason(&self, position: Position, cell_state: CellState) -> Option<IgnoreReason> {
        if self.is_complete() {
            return Some(IgnoreReason::Complete);
        }
        if self.round.state.processing {
            return Some(IgnoreReason::Processing);
        }
        if self.round.state.first_selection == Some(position) {
            return Some(IgnoreReason::SameCard);
        }
        match cell_state {
            CellState::Hidden => None,
            CellState::Revealed => Some(IgnoreReason::AlreadyRevealed),
            CellState::Matched => Some(IgnoreReason::AlreadyMatched),
        }
    }

    fn on_pair_matched(
        &mut self,
        first: Position,
        second: Position,
        symbol: Symbol,
    ) -> Result<Selection, BoardError> {
        if self.config.sound_enabled {
            self.hooks.audio.match_found();
        }

        let score = apply_delta(self.round.state.score, self.config.match_points as i32);
        self.round.state.score = score;
        self.round.stats.matches += 1;
        debug!("match {first}/{second} (symbol {symbol}), score {score}");
        self.hooks.render.on_match(first, second, score);
        self.hooks.render.on_score_changed(score);

        if self.config.match_hold_ms == 0 {
            self.lock_match([first, second])?;
        } else {
            self.schedule(PendingKind::Hold, [first, second], self.config.match_hold_ms);
        }

        Ok(Selection::Matched {
            first,
            second,
            symbol,
            score,
        })
    }

    fn on_pair_mismatched(&mut self, first: Position, second: Position) -> Selection {
        if self.config.sound_enabled {
            self.hooks.audio.mismatch();
        }

        let score = apply_delta(self.round.state.score, self.config.mismatch_penalty);
        self.round.state.score = score;
        self.round.stats.mismatches += 1;
        debug!("mismatch {first}/{second}, score {score}");
        self.hooks.render.on_mismatch(first, second, score);
        self.hooks.render.on_score_changed(score);

        self.schedule(PendingKind::Hide, [first, second], self.config.hide_delay_ms);

        Selection::Mismatched {
            first,
            second,
            score,
        }
    }

    fn schedule(&mut self, kind: PendingKind, pair: [Position; 2], delay_ms: u32) {
        let token = TimerToken {
            owner: self.id,
            epoch: self.round.epoch,
            id: self.next_timer_id,
        };
        self.next_timer_id = self.next_timer_id.wrapping_add(1);
        self.round.pending = Some(Pending { token, kind, pair });
        self.hooks.timers.schedule(delay_ms, token);
    }

    /// Apply the transition behind a fired timer
    ///
    /// Returns `Ok(false)` for tokens that are not the current round's
    /// pending transition (stale epoch, cancelled or already applied).
    pub fn fire(&mut self, token: TimerToken) -> Result<bool, BoardError> {
        if token.owner != self.id {
            debug!("timer {token} dropped: scheduled by controller {}", token.owner);
            return Ok(false);
        }
        if token.epoch != self.round.epoch {
            debug!("timer {token} dropped: round is at epoch {}", self.round.epoch);
            return Ok(false);
        }
        let Some(pending) = self.round.pending.filter(|p| p.token == token) else {
            debug!("timer {token} dropped: not pending");
            return Ok(false);
        };
        self.round.pending = None;

        match pending.kind {
            PendingKind::Hide => self.hide_pair(pending.pair)?,
            PendingKind::Hold => self.lock_match(pending.pair)?,
        }
        Ok(true)
    }

    /// Advance the timer service and apply every due transition
    ///
    /// Returns how many transitions were applied.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<usize, BoardError> {
        self.hooks.timers.advance(elapsed_ms);
        let mut applied = 0;
        while let Some(token) = self.hooks.timers.poll_due() {
            if self.fire(token)? {
                applied += 1;
            }
        }
        Ok(applied)
    }

    fn hide_pair(&mut self, pair: [Position; 2]) -> Result<(), BoardError> {
        for position in pair {
            self.round.board.hide(position)?;
            self.hooks.render.on_card_hidden(position);
        }
        let state = &mut self.round.state;
        state.first_selection = None;
        state.processing = false;
        Ok(())
    }

    fn lock_match(&mut self, pair: [Position; 2]) -> Result<(), BoardError> {
        for position in pair {
            self.round.board.mark_matched(position)?;
        }
        self.hooks.render.on_match_highlighted(pair);

        let state = &mut self.round.state;
        state.pairs_matched += 1;
        state.first_selection = None;
        state.processing = false;

        if self.is_complete() {
            self.finish();
        }
        Ok(())
    }

    fn finish(&mut self) {
        debug_assert!(self.round.board.all_matched());
        let final_score = self.round.state.score;
        self.hooks.render.on_round_complete(final_score);

        let scope = self.config.high_score_scope().to_string();
        let (previous_high_score, new_high_score) =
            match submit_high_score(self.hooks.store.as_mut(), &scope, final_score) {
                Ok(update) => (Some(update.previous), update.written),
                Err(err) => {
                    warn!("could not record high score for {scope}: {err}");
                    (None, false)
                }
            };

        if new_high_score {
            info!("round {} complete: new {scope} high score {final_score}", self.round.epoch);
        } else {
            info!("round {} complete: score {final_score}", self.round.epoch);
        }

        self.round.outcome = Some(RoundOutcome {
            epoch: self.round.epoch,
            final_score,
            previous_high_score,
            new_high_score,
            high_score_saved: previous_high_score.is_some(),
            stats: self.round.stats,
        });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.round.pending.take() {
            self.hooks.timers.cancel(pending.token);
        }
    }

    /// Replace the round with a freshly dealt one
    ///
    /// Cancels the pending timer; a token from the old round that still
    /// fires is ignored.
    pub fn reset(&mut self) {
        let seed = self.session_rng.next_seed();
        let board = Board::generate(
            self.config.difficulty,
            &self.catalog,
            &mut DeckRng::new(seed),
        );
        self.install(Some(seed), board);
    }

    /// Replace the round with one played on `board`
    pub fn reset_with_board(&mut self, board: Board) {
        self.config.difficulty = board.difficulty();
        self.install(None, board);
    }

    fn install(&mut self, seed: Option<u64>, board: Board) {
        self.cancel_pending();
        let epoch = self.round.epoch.wrapping_add(1);
        self.round = Round::new(epoch, seed, board);
        debug!("round {epoch}: reset (seed {seed:?})");
    }

    /// High score currently stored for this controller's scope
    pub fn high_score(&self) -> Option<u32> {
        let scope = self.config.high_score_scope();
        match self.hooks.store.get_high_score(scope) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("could not read high score for {scope}: {err}");
                None
            }
        }
    }

    /// Host-facing view of the round; symbols of face-down cards are withheld
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            difficulty: self.config.difficulty,
            epoch: self.round.epoch,
            seed: self.round.seed,
            cells: self
                .round
                .board
                .cells()
                .iter()
                .map(CellSnapshot::from)
                .collect(),
            score: self.round.state.score,
            pairs_matched: self.round.state.pairs_matched,
            pair_count: self.pair_count(),
            phase: self.phase(),
            first_selection: self.round.state.first_selection,
            stats: self.round.stats,
        }
    }
}

impl Drop for RoundController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{TimerQueue, TimerService};
    use crate::types::{Difficulty, HIDE_DELAY_MS, MATCH_HOLD_MS};

    /// Pairs sit next to each other: (0,1), (2,3), ...
    fn paired_board() -> Board {
        Board::from_layout(Difficulty::Easy, &[0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5]).unwrap()
    }

    fn controller() -> RoundController {
        RoundController::with_board(RoundConfig::default(), Hooks::default(), paired_board())
    }

    #[test]
    fn test_new_controller() {
        let ctl = RoundController::new(RoundConfig::default().with_seed(9), Hooks::default());
        assert_eq!(ctl.phase(), Phase::Idle);
        assert_eq!(ctl.score(), 0);
        assert_eq!(ctl.pair_count(), 6);
        assert_eq!(ctl.epoch(), 0);
        assert_eq!(ctl.seed(), Some(9));
        assert_eq!(ctl.session_seed(), 9);
        assert!(ctl.pending_token().is_none());
    }

    #[test]
    fn test_same_seed_deals_same_board() {
        let a = RoundController::new(RoundConfig::default().with_seed(77), Hooks::default());
        let b = RoundController::new(RoundConfig::default().with_seed(77), Hooks::default());
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_first_selection() {
        let mut ctl = controller();
        let sel = ctl.select(4).unwrap();
        assert_eq!(sel, Selection::First { position: 4, symbol: 2 });
        assert_eq!(ctl.phase(), Phase::AwaitingSecond);
        assert_eq!(ctl.state().first_selection, Some(4));
        assert_eq!(ctl.board().state(4), Some(CellState::Revealed));
    }

    #[test]
    fn test_reselect_first_is_noop() {
        let mut ctl = controller();
        ctl.select(0).unwrap();
        let before = *ctl.state();
        assert_eq!(
            ctl.select(0).unwrap(),
            Selection::Ignored(IgnoreReason::SameCard)
        );
        assert_eq!(*ctl.state(), before);
        assert_eq!(ctl.stats().selections, 1);
    }

    #[test]
    fn test_invalid_position_is_error() {
        let mut ctl = controller();
        assert_eq!(
            ctl.select(12),
            Err(BoardError::InvalidPosition {
                position: 12,
                len: 12
            })
        );
    }

    #[test]
    fn test_match_holds_then_locks() {
        let mut ctl = controller();
        ctl.select(0).unwrap();
        let sel = ctl.select(1).unwrap();
        assert!(matches!(sel, Selection::Matched { score: 10, .. }));
        assert_eq!(ctl.phase(), Phase::Processing);
        assert_eq!(ctl.score(), 10);
        assert_eq!(ctl.pairs_matched(), 0);

        assert_eq!(ctl.tick(MATCH_HOLD_MS - 1).unwrap(), 0);
        assert_eq!(ctl.tick(1).unwrap(), 1);
        assert_eq!(ctl.board().state(0), Some(CellState::Matched));
        assert_eq!(ctl.board().state(1), Some(CellState::Matched));
        assert_eq!(ctl.pairs_matched(), 1);
        assert_eq!(ctl.phase(), Phase::Idle);
    }

    #[test]
    fn test_zero_hold_locks_synchronously() {
        let config = RoundConfig {
            match_hold_ms: 0,
            ..RoundConfig::default()
        };
        let mut ctl = RoundController::with_board(config, Hooks::default(), paired_board());
        ctl.select(2).unwrap();
        ctl.select(3).unwrap();
        assert_eq!(ctl.pairs_matched(), 1);
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(ctl.pending_token().is_none());
    }

    #[test]
    fn test_mismatch_penalty_and_hide() {
        let mut ctl = controller();
        ctl.select(0).unwrap();
        let sel = ctl.select(2).unwrap();
        assert_eq!(
            sel,
            Selection::Mismatched {
                first: 0,
                second: 2,
                score: 0
            }
        );
        assert_eq!(ctl.phase(), Phase::Processing);

        // Ignored while processing
        assert_eq!(
            ctl.select(5).unwrap(),
            Selection::Ignored(IgnoreReason::Processing)
        );

        ctl.tick(HIDE_DELAY_MS).unwrap();
        assert_eq!(ctl.board().state(0), Some(CellState::Hidden));
        assert_eq!(ctl.board().state(2), Some(CellState::Hidden));
        assert_eq!(ctl.state().first_selection, None);
        assert_eq!(ctl.phase(), Phase::Idle);
    }

    #[test]
    fn test_penalty_after_match() {
        let config = RoundConfig {
            match_hold_ms: 0,
            ..RoundConfig::default()
        };
        let mut ctl = RoundController::with_board(config, Hooks::default(), paired_board());
        ctl.select(0).unwrap();
        ctl.select(1).unwrap();
        ctl.select(2).unwrap();
        ctl.select(4).unwrap();
        assert_eq!(ctl.score(), 8);
    }

    #[test]
    fn test_matched_cell_selection_ignored() {
        let mut ctl = controller();
        ctl.select(0).unwrap();
        ctl.select(1).unwrap();
        ctl.tick(MATCH_HOLD_MS).unwrap();
        assert_eq!(
            ctl.select(1).unwrap(),
            Selection::Ignored(IgnoreReason::AlreadyMatched)
        );
    }

    #[test]
    fn test_completion_and_outcome() {
        let mut ctl = controller();
        for pair in 0..6u8 {
            ctl.select(pair * 2).unwrap();
            ctl.select(pair * 2 + 1).unwrap();
            ctl.tick(MATCH_HOLD_MS).unwrap();
        }
        assert!(ctl.is_complete());
        assert!(ctl.board().all_matched());
        assert_eq!(ctl.phase(), Phase::Complete);

        let outcome = ctl.outcome().copied().unwrap();
        assert_eq!(outcome.final_score, 60);
        assert_eq!(outcome.previous_high_score, Some(0));
        assert!(outcome.new_high_score);
        assert!(outcome.high_score_saved);
        assert_eq!(ctl.high_score(), Some(60));

        assert_eq!(
            ctl.select(0).unwrap(),
            Selection::Ignored(IgnoreReason::Complete)
        );
    }

    #[test]
    fn test_reset_bumps_epoch_and_drops_stale_timer() {
        let mut ctl = controller();
        ctl.select(0).unwrap();
        ctl.select(2).unwrap();
        let stale = ctl.pending_token().unwrap();

        ctl.reset();
        assert_eq!(ctl.epoch(), 1);
        assert_eq!(ctl.phase(), Phase::Idle);
        assert!(ctl.pending_token().is_none());

        let before = ctl.board().clone();
        assert_eq!(ctl.fire(stale), Ok(false));
        assert_eq!(*ctl.board(), before);
    }

    #[test]
    fn test_reset_is_reproducible_from_seed() {
        let config = RoundConfig::default().with_seed(5);
        let mut a = RoundController::new(config.clone(), Hooks::default());
        let mut b = RoundController::new(config, Hooks::default());
        a.reset();
        b.reset();
        assert_eq!(a.seed(), b.seed());
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_drop_cancels_pending_timer() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let timers = Rc::new(RefCell::new(TimerQueue::new()));
        let hooks = Hooks::default().with_timers(timers.clone());
        let mut ctl = RoundController::with_board(RoundConfig::default(), hooks, paired_board());
        ctl.select(0).unwrap();
        ctl.select(2).unwrap();
        assert_eq!(timers.borrow().len(), 1);

        drop(ctl);
        assert!(timers.borrow().is_empty());
    }

    #[test]
    fn test_token_from_dropped_controller_is_ignored() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let timers = Rc::new(RefCell::new(TimerQueue::new()));
        let hooks = Hooks::default().with_timers(timers.clone());
        let mut old = RoundController::with_board(RoundConfig::default(), hooks, paired_board());
        old.select(0).unwrap();
        old.select(2).unwrap();
        let stale = old.pending_token().unwrap();
        drop(old);

        let hooks = Hooks::default().with_timers(timers.clone());
        let mut ctl = RoundController::with_board(RoundConfig::default(), hooks, paired_board());
        ctl.select(0).unwrap();
        ctl.select(2).unwrap();
        let fresh = ctl.pending_token().unwrap();
        assert_eq!((stale.epoch, stale.id), (fresh.epoch, fresh.id));
        assert_ne!(stale, fresh);

        // The old controller's host timer was never told to stop
        timers.borrow_mut().schedule(0, stale);
        assert_eq!(ctl.tick(0), Ok(0));
        assert_eq!(ctl.fire(stale), Ok(false));
        assert_eq!(ctl.board().state(0), Some(CellState::Revealed));
        assert_eq!(ctl.board().state(2), Some(CellState::Revealed));
        assert_eq!(ctl.phase(), Phase::Processing);
        assert_eq!(ctl.pending_token(), Some(fresh));

        assert_eq!(ctl.tick(HIDE_DELAY_MS), Ok(1));
        assert_eq!(ctl.board().state(0), Some(CellState::Hidden));
    }

    #[test]
    fn test_unseeded_prepared_board_draws_session_seed() {
        let mut a = controller();
        let mut b = controller();
        assert_eq!(a.seed(), None);
        assert_ne!(a.session_seed(), b.session_seed());

        a.reset();
        b.reset();
        assert!(a.seed().is_some());
        assert_ne!(a.seed(), b.seed());
    }

    #[test]
    fn test_seeded_prepared_board_keeps_session_seed() {
        let config = RoundConfig::default().with_seed(21);
        let mut a = RoundController::with_board(config.clone(), Hooks::default(), paired_board());
        let mut b = RoundController::with_board(config, Hooks::default(), paired_board());
        assert_eq!(a.session_seed(), 21);

        a.reset();
        b.reset();
        assert_eq!(a.seed(), b.seed());
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_reset_with_board_clears_seed() {
        let mut ctl = RoundController::new(RoundConfig::default().with_seed(4), Hooks::default());
        assert_eq!(ctl.seed(), Some(4));

        ctl.reset_with_board(paired_board());
        assert_eq!(ctl.seed(), None);
        assert_eq!(ctl.snapshot().seed, None);
        assert_eq!(ctl.epoch(), 1);

        ctl.reset();
        assert!(ctl.seed().is_some());
        assert_eq!(ctl.snapshot().seed, ctl.seed());
    }
}
