//! Collaborator interfaces the round controller calls into
//!
//! The controller owns no rendering, audio or storage. Hosts plug those in
//! through the traits below; every sink method has a no-op default so a host
//! only implements what it needs.
//!
//! Sinks shared with the host (to inspect them after the controller has
//! taken ownership) can be passed as `Rc<RefCell<T>>`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;

use crate::error::StoreError;
use crate::timer::{TimerQueue, TimerService};
use crate::types::{Position, Symbol};

/// Visual notifications
pub trait RenderSink {
    fn on_card_revealed(&mut self, _position: Position, _symbol: Symbol) {}
    fn on_card_hidden(&mut self, _position: Position) {}
    fn on_match_highlighted(&mut self, _positions: [Position; 2]) {}
    fn on_match(&mut self, _first: Position, _second: Position, _score: u32) {}
    fn on_mismatch(&mut self, _first: Position, _second: Position, _score: u32) {}
    fn on_score_changed(&mut self, _score: u32) {}
    fn on_round_complete(&mut self, _final_score: u32) {}
}

/// Sound cues, fire-and-forget
///
/// Implementations must swallow their own playback failures.
pub trait AudioSink {
    fn card_flip(&mut self) {}
    fn match_found(&mut self) {}
    fn mismatch(&mut self) {}
}

/// High score storage keyed by scope (difficulty or profile)
pub trait PersistenceStore {
    /// Stored high score, `0` when nothing was stored yet
    fn get_high_score(&self, scope: &str) -> Result<u32, StoreError>;
    fn set_high_score(&mut self, scope: &str, value: u32) -> Result<(), StoreError>;
}

impl<T: RenderSink + ?Sized> RenderSink for Rc<RefCell<T>> {
    fn on_card_revealed(&mut self, position: Position, symbol: Symbol) {
        self.borrow_mut().on_card_revealed(position, symbol);
    }
    fn on_card_hidden(&mut self, position: Position) {
        self.borrow_mut().on_card_hidden(position);
    }
    fn on_match_highlighted(&mut self, positions: [Position; 2]) {
        self.borrow_mut().on_match_highlighted(positions);
    }
    fn on_match(&mut self, first: Position, second: Position, score: u32) {
        self.borrow_mut().on_match(first, second, score);
    }
    fn on_mismatch(&mut self, first: Position, second: Position, score: u32) {
        self.borrow_mut().on_mismatch(first, second, score);
    }
    fn on_score_changed(&mut self, score: u32) {
        self.borrow_mut().on_score_changed(score);
    }
    fn on_round_complete(&mut self, final_score: u32) {
        self.borrow_mut().on_round_complete(final_score);
    }
}

impl<T: AudioSink + ?Sized> AudioSink for Rc<RefCell<T>> {
    fn card_flip(&mut self) {
        self.borrow_mut().card_flip();
    }
    fn match_found(&mut self) {
        self.borrow_mut().match_found();
    }
    fn mismatch(&mut self) {
        self.borrow_mut().mismatch();
    }
}

impl<T: PersistenceStore + ?Sized> PersistenceStore for Rc<RefCell<T>> {
    fn get_high_score(&self, scope: &str) -> Result<u32, StoreError> {
        self.borrow().get_high_score(scope)
    }
    fn set_high_score(&mut self, scope: &str, value: u32) -> Result<(), StoreError> {
        self.borrow_mut().set_high_score(scope, value)
    }
}

/// Sink that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {}
impl AudioSink for NullSink {}

/// Everything the controller reported, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum RoundEvent {
    CardRevealed { position: Position, symbol: Symbol },
    CardHidden { position: Position },
    MatchHighlighted { positions: [Position; 2] },
    Match { first: Position, second: Position, score: u32 },
    Mismatch { first: Position, second: Position, score: u32 },
    ScoreChanged { score: u32 },
    RoundComplete { final_score: u32 },
    CardFlipSound,
    MatchSound,
    MismatchSound,
}

/// Recording sink, usable for both render and audio
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<RoundEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RoundEvent] {
        &self.events
    }

    /// Take and clear the recorded events.
    pub fn drain(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn count(&self, pred: impl Fn(&RoundEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl RenderSink for EventLog {
    fn on_card_revealed(&mut self, position: Position, symbol: Symbol) {
        self.events.push(RoundEvent::CardRevealed { position, symbol });
    }
    fn on_card_hidden(&mut self, position: Position) {
        self.events.push(RoundEvent::CardHidden { position });
    }
    fn on_match_highlighted(&mut self, positions: [Position; 2]) {
        self.events.push(RoundEvent::MatchHighlighted { positions });
    }
    fn on_match(&mut self, first: Position, second: Position, score: u32) {
        self.events.push(RoundEvent::Match {
            first,
            second,
            score,
        });
    }
    fn on_mismatch(&mut self, first: Position, second: Position, score: u32) {
        self.events.push(RoundEvent::Mismatch {
            first,
            second,
            score,
        });
    }
    fn on_score_changed(&mut self, score: u32) {
        self.events.push(RoundEvent::ScoreChanged { score });
    }
    fn on_round_complete(&mut self, final_score: u32) {
        self.events.push(RoundEvent::RoundComplete { final_score });
    }
}

impl AudioSink for EventLog {
    fn card_flip(&mut self) {
        self.events.push(RoundEvent::CardFlipSound);
    }
    fn match_found(&mut self) {
        self.events.push(RoundEvent::MatchSound);
    }
    fn mismatch(&mut self) {
        self.events.push(RoundEvent::MismatchSound);
    }
}

/// In-memory high score table
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: HashMap<String, u32>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one score
    pub fn with_score(scope: &str, value: u32) -> Self {
        let mut store = Self::new();
        store.scores.insert(scope.to_string(), value);
        store
    }

    /// Number of `set_high_score` calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PersistenceStore for MemoryStore {
    fn get_high_score(&self, scope: &str) -> Result<u32, StoreError> {
        Ok(self.scores.get(scope).copied().unwrap_or(0))
    }

    fn set_high_score(&mut self, scope: &str, value: u32) -> Result<(), StoreError> {
        self.scores.insert(scope.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}

/// Collaborators injected into a [`crate::RoundController`]
pub struct Hooks {
    pub render: Box<dyn RenderSink>,
    pub audio: Box<dyn AudioSink>,
    pub store: Box<dyn PersistenceStore>,
    pub timers: Box<dyn TimerService>,
}

impl Hooks {
    pub fn with_render(mut self, render: impl RenderSink + 'static) -> Self {
        self.render = Box::new(render);
        self
    }

    pub fn with_audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn with_store(mut self, store: impl PersistenceStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    pub fn with_timers(mut self, timers: impl TimerService + 'static) -> Self {
        self.timers = Box::new(timers);
        self
    }
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            render: Box::new(NullSink),
            audio: Box::new(NullSink),
            store: Box::new(MemoryStore::new()),
            timers: Box::new(TimerQueue::new()),
        }
    }
}
