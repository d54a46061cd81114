//! Timer module - deferred callbacks for hide and match-hold transitions
//!
//! The controller never blocks. When a pair needs time on screen it
//! schedules a [`TimerToken`] and goes on; when the token fires the
//! controller checks it against its single pending transition before
//! touching the board. Tokens carry the scheduling controller's id and
//! the round epoch, so a token that outlives a reset or its controller is
//! recognised as stale and dropped, even on a queue shared by several
//! controllers.
//!
//! Two ways to drive timers:
//!
//! - **Host-driven** ([`TimerQueue`]): the host calls
//!   [`crate::RoundController::tick`] every frame with the elapsed time,
//!   like a fixed-timestep game loop.
//! - **Event-loop-driven**: a host timer implementation schedules a real
//!   callback and calls [`crate::RoundController::fire`] with the token.

use std::fmt;

/// Identifies one scheduled transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    /// Controller that scheduled the timer, unique per process
    pub owner: u32,
    /// Round generation that scheduled the timer
    pub epoch: u32,
    /// Monotonic id within the controller
    pub id: u32,
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.owner, self.epoch, self.id)
    }
}

/// Deferred-callback service
pub trait TimerService {
    /// Arrange for `token` to fire once after `delay_ms`
    fn schedule(&mut self, delay_ms: u32, token: TimerToken);

    /// Drop a scheduled token; unknown tokens are ignored
    fn cancel(&mut self, token: TimerToken);

    /// Advance a host-driven clock. Event-loop-backed services ignore this.
    fn advance(&mut self, _elapsed_ms: u32) {}

    /// Pop the next due token, in scheduling order
    fn poll_due(&mut self) -> Option<TimerToken> {
        None
    }
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    token: TimerToken,
    remaining_ms: u32,
}

/// Deterministic timer queue advanced by the host
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    scheduled: Vec<Scheduled>,
    now_ms: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total time advanced so far
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of scheduled tokens, due or not
    pub fn len(&self) -> usize {
        self.scheduled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }

    /// Time left before `token` fires
    pub fn remaining_ms(&self, token: TimerToken) -> Option<u32> {
        self.scheduled
            .iter()
            .find(|s| s.token == token)
            .map(|s| s.remaining_ms)
    }
}

impl TimerService for TimerQueue {
    fn schedule(&mut self, delay_ms: u32, token: TimerToken) {
        self.scheduled.push(Scheduled {
            token,
            remaining_ms: delay_ms,
        });
    }

    fn cancel(&mut self, token: TimerToken) {
        self.scheduled.retain(|s| s.token != token);
    }

    fn advance(&mut self, elapsed_ms: u32) {
        self.now_ms += elapsed_ms as u64;
        for s in &mut self.scheduled {
            s.remaining_ms = s.remaining_ms.saturating_sub(elapsed_ms);
        }
    }

    fn poll_due(&mut self) -> Option<TimerToken> {
        let idx = self.scheduled.iter().position(|s| s.remaining_ms == 0)?;
        Some(self.scheduled.remove(idx).token)
    }
}

impl<T: TimerService + ?Sized> TimerService for std::rc::Rc<std::cell::RefCell<T>> {
    fn schedule(&mut self, delay_ms: u32, token: TimerToken) {
        self.borrow_mut().schedule(delay_ms, token);
    }
    fn cancel(&mut self, token: TimerToken) {
        self.borrow_mut().cancel(token);
    }
    fn advance(&mut self, elapsed_ms: u32) {
        self.borrow_mut().advance(elapsed_ms);
    }
    fn poll_due(&mut self) -> Option<TimerToken> {
        self.borrow_mut().poll_due()
    }
}
