//! Autoplay engine: scripted players that drive a [`RoundController`](core::RoundController)
//! headlessly, for simulations, benchmarks and soak tests.

pub mod autoplay;
pub mod player;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use autoplay::{play_round, play_session, AutoplayError};
pub use player::{Forgetful, PerfectMemory, Player, PlayerKind};
