use log::debug;
use thiserror::Error;

use crate::core::{BoardError, RoundController, RoundOutcome, Selection};
use crate::player::Player;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AutoplayError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("player {0} had no move on an unfinished round")]
    NoMove(&'static str),
    #[error("round not finished after {0} ticks")]
    Stalled(u32),
}

/// Drive one round to completion with `player`
///
/// Selects while the round accepts selections and advances the timers by
/// `tick_ms` otherwise. Gives up after `max_ticks` timer advances.
pub fn play_round(
    controller: &mut RoundController,
    player: &mut dyn Player,
    tick_ms: u32,
    max_ticks: u32,
) -> Result<RoundOutcome, AutoplayError> {
    let mut ticks = 0;
    while !controller.is_complete() {
        if controller.phase().accepts_selection() {
            let view = controller.snapshot();
            let position = player
                .choose(&view)
                .ok_or(AutoplayError::NoMove(player.name()))?;
            let selection = controller.select(position)?;
            observe(controller, player, selection);
            if !selection.is_ignored() && controller.phase().accepts_selection() {
                continue;
            }
        }

        if ticks >= max_ticks {
            return Err(AutoplayError::Stalled(ticks));
        }
        controller.tick(tick_ms)?;
        ticks += 1;
    }

    debug!("{} finished round {} after {ticks} ticks", player.name(), controller.epoch());
    controller
        .outcome()
        .copied()
        .ok_or(AutoplayError::Stalled(ticks))
}

fn observe(controller: &RoundController, player: &mut dyn Player, selection: Selection) {
    match selection {
        Selection::First { position, symbol } => player.observe(position, symbol),
        Selection::Matched { second, symbol, .. } => player.observe(second, symbol),
        Selection::Mismatched { second, .. } => {
            if let Some(symbol) = controller.board().symbol(second) {
                player.observe(second, symbol);
            }
        }
        Selection::Ignored(_) => {}
    }
}

/// Play `rounds` consecutive rounds, resetting in between
pub fn play_session(
    controller: &mut RoundController,
    player: &mut dyn Player,
    rounds: u32,
    tick_ms: u32,
    max_ticks: u32,
) -> Result<Vec<RoundOutcome>, AutoplayError> {
    let mut outcomes = Vec::with_capacity(rounds as usize);
    for round in 0..rounds {
        if round > 0 {
            controller.reset();
            player.forget();
        }
        outcomes.push(play_round(controller, player, tick_ms, max_ticks)?);
    }
    Ok(outcomes)
}
