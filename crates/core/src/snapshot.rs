//! Snapshot module - serializable view of a round for hosts and players
//!
//! A snapshot never exposes the symbol of a face-down card.

use serde::Serialize;

use crate::board::Cell;
use crate::round::RoundStats;
use crate::types::{CellState, Difficulty, Phase, Position, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellSnapshot {
    pub position: Position,
    pub state: CellState,
    /// Only set while the card is face up
    pub symbol: Option<Symbol>,
}

impl From<&Cell> for CellSnapshot {
    fn from(cell: &Cell) -> Self {
        Self {
            position: cell.position,
            state: cell.state,
            symbol: cell.state.is_face_up().then_some(cell.symbol),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub difficulty: Difficulty,
    pub epoch: u32,
    /// `None` when the round was played on a prepared board
    pub seed: Option<u64>,
    pub cells: Vec<CellSnapshot>,
    pub score: u32,
    pub pairs_matched: usize,
    pub pair_count: usize,
    pub phase: Phase,
    pub first_selection: Option<Position>,
    pub stats: RoundStats,
}

impl RoundSnapshot {
    /// Positions a player may still pick
    pub fn selectable(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .filter(|c| c.state == CellState::Hidden)
            .map(|c| c.position)
    }

    pub fn playable(&self) -> bool {
        self.phase.accepts_selection()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
