//! Board module - the grid of face-down cards
//!
//! The board owns the deck layout (position -> symbol) and the visibility
//! state of every card. Cards live in a flat, row-major `ArrayVec` sized for
//! the largest difficulty, so a board never allocates.
//!
//! Every symbol on a generated board appears an even number of times:
//! each pair slot contributes two cards, and slots wrap around the catalog
//! when it has fewer symbols than the board has pairs.

use arrayvec::ArrayVec;

use crate::catalog::SymbolCatalog;
use crate::error::BoardError;
use crate::rng::DeckRng;
use crate::types::{CellState, Difficulty, Position, Symbol, MAX_CARDS};

/// A single card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub position: Position,
    pub symbol: Symbol,
    pub state: CellState,
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    difficulty: Difficulty,
    /// Flat array of cells, row-major order (row * columns + column)
    cells: ArrayVec<Cell, MAX_CARDS>,
}

impl Board {
    /// Deal a shuffled board for `difficulty`
    ///
    /// Builds `pair_count` symbol slots (`slot % catalog.len()`), duplicates
    /// each slot into two cards, then shuffles all cards.
    pub fn generate(difficulty: Difficulty, catalog: &SymbolCatalog, rng: &mut DeckRng) -> Self {
        let mut symbols: ArrayVec<Symbol, MAX_CARDS> = ArrayVec::new();
        for slot in 0..difficulty.pair_count() {
            let symbol = catalog.symbol_for_slot(slot);
            symbols.push(symbol);
            symbols.push(symbol);
        }

        rng.shuffle(&mut symbols);
        Self::with_symbols(difficulty, &symbols)
    }

    /// Build a board from a fixed layout, all cards face down
    ///
    /// Returns `None` when the layout length does not match the difficulty
    /// or some symbol appears an odd number of times.
    pub fn from_layout(difficulty: Difficulty, symbols: &[Symbol]) -> Option<Self> {
        if symbols.len() != difficulty.card_count() {
            return None;
        }
        let paired = symbols
            .iter()
            .all(|s| symbols.iter().filter(|other| *other == s).count() % 2 == 0);
        if !paired {
            return None;
        }
        Some(Self::with_symbols(difficulty, symbols))
    }

    fn with_symbols(difficulty: Difficulty, symbols: &[Symbol]) -> Self {
        let cells = symbols
            .iter()
            .enumerate()
            .map(|(i, &symbol)| Cell {
                position: i as Position,
                symbol,
                state: CellState::Hidden,
            })
            .collect();
        Self { difficulty, cells }
    }

    /// Validate a position and return its flat index
    #[inline(always)]
    fn index(&self, position: Position) -> Result<usize, BoardError> {
        let idx = position as usize;
        if idx >= self.cells.len() {
            return Err(BoardError::InvalidPosition {
                position,
                len: self.cells.len(),
            });
        }
        Ok(idx)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Number of cards on the board
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get cell at position
    /// Returns None if out of bounds
    pub fn get(&self, position: Position) -> Option<&Cell> {
        self.cells.get(position as usize)
    }

    pub fn state(&self, position: Position) -> Option<CellState> {
        self.get(position).map(|c| c.state)
    }

    pub fn symbol(&self, position: Position) -> Option<Symbol> {
        self.get(position).map(|c| c.symbol)
    }

    /// Turn a hidden card face up and return its symbol
    pub fn reveal(&mut self, position: Position) -> Result<Symbol, BoardError> {
        let idx = self.index(position)?;
        let cell = &mut self.cells[idx];
        match cell.state {
            CellState::Hidden => {
                cell.state = CellState::Revealed;
                Ok(cell.symbol)
            }
            CellState::Revealed => Err(BoardError::AlreadyRevealed(position)),
            CellState::Matched => Err(BoardError::AlreadyMatched(position)),
        }
    }

    /// Turn a card face down again
    ///
    /// Hiding a hidden card is a no-op. Matched cards stay matched.
    pub fn hide(&mut self, position: Position) -> Result<(), BoardError> {
        let idx = self.index(position)?;
        let cell = &mut self.cells[idx];
        match cell.state {
            CellState::Hidden => Ok(()),
            CellState::Revealed => {
                cell.state = CellState::Hidden;
                Ok(())
            }
            CellState::Matched => Err(BoardError::InvalidTransition {
                position,
                from: CellState::Matched,
                to: CellState::Hidden,
            }),
        }
    }

    /// Lock a revealed card as matched (terminal)
    pub fn mark_matched(&mut self, position: Position) -> Result<(), BoardError> {
        let idx = self.index(position)?;
        let cell = &mut self.cells[idx];
        if cell.state != CellState::Revealed {
            return Err(BoardError::InvalidTransition {
                position,
                from: cell.state,
                to: CellState::Matched,
            });
        }
        cell.state = CellState::Matched;
        Ok(())
    }

    /// True iff every card is matched
    pub fn all_matched(&self) -> bool {
        self.cells.iter().all(|c| c.state == CellState::Matched)
    }

    pub fn matched_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.state == CellState::Matched)
            .count()
    }

    /// Positions of cards that are still face down
    pub fn hidden_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .filter(|c| c.state == CellState::Hidden)
            .map(|c| c.position)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Symbols in position order
    pub fn layout(&self) -> ArrayVec<Symbol, MAX_CARDS> {
        self.cells.iter().map(|c| c.symbol).collect()
    }
}
