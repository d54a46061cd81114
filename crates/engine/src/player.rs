use std::collections::BTreeMap;

use crate::core::{DeckRng, RoundSnapshot};
use crate::types::{CellState, Position, Symbol};

/// Something that picks cards
pub trait Player {
    fn name(&self) -> &'static str;

    /// Next position to select, `None` if nothing is selectable
    fn choose(&mut self, view: &RoundSnapshot) -> Option<Position>;

    /// A card was turned face up
    fn observe(&mut self, _position: Position, _symbol: Symbol) {}

    /// Drop everything remembered; called between rounds
    fn forget(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Perfect,
    Forgetful,
}

impl PlayerKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "perfect" => Some(PlayerKind::Perfect),
            "forgetful" => Some(PlayerKind::Forgetful),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerKind::Perfect => "perfect",
            PlayerKind::Forgetful => "forgetful",
        }
    }

    /// `recall_pct` only applies to forgetful players
    pub fn build(self, recall_pct: u8, seed: u64) -> Box<dyn Player> {
        match self {
            PlayerKind::Perfect => Box::new(PerfectMemory::new()),
            PlayerKind::Forgetful => Box::new(Forgetful::new(recall_pct, seed)),
        }
    }
}

/// Remembered face-down symbols
#[derive(Debug, Clone, Default)]
struct Recall {
    known: BTreeMap<Position, Symbol>,
}

impl Recall {
    fn hidden(view: &RoundSnapshot, position: Position) -> bool {
        view.cells
            .get(position as usize)
            .is_some_and(|c| c.state == CellState::Hidden)
    }

    /// Known hidden partner for the face-up first card
    fn partner_of(&self, view: &RoundSnapshot, first: Position) -> Option<Position> {
        let symbol = view.cells.get(first as usize)?.symbol?;
        self.known
            .iter()
            .find(|&(&pos, &sym)| pos != first && sym == symbol && Self::hidden(view, pos))
            .map(|(&pos, _)| pos)
    }

    /// First card of a known hidden pair
    fn known_pair(&self, view: &RoundSnapshot) -> Option<Position> {
        let mut seen: BTreeMap<Symbol, Position> = BTreeMap::new();
        for (&pos, &sym) in &self.known {
            if !Self::hidden(view, pos) {
                continue;
            }
            if let Some(&other) = seen.get(&sym) {
                return Some(other);
            }
            seen.insert(sym, pos);
        }
        None
    }

    fn unknown<'a>(&'a self, view: &'a RoundSnapshot) -> impl Iterator<Item = Position> + 'a {
        view.selectable().filter(|pos| !self.known.contains_key(pos))
    }
}

/// Never forgets a card it has seen
///
/// Turns a known pair when it has one, otherwise uncovers the lowest
/// unseen position.
#[derive(Debug, Clone, Default)]
pub struct PerfectMemory {
    recall: Recall,
}

impl PerfectMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Player for PerfectMemory {
    fn name(&self) -> &'static str {
        "perfect"
    }

    fn choose(&mut self, view: &RoundSnapshot) -> Option<Position> {
        if let Some(first) = view.first_selection {
            return self
                .recall
                .partner_of(view, first)
                .or_else(|| self.recall.unknown(view).next())
                .or_else(|| view.selectable().next());
        }
        self.recall
            .known_pair(view)
            .or_else(|| self.recall.unknown(view).next())
            .or_else(|| view.selectable().next())
    }

    fn observe(&mut self, position: Position, symbol: Symbol) {
        self.recall.known.insert(position, symbol);
    }

    fn forget(&mut self) {
        self.recall.known.clear();
    }
}

/// Remembers each card only with probability `recall_pct`%, guesses at random
#[derive(Debug, Clone)]
pub struct Forgetful {
    recall_pct: u8,
    rng: DeckRng,
    recall: Recall,
}

impl Forgetful {
    pub fn new(recall_pct: u8, seed: u64) -> Self {
        Self {
            recall_pct: recall_pct.min(100),
            rng: DeckRng::new(seed),
            recall: Recall::default(),
        }
    }

    pub fn recall_pct(&self) -> u8 {
        self.recall_pct
    }

    fn random_of(&mut self, candidates: impl Iterator<Item = Position>) -> Option<Position> {
        let candidates: Vec<Position> = candidates.collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[self.rng.next_below(candidates.len())])
    }
}

impl Player for Forgetful {
    fn name(&self) -> &'static str {
        "forgetful"
    }

    fn choose(&mut self, view: &RoundSnapshot) -> Option<Position> {
        let known = match view.first_selection {
            Some(first) => self.recall.partner_of(view, first),
            None => self.recall.known_pair(view),
        };
        if known.is_some() {
            return known;
        }

        let first = view.first_selection;
        let unknown: Vec<Position> = self
            .recall
            .unknown(view)
            .filter(|&pos| Some(pos) != first)
            .collect();
        if !unknown.is_empty() {
            return self.random_of(unknown.into_iter());
        }
        let any: Vec<Position> = view.selectable().filter(|&pos| Some(pos) != first).collect();
        self.random_of(any.into_iter())
    }

    fn observe(&mut self, position: Position, symbol: Symbol) {
        if self.rng.next_below(100) < self.recall_pct as usize {
            self.recall.known.insert(position, symbol);
        } else {
            self.recall.known.remove(&position);
        }
    }

    fn forget(&mut self) {
        self.recall.known.clear();
    }
}
