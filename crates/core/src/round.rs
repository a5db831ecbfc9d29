//! Round aggregate - the 16 tiles plus the pending selection
//!
//! The round only stores state and enforces its structural invariants (at most
//! two pending indices, pending tiles are `Revealed`). Selection rules live in
//! the controller.

use arrayvec::ArrayVec;

use crate::deck::Deck;
use crate::types::{RoundPhase, Symbol, TileState, TILE_COUNT};

/// One grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub index: usize,
    pub symbol: Symbol,
    pub state: TileState,
}

/// Indices revealed but not yet resolved, in selection order.
pub type PendingSelection = ArrayVec<usize, 2>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    tiles: [Tile; TILE_COUNT],
    pending: PendingSelection,
    phase: RoundPhase,
    generation: u32,
}

impl Round {
    /// Deal `deck` face down.
    pub fn from_deck(deck: &Deck, generation: u32) -> Self {
        let mut tiles = [Tile {
            index: 0,
            symbol: Symbol::Anchor,
            state: TileState::Hidden,
        }; TILE_COUNT];
        for (index, (tile, symbol)) in tiles.iter_mut().zip(deck.iter()).enumerate() {
            tile.index = index;
            tile.symbol = *symbol;
        }

        Self {
            tiles,
            pending: PendingSelection::new(),
            phase: RoundPhase::Accepting,
            generation,
        }
    }

    pub fn tiles(&self) -> &[Tile; TILE_COUNT] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn matched_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.state == TileState::Matched)
            .count()
    }

    pub fn hidden_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.state == TileState::Hidden)
            .count()
    }

    /// All pairs matched.
    pub fn is_won(&self) -> bool {
        self.matched_count() == TILE_COUNT
    }

    /// The pending pair, once two tiles are face up.
    pub fn pending_pair(&self) -> Option<[usize; 2]> {
        match self.pending.as_slice() {
            &[a, b] => Some([a, b]),
            _ => None,
        }
    }

    /// Set a tile's state and return the previous one.
    pub(crate) fn set_state(&mut self, index: usize, state: TileState) -> TileState {
        std::mem::replace(&mut self.tiles[index].state, state)
    }

    /// Turn a hidden tile face up and queue it. Returns the pending length.
    ///
    /// Callers gate on the phase first, so the queue never holds more than two.
    pub(crate) fn reveal(&mut self, index: usize) -> usize {
        debug_assert_eq!(self.tiles[index].state, TileState::Hidden);
        debug_assert_eq!(self.phase, RoundPhase::Accepting);
        self.tiles[index].state = TileState::Revealed;
        self.pending.push(index);
        self.pending.len()
    }

    pub(crate) fn set_phase(&mut self, phase: RoundPhase) {
        self.phase = phase;
    }

    pub(crate) fn clear_pending(&mut self) {
        self.pending.clear();
    }
}
