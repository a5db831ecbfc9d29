use arrayvec::ArrayVec;

use crate::types::{RoundPhase, StarRating, Symbol, TileState, TILE_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSnapshot {
    pub symbol: Symbol,
    pub state: TileState,
}

impl Default for TileSnapshot {
    fn default() -> Self {
        Self {
            symbol: Symbol::Anchor,
            state: TileState::Hidden,
        }
    }
}

/// Read-only copy of everything a view needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoundSnapshot {
    pub tiles: [TileSnapshot; TILE_COUNT],
    pub pending: ArrayVec<usize, 2>,
    pub phase: RoundPhase,
    pub move_count: u32,
    pub star_rating: StarRating,
    pub elapsed_seconds: u32,
    pub generation: u32,
    pub seed: u64,
    pub started: bool,
    pub won: bool,
}

impl RoundSnapshot {
    pub fn clear(&mut self) {
        self.tiles = [TileSnapshot::default(); TILE_COUNT];
        self.pending.clear();
        self.phase = RoundPhase::Accepting;
        self.move_count = 0;
        self.star_rating = StarRating::Three;
        self.elapsed_seconds = 0;
        self.generation = 0;
        self.seed = 0;
        self.started = false;
        self.won = false;
    }

    pub fn matched_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.state == TileState::Matched)
            .count()
    }

    /// Input is taken right now.
    pub fn playable(&self) -> bool {
        self.started && !self.won && self.phase == RoundPhase::Accepting
    }
}

impl Default for RoundSnapshot {
    fn default() -> Self {
        Self {
            tiles: [TileSnapshot::default(); TILE_COUNT],
            pending: ArrayVec::new(),
            phase: RoundPhase::Accepting,
            move_count: 0,
            star_rating: StarRating::Three,
            elapsed_seconds: 0,
            generation: 0,
            seed: 0,
            started: false,
            won: false,
        }
    }
}
