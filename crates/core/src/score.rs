//! Score tracking - move counter and derived star rating
//!
//! A move is one accepted tile reveal, so a pair costs two moves. The star
//! rating is recomputed from the move count on every call and never cached.

use crate::types::StarRating;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTracker {
    moves: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.moves = 0;
    }

    /// Count one accepted reveal. Returns the new move count.
    pub fn record_move(&mut self) -> u32 {
        self.moves = self.moves.saturating_add(1);
        self.moves
    }

    pub fn move_count(&self) -> u32 {
        self.moves
    }

    pub fn star_rating(&self) -> StarRating {
        StarRating::for_moves(self.moves)
    }
}
