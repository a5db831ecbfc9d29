//! Result reporting - the final numbers of a won round
//!
//! The reporter hands out at most one [`RoundResult`] per round, so repeated
//! completion checks can never emit a second win.

use crate::types::StarRating;

/// Final result of a won round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundResult {
    pub elapsed_seconds: u32,
    pub move_count: u32,
    pub star_rating: StarRating,
}

#[derive(Debug, Clone, Default)]
pub struct ResultReporter {
    reported: Option<RoundResult>,
}

impl ResultReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm for a new round.
    pub fn reset(&mut self) {
        self.reported = None;
    }

    /// Package a result. Returns `None` if this round already reported.
    pub fn report(&mut self, move_count: u32, elapsed_seconds: u32) -> Option<RoundResult> {
        if self.reported.is_some() {
            return None;
        }
        let result = RoundResult {
            elapsed_seconds,
            move_count,
            star_rating: StarRating::for_moves(move_count),
        };
        self.reported = Some(result);
        Some(result)
    }

    pub fn last(&self) -> Option<RoundResult> {
        self.reported
    }
}
