//! Outbound round events and the observer interface views implement.

use crate::result::RoundResult;
use crate::types::{StarRating, TileState};

/// Something observable changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    /// A fresh deck was dealt. Views should redraw everything.
    RoundStarted { generation: u32 },
    TileStateChanged {
        index: usize,
        old: TileState,
        new: TileState,
    },
    MoveCountChanged(u32),
    StarRatingChanged(StarRating),
    ElapsedChanged(u32),
    RoundWon(RoundResult),
}

impl RoundEvent {
    /// Forward this event to the matching observer callback.
    pub fn dispatch<O: RoundObserver + ?Sized>(&self, observer: &mut O) {
        match *self {
            RoundEvent::RoundStarted { generation } => observer.on_round_started(generation),
            RoundEvent::TileStateChanged { index, old, new } => {
                observer.on_tile_state_changed(index, old, new)
            }
            RoundEvent::MoveCountChanged(count) => observer.on_move_count_changed(count),
            RoundEvent::StarRatingChanged(rating) => observer.on_star_rating_changed(rating),
            RoundEvent::ElapsedChanged(seconds) => observer.on_elapsed_changed(seconds),
            RoundEvent::RoundWon(result) => observer.on_round_won(result),
        }
    }
}

/// Callbacks for renderers, score/clock displays and result presenters.
///
/// Every method has an empty default so collaborators implement only what they show.
pub trait RoundObserver {
    fn on_round_started(&mut self, _generation: u32) {}
    fn on_tile_state_changed(&mut self, _index: usize, _old: TileState, _new: TileState) {}
    fn on_move_count_changed(&mut self, _count: u32) {}
    fn on_star_rating_changed(&mut self, _rating: StarRating) {}
    fn on_elapsed_changed(&mut self, _seconds: u32) {}
    fn on_round_won(&mut self, _result: RoundResult) {}
}
