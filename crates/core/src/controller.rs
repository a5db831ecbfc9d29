//! Round controller - the authoritative tile state machine
//!
//! This module ties together the deck, round, score, clock and result
//! reporter. It enforces the selection rules, evaluates pairs, gates input
//! while a mismatched pair waits to flip back, and detects the end of a round.
//!
//! Selection guards run in a fixed order, each a silent no-op:
//!
//! 1. the round is `Resolving` (two tiles already face up)
//! 2. the tile is `Matched`
//! 3. the tile is already `Revealed`
//!
//! Checking the phase first keeps a third click during the mismatch delay from
//! touching the pending pair. Every accepted reveal counts as one move.

use log::{debug, info};

use crate::clock::RoundClock;
use crate::deck::DeckBuilder;
use crate::error::RoundError;
use crate::event::RoundEvent;
use crate::result::ResultReporter;
use crate::round::Round;
use crate::score::ScoreTracker;
use crate::snapshot::{RoundSnapshot, TileSnapshot};
use crate::timer::{Scheduler, TimerEvent, TimerId, TimerKind, TimerQueue, TimerSpec};
use crate::types::{RoundPhase, StarRating, TileState, MISMATCH_DELAY_MS, TILE_COUNT};

/// Why a selection was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Resolving,
    AlreadyMatched,
    AlreadyRevealed,
}

/// Outcome of [`RoundController::select_tile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Rejected(RejectReason),
    /// First tile of a pair is face up.
    FirstReveal,
    /// Both tiles matched. `won` is set when this pair completed the round.
    Matched { pair: [usize; 2], won: bool },
    /// Symbols differ. The pair flips back after the mismatch delay.
    Mismatch { pair: [usize; 2] },
}

impl Selection {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Selection::Rejected(_))
    }
}

/// Owns one game session: a scheduler, a seeded deck source and the current round.
#[derive(Debug)]
pub struct RoundController<S: Scheduler = TimerQueue> {
    scheduler: S,
    deck: DeckBuilder,
    round: Option<Round>,
    score: ScoreTracker,
    clock: RoundClock,
    reporter: ResultReporter,
    /// Monotonic round id (increments on every new round).
    generation: u32,
    mismatch_timer: Option<TimerId>,
    events: Vec<RoundEvent>,
    due: Vec<TimerEvent>,
}

impl<S: Scheduler> RoundController<S> {
    /// Create a session. No round is dealt until [`start_new_round`](Self::start_new_round).
    pub fn new(scheduler: S, seed: u64) -> Self {
        Self {
            scheduler,
            deck: DeckBuilder::new(seed),
            round: None,
            score: ScoreTracker::new(),
            clock: RoundClock::new(),
            reporter: ResultReporter::new(),
            generation: 0,
            mismatch_timer: None,
            events: Vec::with_capacity(32),
            due: Vec::with_capacity(4),
        }
    }

    /// Deal a fresh deck and reset score and clock.
    ///
    /// Callable at any time. Abandoning a round mid-play records nothing, and
    /// any timer still pending for the old round is cancelled (and would be
    /// ignored as stale anyway).
    pub fn start_new_round(&mut self) {
        if let Some(id) = self.mismatch_timer.take() {
            self.scheduler.cancel(id);
        }

        self.generation = self.generation.wrapping_add(1);

        if let Some(old) = &self.round {
            for tile in old.tiles().iter().filter(|t| t.state != TileState::Hidden) {
                self.events.push(RoundEvent::TileStateChanged {
                    index: tile.index,
                    old: tile.state,
                    new: TileState::Hidden,
                });
            }
        }

        let deck = self.deck.build();
        self.round = Some(Round::from_deck(&deck, self.generation));
        self.score.reset();
        self.reporter.reset();
        self.clock.start(&mut self.scheduler, self.generation);

        self.events.push(RoundEvent::RoundStarted {
            generation: self.generation,
        });
        self.events.push(RoundEvent::MoveCountChanged(0));
        self.events
            .push(RoundEvent::StarRatingChanged(self.score.star_rating()));
        self.events.push(RoundEvent::ElapsedChanged(0));

        info!(
            "round {} dealt (seed {}, deck #{})",
            self.generation,
            self.deck.seed(),
            self.deck.decks_built()
        );
    }

    /// Handle a "tile selected" input.
    ///
    /// Returns an error only for caller defects: no round yet, or an index
    /// outside the grid. Everything else is a [`Selection`].
    pub fn select_tile(&mut self, index: usize) -> Result<Selection, RoundError> {
        let round = self.round.as_mut().ok_or(RoundError::NotStarted)?;
        let state = round
            .tile(index)
            .map(|t| t.state)
            .ok_or(RoundError::TileOutOfRange {
                index,
                len: TILE_COUNT,
            })?;

        let reject = if round.phase() == RoundPhase::Resolving {
            Some(RejectReason::Resolving)
        } else {
            match state {
                TileState::Matched => Some(RejectReason::AlreadyMatched),
                TileState::Revealed => Some(RejectReason::AlreadyRevealed),
                TileState::Hidden => None,
            }
        };
        if let Some(reason) = reject {
            debug!("round {}: tile {} rejected ({:?})", self.generation, index, reason);
            return Ok(Selection::Rejected(reason));
        }

        let pending = round.reveal(index);
        self.events.push(RoundEvent::TileStateChanged {
            index,
            old: TileState::Hidden,
            new: TileState::Revealed,
        });

        let before = self.score.star_rating();
        let moves = self.score.record_move();
        self.events.push(RoundEvent::MoveCountChanged(moves));
        let after = self.score.star_rating();
        if after != before {
            self.events.push(RoundEvent::StarRatingChanged(after));
        }

        if pending == 1 {
            debug!("round {}: tile {} revealed", self.generation, index);
            return Ok(Selection::FirstReveal);
        }

        round.set_phase(RoundPhase::Resolving);
        let pair = [round.pending()[0], index];
        let [a, b] = pair;
        let matched = round.tiles()[a].symbol == round.tiles()[b].symbol;

        if !matched {
            let event = TimerEvent::new(self.generation, TimerKind::MismatchResolve);
            self.mismatch_timer = Some(
                self.scheduler
                    .schedule(TimerSpec::once(MISMATCH_DELAY_MS, event)),
            );
            debug!("round {}: tiles {} and {} mismatch", self.generation, a, b);
            return Ok(Selection::Mismatch { pair });
        }

        for i in pair {
            let old = round.set_state(i, TileState::Matched);
            self.events.push(RoundEvent::TileStateChanged {
                index: i,
                old,
                new: TileState::Matched,
            });
        }
        round.clear_pending();
        round.set_phase(RoundPhase::Accepting);
        let won = round.is_won();
        debug!("round {}: tiles {} and {} match", self.generation, a, b);

        if won {
            self.finish_round();
        }
        Ok(Selection::Matched { pair, won })
    }

    /// Deliver a fired timer. Returns `true` if it changed anything.
    ///
    /// Events from an earlier round generation are dropped.
    pub fn handle_timer(&mut self, event: TimerEvent) -> bool {
        if event.generation != self.generation || self.round.is_none() {
            debug!(
                "dropping stale {:?} for round {} (current {})",
                event.kind, event.generation, self.generation
            );
            return false;
        }

        match event.kind {
            TimerKind::ClockTick => match self.clock.on_tick() {
                Some(seconds) => {
                    self.events.push(RoundEvent::ElapsedChanged(seconds));
                    true
                }
                None => false,
            },
            TimerKind::MismatchResolve => self.resolve_mismatch(),
        }
    }

    /// Flip a mismatched pair back and reopen input.
    fn resolve_mismatch(&mut self) -> bool {
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        if round.phase() != RoundPhase::Resolving {
            return false;
        }
        let Some(pair) = round.pending_pair() else {
            return false;
        };

        for i in pair {
            let old = round.set_state(i, TileState::Hidden);
            self.events.push(RoundEvent::TileStateChanged {
                index: i,
                old,
                new: TileState::Hidden,
            });
        }
        round.clear_pending();
        round.set_phase(RoundPhase::Accepting);
        self.mismatch_timer = None;
        debug!("round {}: tiles {:?} hidden again", self.generation, pair);
        true
    }

    fn finish_round(&mut self) {
        self.clock.stop(&mut self.scheduler);
        let moves = self.score.move_count();
        let elapsed = self.clock.elapsed();
        if let Some(result) = self.reporter.report(moves, elapsed) {
            info!(
                "round {} won: {} moves, {}s, {} stars",
                self.generation,
                result.move_count,
                result.elapsed_seconds,
                result.star_rating.stars()
            );
            self.events.push(RoundEvent::RoundWon(result));
        }
    }

    /// Take every event queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, RoundEvent> {
        self.events.drain(..)
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn seed(&self) -> u64 {
        self.deck.seed()
    }

    pub fn phase(&self) -> RoundPhase {
        self.round
            .as_ref()
            .map(Round::phase)
            .unwrap_or(RoundPhase::Accepting)
    }

    pub fn pending(&self) -> &[usize] {
        self.round.as_ref().map(Round::pending).unwrap_or(&[])
    }

    pub fn tile_state(&self, index: usize) -> Option<TileState> {
        self.round.as_ref()?.tile(index).map(|t| t.state)
    }

    pub fn move_count(&self) -> u32 {
        self.score.move_count()
    }

    pub fn star_rating(&self) -> StarRating {
        self.score.star_rating()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.clock.elapsed()
    }

    pub fn is_won(&self) -> bool {
        self.round.as_ref().is_some_and(Round::is_won)
    }

    pub fn last_result(&self) -> Option<crate::result::RoundResult> {
        self.reporter.last()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        out.clear();
        out.generation = self.generation;
        out.seed = self.deck.seed();
        out.move_count = self.score.move_count();
        out.star_rating = self.score.star_rating();
        out.elapsed_seconds = self.clock.elapsed();

        let Some(round) = &self.round else {
            return;
        };
        out.started = true;
        out.phase = round.phase();
        out.won = round.is_won();
        out.pending.extend(round.pending().iter().copied());
        for (slot, tile) in out.tiles.iter_mut().zip(round.tiles().iter()) {
            *slot = TileSnapshot {
                symbol: tile.symbol,
                state: tile.state,
            };
        }
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut s = RoundSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl RoundController<TimerQueue> {
    /// Session on a deterministic [`TimerQueue`].
    pub fn with_seed(seed: u64) -> Self {
        Self::new(TimerQueue::new(), seed)
    }

    /// Advance time by `elapsed_ms` and deliver every timer that came due.
    ///
    /// Returns the number of timer events that changed state.
    pub fn tick(&mut self, elapsed_ms: u32) -> usize {
        let mut due = std::mem::take(&mut self.due);
        self.scheduler.advance_into(elapsed_ms, &mut due);
        let applied = due.drain(..).filter(|ev| self.handle_timer(*ev)).count();
        self.due = due;
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Symbol;

    fn started(seed: u64) -> RoundController {
        let mut game = RoundController::with_seed(seed);
        game.start_new_round();
        game.drain_events().for_each(drop);
        game
    }

    fn symbol_at(game: &RoundController, index: usize) -> Symbol {
        game.round().unwrap().tiles()[index].symbol
    }

    fn partner_of(game: &RoundController, index: usize) -> usize {
        let symbol = symbol_at(game, index);
        (0..TILE_COUNT)
            .find(|&i| i != index && symbol_at(game, i) == symbol)
            .unwrap()
    }

    fn non_partner_of(game: &RoundController, index: usize) -> usize {
        let symbol = symbol_at(game, index);
        (0..TILE_COUNT)
            .find(|&i| symbol_at(game, i) != symbol)
            .unwrap()
    }

    #[test]
    fn test_new_controller_has_no_round() {
        let mut game = RoundController::with_seed(1);
        assert!(game.round().is_none());
        assert_eq!(game.generation(), 0);
        assert_eq!(game.select_tile(0), Err(RoundError::NotStarted));
        assert!(!game.is_won());
        assert!(game.pending().is_empty());
    }

    #[test]
    fn test_start_new_round_emits_reset_events() {
        let mut game = RoundController::with_seed(1);
        game.start_new_round();

        let events: Vec<_> = game.drain_events().collect();
        assert_eq!(
            events,
            vec![
                RoundEvent::RoundStarted { generation: 1 },
                RoundEvent::MoveCountChanged(0),
                RoundEvent::StarRatingChanged(StarRating::Three),
                RoundEvent::ElapsedChanged(0),
            ]
        );
        assert!(!game.has_events());
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        let mut game = started(1);
        assert_eq!(
            game.select_tile(TILE_COUNT),
            Err(RoundError::TileOutOfRange {
                index: TILE_COUNT,
                len: TILE_COUNT
            })
        );
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn test_first_reveal_counts_a_move() {
        let mut game = started(3);
        assert_eq!(game.select_tile(5), Ok(Selection::FirstReveal));
        assert_eq!(game.tile_state(5), Some(TileState::Revealed));
        assert_eq!(game.pending(), &[5]);
        assert_eq!(game.move_count(), 1);
        assert_eq!(game.phase(), RoundPhase::Accepting);

        let events: Vec<_> = game.drain_events().collect();
        assert_eq!(
            events,
            vec![
                RoundEvent::TileStateChanged {
                    index: 5,
                    old: TileState::Hidden,
                    new: TileState::Revealed
                },
                RoundEvent::MoveCountChanged(1),
            ]
        );
    }

    #[test]
    fn test_same_tile_twice_is_rejected() {
        let mut game = started(3);
        game.select_tile(5).unwrap();
        assert_eq!(
            game.select_tile(5),
            Ok(Selection::Rejected(RejectReason::AlreadyRevealed))
        );
        assert_eq!(game.move_count(), 1);
        assert_eq!(game.pending(), &[5]);
    }

    #[test]
    fn test_match_locks_pair() {
        let mut game = started(11);
        let b = partner_of(&game, 0);

        game.select_tile(0).unwrap();
        assert_eq!(
            game.select_tile(b),
            Ok(Selection::Matched {
                pair: [0, b],
                won: false
            })
        );
        assert_eq!(game.tile_state(0), Some(TileState::Matched));
        assert_eq!(game.tile_state(b), Some(TileState::Matched));
        assert!(game.pending().is_empty());
        assert_eq!(game.phase(), RoundPhase::Accepting);
        assert_eq!(game.move_count(), 2);

        assert_eq!(
            game.select_tile(0),
            Ok(Selection::Rejected(RejectReason::AlreadyMatched))
        );
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn test_mismatch_gates_input_until_delay() {
        let mut game = started(11);
        let b = non_partner_of(&game, 0);
        let c = (0..TILE_COUNT).find(|&i| i != 0 && i != b).unwrap();

        game.select_tile(0).unwrap();
        assert_eq!(game.select_tile(b), Ok(Selection::Mismatch { pair: [0, b] }));
        assert_eq!(game.phase(), RoundPhase::Resolving);

        assert_eq!(
            game.select_tile(c),
            Ok(Selection::Rejected(RejectReason::Resolving))
        );
        assert_eq!(game.pending().len(), 2);
        assert_eq!(game.move_count(), 2);

        game.tick(MISMATCH_DELAY_MS - 1);
        assert_eq!(game.phase(), RoundPhase::Resolving);
        game.tick(1);
        assert_eq!(game.phase(), RoundPhase::Accepting);
        assert_eq!(game.tile_state(0), Some(TileState::Hidden));
        assert_eq!(game.tile_state(b), Some(TileState::Hidden));
        assert!(game.pending().is_empty());
        assert_eq!(game.move_count(), 2);

        assert_eq!(game.select_tile(c), Ok(Selection::FirstReveal));
    }

    #[test]
    fn test_resolving_guard_runs_before_tile_guards() {
        let mut game = started(11);
        let b = non_partner_of(&game, 0);
        game.select_tile(0).unwrap();
        game.select_tile(b).unwrap();

        // Tile 0 is revealed, but the phase guard wins.
        assert_eq!(
            game.select_tile(0),
            Ok(Selection::Rejected(RejectReason::Resolving))
        );
    }

    #[test]
    fn test_stale_mismatch_timer_is_ignored() {
        let mut game = started(11);
        let b = non_partner_of(&game, 0);
        game.select_tile(0).unwrap();
        game.select_tile(b).unwrap();

        let stale = TimerEvent::new(game.generation(), TimerKind::MismatchResolve);
        game.start_new_round();
        game.select_tile(3).unwrap();

        assert!(!game.handle_timer(stale));
        assert_eq!(game.tile_state(3), Some(TileState::Revealed));
        assert_eq!(game.pending(), &[3]);
    }

    #[test]
    fn test_clock_ticks_emit_elapsed() {
        let mut game = started(2);
        assert_eq!(game.tick(2500), 2);
        assert_eq!(game.elapsed_seconds(), 2);
        let events: Vec<_> = game.drain_events().collect();
        assert_eq!(
            events,
            vec![RoundEvent::ElapsedChanged(1), RoundEvent::ElapsedChanged(2)]
        );
    }

    #[test]
    fn test_restart_mid_round_resets_everything() {
        let mut game = started(4);
        let b = partner_of(&game, 0);
        game.select_tile(0).unwrap();
        game.select_tile(b).unwrap();
        game.tick(3000);
        game.drain_events().for_each(drop);

        game.start_new_round();
        assert_eq!(game.generation(), 2);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.elapsed_seconds(), 0);
        assert_eq!(game.round().unwrap().hidden_count(), TILE_COUNT);
        // One clock ticker, no leftover mismatch timer.
        assert_eq!(game.scheduler().len(), 1);

        let hidden: Vec<_> = game
            .drain_events()
            .filter_map(|ev| match ev {
                RoundEvent::TileStateChanged { index, new, .. } => Some((index, new)),
                _ => None,
            })
            .collect();
        assert_eq!(hidden, vec![(0, TileState::Hidden), (b, TileState::Hidden)]);
    }

    #[test]
    fn test_full_round_reports_once() {
        let mut game = started(21);
        let mut done = [false; TILE_COUNT];

        for i in 0..TILE_COUNT {
            if done[i] {
                continue;
            }
            let j = partner_of(&game, i);
            done[i] = true;
            done[j] = true;
            game.tick(1000);
            game.select_tile(i).unwrap();
            game.select_tile(j).unwrap();
        }

        assert!(game.is_won());
        let wins: Vec<_> = game
            .drain_events()
            .filter_map(|ev| match ev {
                RoundEvent::RoundWon(r) => Some(r),
                _ => None,
            })
            .collect();
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].move_count, 16);
        assert_eq!(wins[0].elapsed_seconds, 8);
        assert_eq!(wins[0].star_rating, StarRating::Three);
        assert_eq!(game.last_result(), Some(wins[0]));

        // Clock stopped; further input is rejected and reports nothing.
        game.tick(5000);
        assert_eq!(game.elapsed_seconds(), 8);
        for i in 0..TILE_COUNT {
            assert_eq!(
                game.select_tile(i),
                Ok(Selection::Rejected(RejectReason::AlreadyMatched))
            );
        }
        assert!(!game.drain_events().any(|ev| matches!(ev, RoundEvent::RoundWon(_))));
    }

    #[test]
    fn test_star_rating_event_on_threshold() {
        let mut game = started(8);
        let a = 0;
        let b = non_partner_of(&game, a);
        let mut saw_two_stars = false;

        for _ in 0..25 {
            game.select_tile(a).unwrap();
            game.select_tile(b).unwrap();
            game.tick(MISMATCH_DELAY_MS);
            saw_two_stars |= game
                .drain_events()
                .any(|ev| ev == RoundEvent::StarRatingChanged(StarRating::Two));
        }

        assert_eq!(game.move_count(), 50);
        assert!(saw_two_stars);
        assert_eq!(game.star_rating(), StarRating::Two);
    }

    #[test]
    fn test_snapshot_reflects_round() {
        let mut game = RoundController::with_seed(6);
        let snap = game.snapshot();
        assert!(!snap.started);

        game.start_new_round();
        game.select_tile(7).unwrap();
        let snap = game.snapshot();
        assert!(snap.started);
        assert_eq!(snap.generation, 1);
        assert_eq!(snap.seed, 6);
        assert_eq!(snap.move_count, 1);
        assert_eq!(snap.pending.as_slice(), &[7]);
        assert_eq!(snap.tiles[7].state, TileState::Revealed);
        assert_eq!(snap.tiles[7].symbol, symbol_at(&game, 7));
    }
}
