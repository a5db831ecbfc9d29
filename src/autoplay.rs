//! Perfect-memory player for headless rounds.
//!
//! The player only reads symbols of face-up tiles and never forgets one. It
//! completes a known pair whenever it can, otherwise it turns over a tile it
//! has not seen yet.

use std::time::Duration;

use anyhow::{bail, Result};
use log::debug;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{sleep, Instant};

use crate::core::{RejectReason, RoundEvent, RoundResult, RoundSnapshot, Selection};
use crate::session::SessionHandle;
use crate::types::{Symbol, TileState, MISMATCH_DELAY_MS, TILE_COUNT};

#[derive(Debug, Default)]
pub struct MemoryPlayer {
    seen: [Option<Symbol>; TILE_COUNT],
    matched: [bool; TILE_COUNT],
}

impl MemoryPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember every face-up tile in `snap`.
    pub fn observe(&mut self, snap: &RoundSnapshot) {
        for (i, tile) in snap.tiles.iter().enumerate() {
            if tile.state.is_face_up() {
                self.seen[i] = Some(tile.symbol);
            }
            self.matched[i] = tile.state == TileState::Matched;
        }
    }

    /// Symbol of `index` if it has ever been seen face up.
    pub fn remembered(&self, index: usize) -> Option<Symbol> {
        self.seen.get(index).copied().flatten()
    }

    /// Two remembered, unmatched tiles with the same symbol.
    pub fn known_pair(&self) -> Option<[usize; 2]> {
        (0..TILE_COUNT).find_map(|i| {
            let symbol = self.open(i)?;
            let j = self.partner_of(i, symbol)?;
            Some([i, j])
        })
    }

    /// A remembered, unmatched tile other than `index` showing `symbol`.
    pub fn partner_of(&self, index: usize, symbol: Symbol) -> Option<usize> {
        (0..TILE_COUNT).find(|&j| j != index && self.open(j) == Some(symbol))
    }

    /// The first unmatched tile never seen face up, skipping `except`.
    pub fn next_unseen(&self, except: Option<usize>) -> Option<usize> {
        (0..TILE_COUNT)
            .find(|&i| Some(i) != except && !self.matched[i] && self.seen[i].is_none())
    }

    fn open(&self, index: usize) -> Option<Symbol> {
        if self.matched[index] {
            None
        } else {
            self.seen[index]
        }
    }
}

/// Deal a round on `session` and play it to the end.
///
/// Subscribe is done before dealing so the win is never missed.
pub async fn play_round(session: &SessionHandle) -> Result<RoundResult> {
    let mut events = session.subscribe();
    session.new_round().await?;

    let mut player = MemoryPlayer::new();
    let mut snap = session.snapshot().await?;

    while !snap.won {
        player.observe(&snap);

        let first = match player.known_pair() {
            Some([a, b]) => {
                turn(session, a).await?;
                turn(session, b).await?;
                snap = session.snapshot().await?;
                continue;
            }
            None => match player.next_unseen(None) {
                Some(i) => i,
                None => bail!("no unseen tile left but round is not won"),
            },
        };

        let outcome = turn(session, first).await?;
        if outcome != Selection::FirstReveal {
            bail!("tile {first} did not open a pair: {outcome:?}");
        }
        snap = session.snapshot().await?;
        player.observe(&snap);

        let Some(symbol) = player.remembered(first) else {
            bail!("tile {first} is not face up after selecting it");
        };
        let second = match player.partner_of(first, symbol) {
            Some(j) => j,
            None => match player.next_unseen(Some(first)) {
                Some(j) => j,
                None => bail!("tile {first} has no candidate partner"),
            },
        };

        turn(session, second).await?;
        snap = session.snapshot().await?;
    }

    loop {
        match events.recv().await {
            Ok(RoundEvent::RoundWon(result)) => return Ok(result),
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => debug!("event stream lagged by {skipped}"),
            Err(RecvError::Closed) => bail!("session closed before the round was reported"),
        }
    }
}

const RETRY_MS: u64 = 25;

/// Select `index`, waiting out a pending mismatch if the round is resolving.
async fn turn(session: &SessionHandle, index: usize) -> Result<Selection> {
    let deadline = Instant::now() + Duration::from_millis(4 * MISMATCH_DELAY_MS as u64);
    loop {
        let outcome = session.select(index).await?;
        debug!("select {index}: {outcome:?}");
        if outcome != Selection::Rejected(RejectReason::Resolving) {
            return Ok(outcome);
        }
        if Instant::now() >= deadline {
            bail!("round stayed resolving while selecting tile {index}");
        }
        sleep(Duration::from_millis(RETRY_MS)).await;
    }
}
