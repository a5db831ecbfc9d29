//! Deck module - shuffled, duplicated symbol sequences
//!
//! A deck holds every [`Symbol`] exactly twice, in a uniformly random order.
//! Decks are shuffled in place with [`SliceRandom::shuffle`] over an injected
//! RNG, so a seeded generator reproduces the same deck sequence.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::types::{Symbol, PAIR_COUNT, TILE_COUNT};

/// One round's symbols, indexed by tile.
pub type Deck = [Symbol; TILE_COUNT];

/// Build a shuffled deck from `rng`.
pub fn build_deck<R: Rng + ?Sized>(rng: &mut R) -> Deck {
    let mut deck = [Symbol::Anchor; TILE_COUNT];
    for (pair, symbol) in Symbol::ALL.iter().enumerate() {
        deck[2 * pair] = *symbol;
        deck[2 * pair + 1] = *symbol;
    }
    deck.shuffle(rng);
    deck
}

/// True if every symbol occurs exactly twice.
pub fn is_valid_deck(deck: &[Symbol]) -> bool {
    if deck.len() != TILE_COUNT {
        return false;
    }
    let mut counts = [0u8; PAIR_COUNT];
    for symbol in deck {
        if let Some(slot) = Symbol::ALL.iter().position(|s| s == symbol) {
            counts[slot] += 1;
        }
    }
    counts.iter().all(|&c| c == 2)
}

/// Seeded deck source, one per game session.
#[derive(Debug, Clone)]
pub struct DeckBuilder {
    rng: StdRng,
    seed: u64,
    decks_built: u32,
}

impl DeckBuilder {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            decks_built: 0,
        }
    }

    /// Seed the builder was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn decks_built(&self) -> u32 {
        self.decks_built
    }

    /// Draw the next deck from the seeded stream.
    pub fn build(&mut self) -> Deck {
        self.decks_built = self.decks_built.wrapping_add(1);
        build_deck(&mut self.rng)
    }
}
