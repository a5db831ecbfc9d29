//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, async session driver).
//!
//! # Deck
//!
//! A round is played on a fixed 4x4 grid:
//!
//! - **Tiles**: 16 (indexed 0-15, row-major)
//! - **Pairs**: 8, one per [`Symbol`]
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep of the terminal loop (~60 FPS) |
//! | `MISMATCH_DELAY_MS` | 750 | Time a mismatched pair stays face up |
//! | `CLOCK_TICK_MS` | 1000 | Round clock resolution |
//!
//! # Star Rating
//!
//! | Moves | Stars |
//! |-------|-------|
//! | 0-49 | 3 |
//! | 50-99 | 2 |
//! | 100+ | 1 |
//!
//! # Examples
//!
//! ```
//! use tui_memory_types::{StarRating, Symbol, TileState, PAIR_COUNT, TILE_COUNT};
//!
//! assert_eq!(Symbol::ALL.len(), PAIR_COUNT);
//! assert_eq!(TILE_COUNT, 2 * PAIR_COUNT);
//!
//! assert_eq!(Symbol::from_str("Bolt"), Some(Symbol::Bolt));
//! assert_eq!(Symbol::Leaf.as_str(), "leaf");
//!
//! assert!(TileState::Matched.is_face_up());
//! assert_eq!(StarRating::for_moves(50), StarRating::Two);
//! ```

/// Number of distinct symbols (and therefore pairs) in a deck.
pub const PAIR_COUNT: usize = 8;

/// Number of tiles in a round.
pub const TILE_COUNT: usize = PAIR_COUNT * 2;

/// Grid columns used by views and the input cursor.
pub const GRID_COLUMNS: usize = 4;

/// Grid rows used by views and the input cursor.
pub const GRID_ROWS: usize = TILE_COUNT / GRID_COLUMNS;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// How long a mismatched pair stays revealed before flipping back.
pub const MISMATCH_DELAY_MS: u32 = 750;

/// Round clock tick period.
pub const CLOCK_TICK_MS: u32 = 1000;

/// Fewest moves that drop the rating to two stars.
pub const TWO_STAR_MOVES: u32 = 50;

/// Fewest moves that drop the rating to one star.
pub const ONE_STAR_MOVES: u32 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_dimensions() {
        assert_eq!(TILE_COUNT, 16);
        assert_eq!(GRID_COLUMNS * GRID_ROWS, TILE_COUNT);
        assert_eq!(MISMATCH_DELAY_MS, 750);
        assert_eq!(CLOCK_TICK_MS, 1000);
    }

    #[test]
    fn symbol_names_round_trip() {
        for symbol in Symbol::ALL {
            assert_eq!(Symbol::from_str(symbol.as_str()), Some(symbol));
        }
        assert_eq!(Symbol::from_str("PAPER-PLANE"), Some(Symbol::PaperPlane));
        assert_eq!(Symbol::from_str("pizza"), None);
    }

    #[test]
    fn symbol_glyphs_are_distinct() {
        for (i, a) in Symbol::ALL.iter().enumerate() {
            for b in &Symbol::ALL[i + 1..] {
                assert_ne!(a.glyph(), b.glyph());
            }
        }
    }

    // East Asian Wide code points near the symbol glyphs, plus the CJK and
    // emoji blocks. Terminals draw these two columns wide.
    fn is_wide(ch: char) -> bool {
        const WIDE: &[(u32, u32)] = &[
            (0x1100, 0x115F),
            (0x231A, 0x231B),
            (0x23E9, 0x23EC),
            (0x23F0, 0x23F0),
            (0x23F3, 0x23F3),
            (0x25FD, 0x25FE),
            (0x2614, 0x2615),
            (0x2648, 0x2653),
            (0x267F, 0x267F),
            (0x2693, 0x2693),
            (0x26A1, 0x26A1),
            (0x26AA, 0x26AB),
            (0x26BD, 0x26BE),
            (0x26C4, 0x26C5),
            (0x26CE, 0x26CE),
            (0x26D4, 0x26D4),
            (0x26EA, 0x26EA),
            (0x26F2, 0x26F3),
            (0x26F5, 0x26F5),
            (0x26FA, 0x26FA),
            (0x26FD, 0x26FD),
            (0x2705, 0x2705),
            (0x270A, 0x270B),
            (0x2728, 0x2728),
            (0x274C, 0x274C),
            (0x274E, 0x274E),
            (0x2753, 0x2755),
            (0x2757, 0x2757),
            (0x2795, 0x2797),
            (0x27B0, 0x27B0),
            (0x27BF, 0x27BF),
            (0x2B1B, 0x2B1C),
            (0x2B50, 0x2B50),
            (0x2B55, 0x2B55),
            (0x2E80, 0xA4CF),
            (0xAC00, 0xD7A3),
            (0xF900, 0xFAFF),
            (0xFE30, 0xFE4F),
            (0xFF00, 0xFF60),
            (0xFFE0, 0xFFE6),
            (0x1F300, 0x1F64F),
            (0x1F900, 0x1F9FF),
        ];
        let cp = ch as u32;
        WIDE.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
    }

    #[test]
    fn symbol_glyphs_are_single_column() {
        assert!(is_wide('⚓'));
        assert!(is_wide('⚡'));
        for symbol in Symbol::ALL {
            let glyph = symbol.glyph();
            assert!(!is_wide(glyph), "{symbol:?} glyph {glyph:?} is double width");
        }
    }

    #[test]
    fn star_rating_thresholds() {
        assert_eq!(StarRating::for_moves(0), StarRating::Three);
        assert_eq!(StarRating::for_moves(49), StarRating::Three);
        assert_eq!(StarRating::for_moves(50), StarRating::Two);
        assert_eq!(StarRating::for_moves(99), StarRating::Two);
        assert_eq!(StarRating::for_moves(100), StarRating::One);
        assert_eq!(StarRating::for_moves(1000), StarRating::One);
    }

    #[test]
    fn star_rating_never_increases_with_moves() {
        let mut prev = StarRating::for_moves(0).stars();
        for moves in 1..300 {
            let stars = StarRating::for_moves(moves).stars();
            assert!(stars <= prev, "rating rose at {moves} moves");
            prev = stars;
        }
    }
}

/// The eight card symbols.
///
/// Symbols carry no ordering semantics; equality is the only operation the
/// round rules use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Anchor,
    Bicycle,
    Bolt,
    Bomb,
    Cube,
    Diamond,
    Leaf,
    PaperPlane,
}

impl Symbol {
    /// Every symbol, once.
    pub const ALL: [Symbol; PAIR_COUNT] = [
        Symbol::Anchor,
        Symbol::Bicycle,
        Symbol::Bolt,
        Symbol::Bomb,
        Symbol::Cube,
        Symbol::Diamond,
        Symbol::Leaf,
        Symbol::PaperPlane,
    ];

    /// Parse a symbol from its name (case-insensitive, `-` and `_` are interchangeable)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_memory_types::Symbol;
    ///
    /// assert_eq!(Symbol::from_str("anchor"), Some(Symbol::Anchor));
    /// assert_eq!(Symbol::from_str("Paper_Plane"), Some(Symbol::PaperPlane));
    /// assert_eq!(Symbol::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "anchor" => Some(Symbol::Anchor),
            "bicycle" => Some(Symbol::Bicycle),
            "bolt" => Some(Symbol::Bolt),
            "bomb" => Some(Symbol::Bomb),
            "cube" => Some(Symbol::Cube),
            "diamond" => Some(Symbol::Diamond),
            "leaf" => Some(Symbol::Leaf),
            "paper_plane" => Some(Symbol::PaperPlane),
            _ => None,
        }
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Anchor => "anchor",
            Symbol::Bicycle => "bicycle",
            Symbol::Bolt => "bolt",
            Symbol::Bomb => "bomb",
            Symbol::Cube => "cube",
            Symbol::Diamond => "diamond",
            Symbol::Leaf => "leaf",
            Symbol::PaperPlane => "paper_plane",
        }
    }

    /// Glyph drawn on a face-up card. Every glyph occupies one terminal
    /// column, so none come from the emoji or East Asian wide ranges.
    pub fn glyph(&self) -> char {
        match self {
            Symbol::Anchor => '†',
            Symbol::Bicycle => '∞',
            Symbol::Bolt => 'ϟ',
            Symbol::Bomb => '●',
            Symbol::Cube => '■',
            Symbol::Diamond => '◆',
            Symbol::Leaf => '♣',
            Symbol::PaperPlane => '➤',
        }
    }
}

/// Per-tile state.
///
/// Transitions: `Hidden → Revealed → {Matched | Hidden}`. `Matched` is terminal
/// for the rest of the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileState {
    #[default]
    Hidden,
    Revealed,
    Matched,
}

impl TileState {
    pub fn is_face_up(&self) -> bool {
        !matches!(self, TileState::Hidden)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TileState::Hidden => "hidden",
            TileState::Revealed => "revealed",
            TileState::Matched => "matched",
        }
    }
}

/// Round-level input gate.
///
/// - **Accepting**: zero or one pending selection, input is taken
/// - **Resolving**: two pending selections under evaluation or waiting out
///   the mismatch delay, input is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundPhase {
    #[default]
    Accepting,
    Resolving,
}

/// Coarse 1-3 rating derived from the move count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StarRating {
    One = 1,
    Two = 2,
    Three = 3,
}

impl StarRating {
    /// Rating for a given move count. Lower move counts rate higher.
    pub fn for_moves(moves: u32) -> Self {
        if moves < TWO_STAR_MOVES {
            StarRating::Three
        } else if moves < ONE_STAR_MOVES {
            StarRating::Two
        } else {
            StarRating::One
        }
    }

    pub fn stars(&self) -> u8 {
        *self as u8
    }
}

/// Player actions produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    /// Select the tile under the cursor.
    Select,
    Restart,
}
