//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rules of the matching-pairs game: deck
//! composition, tile reveal/hide transitions, pair evaluation, input gating
//! during the mismatch delay, scoring and end-of-round detection. It has
//! **no dependencies** on terminals, input devices or async runtimes, making it:
//!
//! - **Deterministic**: Same seed deals identical decks
//! - **Testable**: Time only moves when a [`Scheduler`] says so
//! - **Portable**: Runs under the terminal loop, the tokio session, or a test
//!
//! # Module Structure
//!
//! - [`deck`]: Seeded Fisher-Yates deck builder (two of each symbol)
//! - [`round`]: The 16-tile aggregate and its pending selection
//! - [`controller`]: Selection rules and round lifecycle
//! - [`score`]: Move counter and star rating
//! - [`clock`]: Whole-second round clock
//! - [`timer`]: Scheduler seam and the deterministic [`TimerQueue`]
//! - [`result`]: Once-per-round result packaging
//! - [`event`]: Outbound events and the [`RoundObserver`] interface
//! - [`snapshot`]: Plain-data copy of a round for rendering
//!
//! # Game Rules
//!
//! - **Deck**: 8 symbols, each on exactly two tiles, uniformly shuffled
//! - **Moves**: Every accepted reveal is one move (a pair costs two)
//! - **Match**: Both tiles lock face up immediately
//! - **Mismatch**: Both tiles flip back after 750ms; input is ignored meanwhile
//! - **Win**: All 16 tiles matched; the clock stops and one result is reported
//!
//! # Example
//!
//! ```
//! use tui_memory_core::{RoundController, Selection};
//! use tui_memory_types::{TileState, TILE_COUNT};
//!
//! let mut game = RoundController::with_seed(12345);
//! game.start_new_round();
//!
//! assert_eq!(game.select_tile(0), Ok(Selection::FirstReveal));
//!
//! // Find tile 0's twin and complete the pair.
//! let tiles = game.round().unwrap().tiles();
//! let twin = (1..TILE_COUNT).find(|&i| tiles[i].symbol == tiles[0].symbol).unwrap();
//! let outcome = game.select_tile(twin).unwrap();
//!
//! assert!(matches!(outcome, Selection::Matched { won: false, .. }));
//! assert_eq!(game.tile_state(0), Some(TileState::Matched));
//! assert_eq!(game.move_count(), 2);
//! ```
//!
//! # Timing
//!
//! The controller schedules a repeating 1s clock tick and a one-shot 750ms
//! mismatch timer through its [`Scheduler`]. With the default [`TimerQueue`],
//! call [`RoundController::tick`] every frame with the elapsed time.

pub mod clock;
pub mod controller;
pub mod deck;
pub mod error;
pub mod event;
pub mod result;
pub mod round;
pub mod score;
pub mod snapshot;
pub mod timer;

pub use tui_memory_types as types;

// Re-export commonly used types for convenience
pub use clock::RoundClock;
pub use controller::{RejectReason, RoundController, Selection};
pub use deck::{build_deck, is_valid_deck, Deck, DeckBuilder};
pub use error::RoundError;
pub use event::{RoundEvent, RoundObserver};
pub use result::{ResultReporter, RoundResult};
pub use round::{Round, Tile};
pub use score::ScoreTracker;
pub use snapshot::{RoundSnapshot, TileSnapshot};
pub use timer::{Scheduler, TimerEvent, TimerId, TimerKind, TimerQueue, TimerSpec};
