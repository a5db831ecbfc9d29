//! Terminal input module (controller-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`] and tracks the grid cursor that
//! turns a `Select` action into a tile index.

pub mod cursor;
pub mod map;

pub use tui_memory_types as types;

pub use cursor::GridCursor;
pub use map::{handle_key_event, should_quit};
