//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play. Views render a
//! [`RoundSnapshot`](crate::core::RoundSnapshot) into a framebuffer, and the
//! renderer flushes framebuffers to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Treat the view as a pure projection of tile state, never a source of truth
//! - Redraw only what changed between frames

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{put_clock, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
