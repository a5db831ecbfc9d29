//! TUI Memory (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_memory::{core,input,session,term,types}` and adds
//! the process-level pieces shared by the binaries: environment [`config`], [`logging`] and
//! the headless [`autoplay`] player.

pub mod autoplay;
pub mod config;
pub mod logging;

pub use tui_memory_core as core;
pub use tui_memory_input as input;
pub use tui_memory_session as session;
pub use tui_memory_term as term;
pub use tui_memory_types as types;
