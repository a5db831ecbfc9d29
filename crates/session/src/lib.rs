//! Session module - the round controller on a tokio task
//!
//! The controller is single-writer: one task owns it and reacts to two kinds of
//! stimuli, player commands and fired timers. Both arrive over channels, so no
//! handler ever runs concurrently with another.
//!
//! ```text
//! SessionHandle ──SessionCommand──▶ ┌──────────────┐ ──RoundEvent──▶ broadcast subscribers
//!                                   │ session task │
//! TokioScheduler ──TimerEvent─────▶ └──────────────┘
//! ```
//!
//! - [`scheduler`]: [`TokioScheduler`], timers as abortable tokio tasks
//! - [`session`]: the command/event loop and its [`SessionHandle`]
//!
//! # Example
//!
//! ```no_run
//! use tui_memory_session::{SessionConfig, SessionHandle};
//!
//! # async fn demo() -> Result<(), tui_memory_session::SessionError> {
//! let session = SessionHandle::spawn(SessionConfig::with_seed(7));
//! let mut events = session.subscribe();
//! session.new_round().await?;
//! let outcome = session.select(0).await?;
//! println!("{outcome:?}, first event: {:?}", events.recv().await);
//! session.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod scheduler;
pub mod session;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use scheduler::TokioScheduler;
pub use session::{SessionCommand, SessionConfig, SessionError, SessionHandle};
