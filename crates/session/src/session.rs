//! Session task and its handle.
//!
//! The task owns a [`RoundController`] driven by a [`TokioScheduler`]. Commands
//! carry a oneshot reply where the caller needs the outcome. After every
//! command or timer the queued [`RoundEvent`]s are published on a broadcast
//! channel in emission order.

use log::{info, warn};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::core::{RoundController, RoundError, RoundEvent, RoundSnapshot, Selection, TimerEvent};
use crate::scheduler::TokioScheduler;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session task is no longer running")]
    Closed,
    #[error(transparent)]
    Round(#[from] RoundError),
}

/// Command delivered to the session task.
#[derive(Debug)]
pub enum SessionCommand {
    NewRound {
        reply: oneshot::Sender<()>,
    },
    Select {
        index: usize,
        reply: oneshot::Sender<Result<Selection, RoundError>>,
    },
    Snapshot {
        reply: oneshot::Sender<RoundSnapshot>,
    },
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub seed: u64,
    pub max_pending_commands: usize,
    pub event_capacity: usize,
}

impl SessionConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_pending_commands: 32,
            event_capacity: 256,
        }
    }
}

/// Client side of a running session.
///
/// No round is dealt until [`SessionHandle::new_round`] is called, so
/// subscribers attached right after `spawn` see the first `RoundStarted`.
#[derive(Debug)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    events: broadcast::Sender<RoundEvent>,
    task: JoinHandle<RoundSnapshot>,
}

impl SessionHandle {
    /// Spawn the session task on the current tokio runtime.
    pub fn spawn(config: SessionConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(config.max_pending_commands.max(1));
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        let publisher = events.clone();

        let task = tokio::spawn(async move {
            let (scheduler, timers) = TokioScheduler::new();
            let controller = RoundController::new(scheduler, config.seed);
            info!("session started (seed {})", config.seed);
            run(controller, timers, cmd_rx, publisher).await
        });

        Self {
            commands: cmd_tx,
            events,
            task,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RoundEvent> {
        self.events.subscribe()
    }

    /// Deal a fresh round, abandoning the current one.
    pub async fn new_round(&self) -> Result<(), SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::NewRound { reply }).await?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    pub async fn select(&self, index: usize) -> Result<Selection, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Select { index, reply }).await?;
        let outcome = rx.await.map_err(|_| SessionError::Closed)?;
        Ok(outcome?)
    }

    pub async fn snapshot(&self) -> Result<RoundSnapshot, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Snapshot { reply }).await?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Stop the task and return the final state of the session.
    pub async fn shutdown(self) -> Result<RoundSnapshot, SessionError> {
        // The task may already be gone; joining below reports that.
        let _ = self.commands.send(SessionCommand::Shutdown).await;
        self.task.await.map_err(|_| SessionError::Closed)
    }

    async fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::Closed)
    }
}

async fn run(
    mut controller: RoundController<TokioScheduler>,
    mut timers: mpsc::UnboundedReceiver<TimerEvent>,
    mut commands: mpsc::Receiver<SessionCommand>,
    events: broadcast::Sender<RoundEvent>,
) -> RoundSnapshot {
    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(SessionCommand::NewRound { reply }) => {
                    controller.start_new_round();
                    let _ = reply.send(());
                }
                Some(SessionCommand::Select { index, reply }) => {
                    let outcome = controller.select_tile(index);
                    if let Err(err) = &outcome {
                        warn!("select({index}) failed: {err}");
                    }
                    let _ = reply.send(outcome);
                }
                Some(SessionCommand::Snapshot { reply }) => {
                    let _ = reply.send(controller.snapshot());
                }
                Some(SessionCommand::Shutdown) | None => break,
            },
            Some(event) = timers.recv() => {
                controller.handle_timer(event);
            }
        }

        for event in controller.drain_events() {
            // No subscribers is fine.
            let _ = events.send(event);
        }
    }

    info!("session stopped after {} round(s)", controller.generation());
    controller.snapshot()
}
