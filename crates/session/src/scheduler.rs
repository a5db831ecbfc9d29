//! Tokio-backed [`Scheduler`].
//!
//! Each timer is a spawned task that sleeps (or ticks an interval) and then
//! sends its [`TimerEvent`] on an unbounded channel. Cancelling aborts the task.
//! An event already sent before the abort can still arrive; the controller
//! drops it by generation or because the clock is stopped.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};

use crate::core::{Scheduler, TimerEvent, TimerId, TimerSpec};

/// Must be created and used inside a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<TimerEvent>,
    next_id: u64,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its timers fire into.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            next_id: 0,
            tasks: HashMap::new(),
        };
        (scheduler, rx)
    }

    /// Timers that have not fired (one-shot) or been cancelled.
    pub fn active(&mut self) -> usize {
        self.tasks.retain(|_, task| !task.is_finished());
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, spec: TimerSpec) -> TimerId {
        self.tasks.retain(|_, task| !task.is_finished());
        self.next_id = self.next_id.wrapping_add(1);
        let id = TimerId::new(self.next_id);
        let tx = self.tx.clone();

        let task = match spec {
            TimerSpec::Once { after_ms, event } => tokio::spawn(async move {
                sleep(Duration::from_millis(after_ms as u64)).await;
                let _ = tx.send(event);
            }),
            TimerSpec::Every { period_ms, event } => tokio::spawn(async move {
                let period = Duration::from_millis(period_ms.max(1) as u64);
                let mut ticks = interval_at(Instant::now() + period, period);
                loop {
                    ticks.tick().await;
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }),
        };

        self.tasks.insert(id, task);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
