//! Timer scheduling - the seam between round logic and wall-clock time
//!
//! The controller never sleeps. It asks a [`Scheduler`] for one-shot or
//! repeating timers and receives [`TimerEvent`]s back through
//! [`RoundController::handle_timer`](crate::RoundController::handle_timer).
//! Every event is stamped with the round generation it was scheduled for, so
//! an event that outlives its round is recognised as stale and ignored.
//!
//! [`TimerQueue`] is the deterministic implementation driven by explicit
//! `advance(elapsed_ms)` calls from a fixed-timestep loop or a test.

/// Opaque handle for cancelling a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// One second of round time elapsed.
    ClockTick,
    /// The mismatch delay for the pending pair expired.
    MismatchResolve,
}

/// Payload delivered when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerEvent {
    pub generation: u32,
    pub kind: TimerKind,
}

impl TimerEvent {
    pub fn new(generation: u32, kind: TimerKind) -> Self {
        Self { generation, kind }
    }
}

/// What to schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSpec {
    Once { after_ms: u32, event: TimerEvent },
    Every { period_ms: u32, event: TimerEvent },
}

impl TimerSpec {
    pub fn once(after_ms: u32, event: TimerEvent) -> Self {
        TimerSpec::Once { after_ms, event }
    }

    pub fn every(period_ms: u32, event: TimerEvent) -> Self {
        TimerSpec::Every { period_ms, event }
    }

    pub fn event(&self) -> TimerEvent {
        match *self {
            TimerSpec::Once { event, .. } | TimerSpec::Every { event, .. } => event,
        }
    }
}

/// Source of delayed callbacks.
///
/// Implementations must deliver each fired event back to the controller on the
/// same logical thread that calls `select_tile`; the controller is single-writer.
pub trait Scheduler {
    fn schedule(&mut self, spec: TimerSpec) -> TimerId;

    /// Cancel a timer. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug, Clone)]
struct PendingTimer {
    id: TimerId,
    due_ms: u64,
    period_ms: Option<u32>,
    event: TimerEvent,
}

/// Deterministic scheduler advanced by explicit elapsed time.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    timers: Vec<PendingTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds advanced since creation.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Advance time and append every event that became due to `out`.
    ///
    /// Events come out in due-time order (ties in scheduling order). A repeating
    /// timer fires once for every full period covered by `elapsed_ms`.
    pub fn advance_into(&mut self, elapsed_ms: u32, out: &mut Vec<TimerEvent>) {
        let target = self.now_ms.saturating_add(elapsed_ms as u64);

        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due_ms <= target)
                .min_by_key(|(_, t)| (t.due_ms, t.id))
                .map(|(i, _)| i);

            let Some(i) = next else {
                break;
            };

            let timer = &mut self.timers[i];
            self.now_ms = timer.due_ms;
            out.push(timer.event);

            if let Some(period) = timer.period_ms {
                timer.due_ms = timer.due_ms.saturating_add(period.max(1) as u64);
            } else {
                self.timers.remove(i);
            }
        }

        self.now_ms = target;
    }

    /// Allocating convenience wrapper around [`advance_into`](Self::advance_into).
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<TimerEvent> {
        let mut out = Vec::new();
        self.advance_into(elapsed_ms, &mut out);
        out
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, spec: TimerSpec) -> TimerId {
        self.next_id = self.next_id.wrapping_add(1);
        let id = TimerId(self.next_id);
        let (delay, period_ms) = match spec {
            TimerSpec::Once { after_ms, .. } => (after_ms, None),
            TimerSpec::Every { period_ms, .. } => (period_ms.max(1), Some(period_ms)),
        };
        self.timers.push(PendingTimer {
            id,
            due_ms: self.now_ms.saturating_add(delay as u64),
            period_ms,
            event: spec.event(),
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }
}
