//! Round clock - whole seconds since round start
//!
//! The clock owns a repeating [`CLOCK_TICK_MS`] timer while running. Starting
//! an already-running clock cancels the old ticker before arming a new one, so
//! tickers never accumulate.

use crate::timer::{Scheduler, TimerEvent, TimerId, TimerKind, TimerSpec};
use crate::types::CLOCK_TICK_MS;

#[derive(Debug, Clone, Default)]
pub struct RoundClock {
    elapsed_secs: u32,
    running: bool,
    ticker: Option<TimerId>,
}

impl RoundClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to zero and start ticking for `generation`.
    pub fn start<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, generation: u32) {
        self.cancel_ticker(scheduler);
        self.elapsed_secs = 0;
        self.running = true;
        let event = TimerEvent::new(generation, TimerKind::ClockTick);
        self.ticker = Some(scheduler.schedule(TimerSpec::every(CLOCK_TICK_MS, event)));
    }

    /// Freeze the count. No-op when already stopped.
    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if !self.running {
            return;
        }
        self.running = false;
        self.cancel_ticker(scheduler);
    }

    /// Handle one tick. Returns the new elapsed seconds, or `None` if stopped.
    pub fn on_tick(&mut self) -> Option<u32> {
        if !self.running {
            return None;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        Some(self.elapsed_secs)
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticker(&self) -> Option<TimerId> {
        self.ticker
    }

    fn cancel_ticker<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.ticker.take() {
            scheduler.cancel(id);
        }
    }
}
