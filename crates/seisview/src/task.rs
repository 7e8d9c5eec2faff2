//! Cancellable periodic task driven by an external clock.
//!
//! Nothing here sleeps or spawns threads. The owner calls [`PeriodicTask::poll`]
//! with the current time from its event loop and runs the work when it
//! returns `true`.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTask {
    period: Duration,
    next: Option<Instant>,
}

impl PeriodicTask {
    /// A stopped task firing every `period` once started.
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts (or restarts) the task; the first run is one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    /// Stops the task. A cancelled task never fires until started again.
    pub fn cancel(&mut self) {
        self.next = None;
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Next time the task is due, if running.
    pub fn next_due(&self) -> Option<Instant> {
        self.next
    }

    /// Returns `true` if the task is due at `now` and schedules the next run.
    ///
    /// Runs missed while the loop was busy are coalesced into one.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next {
            Some(due) if now >= due => {
                let mut next = due + self.period;
                if next <= now {
                    next = now + self.period;
                }
                self.next = Some(next);
                true
            }
            _ => false,
        }
    }
}
