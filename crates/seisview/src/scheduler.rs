//! Per-axis debouncing of slice index changes.
//!
//! Each slider event updates the pending index right away and restarts that
//! axis's quiet-period timer. The index is committed, and a fetch issued,
//! only when the timer expires without another event for the same axis.

use std::time::{Duration, Instant};

use seisview_core::{SliceIndices, SliceKind};

/// Debounce state of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Debounce {
    #[default]
    Idle,
    Pending { value: usize, deadline: Instant },
}

impl Debounce {
    /// Replaces any pending timer with one for `value`.
    #[must_use]
    pub fn schedule(self, value: usize, now: Instant, delay: Duration) -> Self {
        Debounce::Pending {
            value,
            deadline: now + delay,
        }
    }

    #[must_use]
    pub fn cancel(self) -> Self {
        Debounce::Idle
    }

    /// Fires the timer if it has expired at `now`.
    #[must_use]
    pub fn poll(self, now: Instant) -> (Self, Option<usize>) {
        match self {
            Debounce::Pending { value, deadline } if now >= deadline => {
                (Debounce::Idle, Some(value))
            }
            other => (other, None),
        }
    }

    pub fn pending_value(&self) -> Option<usize> {
        match self {
            Debounce::Pending { value, .. } => Some(*value),
            Debounce::Idle => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self {
            Debounce::Pending { deadline, .. } => Some(*deadline),
            Debounce::Idle => None,
        }
    }
}

/// Independent debouncers for the three slice axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceUpdateScheduler {
    delay: Duration,
    axes: [Debounce; 3],
}

impl SliceUpdateScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            axes: [Debounce::Idle; 3],
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records an index change for `kind`, restarting its timer.
    pub fn push(&mut self, kind: SliceKind, value: usize, now: Instant) {
        let axis = &mut self.axes[kind.dim()];
        *axis = axis.schedule(value, now, self.delay);
    }

    pub fn state(&self, kind: SliceKind) -> Debounce {
        self.axes[kind.dim()]
    }

    /// Drops every pending timer.
    pub fn cancel_all(&mut self) {
        self.axes = [Debounce::Idle; 3];
    }

    pub fn is_idle(&self) -> bool {
        self.axes.iter().all(|a| *a == Debounce::Idle)
    }

    /// Earliest pending deadline across all axes.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.axes.iter().filter_map(Debounce::deadline).min()
    }

    /// Fires every expired timer and returns the committed `(kind, index)`s.
    pub fn poll(&mut self, now: Instant) -> Vec<(SliceKind, usize)> {
        let mut fired = Vec::new();
        for kind in SliceKind::ALL {
            let (next, value) = self.axes[kind.dim()].poll(now);
            self.axes[kind.dim()] = next;
            if let Some(value) = value {
                fired.push((kind, value));
            }
        }
        fired
    }

    /// `base` with every pending value applied.
    pub fn overlay(&self, base: SliceIndices) -> SliceIndices {
        SliceKind::ALL.into_iter().fold(base, |acc, kind| {
            match self.axes[kind.dim()].pending_value() {
                Some(value) => acc.with(kind, value),
                None => acc,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_rapid_changes_commit_last_value_once() {
        let t0 = Instant::now();
        let mut scheduler = SliceUpdateScheduler::new(150 * MS);

        scheduler.push(SliceKind::Inline, 3, t0);
        scheduler.push(SliceKind::Inline, 4, t0 + 100 * MS);
        scheduler.push(SliceKind::Inline, 5, t0 + 200 * MS);

        assert!(scheduler.poll(t0 + 300 * MS).is_empty());
        assert_eq!(scheduler.poll(t0 + 350 * MS), vec![(SliceKind::Inline, 5)]);
        assert!(scheduler.poll(t0 + 1000 * MS).is_empty());
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_axes_are_independent() {
        let t0 = Instant::now();
        let mut scheduler = SliceUpdateScheduler::new(150 * MS);

        scheduler.push(SliceKind::Inline, 1, t0);
        scheduler.push(SliceKind::Sample, 7, t0 + 100 * MS);
        assert_eq!(scheduler.next_deadline(), Some(t0 + 150 * MS));

        assert_eq!(scheduler.poll(t0 + 150 * MS), vec![(SliceKind::Inline, 1)]);
        assert_eq!(scheduler.state(SliceKind::Sample).pending_value(), Some(7));
        assert_eq!(scheduler.poll(t0 + 250 * MS), vec![(SliceKind::Sample, 7)]);
    }

    #[test]
    fn test_overlay_and_cancel() {
        let t0 = Instant::now();
        let mut scheduler = SliceUpdateScheduler::new(150 * MS);
        scheduler.push(SliceKind::Xline, 9, t0);

        let base = SliceIndices::new(1, 2, 3);
        assert_eq!(scheduler.overlay(base), SliceIndices::new(1, 9, 3));

        scheduler.cancel_all();
        assert_eq!(scheduler.overlay(base), base);
        assert!(scheduler.poll(t0 + 1000 * MS).is_empty());
    }

    #[test]
    fn test_debounce_state_machine() {
        let t0 = Instant::now();
        let state = Debounce::Idle.schedule(4, t0, 10 * MS);
        assert_eq!(state.deadline(), Some(t0 + 10 * MS));

        let (state, fired) = state.poll(t0 + 5 * MS);
        assert_eq!(fired, None);
        let (state, fired) = state.poll(t0 + 10 * MS);
        assert_eq!(fired, Some(4));
        assert_eq!(state, Debounce::Idle);
        assert_eq!(Debounce::Idle.schedule(1, t0, MS).cancel(), Debounce::Idle);
    }
}
