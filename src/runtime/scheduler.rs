//! Deterministic delayed-task queue.
//!
//! The coordinator is single-threaded. Delayed work does not run on a timer
//! thread; the host advances a virtual clock and collects the tasks that came
//! due, then feeds them back as events. Tasks due at the same instant fire in
//! scheduling order.

use crate::app::actions::ScheduledTask;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    seq: u64,
    queue: BTreeMap<(Duration, u64), ScheduledTask>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn schedule(&mut self, delay: Duration, task: ScheduledTask) {
        let due = self.now.saturating_add(delay);
        tracing::trace!(?due, ?task, "task scheduled");
        self.queue.insert((due, self.seq), task);
        self.seq += 1;
    }

    /// Moves the clock forward and returns the tasks that came due, in order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<ScheduledTask> {
        self.now = self.now.saturating_add(elapsed);

        let later = self.queue.split_off(&(self.now, u64::MAX));
        let due = std::mem::replace(&mut self.queue, later);
        due.into_values().collect()
    }
}
