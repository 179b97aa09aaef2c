//! Virtual-clock task scheduler.
//!
//! The countdown tick and the mismatch auto-hide are scheduled tasks with
//! explicit handles. The host moves the clock forward with real elapsed time;
//! due tasks are handed out one at a time in due order, ties broken by
//! scheduling order. A cancelled handle can never fire.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::cards::CardId;

/// Smallest period a repeating task may have.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle to a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle(u64);

impl TaskHandle {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// What a task does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Countdown tick.
    Tick,
    /// Turn a mismatched pair face down again.
    HideMismatch { first: CardId, second: CardId },
}

#[derive(Clone, Debug)]
struct Task {
    handle: TaskHandle,
    kind: TaskKind,
    due: Duration,
    period: Option<Duration>,
}

/// Task scheduler over a virtual clock.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    /// Create a scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `kind` once, `delay` from now.
    pub fn schedule_once(&mut self, delay: Duration, kind: TaskKind) -> TaskHandle {
        self.push(kind, self.now + delay, None)
    }

    /// Run `kind` every `period`, first one `period` from now.
    pub fn schedule_every(&mut self, period: Duration, kind: TaskKind) -> TaskHandle {
        let period = period.max(MIN_PERIOD);
        self.push(kind, self.now + period, Some(period))
    }

    fn push(&mut self, kind: TaskKind, due: Duration, period: Option<Duration>) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            handle,
            kind,
            due,
            period,
        });
        handle
    }

    /// Cancel a task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    /// Cancel every pending task.
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Is this task still waiting to fire?
    #[must_use]
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Time until the next task is due, if any.
    #[must_use]
    pub fn until_next(&self) -> Option<Duration> {
        self.tasks
            .iter()
            .map(|t| t.due.saturating_sub(self.now))
            .min()
    }

    /// Take the earliest task due at or before `deadline`.
    ///
    /// Moves the clock to the task's due time. Repeating tasks are
    /// re-armed one period later.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<(TaskHandle, TaskKind)> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.handle.0))
            .map(|(i, _)| i)?;

        let task = &self.tasks[idx];
        let fired = (task.handle, task.kind);
        let (due, period) = (task.due, task.period);
        self.now = self.now.max(due);

        match period {
            Some(period) => self.tasks[idx].due += period,
            None => {
                self.tasks.swap_remove(idx);
            }
        }
        Some(fired)
    }

    /// Move the clock forward without firing anything.
    pub fn advance_clock_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_once_fires_at_delay() {
        let mut sched = Scheduler::new();
        let kind = TaskKind::HideMismatch {
            first: CardId::new(0),
            second: CardId::new(1),
        };
        let handle = sched.schedule_once(ms(500), kind);

        assert_eq!(sched.until_next(), Some(ms(500)));
        assert!(sched.pop_due(ms(499)).is_none());
        assert_eq!(sched.pop_due(ms(500)), Some((handle, kind)));
        assert!(!sched.is_pending(handle));
        assert_eq!(sched.now(), ms(500));
    }

    #[test]
    fn test_every_rearms() {
        let mut sched = Scheduler::new();
        let handle = sched.schedule_every(ms(1000), TaskKind::Tick);

        let mut fired = 0;
        while sched.pop_due(ms(3500)).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 3);
        assert!(sched.is_pending(handle));
        assert_eq!(sched.now(), ms(3000));
        sched.advance_clock_to(ms(3500));
        assert_eq!(sched.until_next(), Some(ms(500)));
    }

    #[test]
    fn test_due_order_and_ties() {
        let mut sched = Scheduler::new();
        let tick = sched.schedule_every(ms(1000), TaskKind::Tick);
        let hide_kind = TaskKind::HideMismatch {
            first: CardId::new(2),
            second: CardId::new(3),
        };
        let hide = sched.schedule_once(ms(1000), hide_kind);
        let early = sched.schedule_once(ms(10), TaskKind::Tick);

        assert_eq!(sched.pop_due(ms(1000)).map(|f| f.0), Some(early));
        assert_eq!(sched.pop_due(ms(1000)).map(|f| f.0), Some(tick));
        assert_eq!(sched.pop_due(ms(1000)).map(|f| f.0), Some(hide));
        assert!(sched.pop_due(ms(1000)).is_none());
    }

    #[test]
    fn test_cancel() {
        let mut sched = Scheduler::new();
        let a = sched.schedule_every(ms(100), TaskKind::Tick);
        let b = sched.schedule_once(ms(100), TaskKind::Tick);

        assert!(sched.cancel(a));
        assert!(!sched.cancel(a));
        assert_eq!(sched.pending(), 1);
        assert_eq!(sched.pop_due(ms(100)).map(|f| f.0), Some(b));

        sched.schedule_every(ms(100), TaskKind::Tick);
        sched.cancel_all();
        assert!(sched.pop_due(ms(10_000)).is_none());
        assert_eq!(sched.until_next(), None);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut sched = Scheduler::new();
        sched.schedule_every(Duration::ZERO, TaskKind::Tick);
        let mut fired = 0;
        while sched.pop_due(ms(5)).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 5);
    }
}
