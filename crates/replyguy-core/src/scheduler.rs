//! Deterministic scheduler driven by a fake clock.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

use replyguy_protocols::{Scheduler, TimerKey};
use tracing::trace;

#[derive(Debug, Default)]
struct ClockState {
    now: Duration,
    pending: BTreeMap<TimerKey, Duration>,
}

/// A [`Scheduler`] whose clock only moves when told to.
///
/// Timers never fire on their own; [`advance`](Self::advance) returns the keys
/// that came due, earliest deadline first, and the caller delivers them.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    state: RefCell<ClockState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn deadline(&self, key: TimerKey) -> Option<Duration> {
        self.state.borrow().pending.get(&key).copied()
    }

    pub fn pending(&self) -> Vec<TimerKey> {
        self.state.borrow().pending.keys().copied().collect()
    }

    /// Move the clock forward and take every timer that is now due.
    pub fn advance(&self, by: Duration) -> Vec<TimerKey> {
        let mut state = self.state.borrow_mut();
        state.now += by;
        let now = state.now;
        let mut due: Vec<(Duration, TimerKey)> = state
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, deadline)| (*deadline, *key))
            .collect();
        due.sort();
        for (_, key) in &due {
            state.pending.remove(key);
        }
        due.into_iter().map(|(_, key)| key).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, key: TimerKey, delay: Duration) {
        let mut state = self.state.borrow_mut();
        let deadline = state.now + delay;
        trace!("schedule {} at {:?}", key, deadline);
        state.pending.insert(key, deadline);
    }

    fn cancel(&self, key: TimerKey) {
        self.state.borrow_mut().pending.remove(&key);
    }

    fn is_pending(&self, key: TimerKey) -> bool {
        self.state.borrow().pending.contains_key(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_after_delay() {
        let sched = ManualScheduler::new();
        sched.schedule(TimerKey::Reposition, ms(100));
        assert!(sched.advance(ms(99)).is_empty());
        assert_eq!(sched.advance(ms(1)), vec![TimerKey::Reposition]);
        assert!(!sched.is_pending(TimerKey::Reposition));
    }

    #[test]
    fn test_reschedule_restarts_window() {
        let sched = ManualScheduler::new();
        sched.schedule(TimerKey::Reposition, ms(100));
        sched.advance(ms(60));
        sched.schedule(TimerKey::Reposition, ms(100));
        assert!(sched.advance(ms(60)).is_empty());
        assert_eq!(sched.deadline(TimerKey::Reposition), Some(ms(160)));
        assert_eq!(sched.advance(ms(40)), vec![TimerKey::Reposition]);
    }

    #[test]
    fn test_cancel() {
        let sched = ManualScheduler::new();
        sched.schedule(TimerKey::Activation, ms(200));
        sched.cancel(TimerKey::Activation);
        assert!(sched.advance(ms(500)).is_empty());
    }

    #[test]
    fn test_due_in_deadline_order() {
        let sched = ManualScheduler::new();
        sched.schedule(TimerKey::NavigationSettle, ms(50));
        sched.schedule(TimerKey::Reposition, ms(100));
        sched.schedule(TimerKey::Activation, ms(75));
        assert_eq!(
            sched.advance(ms(200)),
            vec![
                TimerKey::NavigationSettle,
                TimerKey::Activation,
                TimerKey::Reposition
            ]
        );
        assert_eq!(sched.now(), ms(200));
        assert!(sched.pending().is_empty());
    }
}
