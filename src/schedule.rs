//! Virtual-time event queue that stands in for interval and timeout timers.
//!
//! Nothing here reads the wall clock. The host decides how far time moves
//! and the queue hands back, in order, every event that came due.

use std::time::Duration;

#[derive(Debug, Clone)]
struct Scheduled<E> {
    due: Duration,
    seq: u64,
    event: E,
}

#[derive(Debug, Clone)]
pub struct Timeline<E> {
    now: Duration,
    next_seq: u64,
    pending: Vec<Scheduled<E>>,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queues `event` to fire `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due: self.now + delay,
            seq,
            event,
        });
    }

    /// Drops every pending event matching `predicate`. Returns how many were dropped.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&E) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|scheduled| !predicate(&scheduled.event));
        before - self.pending.len()
    }

    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    pub fn contains(&self, mut predicate: impl FnMut(&E) -> bool) -> bool {
        self.pending.iter().any(|scheduled| predicate(&scheduled.event))
    }

    /// Due time of the earliest pending event.
    pub fn next_due(&self) -> Option<Duration> {
        self.earliest().map(|index| self.pending[index].due)
    }

    /// Removes the earliest event due at or before `until` and moves the clock to it.
    pub fn pop_due(&mut self, until: Duration) -> Option<E> {
        let index = self.earliest()?;
        if self.pending[index].due > until {
            return None;
        }
        Some(self.take(index))
    }

    /// Removes the earliest event however far away it is, moving the clock to it.
    pub fn pop_next(&mut self) -> Option<E> {
        let index = self.earliest()?;
        Some(self.take(index))
    }

    /// Moves the clock forward to `time`. Never moves it backwards.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    fn take(&mut self, index: usize) -> E {
        let scheduled = self.pending.swap_remove(index);
        self.now = self.now.max(scheduled.due);
        scheduled.event
    }

    fn earliest(&self) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .min_by_key(|(_, scheduled)| (scheduled.due, scheduled.seq))
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn pops_in_due_then_insertion_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(ms(20), "late");
        timeline.schedule(ms(10), "first");
        timeline.schedule(ms(10), "second");

        assert_eq!(timeline.pop_due(ms(100)), Some("first"));
        assert_eq!(timeline.now(), ms(10));
        assert_eq!(timeline.pop_due(ms(100)), Some("second"));
        assert_eq!(timeline.pop_due(ms(100)), Some("late"));
        assert_eq!(timeline.now(), ms(20));
        assert_eq!(timeline.pop_due(ms(100)), None);
    }

    #[test]
    fn events_beyond_the_horizon_wait() {
        let mut timeline = Timeline::new();
        timeline.schedule(ms(50), 1);
        assert_eq!(timeline.pop_due(ms(49)), None);
        timeline.advance_to(ms(49));
        assert_eq!(timeline.now(), ms(49));
        assert_eq!(timeline.next_due(), Some(ms(50)));
        assert_eq!(timeline.pop_due(ms(50)), Some(1));
    }

    #[test]
    fn delays_are_relative_to_the_current_time() {
        let mut timeline = Timeline::new();
        timeline.advance_to(ms(100));
        timeline.schedule(ms(5), ());
        assert_eq!(timeline.next_due(), Some(ms(105)));
    }

    #[test]
    fn cancellation_discards_matching_events() {
        let mut timeline = Timeline::new();
        timeline.schedule(ms(1), 'a');
        timeline.schedule(ms(2), 'b');
        timeline.schedule(ms(3), 'a');

        assert_eq!(timeline.cancel_where(|event| *event == 'a'), 2);
        assert!(!timeline.contains(|event| *event == 'a'));
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.cancel_all(), 1);
        assert!(timeline.is_empty());
        assert_eq!(timeline.pop_next(), None);
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut timeline: Timeline<()> = Timeline::new();
        timeline.advance_to(ms(30));
        timeline.advance_to(ms(10));
        assert_eq!(timeline.now(), ms(30));
    }
}
