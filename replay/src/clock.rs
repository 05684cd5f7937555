//! Playback clock
//!
//! A clock only hands out handles and remembers deadlines. It never calls
//! back into the engine: whoever drives the clock passes fired handles to
//! [`Session::on_timer`](crate::Session::on_timer), which drops any handle
//! that is no longer current.

use std::time::Duration;

/// Identity of one scheduled callback
///
/// Handles are numbered per clock and never reused, so a handle that was
/// cancelled can never be mistaken for a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Source of delayed wakeups for a playback session
pub trait Clock {
    /// Schedule a wakeup after `delay`
    fn schedule(&mut self, delay: Duration) -> TimerHandle;

    /// Cancel one wakeup. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);

    /// Cancel every pending wakeup
    fn cancel_all(&mut self);
}

/// Pending deadlines keyed by handle
///
/// Shared bookkeeping for clock implementations. `T` is whatever the clock
/// measures time in.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    next_id: u64,
    pending: Vec<(TimerHandle, T)>,
}

impl<T: Copy + Ord> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Register a deadline and return its handle
    pub fn insert(&mut self, deadline: T) -> TimerHandle {
        let handle = TimerHandle::new(self.next_id);
        self.next_id += 1;
        self.pending.push((handle, deadline));
        handle
    }

    /// Remove a handle, returning whether it was pending
    pub fn remove(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(h, _)| *h != handle);
        self.pending.len() != before
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn contains(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|(h, _)| *h == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest deadline; ties go to the handle scheduled first
    pub fn next(&self) -> Option<(TimerHandle, T)> {
        self.pending
            .iter()
            .copied()
            .min_by_key(|(handle, deadline)| (*deadline, *handle))
    }
}

impl<T: Copy + Ord> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Simulated clock measured in virtual milliseconds
///
/// Nothing happens until the caller fires timers, which makes whole battles
/// replayable in tests without waiting.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: u64,
    timers: TimerQueue<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of wakeups still pending
    pub fn live_count(&self) -> usize {
        self.timers.len()
    }

    pub fn is_live(&self, handle: TimerHandle) -> bool {
        self.timers.contains(handle)
    }

    /// Virtual time of the earliest pending wakeup
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next().map(|(_, deadline)| deadline)
    }

    /// Jump to the earliest deadline and release its handle
    pub fn fire_next(&mut self) -> Option<TimerHandle> {
        let (handle, deadline) = self.timers.next()?;
        self.timers.remove(handle);
        self.now = self.now.max(deadline);
        Some(handle)
    }

    /// Move time forward, releasing every handle due by the new time
    ///
    /// Handles come back in deadline order. Timers scheduled while the
    /// caller processes them are not included.
    pub fn advance(&mut self, millis: u64) -> Vec<TimerHandle> {
        let target = self.now.saturating_add(millis);
        let mut due = Vec::new();

        while let Some((handle, deadline)) = self.timers.next() {
            if deadline > target {
                break;
            }
            self.timers.remove(handle);
            due.push(handle);
        }

        self.now = target;
        due
    }
}

impl Clock for ManualClock {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.timers.insert(self.now.saturating_add(millis))
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.remove(handle);
    }

    fn cancel_all(&mut self) {
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut clock = ManualClock::new();
        let a = clock.schedule(Duration::from_millis(10));
        clock.cancel(a);
        let b = clock.schedule(Duration::from_millis(10));

        assert_ne!(a, b);
        assert!(!clock.is_live(a));
        assert!(clock.is_live(b));
    }

    #[test]
    fn test_fire_next_in_deadline_order() {
        let mut clock = ManualClock::new();
        let late = clock.schedule(Duration::from_millis(500));
        let early = clock.schedule(Duration::from_millis(100));

        assert_eq!(clock.next_deadline(), Some(100));
        assert_eq!(clock.fire_next(), Some(early));
        assert_eq!(clock.now(), 100);
        assert_eq!(clock.fire_next(), Some(late));
        assert_eq!(clock.now(), 500);
        assert_eq!(clock.fire_next(), None);
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut clock = ManualClock::new();
        let first = clock.schedule(Duration::from_millis(50));
        let second = clock.schedule(Duration::from_millis(50));

        assert_eq!(clock.advance(50), vec![first, second]);
    }

    #[test]
    fn test_advance_releases_only_due() {
        let mut clock = ManualClock::new();
        let due = clock.schedule(Duration::from_millis(200));
        let later = clock.schedule(Duration::from_millis(800));

        assert_eq!(clock.advance(300), vec![due]);
        assert_eq!(clock.now(), 300);
        assert!(clock.is_live(later));
        assert_eq!(clock.live_count(), 1);
    }

    #[test]
    fn test_cancel_all_is_idempotent() {
        let mut clock = ManualClock::new();
        clock.cancel_all();
        clock.schedule(Duration::from_millis(1));
        clock.cancel_all();
        clock.cancel_all();

        assert_eq!(clock.live_count(), 0);
        assert_eq!(clock.fire_next(), None);
    }

    #[test]
    fn test_cancel_unknown_handle() {
        let mut clock = ManualClock::new();
        let handle = clock.schedule(Duration::from_millis(5));
        clock.cancel(TimerHandle::new(999));

        assert!(clock.is_live(handle));
    }
}
