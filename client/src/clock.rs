use std::time::Duration;

use idlemon_replay::{Clock, TimerHandle, TimerQueue};
use tokio::time::Instant;

/// Clock backed by tokio's timer
///
/// The clock only records deadlines. The client loop sleeps until the
/// earliest one and hands the due handles back to the session.
#[derive(Debug, Default)]
pub struct TokioClock {
    timers: TimerQueue<Instant>,
}

impl TokioClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next().map(|(_, deadline)| deadline)
    }

    /// Remove and return every handle due at `now`, earliest first
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerHandle> {
        let mut due = Vec::new();
        while let Some((handle, deadline)) = self.timers.next() {
            if deadline > now {
                break;
            }
            self.timers.remove(handle);
            due.push(handle);
        }
        due
    }

    pub fn live_count(&self) -> usize {
        self.timers.len()
    }
}

impl Clock for TokioClock {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.timers.insert(Instant::now() + delay)
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

    #[tokio::test(start_paused = true)]
    async fn test_take_due_respects_deadlines() {
        let mut clock = TokioClock::new();
        let soon = clock.schedule(Duration::from_millis(100));
        let later = clock.schedule(Duration::from_millis(900));

        assert!(clock.take_due(Instant::now()).is_empty());

        tokio::time::advance(Duration::from_millis(150)).await;
        assert_eq!(clock.take_due(Instant::now()), vec![soon]);
        assert_eq!(clock.live_count(), 1);

        clock.cancel(later);
        assert_eq!(clock.next_deadline(), None);
    }
}
