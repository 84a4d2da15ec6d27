//! Single-shot debounce deadline for auto-save
//!
//! Every edit pushes the deadline out; the save fires once the UI has been
//! quiet for the full delay. Time is passed in so the UI loop and the tests
//! drive it the same way.

use std::time::{Duration, Instant};

use crate::constants::autosave::DELAY_MS;

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DELAY_MS))
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Restart the timer, replacing any pending deadline
    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the pending deadline, if any
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns true exactly once when the deadline has passed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delay_is_one_second() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();
        debouncer.restart(start);
        assert_eq!(debouncer.remaining(start), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_fires_once_after_quiet_period() {
        let mut debouncer = Debouncer::new(Duration::from_millis(1000));
        let start = Instant::now();
        debouncer.restart(start);

        assert!(!debouncer.poll(start + Duration::from_millis(999)));
        assert!(debouncer.poll(start + Duration::from_millis(1000)));
        assert!(!debouncer.poll(start + Duration::from_millis(5000)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_restart_pushes_deadline_out() {
        let mut debouncer = Debouncer::new(Duration::from_millis(1000));
        let start = Instant::now();
        debouncer.restart(start);
        debouncer.restart(start + Duration::from_millis(800));

        assert!(!debouncer.poll(start + Duration::from_millis(1200)));
        assert!(debouncer.poll(start + Duration::from_millis(1800)));
    }

    #[test]
    fn test_cancel_drops_pending_fire() {
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        let start = Instant::now();
        debouncer.restart(start);
        debouncer.cancel();
        assert!(!debouncer.poll(start + Duration::from_secs(1)));
        assert_eq!(debouncer.remaining(start), None);
    }
}
