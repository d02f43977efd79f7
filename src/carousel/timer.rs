use std::time::{Duration, Instant};

/// A single pending one-shot deadline. Arming replaces whatever was pending,
/// so a slot never holds more than one timer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timeout {
    deadline: Option<Instant>,
}

impl Timeout {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Schedule the timeout `delay` after `now`. Returns true if a previously
    /// pending deadline was cancelled.
    pub fn arm(&mut self, now: Instant, delay: Duration) -> bool {
        self.deadline.replace(now + delay).is_some()
    }

    /// Returns true if a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fires at most once per arming. Clears the slot when due.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if now >= at => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the deadline, zero if already due
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|at| at.saturating_duration_since(now))
    }
}

/// A repeating deadline with a fixed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    next: Option<Instant>,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Arm the interval with its first fire at `first`. Re-arming replaces
    /// the existing schedule.
    pub fn arm_at(&mut self, first: Instant) {
        self.next = Some(first);
    }

    pub fn cancel(&mut self) -> bool {
        self.next.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    pub fn next_fire(&self) -> Option<Instant> {
        self.next
    }

    /// Fires at most once per call. Missed periods are coalesced and the next
    /// deadline moves to the first period boundary strictly after `now`.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        let Some(at) = self.next else {
            return false;
        };
        if now < at {
            return false;
        }

        let behind = (now - at).as_nanos() / self.period.as_nanos();
        let skipped = u32::try_from(behind).unwrap_or(u32::MAX - 1);
        self.next = Some(at + self.period * (skipped + 1));
        true
    }
}
