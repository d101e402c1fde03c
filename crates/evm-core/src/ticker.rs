use std::time::{Duration, Instant};

/// Fixed-period scheduler for the polling bridge.
///
/// The owner's event loop asks [`Ticker::time_until_due`] how long it may
/// block waiting for other input, and calls [`Ticker::fire`] when the tick is
/// due. A late tick is not replayed: the next deadline is always one period
/// after the tick that actually ran.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Instant,
}

impl Ticker {
    /// The first tick is due immediately
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Returns true and schedules the next tick if a tick is due at `now`
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.next_due = now + self.period;
        true
    }
}
