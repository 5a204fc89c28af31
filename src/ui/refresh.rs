use std::time::{Duration, Instant};

/// Interval used when auto-refresh is switched on without a configured one
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Periodic rebuild deadline consulted by the event loop.
///
/// The timer never sleeps; the loop uses [`RefreshTimer::time_until_due`] as
/// its input poll timeout, so quitting cancels a pending refresh at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTimer {
    interval: Duration,
    next: Option<Instant>,
}

impl RefreshTimer {
    /// Armed when `interval` is set, otherwise idle with the default interval
    pub fn new(interval: Option<Duration>, now: Instant) -> Self {
        Self {
            interval: interval.unwrap_or(DEFAULT_REFRESH_INTERVAL),
            next: interval.map(|i| now + i),
        }
    }

    pub fn is_active(&self) -> bool {
        self.next.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next.is_some_and(|next| now >= next)
    }

    /// Time left before the next refresh, `None` when inactive
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next.map(|next| next.saturating_duration_since(now))
    }

    /// Schedule the next refresh one interval after `now`, if active
    pub fn reset(&mut self, now: Instant) {
        if self.next.is_some() {
            self.next = Some(now + self.interval);
        }
    }

    /// Switch auto-refresh on or off, returning the new state
    pub fn toggle(&mut self, now: Instant) -> bool {
        self.next = match self.next {
            Some(_) => None,
            None => Some(now + self.interval),
        };
        self.is_active()
    }
}
