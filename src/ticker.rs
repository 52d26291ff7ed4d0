//! Periodic driver for enemy movement.

use std::time::{Duration, Instant};

/// Fixed-cadence timer deciding when the next enemy tick is due.
///
/// The ticker never runs anything itself; the event loop asks it whether a tick is due and how
/// long it may block waiting for input. Pausing takes effect at tick boundaries only, since a
/// tick is always applied whole.
#[derive(Debug)]
pub(crate) struct Ticker {
    /// Time between two ticks.
    interval: Duration,
    /// Timestamp of the last tick, or of the last resume.
    last_tick: Instant,
    /// Whether ticks are currently suspended.
    paused: bool,
}

impl Ticker {
    /// Creates a running ticker whose first tick is one interval away.
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: Instant::now(),
            paused: false,
        }
    }

    /// Whether ticks are suspended.
    pub(crate) const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Suspends ticking.
    pub(crate) fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes ticking, one full interval from now.
    pub(crate) fn resume(&mut self) {
        self.paused = false;
        self.last_tick = Instant::now();
    }

    /// Flips between paused and running.
    pub(crate) fn toggle(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Returns `true` and starts the next interval if a tick is due at `now`.
    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        if self.paused || now.saturating_duration_since(self.last_tick) < self.interval {
            return false;
        }

        self.last_tick = now;
        true
    }

    /// How long the event loop may wait for input before the next tick is due, capped at
    /// `ceiling`.
    pub(crate) fn timeout(&self, now: Instant, ceiling: Duration) -> Duration {
        if self.paused {
            return ceiling;
        }

        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_tick))
            .min(ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_due_after_interval() {
        let mut ticker = Ticker::new(Duration::from_millis(500));
        let start = ticker.last_tick;

        assert!(!ticker.poll(start + Duration::from_millis(499)));
        assert!(ticker.poll(start + Duration::from_millis(500)));
        assert!(
            !ticker.poll(start + Duration::from_millis(600)),
            "the interval restarts at the tick"
        );
        assert!(ticker.poll(start + Duration::from_millis(1000)));
    }

    #[test]
    fn test_paused_ticker_never_fires() {
        let mut ticker = Ticker::new(Duration::from_millis(100));
        let start = ticker.last_tick;

        ticker.toggle();
        assert!(ticker.is_paused());
        assert!(!ticker.poll(start + Duration::from_secs(10)));

        ticker.toggle();
        assert!(!ticker.is_paused());
        let resumed = ticker.last_tick;
        assert!(!ticker.poll(resumed + Duration::from_millis(50)));
        assert!(ticker.poll(resumed + Duration::from_millis(100)));
    }

    #[test]
    fn test_timeout_is_time_to_next_tick() {
        let mut ticker = Ticker::new(Duration::from_millis(1000));
        let start = ticker.last_tick;
        let ceiling = Duration::from_millis(100);

        assert_eq!(ticker.timeout(start, ceiling), ceiling);
        assert_eq!(
            ticker.timeout(start + Duration::from_millis(960), ceiling),
            Duration::from_millis(40)
        );
        assert_eq!(
            ticker.timeout(start + Duration::from_millis(2000), ceiling),
            Duration::ZERO
        );

        ticker.pause();
        assert_eq!(ticker.timeout(start + Duration::from_millis(960), ceiling), ceiling);
    }
}
