use std::time::{Duration, Instant};

/// Gate between wall-clock time and simulation steps.
///
/// [`maybe_tick`](Self::maybe_tick) fires at most once per call, and the
/// reference point is reset to `now` rather than advanced by one interval, so
/// a stall collapses to a single tick instead of a catch-up burst. The host
/// consults the clock only while the game is running.
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    /// Returns true when a simulation step is due, consuming the elapsed
    /// interval. The first poll after construction or [`rearm`](Self::rearm)
    /// fires immediately.
    pub fn maybe_tick(&mut self, now: Instant) -> bool {
        let due = match self.last_tick {
            None => true,
            Some(last) => now.duration_since(last) >= self.interval,
        };
        if due {
            self.last_tick = Some(now);
        }
        due
    }

    /// Forgets the last tick so the next poll fires immediately.
    pub fn rearm(&mut self) {
        self.last_tick = None;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
