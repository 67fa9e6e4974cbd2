//! Wall-clock driven timers: the per-stage countdown and the spawn scheduler.
//!
//! Both run against a `performance.now()`-style millisecond timeline handed in
//! by the caller, so the logic stays host-testable.

/// Counts a fixed number of whole seconds down to zero.
#[derive(Clone, Copy, Debug)]
pub struct CountdownClock {
    start_ms: f64,
    limit_secs: u32,
}

impl CountdownClock {
    pub fn new(limit_secs: u32, now: f64) -> Self {
        Self {
            start_ms: now,
            limit_secs,
        }
    }

    /// Whole seconds left on the clock; never goes negative.
    pub fn remaining_secs(&self, now: f64) -> u32 {
        let elapsed_secs = ((now - self.start_ms) / 1000.0).floor().max(0.0) as u32;
        self.limit_secs.saturating_sub(elapsed_secs)
    }

    pub fn is_expired(&self, now: f64) -> bool {
        now - self.start_ms >= f64::from(self.limit_secs) * 1000.0
    }

    /// Pushes the clock forward, e.g. by the duration of a pause.
    pub fn shift(&mut self, delta_ms: f64) {
        self.start_ms += delta_ms;
    }
}

/// Yields spawns on a fixed interval. A stalled frame does not drop spawns:
/// every interval boundary crossed since the last poll is reported, the same
/// way missed beats are caught up one by one.
#[derive(Clone, Copy, Debug)]
pub struct SpawnClock {
    interval_ms: f64,
    start_ms: f64,
    last_idx: i64,
}

impl SpawnClock {
    pub fn new(interval_ms: f64, now: f64) -> Self {
        Self {
            interval_ms,
            start_ms: now,
            // Interval index -1 so the boundary at t=0 yields the first spawn.
            last_idx: -1,
        }
    }

    /// Number of spawns due since the last poll.
    pub fn due_spawns(&mut self, now: f64) -> u32 {
        let idx = ((now - self.start_ms) / self.interval_ms).floor() as i64;
        let due = idx - self.last_idx;
        if due <= 0 {
            return 0;
        }
        self.last_idx = idx;
        due as u32
    }

    /// Pushes the schedule forward, e.g. by the duration of a pause.
    pub fn shift(&mut self, delta_ms: f64) {
        self.start_ms += delta_ms;
    }
}
