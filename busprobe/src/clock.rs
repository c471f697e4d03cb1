use std::time::Instant;

/// Source of the uptime stamped on outgoing commands.
pub trait Clock: Send + Sync {
    /// Milliseconds since the clock's origin.
    fn uptime_ms(&self) -> i64;
}

/// Monotonic clock starting at zero when created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn uptime_ms(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_millis()).unwrap_or(i64::MAX)
    }
}

/// Clock that always reports the same uptime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn uptime_ms(&self) -> i64 {
        self.0
    }
}
