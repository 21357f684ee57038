//! Time management for the control loop
//!
//! Provides the clock abstraction the engine polls against:
//! - Monotonic clock since boot (std hosts)
//! - Fixed, manually advanced clock (tests, replay)
//! - [`Periodic`], the elapsed-time gate behind the sampling and evaluation ticks

/// Timestamp in milliseconds since device boot
pub type Timestamp = u64;

/// Milliseconds between two timestamps, zero if the clock went backwards
pub fn elapsed_ms(earlier: Timestamp, later: Timestamp) -> u64 {
    later.saturating_sub(earlier)
}

/// Source of time for the system
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;
}

/// Monotonic time source
///
/// Starts at 0 when created, always increases
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MonotonicTime {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicTime {
    /// Clock starting at 0 now
    pub fn new() -> Self {
        Self { start: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicTime {
    fn now(&self) -> Timestamp {
        self.start.elapsed().as_millis() as Timestamp
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone, Default)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Clock stopped at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to `timestamp`
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move forward by `ms`
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

/// Non-blocking period gate
///
/// Due once `now - last >= period_ms`; firing records `now` as the new
/// reference, so a late poll does not try to catch up on missed periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periodic {
    period_ms: u64,
    last: Timestamp,
}

impl Periodic {
    /// Gate whose first period starts at `start`
    pub const fn new(period_ms: u64, start: Timestamp) -> Self {
        Self { period_ms, last: start }
    }

    /// Gate period
    pub const fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Time of the last firing (or the start time)
    pub const fn last(&self) -> Timestamp {
        self.last
    }

    /// Whether a full period has elapsed, without firing
    pub fn is_due(&self, now: Timestamp) -> bool {
        elapsed_ms(self.last, now) >= self.period_ms
    }

    /// Fire if due, returning whether the caller should run its step
    pub fn poll(&mut self, now: Timestamp) -> bool {
        if self.is_due(now) {
            self.last = now;
            true
        } else {
            false
        }
    }
}
