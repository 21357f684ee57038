//! Time-Related Constants
//!
//! Control loop periods and the sustained-warning duration.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;

// ===== CONTROL LOOP PERIODS =====

/// Accelerometer sampling period (milliseconds).
///
/// 20 Hz is plenty for posture; the angle filter is tuned for it.
pub const SAMPLE_PERIOD_MS: u64 = 50;

/// Delta and warning evaluation period (milliseconds).
pub const EVALUATION_PERIOD_MS: u64 = 500;

// ===== WARNING ESCALATION =====

/// Continuous warning time before "time exceeded" is raised (milliseconds).
///
/// Two minutes: brief slips are ignored, sustained slouching is not.
pub const SUSTAIN_DURATION_MS: u64 = 2 * MS_PER_MINUTE;
