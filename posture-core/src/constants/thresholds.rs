//! Warning Thresholds
//!
//! Degrees of deviation from the calibrated zero reference. Lean and
//! compression are signed sums over both sensors; tilt is compared by
//! magnitude.

/// Lean warning fires at or above this value.
pub const LEAN_WARN_MIN_DEG: f32 = 10.0;

/// Lower bound of the compression warning band (inclusive).
pub const COMPRESSION_WARN_MIN_DEG: f32 = 5.0;

/// Upper bound of the compression warning band (inclusive).
///
/// Values past this are treated as the wearer bending over on purpose.
pub const COMPRESSION_WARN_MAX_DEG: f32 = 20.0;

/// Tilt warning fires when `|tilt|` reaches this value.
pub const TILT_WARN_MIN_DEG: f32 = 4.0;
