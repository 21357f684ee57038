//! Constants for the Posture Core
//!
//! Every number the firmware tuned by hand lives here, with units in the
//! name. [`crate::config::PostureConfig::default`] is built from these.
//!
//! ## Organization
//!
//! - **Filters**: EMA smoothing factors
//! - **Thresholds**: warning limits in degrees
//! - **Time**: loop periods and the escalation duration
//! - **Sensors**: bus addresses and register layout
//! - **Buffers**: queue capacities

/// EMA smoothing factors.
pub mod filters;

/// Warning thresholds in degrees.
pub mod thresholds;

/// Loop periods and escalation timing.
pub mod time;

/// Accelerometer addressing and register layout.
pub mod sensors;

/// Queue capacities.
pub mod buffers;

pub use filters::{ANGLE_SMOOTHING, DELTA_SMOOTHING, RAD_TO_DEG};

pub use thresholds::{
    LEAN_WARN_MIN_DEG, COMPRESSION_WARN_MIN_DEG, COMPRESSION_WARN_MAX_DEG,
    TILT_WARN_MIN_DEG,
};

pub use time::{
    MS_PER_SECOND, SAMPLE_PERIOD_MS, EVALUATION_PERIOD_MS, SUSTAIN_DURATION_MS,
};

pub use buffers::COMMAND_QUEUE_CAPACITY;
