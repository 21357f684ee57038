//! Error Types for the Posture Pipeline
//!
//! ## Design Philosophy
//!
//! The engine runs in a tight cooperative loop on a microcontroller, so errors
//! follow the same rules as the rest of the hot path:
//!
//! 1. **Small Size**: every variant carries at most a sensor id and a
//!    `&'static str`, so the enum stays a few words wide.
//!
//! 2. **No Heap Allocation**: messages are static strings, never `String`.
//!
//! 3. **Copy Semantics**: errors are returned by value from every tick.
//!
//! ## Error Categories
//!
//! ### Collaborator Failures
//! - `SensorReadFailure`: the bus could not deliver a sample. The sampling
//!   tick is skipped and both angle estimates keep their previous value.
//! - `QueueFull`: the calibration command could not be queued.
//!
//! ### Setup Failures
//! - `InvalidConfig`: a smoothing factor, period or threshold makes no sense.
//!
//! ### Degraded Mode
//! - `NotCalibrated`: only produced by accessors that explicitly demand a
//!   calibration. Running uncalibrated is never an error by itself.
//!
//! ## Handling Strategy
//!
//! ```rust
//! use posture_core::{PostureError, SensorId};
//!
//! fn on_fault(err: PostureError) {
//!     match err {
//!         PostureError::SensorReadFailure { sensor: SensorId::Primary, .. } => {
//!             // primary strap loose or bus stuck
//!         }
//!         PostureError::SensorReadFailure { .. } => {}
//!         PostureError::QueueFull => {
//!             // drop the command, the next write will retry
//!         }
//!         _ => {}
//!     }
//! }
//! ```

use thiserror_no_std::Error;

use crate::sample::SensorId;

/// Result type for posture operations
pub type PostureResult<T> = Result<T, PostureError>;

/// Posture pipeline errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostureError {
    /// Bus or transport error while reading an accelerometer sample
    #[error("Sensor {sensor} read failed: {reason}")]
    SensorReadFailure {
        /// Which of the two sensors failed
        sensor: SensorId,
        /// Driver supplied description
        reason: &'static str,
    },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Which constraint was violated
        reason: &'static str,
    },

    /// Command queue has no free slot
    #[error("Command queue full")]
    QueueFull,

    /// Operation needs a zero reference and none was captured yet
    #[error("Engine has not been calibrated")]
    NotCalibrated,
}

#[cfg(feature = "defmt")]
impl defmt::Format for PostureError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::SensorReadFailure { sensor, reason } =>
                defmt::write!(fmt, "Sensor {} read failed: {}", sensor, reason),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid config: {}", reason),
            Self::QueueFull =>
                defmt::write!(fmt, "Command queue full"),
            Self::NotCalibrated =>
                defmt::write!(fmt, "Not calibrated"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_stay_small() {
        // sensor id + &'static str + discriminant
        assert!(core::mem::size_of::<PostureError>() <= 24);
    }

    #[cfg(feature = "std")]
    #[test]
    fn sensor_failure_message_names_sensor() {
        let err = PostureError::SensorReadFailure {
            sensor: SensorId::Secondary,
            reason: "i2c nack",
        };
        let text = std::format!("{}", err);
        assert!(text.contains("secondary"));
        assert!(text.contains("i2c nack"));
    }
}
