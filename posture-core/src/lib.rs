//! Core posture engine for the two-sensor posture monitor
//!
//! Turns raw accelerometer samples from two body-worn sensors into smoothed
//! tilt angles, relative posture deltas and a sustained-warning signal.
//! Designed for the wearable itself.
//!
//! Key constraints:
//! - Runs without an allocator (`no_std` when `std` is off)
//! - Never blocks; the host drives the loop with [`PostureEngine::poll`]
//! - Hardware, transport and clock sit behind traits
//!
//! ```no_run
//! use posture_core::{PostureConfig, PostureEngine, Mpu6050Pair};
//! use posture_core::command::CommandQueue;
//! use posture_core::telemetry::NullSink;
//! use posture_core::time::{MonotonicTime, TimeSource};
//! # fn run<I2C: embedded_hal::i2c::I2c>(bus: I2C) -> posture_core::PostureResult<()> {
//!
//! let clock = MonotonicTime::new();
//! let mut sensors = Mpu6050Pair::new(bus);
//! sensors.wake()?;
//!
//! let mut queue: CommandQueue = CommandQueue::new();
//! let (_transport, mut commands) = queue.split();
//! let mut engine = PostureEngine::new(PostureConfig::default(), clock.now())?;
//!
//! loop {
//!     engine.poll_with(&clock, &mut sensors, &mut NullSink, &mut commands);
//! }
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod calibration;
pub mod command;
pub mod config;
pub mod constants;
pub mod delta;
pub mod driver;
pub mod engine;
pub mod errors;
pub mod estimator;
pub mod sample;
pub mod telemetry;
pub mod time;
pub mod warning;

// Public API
pub use calibration::{CalibrationSnapshot, CalibrationState};
pub use command::{Command, CommandQueue, CommandSource};
pub use config::{Compatibility, PostureConfig};
pub use delta::{DeltaEngine, DeltaState, TiltSmoothing};
pub use driver::{Mpu6050Pair, SensorDriver};
pub use engine::{EngineStats, PostureEngine, TickOutcome};
pub use errors::{PostureError, PostureResult};
pub use estimator::{AngleEstimate, AngleEstimator, ZAxisAngle};
pub use sample::{SensorId, SensorSample};
pub use telemetry::{NullSink, TelemetrySink, TelemetrySnapshot, TelemetryUpdate};
pub use warning::{
    WarningEvaluator,
    WarningFlags,
    WarningPhase,
    WarningState,
    WarningThresholds,
    WarningTransition,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
