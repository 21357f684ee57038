//! Angle Estimator
//!
//! Turns raw acceleration into per-axis tilt angles and low-passes them.
//!
//! ## Angle Model
//!
//! With the wearer still, the accelerometer measures gravity only, so the
//! angle of an axis can be read off the two *other* components:
//!
//! ```text
//! pitch_x = atan2(accel_y, accel_z)
//! pitch_y = atan2(accel_x, accel_z)
//! pitch_z = atan2(accel_x, accel_y)   (legacy, see ZAxisAngle)
//! ```
//!
//! Walking and breathing add non-gravity acceleration, which the EMA below
//! suppresses:
//!
//! ```text
//! new = raw * alpha + previous * (1 - alpha)
//! ```
//!
//! The filter has no sample-rate compensation. `alpha` was tuned against the
//! 50 ms sampling period and is only meaningful at that rate.
//!
//! ## The Z Axis
//!
//! Rotation about the gravity vector is not observable from an accelerometer,
//! so there is no correct "dedicated pair" for `pitch_z`. The deployed firmware
//! reuses X/Y, and the tilt thresholds were tuned on that output, so
//! [`ZAxisAngle::LegacyXy`] is the default. [`ZAxisAngle::Inclination`] reports
//! how far the Z axis leans from vertical instead; switching to it requires
//! retuning the tilt threshold.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::filters::RAD_TO_DEG;
use crate::sample::SensorSample;

/// One step of the exponential moving average
#[inline]
pub fn ema(raw: f32, previous: f32, factor: f32) -> f32 {
    raw * factor + previous * (1.0 - factor)
}

/// Smoothed tilt angles of one sensor, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AngleEstimate {
    /// Degrees about X
    pub pitch_x: f32,
    /// Degrees about Y
    pub pitch_y: f32,
    /// Third-axis angle in degrees
    pub pitch_z: f32,
}

impl AngleEstimate {
    /// Estimate from explicit angles
    pub const fn new(pitch_x: f32, pitch_y: f32, pitch_z: f32) -> Self {
        Self { pitch_x, pitch_y, pitch_z }
    }

    /// Blend `raw` into `self` with factor `alpha`
    pub fn blend(&self, raw: &AngleEstimate, alpha: f32) -> AngleEstimate {
        AngleEstimate {
            pitch_x: ema(raw.pitch_x, self.pitch_x, alpha),
            pitch_y: ema(raw.pitch_y, self.pitch_y, alpha),
            pitch_z: ema(raw.pitch_z, self.pitch_z, alpha),
        }
    }
}

/// Formula used for the third axis angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ZAxisAngle {
    /// `atan2(accel_x, accel_y)`, as deployed
    #[default]
    LegacyXy,
    /// `atan2(hypot(accel_x, accel_y), accel_z)`, Z axis angle from vertical
    Inclination,
}

/// Unfiltered angles for a single sample
pub fn raw_angles(sample: &SensorSample, z_axis: ZAxisAngle) -> AngleEstimate {
    let x = sample.accel_x as f32;
    let y = sample.accel_y as f32;
    let z = sample.accel_z as f32;

    let pitch_z = match z_axis {
        ZAxisAngle::LegacyXy => libm::atan2f(x, y),
        ZAxisAngle::Inclination => libm::atan2f(libm::hypotf(x, y), z),
    };

    AngleEstimate {
        pitch_x: libm::atan2f(y, z) * RAD_TO_DEG,
        pitch_y: libm::atan2f(x, z) * RAD_TO_DEG,
        pitch_z: pitch_z * RAD_TO_DEG,
    }
}

/// Advance an estimate by one sample using the legacy Z formula
pub fn update(sample: &SensorSample, previous: &AngleEstimate, smoothing_factor: f32) -> AngleEstimate {
    previous.blend(&raw_angles(sample, ZAxisAngle::LegacyXy), smoothing_factor)
}

/// Per-sensor angle tracker
///
/// Owns one sensor's estimate. There is deliberately no reset: the estimate
/// only moves through new samples.
#[derive(Debug, Clone)]
pub struct AngleEstimator {
    factor: f32,
    z_axis: ZAxisAngle,
    estimate: AngleEstimate,
}

impl AngleEstimator {
    /// Estimator starting from all-zero angles
    pub fn new(factor: f32) -> Self {
        Self {
            factor,
            z_axis: ZAxisAngle::default(),
            estimate: AngleEstimate::default(),
        }
    }

    /// Select the third-axis formula
    pub fn with_z_axis(mut self, z_axis: ZAxisAngle) -> Self {
        self.z_axis = z_axis;
        self
    }

    /// Fold one sample into the estimate
    pub fn update(&mut self, sample: &SensorSample) -> AngleEstimate {
        let raw = raw_angles(sample, self.z_axis);
        self.estimate = self.estimate.blend(&raw, self.factor);
        self.estimate
    }

    /// Current smoothed angles
    pub fn estimate(&self) -> AngleEstimate {
        self.estimate
    }

    /// EMA factor
    pub fn factor(&self) -> f32 {
        self.factor
    }
}
