//! Engine configuration
//!
//! `PostureConfig::default()` reproduces the tuned firmware constants from
//! [`crate::constants`]. Deployments override individual fields through the
//! `with_*` builders or by deserializing a profile (with the `serde` feature),
//! then call [`PostureConfig::validate`]; [`crate::PostureEngine::new`] does
//! so on its own.
//!
//! ```rust
//! use posture_core::{PostureConfig, TiltSmoothing};
//!
//! let config = PostureConfig::default()
//!     .with_sustain_duration_ms(60_000)
//!     .with_tilt_smoothing(TiltSmoothing::DeltaFactor);
//!
//! assert!(config.validate().is_ok());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{
    ANGLE_SMOOTHING, DELTA_SMOOTHING, EVALUATION_PERIOD_MS, SAMPLE_PERIOD_MS, SUSTAIN_DURATION_MS,
};
use crate::delta::TiltSmoothing;
use crate::errors::{PostureError, PostureResult};
use crate::estimator::ZAxisAngle;
use crate::warning::WarningThresholds;

/// Switches preserving numerically odd behavior of the deployed firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Compatibility {
    /// Third-axis angle formula
    pub z_axis: ZAxisAngle,
    /// Tilt recurrence
    pub tilt_smoothing: TiltSmoothing,
}

/// Full engine configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PostureConfig {
    /// EMA factor for angle tracking, in (0, 1]
    pub angle_smoothing: f32,
    /// EMA factor for lean and compression, in (0, 1]
    pub delta_smoothing: f32,
    /// Sensor sampling period
    pub sample_period_ms: u64,
    /// Delta and warning evaluation period
    pub evaluation_period_ms: u64,
    /// Continuous warning time before escalation
    pub sustain_duration_ms: u64,
    /// Warning thresholds in degrees
    pub thresholds: WarningThresholds,
    /// Firmware compatibility switches
    pub compatibility: Compatibility,
}

impl Default for PostureConfig {
    fn default() -> Self {
        Self {
            angle_smoothing: ANGLE_SMOOTHING,
            delta_smoothing: DELTA_SMOOTHING,
            sample_period_ms: SAMPLE_PERIOD_MS,
            evaluation_period_ms: EVALUATION_PERIOD_MS,
            sustain_duration_ms: SUSTAIN_DURATION_MS,
            thresholds: WarningThresholds::default(),
            compatibility: Compatibility::default(),
        }
    }
}

impl PostureConfig {
    /// Set the angle EMA factor
    pub fn with_angle_smoothing(mut self, factor: f32) -> Self {
        self.angle_smoothing = factor;
        self
    }

    /// Set the delta EMA factor
    pub fn with_delta_smoothing(mut self, factor: f32) -> Self {
        self.delta_smoothing = factor;
        self
    }

    /// Set both loop periods
    pub fn with_periods(mut self, sample_period_ms: u64, evaluation_period_ms: u64) -> Self {
        self.sample_period_ms = sample_period_ms;
        self.evaluation_period_ms = evaluation_period_ms;
        self
    }

    /// Set the escalation delay
    pub fn with_sustain_duration_ms(mut self, duration_ms: u64) -> Self {
        self.sustain_duration_ms = duration_ms;
        self
    }

    /// Replace the warning thresholds
    pub fn with_thresholds(mut self, thresholds: WarningThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Select the third-axis formula
    pub fn with_z_axis(mut self, z_axis: ZAxisAngle) -> Self {
        self.compatibility.z_axis = z_axis;
        self
    }

    /// Select the tilt recurrence
    pub fn with_tilt_smoothing(mut self, tilt_smoothing: TiltSmoothing) -> Self {
        self.compatibility.tilt_smoothing = tilt_smoothing;
        self
    }

    /// Check every field, returning the first violation
    pub fn validate(&self) -> PostureResult<()> {
        check_factor(self.angle_smoothing, "angle smoothing must be in (0, 1]")?;
        check_factor(self.delta_smoothing, "delta smoothing must be in (0, 1]")?;

        if self.sample_period_ms == 0 || self.evaluation_period_ms == 0 {
            return Err(PostureError::InvalidConfig { reason: "periods must be non-zero" });
        }

        self.thresholds.validate()
    }
}

fn check_factor(factor: f32, reason: &'static str) -> PostureResult<()> {
    if factor > 0.0 && factor <= 1.0 {
        Ok(())
    } else {
        Err(PostureError::InvalidConfig { reason })
    }
}
