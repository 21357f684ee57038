//! Delta Engine
//!
//! Three deviation metrics against the calibrated zero reference, summed over
//! both sensors and smoothed per evaluation tick:
//!
//! ```text
//! lean        = (|zY1| + |zY2|) - (|Y1| + |Y2|)
//! compression = (|zX1| + |zX2|) - (|X1| + |X2|)
//! tilt        = |zZ1 - Z1| + |zZ2 - Z2|
//! ```
//!
//! Lean and compression keep their sign, so leaning back reads negative.
//!
//! ## Tilt Smoothing
//!
//! The deployed firmware smooths tilt as
//! `raw * angle_factor + previous * (1 - delta_factor)`. The coefficients do
//! not sum to one, so at the default factors a constant input settles at
//! `0.1 / 0.25 = 0.4` of its raw value. The 4 degree tilt threshold was tuned
//! on that output, which is why [`TiltSmoothing::Legacy`] stays the default.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationSnapshot;
use crate::estimator::{ema, AngleEstimate};

/// Smoothed posture deviation metrics, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeltaState {
    /// Summed forward lean of both sensors
    pub lean: f32,
    /// Summed relative bend between the sensors
    pub compression: f32,
    /// Sideways twist
    pub tilt: f32,
}

impl DeltaState {
    /// Deltas from explicit values
    pub const fn new(lean: f32, compression: f32, tilt: f32) -> Self {
        Self { lean, compression, tilt }
    }
}

/// Recurrence used for the tilt metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TiltSmoothing {
    /// `raw * angle_factor + previous * (1 - delta_factor)`, as deployed
    #[default]
    Legacy,
    /// Plain EMA with the delta factor, like lean and compression
    DeltaFactor,
}

/// Unsmoothed deltas of the current estimates against `zero`
pub fn raw_deltas(
    primary: &AngleEstimate,
    secondary: &AngleEstimate,
    zero: &CalibrationSnapshot,
) -> DeltaState {
    let (z1, z2) = (&zero.primary, &zero.secondary);

    DeltaState {
        lean: (z1.pitch_y.abs() + z2.pitch_y.abs()) - (primary.pitch_y.abs() + secondary.pitch_y.abs()),
        compression: (z1.pitch_x.abs() + z2.pitch_x.abs()) - (primary.pitch_x.abs() + secondary.pitch_x.abs()),
        tilt: (z1.pitch_z - primary.pitch_z).abs() + (z2.pitch_z - secondary.pitch_z).abs(),
    }
}

/// Owns the smoothed deltas and both smoothing factors
#[derive(Debug, Clone)]
pub struct DeltaEngine {
    delta_factor: f32,
    angle_factor: f32,
    tilt_smoothing: TiltSmoothing,
    state: DeltaState,
}

impl DeltaEngine {
    /// Engine starting from zero deltas
    pub fn new(delta_factor: f32, angle_factor: f32) -> Self {
        Self {
            delta_factor,
            angle_factor,
            tilt_smoothing: TiltSmoothing::default(),
            state: DeltaState::default(),
        }
    }

    /// Select the tilt recurrence
    pub fn with_tilt_smoothing(mut self, tilt_smoothing: TiltSmoothing) -> Self {
        self.tilt_smoothing = tilt_smoothing;
        self
    }

    /// Advance all three metrics by one evaluation tick
    ///
    /// Runs against whatever snapshot it is given, calibrated or not.
    pub fn update(
        &mut self,
        primary: &AngleEstimate,
        secondary: &AngleEstimate,
        zero: &CalibrationSnapshot,
    ) -> DeltaState {
        let raw = raw_deltas(primary, secondary, zero);
        let previous = self.state;

        let tilt = match self.tilt_smoothing {
            TiltSmoothing::Legacy => raw.tilt * self.angle_factor + previous.tilt * (1.0 - self.delta_factor),
            TiltSmoothing::DeltaFactor => ema(raw.tilt, previous.tilt, self.delta_factor),
        };

        self.state = DeltaState {
            lean: ema(raw.lean, previous.lean, self.delta_factor),
            compression: ema(raw.compression, previous.compression, self.delta_factor),
            tilt,
        };
        self.state
    }

    /// Current smoothed deltas
    pub fn state(&self) -> DeltaState {
        self.state
    }

    /// Tilt recurrence in use
    pub fn tilt_smoothing(&self) -> TiltSmoothing {
        self.tilt_smoothing
    }
}
