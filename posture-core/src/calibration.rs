//! Calibration State
//!
//! Holds the zero reference every delta is measured against. A calibration
//! copies both current estimates verbatim; nothing is averaged, and a second
//! calibration simply overwrites the first. The reference lives for the
//! session only.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::estimator::AngleEstimate;
use crate::sample::SensorId;
use crate::time::Timestamp;

/// Zero-reference angles of both sensors
///
/// Starts all-zero and uncalibrated; deltas computed against that default are
/// deterministic but carry no posture meaning.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationSnapshot {
    /// Zero angles of the primary sensor
    pub primary: AngleEstimate,
    /// Zero angles of the secondary sensor
    pub secondary: AngleEstimate,
    /// False for the all-zero placeholder
    pub is_calibrated: bool,
}

impl CalibrationSnapshot {
    /// The all-zero reference in place before the first calibration
    pub const fn uncalibrated() -> Self {
        Self {
            primary: AngleEstimate::new(0.0, 0.0, 0.0),
            secondary: AngleEstimate::new(0.0, 0.0, 0.0),
            is_calibrated: false,
        }
    }

    /// Capture the given estimates as the zero reference
    pub const fn capture(primary: AngleEstimate, secondary: AngleEstimate) -> Self {
        Self { primary, secondary, is_calibrated: true }
    }

    /// Zero reference of one sensor
    pub const fn zero(&self, sensor: SensorId) -> AngleEstimate {
        match sensor {
            SensorId::Primary => self.primary,
            SensorId::Secondary => self.secondary,
        }
    }
}

/// Current snapshot plus bookkeeping about how it got there
#[derive(Debug, Clone, Default)]
pub struct CalibrationState {
    snapshot: CalibrationSnapshot,
    count: u32,
    last_calibrated_at: Option<Timestamp>,
}

impl CalibrationState {
    /// Uncalibrated state
    pub const fn new() -> Self {
        Self {
            snapshot: CalibrationSnapshot::uncalibrated(),
            count: 0,
            last_calibrated_at: None,
        }
    }

    /// Overwrite the zero reference with the current estimates
    pub fn calibrate(
        &mut self,
        primary: AngleEstimate,
        secondary: AngleEstimate,
        now: Timestamp,
    ) -> CalibrationSnapshot {
        self.snapshot = CalibrationSnapshot::capture(primary, secondary);
        self.count = self.count.saturating_add(1);
        self.last_calibrated_at = Some(now);
        self.snapshot
    }

    /// Current zero reference
    pub fn snapshot(&self) -> &CalibrationSnapshot {
        &self.snapshot
    }

    /// Whether a calibration has been applied
    pub fn is_calibrated(&self) -> bool {
        self.snapshot.is_calibrated
    }

    /// Calibrations applied this session
    pub fn calibration_count(&self) -> u32 {
        self.count
    }

    /// Time of the most recent calibration
    pub fn last_calibrated_at(&self) -> Option<Timestamp> {
        self.last_calibrated_at
    }
}
