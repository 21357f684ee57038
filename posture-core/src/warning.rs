//! Warning Evaluator
//!
//! Turns smoothed deltas into per-metric flags and escalates them once bad
//! posture has lasted long enough.
//!
//! ## Thresholds
//!
//! | metric      | condition                  |
//! |-------------|----------------------------|
//! | lean        | `lean >= 10`               |
//! | compression | `5 <= compression <= 20`   |
//! | tilt        | `abs(tilt) >= 4`           |
//!
//! ## Escalation
//!
//! ```text
//!            any flag                 held for sustain_duration
//!   Clear ────────────→ Flagged ─────────────────────────────→ Escalated
//!     ↑                   │                                       │
//!     └───── no flags ────┴──────────────── no flags ─────────────┘
//! ```
//!
//! `sustained_since` follows `now` while no flag is set and freezes as soon as
//! one is. Calibration moves it to the calibration time and drops the
//! escalation without touching the flags.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::thresholds::{
    COMPRESSION_WARN_MAX_DEG, COMPRESSION_WARN_MIN_DEG, LEAN_WARN_MIN_DEG, TILT_WARN_MIN_DEG,
};
use crate::delta::DeltaState;
use crate::errors::{PostureError, PostureResult};
use crate::time::{elapsed_ms, Timestamp};

/// Warning limits in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WarningThresholds {
    /// Lean warning at or above this value
    pub lean_min: f32,
    /// Inclusive lower bound of the compression band
    pub compression_min: f32,
    /// Inclusive upper bound of the compression band
    pub compression_max: f32,
    /// Tilt warning when the magnitude reaches this value
    pub tilt_min: f32,
}

impl Default for WarningThresholds {
    fn default() -> Self {
        Self {
            lean_min: LEAN_WARN_MIN_DEG,
            compression_min: COMPRESSION_WARN_MIN_DEG,
            compression_max: COMPRESSION_WARN_MAX_DEG,
            tilt_min: TILT_WARN_MIN_DEG,
        }
    }
}

impl WarningThresholds {
    /// Reject non-finite values and an inverted compression band
    pub fn validate(&self) -> PostureResult<()> {
        let all_finite = [self.lean_min, self.compression_min, self.compression_max, self.tilt_min]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(PostureError::InvalidConfig { reason: "threshold is not finite" });
        }
        if self.compression_min > self.compression_max {
            return Err(PostureError::InvalidConfig { reason: "compression band is inverted" });
        }
        Ok(())
    }
}

/// Per-metric warning flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WarningFlags {
    /// Lean at or above threshold
    pub lean: bool,
    /// Compression inside the warning band
    pub compression: bool,
    /// Tilt magnitude at or above threshold
    pub tilt: bool,
}

impl WarningFlags {
    /// All flags clear
    pub const fn none() -> Self {
        Self { lean: false, compression: false, tilt: false }
    }

    /// At least one flag set
    pub const fn any(&self) -> bool {
        self.lean || self.compression || self.tilt
    }
}

/// Coarse view of a [`WarningState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningPhase {
    /// No flag set
    Clear,
    /// At least one flag set, timer running
    Flagged,
    /// At least one flag set, timer expired
    Escalated,
}

impl WarningPhase {
    /// Lowercase name for logs
    pub const fn name(&self) -> &'static str {
        match self {
            WarningPhase::Clear => "clear",
            WarningPhase::Flagged => "flagged",
            WarningPhase::Escalated => "escalated",
        }
    }
}

impl fmt::Display for WarningPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for WarningPhase {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name())
    }
}

/// Phase change observed at a tick or calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningTransition {
    /// Phase before
    pub from: WarningPhase,
    /// Phase after
    pub to: WarningPhase,
    /// When it happened
    pub at: Timestamp,
}

impl WarningTransition {
    /// Transition between two states, if their phases differ
    pub fn between(before: &WarningState, after: &WarningState, at: Timestamp) -> Option<Self> {
        let (from, to) = (before.phase(), after.phase());
        (from != to).then_some(Self { from, to, at })
    }
}

/// Flags plus the sustained-warning timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningState {
    /// Flags from the last evaluation
    pub flags: WarningFlags,
    /// Last time all flags were clear (or the last calibration)
    pub sustained_since: Timestamp,
    /// Flags held for at least the sustain duration
    pub time_exceeded: bool,
}

impl WarningState {
    /// Clear state with the timer starting at `now`
    pub const fn new(now: Timestamp) -> Self {
        Self {
            flags: WarningFlags::none(),
            sustained_since: now,
            time_exceeded: false,
        }
    }

    /// Coarse phase
    pub fn phase(&self) -> WarningPhase {
        match (self.flags.any(), self.time_exceeded) {
            (false, _) => WarningPhase::Clear,
            (true, false) => WarningPhase::Flagged,
            (true, true) => WarningPhase::Escalated,
        }
    }

    /// Restart the timer at `now`, keeping any active flags
    pub fn reset_timer(&mut self, now: Timestamp) {
        self.sustained_since = now;
        self.time_exceeded = false;
    }
}

/// Applies thresholds and the escalation rule
#[derive(Debug, Clone)]
pub struct WarningEvaluator {
    thresholds: WarningThresholds,
    sustain_duration_ms: u64,
}

impl WarningEvaluator {
    /// Evaluator with the given thresholds and escalation delay
    pub fn new(thresholds: WarningThresholds, sustain_duration_ms: u64) -> Self {
        Self { thresholds, sustain_duration_ms }
    }

    /// Threshold checks alone, no timer
    pub fn flags(&self, delta: &DeltaState) -> WarningFlags {
        let t = &self.thresholds;
        WarningFlags {
            lean: delta.lean >= t.lean_min,
            compression: delta.compression >= t.compression_min && delta.compression <= t.compression_max,
            tilt: delta.tilt.abs() >= t.tilt_min,
        }
    }

    /// Next warning state for one evaluation tick
    pub fn evaluate(&self, delta: &DeltaState, state: &WarningState, now: Timestamp) -> WarningState {
        let flags = self.flags(delta);

        if !flags.any() {
            return WarningState {
                flags,
                sustained_since: now,
                time_exceeded: false,
            };
        }

        WarningState {
            flags,
            sustained_since: state.sustained_since,
            time_exceeded: elapsed_ms(state.sustained_since, now) >= self.sustain_duration_ms,
        }
    }

    /// Thresholds in use
    pub fn thresholds(&self) -> &WarningThresholds {
        &self.thresholds
    }

    /// Escalation delay
    pub fn sustain_duration_ms(&self) -> u64 {
        self.sustain_duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator() -> WarningEvaluator {
        WarningEvaluator::new(WarningThresholds::default(), 120_000)
    }

    fn lean(value: f32) -> DeltaState {
        DeltaState::new(value, 0.0, 0.0)
    }

    #[test]
    fn lean_boundary() {
        let eval = evaluator();
        assert!(eval.flags(&lean(10.0)).lean);
        assert!(!eval.flags(&lean(9.999)).lean);
        // Leaning back never warns
        assert!(!eval.flags(&lean(-30.0)).lean);
    }

    #[test]
    fn compression_band_is_inclusive() {
        let eval = evaluator();
        let compression = |v| eval.flags(&DeltaState::new(0.0, v, 0.0)).compression;

        assert!(compression(5.0));
        assert!(compression(20.0));
        assert!(compression(12.0));
        assert!(!compression(4.999));
        assert!(!compression(20.001));
    }

    #[test]
    fn tilt_uses_magnitude() {
        let eval = evaluator();
        assert!(eval.flags(&DeltaState::new(0.0, 0.0, 4.0)).tilt);
        assert!(eval.flags(&DeltaState::new(0.0, 0.0, -4.0)).tilt);
        assert!(!eval.flags(&DeltaState::new(0.0, 0.0, 3.99)).tilt);
    }

    #[test]
    fn clear_tick_follows_now() {
        let eval = evaluator();
        let state = eval.evaluate(&lean(0.0), &WarningState::new(0), 7_500);

        assert_eq!(state.phase(), WarningPhase::Clear);
        assert_eq!(state.sustained_since, 7_500);
    }

    #[test]
    fn flagged_tick_freezes_timer() {
        let eval = evaluator();
        let start = WarningState::new(1_000);

        let state = eval.evaluate(&lean(15.0), &start, 1_500);
        assert_eq!(state.phase(), WarningPhase::Flagged);
        assert_eq!(state.sustained_since, 1_000);

        let state = eval.evaluate(&lean(15.0), &state, 60_000);
        assert_eq!(state.sustained_since, 1_000);
        assert!(!state.time_exceeded);
    }

    #[test]
    fn escalates_at_sustain_duration() {
        let eval = evaluator();
        let flagged = eval.evaluate(&lean(15.0), &WarningState::new(0), 0);

        let before = eval.evaluate(&lean(15.0), &flagged, 119_999);
        assert_eq!(before.phase(), WarningPhase::Flagged);

        let at = eval.evaluate(&lean(15.0), &before, 120_000);
        assert_eq!(at.phase(), WarningPhase::Escalated);
    }

    #[test]
    fn escalated_clears_directly() {
        let eval = evaluator();
        let escalated = eval.evaluate(&lean(15.0), &WarningState::new(0), 200_000);
        assert_eq!(escalated.phase(), WarningPhase::Escalated);

        let cleared = eval.evaluate(&lean(1.0), &escalated, 200_500);
        assert_eq!(cleared.phase(), WarningPhase::Clear);
        assert_eq!(cleared.flags, WarningFlags::none());
        assert!(!cleared.time_exceeded);
        assert_eq!(cleared.sustained_since, 200_500);
    }

    #[test]
    fn reset_timer_keeps_flags() {
        let eval = evaluator();
        let mut state = eval.evaluate(&lean(15.0), &WarningState::new(0), 130_000);
        assert_eq!(state.phase(), WarningPhase::Escalated);

        state.reset_timer(130_200);
        assert!(state.flags.lean);
        assert_eq!(state.phase(), WarningPhase::Flagged);
        assert_eq!(state.sustained_since, 130_200);
    }

    #[test]
    fn transition_only_on_phase_change() {
        let clear = WarningState::new(0);
        let mut flagged = WarningState::new(0);
        flagged.flags.tilt = true;

        let transition = WarningTransition::between(&clear, &flagged, 500).unwrap();
        assert_eq!(transition.from, WarningPhase::Clear);
        assert_eq!(transition.to, WarningPhase::Flagged);
        assert!(WarningTransition::between(&flagged, &flagged, 1_000).is_none());
    }

    #[test]
    fn inverted_band_is_rejected() {
        let thresholds = WarningThresholds {
            compression_min: 25.0,
            ..WarningThresholds::default()
        };
        assert!(matches!(thresholds.validate(), Err(PostureError::InvalidConfig { .. })));
        assert!(WarningThresholds::default().validate().is_ok());
    }
}
