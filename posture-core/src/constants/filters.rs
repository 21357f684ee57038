//! Smoothing Factors
//!
//! Both first-order filters were tuned by hand against the fixed sampling
//! periods in [`super::time`]. There is no cutoff-frequency model behind them;
//! changing a period without retuning the factor changes the filter response.

/// EMA factor for per-axis angle tracking.
///
/// At 50 ms sampling the estimate reaches ~65% of a step after 10 samples.
pub const ANGLE_SMOOTHING: f32 = 0.1;

/// EMA factor for the lean and compression deltas.
///
/// Applied once per evaluation tick (500 ms).
pub const DELTA_SMOOTHING: f32 = 0.25;

/// Radians to degrees.
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;
