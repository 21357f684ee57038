//! Property tests for the smoothing, calibration and warning rules

use proptest::prelude::*;

use posture_core::{
    calibration::CalibrationState,
    delta::raw_deltas,
    estimator::{ema, raw_angles},
    AngleEstimate, AngleEstimator, DeltaState, SensorSample, WarningEvaluator, WarningState,
    WarningThresholds, ZAxisAngle,
};

fn angle() -> impl Strategy<Value = f32> {
    -180.0f32..180.0
}

fn estimate() -> impl Strategy<Value = AngleEstimate> {
    (angle(), angle(), angle()).prop_map(|(x, y, z)| AngleEstimate::new(x, y, z))
}

fn sample() -> impl Strategy<Value = SensorSample> {
    (any::<i16>(), any::<i16>(), any::<i16>()).prop_map(|(x, y, z)| SensorSample::new(x, y, z))
}

proptest! {
    #[test]
    fn ema_never_moves_away_from_input(raw in angle(), previous in angle(), factor in 0.01f32..=1.0) {
        let next = ema(raw, previous, factor);
        prop_assert!((next - raw).abs() <= (previous - raw).abs() + 1e-3);
    }

    #[test]
    fn constant_sample_converges(sample in sample(), factor in 0.05f32..=1.0) {
        let mut estimator = AngleEstimator::new(factor).with_z_axis(ZAxisAngle::Inclination);
        let target = raw_angles(&sample, ZAxisAngle::Inclination);

        for _ in 0..300 {
            estimator.update(&sample);
        }

        let estimate = estimator.estimate();
        prop_assert!((estimate.pitch_x - target.pitch_x).abs() < 0.05);
        prop_assert!((estimate.pitch_y - target.pitch_y).abs() < 0.05);
        prop_assert!((estimate.pitch_z - target.pitch_z).abs() < 0.05);
    }

    #[test]
    fn calibration_is_idempotent(primary in estimate(), secondary in estimate()) {
        let mut state = CalibrationState::new();
        let first = state.calibrate(primary, secondary, 1_000);
        let second = state.calibrate(primary, secondary, 2_000);

        prop_assert_eq!(first, second);
        prop_assert_eq!(state.calibration_count(), 2);
        prop_assert_eq!(state.last_calibrated_at(), Some(2_000));
    }

    #[test]
    fn deltas_vanish_at_zero_reference(primary in estimate(), secondary in estimate()) {
        let mut state = CalibrationState::new();
        let zero = state.calibrate(primary, secondary, 0);

        prop_assert_eq!(raw_deltas(&primary, &secondary, &zero), DeltaState::default());
    }

    #[test]
    fn escalation_never_precedes_sustain_duration(
        leans in prop::collection::vec(-5.0f32..30.0, 1..400),
    ) {
        let evaluator = WarningEvaluator::new(WarningThresholds::default(), 120_000);
        let mut state = WarningState::new(0);

        for (tick, lean) in leans.into_iter().enumerate() {
            let now = (tick as u64 + 1) * 500;
            state = evaluator.evaluate(&DeltaState::new(lean, 0.0, 0.0), &state, now);

            if !state.flags.any() {
                prop_assert_eq!(state.sustained_since, now);
                prop_assert!(!state.time_exceeded);
            }
            prop_assert_eq!(state.time_exceeded, state.flags.any() && now - state.sustained_since >= 120_000);
        }
    }
}
