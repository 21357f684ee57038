//! Posture Engine
//!
//! Owns every piece of pipeline state and runs the cooperative control loop.
//!
//! ## Loop Structure
//!
//! The host calls [`PostureEngine::poll`] as often as it likes. Each pass:
//!
//! ```text
//! 1. drain commands      calibrate + reset warning timer, in arrival order
//! 2. sampling due?       read both sensors, advance both angle estimates
//! 3. evaluation due?     advance deltas (calibrated only), evaluate warnings
//! ```
//!
//! Each step publishes the values it changed. Nothing blocks and nothing
//! sleeps; the two periods are checked against the caller's clock only.
//!
//! ## Failure Handling
//!
//! A failed sensor read skips that sampling tick for both sensors, so the two
//! estimates never drift apart by a sample. The fault is counted, logged and
//! returned in [`TickOutcome::sensor_fault`]; evaluation in the same pass
//! still runs on the previous estimates.
//!
//! ```rust
//! use posture_core::{PostureConfig, PostureEngine, SensorDriver, SensorId, SensorSample};
//! use posture_core::command::NoCommands;
//! use posture_core::telemetry::NullSink;
//! # use posture_core::PostureResult;
//!
//! struct Upright;
//!
//! impl SensorDriver for Upright {
//!     fn read_sample(&mut self, _sensor: SensorId) -> PostureResult<SensorSample> {
//!         Ok(SensorSample::new(0, 0, 16384))
//!     }
//! }
//!
//! let mut engine = PostureEngine::new(PostureConfig::default(), 0).unwrap();
//! for now in (0..=1_000).step_by(10) {
//!     engine.poll(now, &mut Upright, &mut NullSink, &mut NoCommands);
//! }
//! assert_eq!(engine.stats().samples, 20);
//! assert_eq!(engine.stats().evaluations, 2);
//! ```

use crate::calibration::{CalibrationSnapshot, CalibrationState};
use crate::command::{Command, CommandSource};
use crate::config::PostureConfig;
use crate::delta::{DeltaEngine, DeltaState};
use crate::driver::SensorDriver;
use crate::errors::{PostureError, PostureResult};
use crate::estimator::{AngleEstimate, AngleEstimator};
use crate::sample::{SensorId, SensorSample};
use crate::telemetry::{TelemetrySink, TelemetrySnapshot, TelemetryUpdate};
use crate::time::{elapsed_ms, Periodic, TimeSource, Timestamp};
use crate::warning::{WarningEvaluator, WarningFlags, WarningPhase, WarningState, WarningTransition};

/// Counters since the engine was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineStats {
    /// Sampling ticks that advanced the estimates
    pub samples: u32,
    /// Evaluation ticks run
    pub evaluations: u32,
    /// Calibration commands applied
    pub calibrations: u32,
    /// Sampling ticks skipped on a read failure
    pub sensor_faults: u32,
}

/// What one [`PostureEngine::poll`] pass did
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickOutcome {
    /// Calibration commands applied at the start of the pass
    pub calibrations: u32,
    /// Sampling tick ran and advanced the estimates
    pub sampled: bool,
    /// Evaluation tick ran
    pub evaluated: bool,
    /// Read failure that skipped this pass's sampling tick
    pub sensor_fault: Option<PostureError>,
    /// Latest warning phase change in this pass
    pub transition: Option<WarningTransition>,
}

/// The whole posture pipeline
#[derive(Debug, Clone)]
pub struct PostureEngine {
    config: PostureConfig,
    estimators: [AngleEstimator; 2],
    calibration: CalibrationState,
    deltas: DeltaEngine,
    evaluator: WarningEvaluator,
    warning: WarningState,
    sampling: Periodic,
    evaluation: Periodic,
    stats: EngineStats,
}

impl PostureEngine {
    /// Engine with both periods and the warning timer starting at `now`
    pub fn new(config: PostureConfig, now: Timestamp) -> PostureResult<Self> {
        config.validate()?;

        let estimator = AngleEstimator::new(config.angle_smoothing)
            .with_z_axis(config.compatibility.z_axis);
        let deltas = DeltaEngine::new(config.delta_smoothing, config.angle_smoothing)
            .with_tilt_smoothing(config.compatibility.tilt_smoothing);

        Ok(Self {
            estimators: [estimator.clone(), estimator],
            calibration: CalibrationState::new(),
            deltas,
            evaluator: WarningEvaluator::new(config.thresholds, config.sustain_duration_ms),
            warning: WarningState::new(now),
            sampling: Periodic::new(config.sample_period_ms, now),
            evaluation: Periodic::new(config.evaluation_period_ms, now),
            stats: EngineStats::default(),
            config,
        })
    }

    /// One control-loop pass at time `now`
    pub fn poll<D, S, C>(
        &mut self,
        now: Timestamp,
        driver: &mut D,
        sink: &mut S,
        commands: &mut C,
    ) -> TickOutcome
    where
        D: SensorDriver + ?Sized,
        S: TelemetrySink + ?Sized,
        C: CommandSource + ?Sized,
    {
        let mut outcome = TickOutcome::default();

        while let Some(command) = commands.next_command() {
            match command {
                Command::Calibrate => {
                    let (_, transition) = self.apply_calibration(now);
                    outcome.calibrations += 1;
                    outcome.transition = transition.or(outcome.transition);
                }
            }
        }
        if outcome.calibrations > 0 {
            sink.publish(self.warning_update());
        }

        if self.sampling.poll(now) {
            match self.sample_tick(driver) {
                Ok(()) => {
                    outcome.sampled = true;
                    sink.publish(TelemetryUpdate::Angles {
                        primary: self.angles(SensorId::Primary),
                        secondary: self.angles(SensorId::Secondary),
                    });
                }
                Err(err) => outcome.sensor_fault = Some(err),
            }
        }

        if self.evaluation.poll(now) {
            if let Some(transition) = self.evaluate_tick(now) {
                outcome.transition = Some(transition);
            }
            outcome.evaluated = true;
            sink.publish(TelemetryUpdate::Deltas(self.delta()));
            sink.publish(self.warning_update());
        }

        outcome
    }

    /// [`poll`](Self::poll) with the time taken from `clock`
    pub fn poll_with<T, D, S, C>(
        &mut self,
        clock: &T,
        driver: &mut D,
        sink: &mut S,
        commands: &mut C,
    ) -> TickOutcome
    where
        T: TimeSource + ?Sized,
        D: SensorDriver + ?Sized,
        S: TelemetrySink + ?Sized,
        C: CommandSource + ?Sized,
    {
        self.poll(clock.now(), driver, sink, commands)
    }

    /// Read both sensors and advance both estimates
    ///
    /// On error neither estimate moves.
    pub fn sample_tick<D: SensorDriver + ?Sized>(&mut self, driver: &mut D) -> PostureResult<()> {
        let (primary, secondary) = match read_pair(driver) {
            Ok(samples) => samples,
            Err(err) => {
                self.stats.sensor_faults = self.stats.sensor_faults.saturating_add(1);
                log_warn!("Skipping sampling tick: {}", err);
                return Err(err);
            }
        };

        self.estimators[SensorId::Primary.index()].update(&primary);
        self.estimators[SensorId::Secondary.index()].update(&secondary);
        self.stats.samples = self.stats.samples.saturating_add(1);
        Ok(())
    }

    /// Advance deltas (when calibrated) and evaluate warnings
    pub fn evaluate_tick(&mut self, now: Timestamp) -> Option<WarningTransition> {
        if self.calibration.is_calibrated() {
            let primary = self.angles(SensorId::Primary);
            let secondary = self.angles(SensorId::Secondary);
            self.deltas.update(&primary, &secondary, self.calibration.snapshot());
        }

        let next = self.evaluator.evaluate(&self.deltas.state(), &self.warning, now);
        let transition = WarningTransition::between(&self.warning, &next, now);
        self.warning = next;
        self.stats.evaluations = self.stats.evaluations.saturating_add(1);

        if let Some(transition) = &transition {
            self.log_transition(transition);
        }
        transition
    }

    /// Capture the current angles as zero reference and restart the warning timer
    pub fn on_calibration_command(&mut self, now: Timestamp) -> CalibrationSnapshot {
        self.apply_calibration(now).0
    }

    fn apply_calibration(&mut self, now: Timestamp) -> (CalibrationSnapshot, Option<WarningTransition>) {
        let before = self.warning;
        let primary = self.angles(SensorId::Primary);
        let secondary = self.angles(SensorId::Secondary);
        let snapshot = self.calibration.calibrate(primary, secondary, now);
        self.warning.reset_timer(now);
        self.stats.calibrations = self.stats.calibrations.saturating_add(1);

        log_info!(
            "Calibrated at {}ms (primary {:?}, secondary {:?})",
            now, snapshot.primary, snapshot.secondary
        );

        let transition = WarningTransition::between(&before, &self.warning, now);
        if let Some(transition) = &transition {
            self.log_transition(transition);
        }
        (snapshot, transition)
    }

    fn log_transition(&self, transition: &WarningTransition) {
        match transition.to {
            WarningPhase::Escalated => {
                log_info!(
                    "Posture warning escalated after {}ms",
                    elapsed_ms(self.warning.sustained_since, transition.at)
                );
            }
            _ => {
                log_debug!(
                    "Warning phase {} -> {} at {}ms",
                    transition.from, transition.to, transition.at
                );
            }
        }
    }

    fn warning_update(&self) -> TelemetryUpdate {
        TelemetryUpdate::Warnings {
            flags: self.warning.flags,
            time_exceeded: self.warning.time_exceeded,
        }
    }

    /// Current smoothed angles of one sensor
    pub fn angles(&self, sensor: SensorId) -> AngleEstimate {
        self.estimators[sensor.index()].estimate()
    }

    /// Current smoothed deltas
    pub fn delta(&self) -> DeltaState {
        self.deltas.state()
    }

    /// Per-metric warning flags
    pub fn flags(&self) -> WarningFlags {
        self.warning.flags
    }

    /// Flags held past the sustain duration
    pub fn time_exceeded(&self) -> bool {
        self.warning.time_exceeded
    }

    /// Coarse warning phase
    pub fn phase(&self) -> WarningPhase {
        self.warning.phase()
    }

    /// Flags plus timer
    pub fn warning_state(&self) -> &WarningState {
        &self.warning
    }

    /// Current zero reference, placeholder included
    pub fn calibration(&self) -> &CalibrationSnapshot {
        self.calibration.snapshot()
    }

    /// Calibration bookkeeping
    pub fn calibration_state(&self) -> &CalibrationState {
        &self.calibration
    }

    /// Zero reference, or `NotCalibrated` before the first calibration
    pub fn require_calibration(&self) -> PostureResult<&CalibrationSnapshot> {
        if self.calibration.is_calibrated() {
            Ok(self.calibration.snapshot())
        } else {
            Err(PostureError::NotCalibrated)
        }
    }

    /// All published values at once
    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            primary: self.angles(SensorId::Primary),
            secondary: self.angles(SensorId::Secondary),
            delta: self.delta(),
            flags: self.warning.flags,
            time_exceeded: self.warning.time_exceeded,
            is_calibrated: self.calibration.is_calibrated(),
        }
    }

    /// Counters since creation
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Validated configuration
    pub fn config(&self) -> &PostureConfig {
        &self.config
    }
}

fn read_pair<D: SensorDriver + ?Sized>(driver: &mut D) -> PostureResult<(SensorSample, SensorSample)> {
    let primary = driver.read_sample(SensorId::Primary)?;
    let secondary = driver.read_sample(SensorId::Secondary)?;
    Ok((primary, secondary))
}
