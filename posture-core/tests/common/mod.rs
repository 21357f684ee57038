//! Common test utilities for integration tests
//!
//! This module provides:
//! - A simulated two-sensor driver with scripted postures and failure injection
//! - A recording telemetry sink
//! - A fixed-step loop runner
//! - Tolerance assertions for smoothed values

#![allow(dead_code)]

use std::collections::VecDeque;

use posture_core::{
    command::CommandSource, Command, PostureEngine, PostureError, PostureResult, SensorDriver,
    SensorId, SensorSample, TelemetrySink, TelemetryUpdate, TickOutcome,
};

pub mod scenarios;

use scenarios::Posture;

/// Driver returning the current posture's samples, with injectable failures
pub struct SimulatedDriver {
    posture: Posture,
    failures: [u32; 2],
    reads: [u32; 2],
}

impl SimulatedDriver {
    pub fn new(posture: Posture) -> Self {
        Self {
            posture,
            failures: [0; 2],
            reads: [0; 2],
        }
    }

    pub fn set_posture(&mut self, posture: Posture) {
        self.posture = posture;
    }

    /// Fail the next `count` reads of `sensor`
    pub fn fail_next(&mut self, sensor: SensorId, count: u32) {
        self.failures[sensor.index()] = count;
    }

    /// Successful and failed read attempts of `sensor`
    pub fn reads(&self, sensor: SensorId) -> u32 {
        self.reads[sensor.index()]
    }
}

impl SensorDriver for SimulatedDriver {
    fn read_sample(&mut self, sensor: SensorId) -> PostureResult<SensorSample> {
        let slot = sensor.index();
        self.reads[slot] += 1;

        if self.failures[slot] > 0 {
            self.failures[slot] -= 1;
            return Err(PostureError::SensorReadFailure { sensor, reason: "simulated fault" });
        }

        let (primary, secondary) = self.posture.samples();
        Ok(match sensor {
            SensorId::Primary => primary,
            SensorId::Secondary => secondary,
        })
    }
}

/// Sink keeping every update in order
#[derive(Default)]
pub struct RecordingSink {
    pub updates: Vec<TelemetryUpdate>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn angle_updates(&self) -> usize {
        self.updates
            .iter()
            .filter(|u| matches!(u, TelemetryUpdate::Angles { .. }))
            .count()
    }

    pub fn delta_updates(&self) -> usize {
        self.updates
            .iter()
            .filter(|u| matches!(u, TelemetryUpdate::Deltas(_)))
            .count()
    }

    pub fn warning_updates(&self) -> usize {
        self.updates
            .iter()
            .filter(|u| matches!(u, TelemetryUpdate::Warnings { .. }))
            .count()
    }

    pub fn last_warning(&self) -> Option<TelemetryUpdate> {
        self.updates
            .iter()
            .rev()
            .find(|u| matches!(u, TelemetryUpdate::Warnings { .. }))
            .copied()
    }

    pub fn clear(&mut self) {
        self.updates.clear();
    }
}

impl TelemetrySink for RecordingSink {
    fn publish(&mut self, update: TelemetryUpdate) {
        self.updates.push(update);
    }
}

/// Commands handed over by the test body
#[derive(Default)]
pub struct ScriptedCommands {
    pending: VecDeque<Command>,
}

impl ScriptedCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }
}

impl CommandSource for ScriptedCommands {
    fn next_command(&mut self) -> Option<Command> {
        self.pending.pop_front()
    }
}

/// Engine plus everything around it, polled on a fixed step
pub struct Rig {
    pub engine: PostureEngine,
    pub driver: SimulatedDriver,
    pub sink: RecordingSink,
    pub commands: ScriptedCommands,
    pub now: u64,
    pub step_ms: u64,
}

impl Rig {
    pub fn new(engine: PostureEngine, posture: Posture) -> Self {
        Self {
            engine,
            driver: SimulatedDriver::new(posture),
            sink: RecordingSink::new(),
            commands: ScriptedCommands::new(),
            now: 0,
            step_ms: 10,
        }
    }

    /// One poll at the current time
    pub fn poll(&mut self) -> TickOutcome {
        self.engine
            .poll(self.now, &mut self.driver, &mut self.sink, &mut self.commands)
    }

    /// Step the clock and poll until `until`, returning every outcome
    pub fn run_until(&mut self, until: u64) -> Vec<(u64, TickOutcome)> {
        let mut outcomes = Vec::new();
        while self.now + self.step_ms <= until {
            self.now += self.step_ms;
            let outcome = self.poll();
            outcomes.push((self.now, outcome));
        }
        outcomes
    }

    /// Queue a calibration and apply it with a poll at the current time
    pub fn calibrate(&mut self) -> TickOutcome {
        self.commands.push(Command::Calibrate);
        self.poll()
    }
}

#[macro_export]
macro_rules! assert_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        let (actual, expected): (f32, f32) = ($actual, $expected);
        let diff = (actual - expected).abs();
        if diff > $tolerance {
            panic!(
                "Value {} not within tolerance {} of expected {} (diff: {})",
                actual, $tolerance, expected, diff
            );
        }
    };
}
