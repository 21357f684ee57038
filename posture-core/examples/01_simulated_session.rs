//! Simulated Posture Session
//!
//! This example runs the posture engine against two simulated sensors:
//! the wearer sits upright, calibrates, slouches for a few minutes, then
//! sits up again.
//!
//! ## What You'll Learn
//!
//! - Implementing `SensorDriver` for your own hardware (or a simulation)
//! - Sending calibration requests through the command queue
//! - Driving the engine from a fixed-step clock
//! - Reading warning transitions and telemetry
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_simulated_session
//! ```

use posture_core::{
    command::CommandQueue,
    time::{FixedTime, TimeSource},
    PostureConfig, PostureEngine, PostureResult, SensorDriver, SensorId, SensorSample,
    TelemetrySink, TelemetryUpdate, WarningPhase,
};

/// Both sensors leaning forward by `lean_deg` about Y
struct SimulatedBack {
    lean_deg: f32,
}

impl SensorDriver for SimulatedBack {
    fn read_sample(&mut self, _sensor: SensorId) -> PostureResult<SensorSample> {
        let radians = self.lean_deg.to_radians();
        Ok(SensorSample::new(
            (16384.0 * radians.sin()).round() as i16,
            0,
            (16384.0 * radians.cos()).round() as i16,
        ))
    }
}

/// Prints warning changes the way a phone app would show them
struct ConsoleSink {
    last_flags: Option<String>,
}

impl TelemetrySink for ConsoleSink {
    fn publish(&mut self, update: TelemetryUpdate) {
        if let TelemetryUpdate::Warnings { flags, time_exceeded } = update {
            let text = format!(
                "lean={} compression={} tilt={} time={}",
                flags.lean as u8, flags.compression as u8, flags.tilt as u8, time_exceeded as u8
            );
            if self.last_flags.as_deref() != Some(text.as_str()) {
                println!("  warnings: {}", text);
                self.last_flags = Some(text);
            }
        }
    }
}

fn main() -> PostureResult<()> {
    println!("Posture Monitor Simulated Session");
    println!("=================================\n");

    let config = PostureConfig::default();
    println!("Configuration:");
    println!("  Sampling every {}ms, evaluating every {}ms", config.sample_period_ms, config.evaluation_period_ms);
    println!("  Escalation after {}s of continuous warning", config.sustain_duration_ms / 1000);
    println!();

    let mut clock = FixedTime::new(0);
    let mut engine = PostureEngine::new(config, clock.now())?;
    let mut back = SimulatedBack { lean_deg: 20.0 };
    let mut sink = ConsoleSink { last_flags: None };

    let mut queue: CommandQueue = CommandQueue::new();
    let (mut transport, mut commands) = queue.split();

    // (time in seconds, lean in degrees, calibrate?)
    let script = [
        (0, 20.0, false),
        (5, 20.0, true),
        (10, 0.0, false),
        (180, 20.0, false),
    ];

    let end_ms = 200_000;
    let mut step = 0;

    while clock.now() < end_ms {
        while step < script.len() && clock.now() >= script[step].0 * 1000 {
            let (at, lean, calibrate) = script[step];
            println!("t={:>3}s  lean {:.0} degrees{}", at, lean, if calibrate { ", calibrating" } else { "" });
            back.lean_deg = lean;
            if calibrate {
                transport.request_calibration()?;
            }
            step += 1;
        }

        let outcome = engine.poll_with(&clock, &mut back, &mut sink, &mut commands);

        if let Some(transition) = outcome.transition {
            println!("t={:>3}s  {} -> {}", transition.at / 1000, transition.from, transition.to);
            if transition.to == WarningPhase::Escalated {
                println!("         sustained bad posture, time to sit up");
            }
        }

        clock.advance(10);
    }

    let telemetry = engine.telemetry();
    let stats = engine.stats();
    println!("\nFinal state:");
    println!("  Lean {:.2}, compression {:.2}, tilt {:.2}", telemetry.delta.lean, telemetry.delta.compression, telemetry.delta.tilt);
    println!("  Phase: {}", engine.phase());
    println!(
        "  {} samples, {} evaluations, {} calibrations, {} sensor faults",
        stats.samples, stats.evaluations, stats.calibrations, stats.sensor_faults
    );

    Ok(())
}
