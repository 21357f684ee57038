//! Telemetry published by the engine
//!
//! The core hands out typed values only. Turning them into characteristic
//! text, JSON or anything else is up to the sink.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::delta::DeltaState;
use crate::estimator::AngleEstimate;
use crate::warning::WarningFlags;

/// One group of values changed by a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TelemetryUpdate {
    /// After a sampling tick
    Angles {
        /// Primary sensor angles
        primary: AngleEstimate,
        /// Secondary sensor angles
        secondary: AngleEstimate,
    },
    /// After an evaluation tick
    Deltas(DeltaState),
    /// After an evaluation tick or a calibration
    Warnings {
        /// Per-metric flags
        flags: WarningFlags,
        /// Sustained-warning flag
        time_exceeded: bool,
    },
}

/// Receiver of telemetry updates
pub trait TelemetrySink {
    /// Accept one update; must not block
    fn publish(&mut self, update: TelemetryUpdate);
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for &mut T {
    fn publish(&mut self, update: TelemetryUpdate) {
        (**self).publish(update)
    }
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn publish(&mut self, _update: TelemetryUpdate) {}
}

/// Everything a client can read, at one instant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetrySnapshot {
    /// Primary sensor angles
    pub primary: AngleEstimate,
    /// Secondary sensor angles
    pub secondary: AngleEstimate,
    /// Smoothed deltas
    pub delta: DeltaState,
    /// Per-metric flags
    pub flags: WarningFlags,
    /// Sustained-warning flag
    pub time_exceeded: bool,
    /// Deltas are meaningless while this is false
    pub is_calibrated: bool,
}

impl TelemetrySnapshot {
    /// Replay the snapshot into a sink as the three update groups
    pub fn publish_to<S: TelemetrySink>(&self, sink: &mut S) {
        sink.publish(TelemetryUpdate::Angles {
            primary: self.primary,
            secondary: self.secondary,
        });
        sink.publish(TelemetryUpdate::Deltas(self.delta));
        sink.publish(TelemetryUpdate::Warnings {
            flags: self.flags,
            time_exceeded: self.time_exceeded,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Count(usize);

    impl TelemetrySink for Count {
        fn publish(&mut self, _update: TelemetryUpdate) {
            self.0 += 1;
        }
    }

    #[test]
    fn snapshot_publishes_three_groups() {
        let mut sink = Count(0);
        TelemetrySnapshot::default().publish_to(&mut sink);
        assert_eq!(sink.0, 3);
    }

    #[test]
    fn mutable_reference_is_a_sink() {
        fn feed<S: TelemetrySink>(mut sink: S) {
            sink.publish(TelemetryUpdate::Deltas(DeltaState::default()));
        }

        let mut sink = Count(0);
        feed(&mut sink);
        assert_eq!(sink.0, 1);
    }
}
