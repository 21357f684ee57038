//! GATT server state
//!
//! Holds the latest encoded value of every readable characteristic, pushes
//! changed values through a [`Connector`] and routes client writes.

use log::{debug, warn};
use posture_core::command::CommandSender;
use posture_core::{Command, TelemetrySink, TelemetryUpdate};

use crate::encoding::{encode_angles, encode_delta, encode_flag};
use crate::gatt::{Access, Characteristic};
use crate::{ConnectionStats, Connector, ConnectorError};

/// Characteristic table bound to a connector
pub struct GattServer<C: Connector> {
    connector: C,
    values: [Option<String>; Characteristic::ALL.len()],
    stats: ConnectionStats,
}

impl<C: Connector> GattServer<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            values: Default::default(),
            stats: ConnectionStats::default(),
        }
    }

    /// Current value of a readable characteristic, `None` until first published
    pub fn read(&self, characteristic: Characteristic) -> Option<&str> {
        self.values[characteristic.slot()].as_deref()
    }

    /// Read by UUID, as a client would
    pub fn read_uuid(&self, uuid: &str) -> Result<Option<&str>, ConnectorError> {
        let characteristic = Characteristic::from_uuid(uuid)
            .ok_or_else(|| ConnectorError::UnknownCharacteristic(uuid.to_string()))?;
        Ok(self.read(characteristic))
    }

    /// Handle a client write
    ///
    /// Any payload on the calibrate characteristic requests a calibration.
    pub fn handle_write<const N: usize>(
        &mut self,
        characteristic: Characteristic,
        payload: &[u8],
        commands: &mut CommandSender<'_, N>,
    ) -> Result<(), ConnectorError> {
        if characteristic.access() != Access::Write {
            return Err(ConnectorError::NotWritable(characteristic));
        }

        debug!(
            "Write to {}: {:?}",
            characteristic,
            String::from_utf8_lossy(payload)
        );
        self.stats.writes_received += 1;

        match characteristic {
            Characteristic::Calibrate => commands.send(Command::Calibrate)?,
            _ => return Err(ConnectorError::NotWritable(characteristic)),
        }
        Ok(())
    }

    /// [`handle_write`](Self::handle_write) by UUID
    pub fn handle_write_uuid<const N: usize>(
        &mut self,
        uuid: &str,
        payload: &[u8],
        commands: &mut CommandSender<'_, N>,
    ) -> Result<(), ConnectorError> {
        let characteristic = Characteristic::from_uuid(uuid)
            .ok_or_else(|| ConnectorError::UnknownCharacteristic(uuid.to_string()))?;
        self.handle_write(characteristic, payload, commands)
    }

    pub fn stats(&self) -> &ConnectionStats {
        &self.stats
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn connector_mut(&mut self) -> &mut C {
        &mut self.connector
    }

    fn set(&mut self, characteristic: Characteristic, value: String) {
        let slot = &mut self.values[characteristic.slot()];
        if slot.as_deref() == Some(value.as_str()) {
            return;
        }

        if !self.connector.is_connected() {
            self.stats.notifications_skipped += 1;
        } else {
            match self.connector.notify(characteristic, &value) {
                Ok(()) => {
                    self.stats.notifications_sent += 1;
                    self.stats.bytes_sent += value.len() as u64;
                }
                Err(e) => {
                    warn!("Notify on {} failed: {}", characteristic, e);
                    self.stats.notifications_failed += 1;
                    self.stats.last_error = Some(e.to_string());
                }
            }
        }

        *slot = Some(value);
    }
}

impl<C: Connector> TelemetrySink for GattServer<C> {
    fn publish(&mut self, update: TelemetryUpdate) {
        match update {
            TelemetryUpdate::Angles { primary, secondary } => {
                self.set(Characteristic::CoordinatesFirst, encode_angles(&primary));
                self.set(Characteristic::CoordinatesSecond, encode_angles(&secondary));
            }
            TelemetryUpdate::Deltas(delta) => {
                self.set(Characteristic::DeltaLean, encode_delta(delta.lean));
                self.set(Characteristic::DeltaCompression, encode_delta(delta.compression));
                self.set(Characteristic::DeltaTilt, encode_delta(delta.tilt));
            }
            TelemetryUpdate::Warnings { flags, time_exceeded } => {
                self.set(Characteristic::WarningLean, encode_flag(flags.lean).to_string());
                self.set(Characteristic::WarningCompression, encode_flag(flags.compression).to_string());
                self.set(Characteristic::WarningTilt, encode_flag(flags.tilt).to_string());
                self.set(Characteristic::WarningTime, encode_flag(time_exceeded).to_string());
            }
        }
    }
}

/// In-process connector recording every notification
#[derive(Debug, Default)]
pub struct LoopbackConnector {
    connected: bool,
    sent: Vec<(Characteristic, String)>,
}

impl LoopbackConnector {
    /// Connector with a client attached
    pub fn connected() -> Self {
        Self { connected: true, sent: Vec::new() }
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Notifications in the order they were sent
    pub fn sent(&self) -> &[(Characteristic, String)] {
        &self.sent
    }

    pub fn take_sent(&mut self) -> Vec<(Characteristic, String)> {
        std::mem::take(&mut self.sent)
    }
}

impl Connector for LoopbackConnector {
    fn notify(&mut self, characteristic: Characteristic, value: &str) -> Result<(), ConnectorError> {
        if !self.connected {
            return Err(ConnectorError::NotConnected);
        }
        self.sent.push((characteristic, value.to_string()));
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
