//! Transport Connectors for the Posture Monitor
//!
//! ## Overview
//!
//! The core engine publishes typed telemetry and consumes typed commands.
//! This crate is the other side of that seam: it lays the values out as the
//! BLE GATT table the phone app expects, encodes them as text, and turns
//! writes to the calibrate characteristic back into commands.
//!
//! ## GATT Layout
//!
//! | Service | Characteristic        | Access | Value                      |
//! |---------|-----------------------|--------|----------------------------|
//! | Control | Coordinates (first)   | read   | `X: 1.23, Y: 4.56, Z: 7.89` |
//! | Control | Coordinates (second)  | read   | `X: 1.23, Y: 4.56, Z: 7.89` |
//! | Delta   | Calibrate             | write  | any payload                |
//! | Delta   | Lean                  | read   | `12.34`                    |
//! | Delta   | Compression           | read   | `12.34`                    |
//! | Delta   | Tilt                  | read   | `12.34`                    |
//! | Warning | Time                  | read   | `1` / `0`                  |
//! | Warning | Lean                  | read   | `1` / `0`                  |
//! | Warning | Compression           | read   | `1` / `0`                  |
//! | Warning | Tilt                  | read   | `1` / `0`                  |
//!
//! UUIDs are fixed; existing clients look them up by value.
//!
//! ## Example Usage
//!
//! ```rust
//! use posture_connectors::{Characteristic, GattServer, LoopbackConnector};
//! use posture_core::{CommandQueue, CommandSource, TelemetrySink, TelemetryUpdate, DeltaState};
//!
//! let mut queue: CommandQueue<4> = CommandQueue::new();
//! let (mut tx, mut rx) = queue.split();
//! let mut server = GattServer::new(LoopbackConnector::connected());
//!
//! server.publish(TelemetryUpdate::Deltas(DeltaState::new(12.5, 0.0, 1.0)));
//! assert_eq!(server.read(Characteristic::DeltaLean), Some("12.50"));
//!
//! server.handle_write(Characteristic::Calibrate, b"go", &mut tx)?;
//! assert!(rx.next_command().is_some());
//! # Ok::<(), posture_connectors::ConnectorError>(())
//! ```

pub mod encoding;
pub mod gatt;
pub mod profile;
pub mod server;

// Re-export common types
pub use gatt::{Access, Characteristic, Service};
pub use profile::{DeviceProfile, DEFAULT_DEVICE_NAME};
pub use server::{GattServer, LoopbackConnector};

use posture_core::PostureError;
use thiserror::Error;

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Not connected")]
    NotConnected,

    #[error("Characteristic {0} is not writable")]
    NotWritable(Characteristic),

    #[error("Unknown characteristic: {0}")]
    UnknownCharacteristic(String),

    #[error("Engine error: {0}")]
    Core(#[from] PostureError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Profile format error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Link to connected clients
pub trait Connector {
    /// Push a changed value to subscribed clients
    fn notify(&mut self, characteristic: Characteristic, value: &str) -> Result<(), ConnectorError>;

    /// Check if a client is connected
    fn is_connected(&self) -> bool;
}

/// Connection statistics common to all connectors
#[derive(Debug, Default, Clone)]
pub struct ConnectionStats {
    /// Notifications delivered to the connector
    pub notifications_sent: u64,
    /// Notifications the connector rejected
    pub notifications_failed: u64,
    /// Changed values held back while no client was connected
    pub notifications_skipped: u64,
    /// Total value bytes notified
    pub bytes_sent: u64,
    /// Writes accepted from clients
    pub writes_received: u64,
    /// Last error message
    pub last_error: Option<String>,
}
