//! Device profile
//!
//! Advertised name plus engine configuration, stored as JSON. Missing fields
//! fall back to the firmware defaults, so a profile only needs the values it
//! changes:
//!
//! ```json
//! { "device_name": "Desk monitor", "engine": { "sustain_duration_ms": 60000 } }
//! ```
//!
//! Calibration is never stored; a fresh session always starts uncalibrated.

use std::fs;
use std::path::Path;

use log::info;
use posture_core::PostureConfig;
use serde::{Deserialize, Serialize};

use crate::gatt::Service;
use crate::ConnectorError;

pub const DEFAULT_DEVICE_NAME: &str = "ESP32 Posture monitor";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    /// BLE advertised name
    pub device_name: String,
    pub engine: PostureConfig,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            engine: PostureConfig::default(),
        }
    }
}

impl DeviceProfile {
    /// Parse and validate a JSON profile
    pub fn from_json(json: &str) -> Result<Self, ConnectorError> {
        let profile: Self = serde_json::from_str(json)?;
        profile.engine.validate()?;
        Ok(profile)
    }

    pub fn to_json(&self) -> Result<String, ConnectorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConnectorError> {
        let path = path.as_ref();
        let profile = Self::from_json(&fs::read_to_string(path)?)?;
        info!("Loaded profile '{}' from {}", profile.device_name, path.display());
        Ok(profile)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConnectorError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Service UUIDs to advertise
    pub fn advertised_services(&self) -> [&'static str; 3] {
        Service::ALL.map(Service::uuid)
    }
}
