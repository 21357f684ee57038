//! Raw accelerometer samples and sensor identity

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::sensors::{ACCEL_BURST_LEN, PRIMARY_I2C_ADDRESS, SECONDARY_I2C_ADDRESS};

/// One of the two body-worn sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum SensorId {
    /// Sensor at bus address 0x68
    Primary = 0,
    /// Sensor at bus address 0x69
    Secondary = 1,
}

impl SensorId {
    /// Both sensors in read order
    pub const ALL: [SensorId; 2] = [SensorId::Primary, SensorId::Secondary];

    /// Index into per-sensor arrays
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name for logs
    pub const fn name(self) -> &'static str {
        match self {
            SensorId::Primary => "primary",
            SensorId::Secondary => "secondary",
        }
    }

    /// 7-bit I2C address of the sensor
    pub const fn i2c_address(self) -> u8 {
        match self {
            SensorId::Primary => PRIMARY_I2C_ADDRESS,
            SensorId::Secondary => SECONDARY_I2C_ADDRESS,
        }
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name())
    }
}

/// Raw 3-axis acceleration, in sensor counts
///
/// Consumed once by the angle estimator; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorSample {
    /// Raw X acceleration
    pub accel_x: i16,
    /// Raw Y acceleration
    pub accel_y: i16,
    /// Raw Z acceleration
    pub accel_z: i16,
}

impl SensorSample {
    /// Sample from raw counts
    pub const fn new(accel_x: i16, accel_y: i16, accel_z: i16) -> Self {
        Self { accel_x, accel_y, accel_z }
    }

    /// Decode the ACCEL_XOUT_H..ACCEL_ZOUT_L register burst
    pub fn from_be_bytes(bytes: [u8; ACCEL_BURST_LEN]) -> Self {
        Self {
            accel_x: i16::from_be_bytes([bytes[0], bytes[1]]),
            accel_y: i16::from_be_bytes([bytes[2], bytes[3]]),
            accel_z: i16::from_be_bytes([bytes[4], bytes[5]]),
        }
    }
}
