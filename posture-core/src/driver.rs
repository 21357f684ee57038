//! Sensor driver seam
//!
//! The engine only needs one sample per sensor per sampling tick. Anything
//! that can produce them implements [`SensorDriver`]; [`Mpu6050Pair`] does so
//! for two MPU-6050 class parts sharing an `embedded-hal` I2C bus.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

use crate::constants::sensors::{ACCEL_BURST_LEN, REG_ACCEL_XOUT_H, REG_PWR_MGMT_1};
use crate::errors::{PostureError, PostureResult};
use crate::sample::{SensorId, SensorSample};

/// Source of raw accelerometer samples
pub trait SensorDriver {
    /// Read one sample from `sensor`
    ///
    /// Failures must come back as [`PostureError::SensorReadFailure`]; never
    /// substitute a default sample.
    fn read_sample(&mut self, sensor: SensorId) -> PostureResult<SensorSample>;
}

impl<D: SensorDriver + ?Sized> SensorDriver for &mut D {
    fn read_sample(&mut self, sensor: SensorId) -> PostureResult<SensorSample> {
        (**self).read_sample(sensor)
    }
}

/// Two accelerometers at 0x68 and 0x69 on one bus
pub struct Mpu6050Pair<I2C> {
    bus: I2C,
}

impl<I2C: I2c> Mpu6050Pair<I2C> {
    /// Driver over a shared bus; call [`wake`](Self::wake) before reading
    pub fn new(bus: I2C) -> Self {
        Self { bus }
    }

    /// Take both parts out of sleep mode
    pub fn wake(&mut self) -> PostureResult<()> {
        for sensor in SensorId::ALL {
            self.bus
                .write(sensor.i2c_address(), &[REG_PWR_MGMT_1, 0])
                .map_err(|e| failure(sensor, e.kind()))?;
        }
        Ok(())
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.bus
    }
}

impl<I2C: I2c> SensorDriver for Mpu6050Pair<I2C> {
    fn read_sample(&mut self, sensor: SensorId) -> PostureResult<SensorSample> {
        let mut burst = [0u8; ACCEL_BURST_LEN];
        self.bus
            .write_read(sensor.i2c_address(), &[REG_ACCEL_XOUT_H], &mut burst)
            .map_err(|e| failure(sensor, e.kind()))?;
        Ok(SensorSample::from_be_bytes(burst))
    }
}

fn failure(sensor: SensorId, kind: ErrorKind) -> PostureError {
    let reason = match kind {
        ErrorKind::Bus => "bus error",
        ErrorKind::ArbitrationLoss => "arbitration lost",
        ErrorKind::NoAcknowledge(_) => "no acknowledge",
        ErrorKind::Overrun => "overrun",
        _ => "i2c error",
    };
    PostureError::SensorReadFailure { sensor, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorType, NoAcknowledgeSource, Operation};

    /// Register file for both parts
    struct FakeBus {
        bursts: [[u8; ACCEL_BURST_LEN]; 2],
        awake: [bool; 2],
        missing: Option<u8>,
    }

    impl FakeBus {
        fn new() -> Self {
            Self {
                bursts: [[0x00, 0x10, 0x00, 0x20, 0x40, 0x00], [0xFF, 0xF0, 0x00, 0x00, 0x3F, 0x00]],
                awake: [false; 2],
                missing: None,
            }
        }
    }

    impl ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl I2c for FakeBus {
        fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
            if self.missing == Some(address) {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            let slot = if address == 0x68 { 0 } else { 1 };

            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) => {
                        if *bytes == &[REG_PWR_MGMT_1, 0][..] {
                            self.awake[slot] = true;
                        }
                    }
                    Operation::Read(buf) => {
                        let len = buf.len();
                        buf.copy_from_slice(&self.bursts[slot][..len]);
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn wake_writes_both_parts() {
        let mut pair = Mpu6050Pair::new(FakeBus::new());
        pair.wake().unwrap();
        assert_eq!(pair.release().awake, [true, true]);
    }

    #[test]
    fn reads_each_sensor_from_its_address() {
        let mut pair = Mpu6050Pair::new(FakeBus::new());

        assert_eq!(pair.read_sample(SensorId::Primary).unwrap(), SensorSample::new(0x10, 0x20, 0x4000));
        assert_eq!(pair.read_sample(SensorId::Secondary).unwrap(), SensorSample::new(-16, 0, 0x3F00));
    }

    #[test]
    fn missing_part_is_a_distinct_error() {
        let mut bus = FakeBus::new();
        bus.missing = Some(0x69);
        let mut pair = Mpu6050Pair::new(bus);

        assert!(pair.read_sample(SensorId::Primary).is_ok());
        assert_eq!(
            pair.read_sample(SensorId::Secondary),
            Err(PostureError::SensorReadFailure {
                sensor: SensorId::Secondary,
                reason: "no acknowledge",
            })
        );
    }
}
