//! Accelerometer Bus Constants
//!
//! Register map and addressing for the MPU-6050 class parts the monitor is
//! built around. The core never talks to the bus; these are shared with the
//! driver side so both agree on the sample layout.

// ===== I2C ADDRESSING =====

/// Bus address of the primary sensor (AD0 pulled low).
pub const PRIMARY_I2C_ADDRESS: u8 = 0x68;

/// Bus address of the secondary sensor (AD0 pulled high).
pub const SECONDARY_I2C_ADDRESS: u8 = 0x69;

// ===== REGISTERS =====

/// Power management register. Writing 0 wakes the part from sleep.
pub const REG_PWR_MGMT_1: u8 = 0x6B;

/// First accelerometer output register (ACCEL_XOUT_H).
///
/// X, Y and Z follow as big-endian high/low byte pairs.
pub const REG_ACCEL_XOUT_H: u8 = 0x3B;

/// Bytes in one accelerometer burst (three big-endian i16 words).
pub const ACCEL_BURST_LEN: usize = 6;
