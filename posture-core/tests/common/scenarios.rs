//! Scripted postures for integration testing
//!
//! Both sensors sit on the upper back. Sitting well, they lean 20 degrees
//! about Y; slumping brings them back to vertical, which reads as lean.

use posture_core::SensorSample;

/// Raw count for 1 g at the default ±2 g range
pub const ONE_G: f32 = 16384.0;

/// Y-axis lean of both sensors while sitting well
pub const UPRIGHT_LEAN_DEG: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Posture {
    /// Reference posture, both sensors leaning 20 degrees about Y
    Upright,
    /// Both sensors vertical, roughly 40 degrees of lean against `Upright`
    Slouched,
    /// Both sensors at half the upright lean, 20 degrees of lean against `Upright`
    HalfSlouched,
    /// Secondary sensor rotated about X, flags tilt only
    Twisted,
}

impl Posture {
    /// (primary, secondary) samples for this posture
    pub fn samples(&self) -> (SensorSample, SensorSample) {
        let upright = leaning(UPRIGHT_LEAN_DEG, 0.0);
        match self {
            Posture::Upright => (upright, upright),
            Posture::Slouched => {
                let vertical = leaning(0.0, 0.0);
                (vertical, vertical)
            }
            Posture::HalfSlouched => {
                let half = leaning(UPRIGHT_LEAN_DEG / 2.0, 0.0);
                (half, half)
            }
            Posture::Twisted => (upright, leaning(UPRIGHT_LEAN_DEG, 2000.0)),
        }
    }
}

/// Gravity split between X and Z for a lean of `degrees`, plus a raw Y offset
pub fn leaning(degrees: f32, accel_y: f32) -> SensorSample {
    let radians = degrees.to_radians();
    SensorSample::new(
        (ONE_G * radians.sin()).round() as i16,
        accel_y as i16,
        (ONE_G * radians.cos()).round() as i16,
    )
}
