//! Text encoding of characteristic values
//!
//! Values are ASCII text with two decimals, matching what the deployed
//! firmware sends and the phone app parses.

use posture_core::AngleEstimate;

/// `"X: 1.23, Y: -4.56, Z: 7.89"`
pub fn encode_angles(angles: &AngleEstimate) -> String {
    format!(
        "X: {:.2}, Y: {:.2}, Z: {:.2}",
        angles.pitch_x, angles.pitch_y, angles.pitch_z
    )
}

pub fn encode_delta(value: f32) -> String {
    format!("{:.2}", value)
}

pub fn encode_flag(flag: bool) -> &'static str {
    if flag {
        "1"
    } else {
        "0"
    }
}

/// Inverse of [`encode_angles`], for clients and tests
pub fn decode_angles(text: &str) -> Option<AngleEstimate> {
    let mut values = [0.0f32; 3];
    let mut parts = text.split(", ");

    for (value, label) in values.iter_mut().zip(["X: ", "Y: ", "Z: "]) {
        *value = parts.next()?.strip_prefix(label)?.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }

    Some(AngleEstimate::new(values[0], values[1], values[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_use_two_decimals() {
        let angles = AngleEstimate::new(1.234, -4.5678, 90.0);
        assert_eq!(encode_angles(&angles), "X: 1.23, Y: -4.57, Z: 90.00");
    }

    #[test]
    fn deltas_and_flags() {
        assert_eq!(encode_delta(12.0), "12.00");
        assert_eq!(encode_delta(-0.256), "-0.26");
        assert_eq!(encode_flag(true), "1");
        assert_eq!(encode_flag(false), "0");
    }

    #[test]
    fn decode_reads_encoded_text() {
        let decoded = decode_angles("X: 1.23, Y: -4.57, Z: 90.00").unwrap();
        assert_eq!(decoded, AngleEstimate::new(1.23, -4.57, 90.0));
    }

    #[test]
    fn decode_rejects_malformed_text() {
        assert_eq!(decode_angles("X: 1.23, Y: -4.57"), None);
        assert_eq!(decode_angles("A: 1, Y: 2, Z: 3"), None);
        assert_eq!(decode_angles("X: 1, Y: 2, Z: 3, W: 4"), None);
        assert_eq!(decode_angles("X: one, Y: 2, Z: 3"), None);
    }
}
