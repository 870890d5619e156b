use cast::{f32, u16};

/// Raw counts per degree of the Euler angle output registers
pub const EULER_LSB_PER_DEGREE: f32 = 16.0;

/// Fused orientation, in degrees
///
/// No range normalization is applied; values are whatever the device
/// reports.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EulerAngles {
    /// Heading (yaw)
    pub heading: f32,
    /// Roll
    pub roll: f32,
    /// Pitch
    pub pitch: f32,
}

impl EulerAngles {
    /// Decodes the 6-byte burst starting at `EUL_HEADING_LSB`
    ///
    /// The device orders the little-endian pairs heading, roll, pitch.
    pub fn from_raw(buffer: [u8; 6]) -> Self {
        EulerAngles { heading: degrees(le_i16(buffer[0], buffer[1])),
                      roll: degrees(le_i16(buffer[2], buffer[3])),
                      pitch: degrees(le_i16(buffer[4], buffer[5])) }
    }
}

fn le_i16(lsb: u8, msb: u8) -> i16 {
    (u16(lsb) | (u16(msb) << 8)) as i16
}

/// Converts a raw fixed-point Euler reading to degrees
pub fn degrees(raw: i16) -> f32 {
    f32(raw) / EULER_LSB_PER_DEGREE
}
