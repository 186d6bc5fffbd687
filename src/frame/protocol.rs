//! # HPS167 Protocol Constants and Types
//!
//! Core protocol definitions for the HPS167 serial frame format.

/// Frame start delimiter for both commands and responses (always 0x0A)
pub const START_BYTE: u8 = 0x0A;

/// Continuous ranging command byte
pub const CMD_CONTINUOUS_RANGING: u8 = 0x24;

/// Single ranging command byte
pub const CMD_SINGLE_RANGING: u8 = 0x22;

/// Command frame length
/// Frame structure: start(1) + cmd(1) + data(6) + crc(2)
pub const COMMAND_FRAME_LEN: usize = 10;

/// Number of leading command bytes covered by the command CRC (start + cmd + data)
pub const COMMAND_CRC_COVERAGE: usize = 8;

/// Response frame length on the wire
/// Frame structure: start(1) + length(1) + reserved(3) + distance(2)
/// + magnitude(3) + ambient(1) + precision(2) + crc(2)
pub const RESPONSE_FRAME_LEN: usize = 15;

/// Expected value of the response length byte (13 bytes following it)
pub const RESPONSE_DATA_LEN: u8 = 0x0D;

/// Field offsets within a response frame
pub const DISTANCE_MSB_POS: usize = 5;
pub const DISTANCE_LSB_POS: usize = 6;
pub const MAGNITUDE_MSB_POS: usize = 7;
pub const MAGNITUDE_LSB_POS: usize = 8;
pub const MAGNITUDE_EXP_POS: usize = 9;
pub const AMBIENT_POS: usize = 10;
pub const PRECISION_MSB_POS: usize = 11;
pub const PRECISION_LSB_POS: usize = 12;
pub const CRC_MSB_POS: usize = 13;
pub const CRC_LSB_POS: usize = 14;

/// Byte range of a response frame covered by its CRC (indices 2 through 12)
pub const CRC_COVERAGE: std::ops::Range<usize> = 2..13;

/// Distance reported by the sensor when the measurement is over ranged
/// or the receiving signal is too low. Passed through to consumers as-is.
pub const OVER_RANGE_DISTANCE_M: f32 = 65.53;

/// One decoded, CRC-validated HPS167 measurement
///
/// Only ever produced from a start-byte-aligned, length-valid, CRC-valid
/// response frame; validity is carried by the decoder's `Result`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Measured distance in meters
    pub distance_m: f32,

    /// Relative signal magnitude (mantissa shifted by exponent, scaled by 1/10000)
    pub magnitude: f32,

    /// Relative ambient IR intensity (raw ADC value)
    pub ambient: u8,

    /// Measurement precision indicator; small values mean small errors
    pub precision: u16,
}

impl Reading {
    /// Whether this reading carries the sensor's over-range indication
    ///
    /// The sensor reports 65.53 m when the target is out of range or the
    /// return signal is too weak. The driver does not filter these readings;
    /// downstream consumers decide how to treat saturation.
    pub fn is_over_range(&self) -> bool {
        self.distance_m >= OVER_RANGE_DISTANCE_M
    }
}
