//! # HPS167 Command Encoder
//!
//! Fixed command frames for starting a ranging measurement.
//!
//! Both command CRCs are precomputed constants from the sensor datasheet and
//! are never regenerated at runtime; the encoder functions exist for protocol
//! symmetry with the decoder and so tests can cross-check the embedded CRCs
//! against the CRC16 implementation.

use super::protocol::COMMAND_FRAME_LEN;

/// Continuous ranging command
///
/// | Start (1B) | CMD (1B) | Data field (6B)  | CRC (2B)  |
/// | 0x0A       | 0x24     | 0x00 ×6          | 0x0F 0x72 |
const CONTINUOUS_RANGING_FRAME: [u8; COMMAND_FRAME_LEN] =
    [0x0A, 0x24, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0F, 0x72];

/// Single ranging command
///
/// | Start (1B) | CMD (1B) | Data field (6B)  | CRC (2B)  |
/// | 0x0A       | 0x22     | 0x00 ×6          | 0xAE 0x57 |
const SINGLE_RANGING_FRAME: [u8; COMMAND_FRAME_LEN] =
    [0x0A, 0x22, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xAE, 0x57];

/// Encode the "start continuous ranging" command
///
/// One write of this frame makes the sensor stream response frames at its
/// own rate until power-down; the driver's default cycle sends it exactly
/// once per start.
///
/// # Returns
///
/// * `[u8; 10]` - Complete command frame (start + cmd + data + CRC)
///
/// # Examples
///
/// ```
/// use hps167::frame::encoder::continuous_ranging_command;
///
/// let frame = continuous_ranging_command();
/// assert_eq!(frame[0], 0x0A);
/// assert_eq!(frame[1], 0x24);
/// ```
pub fn continuous_ranging_command() -> [u8; COMMAND_FRAME_LEN] {
    CONTINUOUS_RANGING_FRAME
}

/// Encode the "single ranging" command
///
/// Supported by the protocol but not exercised by the default measurement
/// cycle, which always uses continuous ranging.
///
/// # Returns
///
/// * `[u8; 10]` - Complete command frame (start + cmd + data + CRC)
pub fn single_ranging_command() -> [u8; COMMAND_FRAME_LEN] {
    SINGLE_RANGING_FRAME
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::crc::crc16_ccitt;
    use crate::frame::protocol::{
        CMD_CONTINUOUS_RANGING, CMD_SINGLE_RANGING, COMMAND_CRC_COVERAGE, START_BYTE,
    };

    #[test]
    fn test_continuous_command_structure() {
        let frame = continuous_ranging_command();
        assert_eq!(frame.len(), COMMAND_FRAME_LEN);
        assert_eq!(frame[0], START_BYTE);
        assert_eq!(frame[1], CMD_CONTINUOUS_RANGING);
        assert_eq!(&frame[2..8], &[0u8; 6]);
    }

    #[test]
    fn test_single_command_structure() {
        let frame = single_ranging_command();
        assert_eq!(frame.len(), COMMAND_FRAME_LEN);
        assert_eq!(frame[0], START_BYTE);
        assert_eq!(frame[1], CMD_SINGLE_RANGING);
        assert_eq!(&frame[2..8], &[0u8; 6]);
    }

    #[test]
    fn test_continuous_command_crc_matches_datasheet() {
        let frame = continuous_ranging_command();
        let crc = crc16_ccitt(&frame[..COMMAND_CRC_COVERAGE]);
        assert_eq!(crc, 0x0F72);
        assert_eq!(frame[8], (crc >> 8) as u8);
        assert_eq!(frame[9], crc as u8);
    }

    #[test]
    fn test_single_command_crc_matches_datasheet() {
        let frame = single_ranging_command();
        let crc = crc16_ccitt(&frame[..COMMAND_CRC_COVERAGE]);
        assert_eq!(crc, 0xAE57);
        assert_eq!(frame[8], (crc >> 8) as u8);
        assert_eq!(frame[9], crc as u8);
    }
}
