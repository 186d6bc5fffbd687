//! # HPS167 Response Decoder
//!
//! Decodes a raw byte buffer into a validated [`Reading`] or a parse signal.
//!
//! The sensor streams 15-byte response frames with no byte alignment
//! guarantee, so decoding distinguishes two non-success outcomes:
//!
//! - [`DecodeError::Incomplete`] - not enough bytes yet; the caller keeps
//!   accumulating and retries on a later tick. This is a continuation
//!   signal, not an error.
//! - [`DecodeError::Corrupt`] - bad start delimiter, length byte or CRC;
//!   the caller drops the leading byte and retries against the remainder
//!   (linear resync).

use thiserror::Error;

use super::crc::crc16_ccitt;
use super::protocol::*;

/// Non-success outcome of a decode attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Not enough bytes for a complete frame; accumulate more and retry
    #[error("incomplete frame, more bytes required")]
    Incomplete,

    /// Frame boundary or CRC mismatch; drop the leading byte and resync
    #[error("corrupt frame: bad delimiter, length or CRC")]
    Corrupt,
}

/// Attempt to decode one response frame from the front of `buf`
///
/// On success exactly [`RESPONSE_FRAME_LEN`] bytes starting at index 0 have
/// been consumed; the caller advances its accumulator by that amount. On
/// `Corrupt` the caller discards one leading byte; on `Incomplete` the
/// buffer is left untouched until more bytes arrive.
///
/// # Arguments
///
/// * `buf` - Receive accumulator contents, starting at the decode position
///
/// # Returns
///
/// * `Ok(Reading)` - A CRC-validated measurement
/// * `Err(DecodeError)` - Continuation or resync signal
///
/// # Examples
///
/// ```
/// use hps167::frame::decoder::{try_decode, DecodeError};
///
/// // A lone start byte is an incomplete frame, not corruption
/// assert_eq!(try_decode(&[0x0A]).unwrap_err(), DecodeError::Incomplete);
/// ```
pub fn try_decode(buf: &[u8]) -> Result<Reading, DecodeError> {
    if buf.is_empty() {
        return Err(DecodeError::Incomplete);
    }

    if buf[0] != START_BYTE {
        return Err(DecodeError::Corrupt);
    }

    if buf.len() < RESPONSE_FRAME_LEN {
        return Err(DecodeError::Incomplete);
    }

    if buf[1] != RESPONSE_DATA_LEN {
        return Err(DecodeError::Corrupt);
    }

    let received_crc = u16::from_be_bytes([buf[CRC_MSB_POS], buf[CRC_LSB_POS]]);
    let calculated_crc = crc16_ccitt(&buf[CRC_COVERAGE]);

    if calculated_crc != received_crc {
        return Err(DecodeError::Corrupt);
    }

    Ok(decode_fields(buf))
}

/// Decode the measurement fields of a frame that already passed validation
///
/// Example decoding from the datasheet:
/// - Distance = (0x06 * 256 + 0xD9) / 1000.0 = 1.753 m
/// - Magnitude = ((0xFC * 256 + 0x8C) << 0x02) / 10000.0 = 25.8608
fn decode_fields(frame: &[u8]) -> Reading {
    let distance_raw = u16::from_be_bytes([frame[DISTANCE_MSB_POS], frame[DISTANCE_LSB_POS]]);
    let distance_m = f32::from(distance_raw) / 1000.0;

    let mantissa =
        u32::from(u16::from_be_bytes([frame[MAGNITUDE_MSB_POS], frame[MAGNITUDE_LSB_POS]]));
    // The mantissa is 16 bits; genuine frames never carry an exponent that
    // would shift it out of u32 range.
    let exponent = u32::from(frame[MAGNITUDE_EXP_POS]).min(16);
    let magnitude = (mantissa << exponent) as f32 / 10000.0;

    let ambient = frame[AMBIENT_POS];
    let precision = u16::from_be_bytes([frame[PRECISION_MSB_POS], frame[PRECISION_LSB_POS]]);

    Reading {
        distance_m,
        magnitude,
        ambient,
        precision,
    }
}
