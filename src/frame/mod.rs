//! # HPS167 Frame Protocol Module
//!
//! Implementation of the HPS167 binary frame protocol.
//!
//! This module handles:
//! - Ranging command encoding (continuous and single shot)
//! - Response frame decoding (distance, magnitude, ambient, precision)
//! - CRC16-CCITT checksum calculation
//! - Frame synchronization over an unaligned byte stream

pub mod crc;
pub mod decoder;
pub mod encoder;
pub mod protocol;
