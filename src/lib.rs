//! # HPS167 Driver Library
//!
//! Driver for the Hypersen HPS167 Time-of-Flight distance sensor over an
//! asynchronous serial link.
//!
//! This library provides the sensor's binary frame protocol (command
//! encoding, response framing, CRC16-CCITT validation) and the measurement
//! state machine that keeps periodic sampling alive across transient I/O
//! failures.

pub mod config;
pub mod driver;
pub mod error;
pub mod frame;
pub mod publisher;
pub mod serial;
