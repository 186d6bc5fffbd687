//! # Error Types
//!
//! Custom error types for the HPS167 driver using `thiserror`.

use thiserror::Error;

/// Main error type for the HPS167 driver
#[derive(Debug, Error)]
pub enum Hps167Error {
    /// Serial port errors
    #[error("serial error: {0}")]
    Serial(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the HPS167 driver
pub type Result<T> = std::result::Result<T, Hps167Error>;
