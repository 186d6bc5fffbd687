//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::publisher::Rotation;

/// Baud rates the sensor's UART can be driven at
const SUPPORTED_BAUD_RATES: &[u32] = &[9600, 19200, 38400, 57600, 115_200, 230_400, 460_800, 921_600];

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub serial: SerialConfig,

    #[serde(default)]
    pub sampler: SamplerConfig,
}

/// Serial port configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    #[serde(default = "default_serial_port")]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

/// Measurement cycle configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SamplerConfig {
    /// Tick period in milliseconds (default 20 ms = 50 Hz, the sensor's data rate)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Consecutive failed ticks tolerated before the port is reopened
    #[serde(default = "default_max_consecutive_errors")]
    pub max_consecutive_errors: u32,

    /// Sensor mounting rotation relative to the vehicle body
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

// Default value functions
fn default_serial_port() -> String { "/dev/ttyS2".to_string() }
fn default_baud_rate() -> u32 { 115_200 }

fn default_interval_ms() -> u64 { 20 }
fn default_max_consecutive_errors() -> u32 { 10 }
fn default_rotation() -> String { "downward".to_string() }

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_serial_port(),
            baud_rate: default_baud_rate(),
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_consecutive_errors: default_max_consecutive_errors(),
            rotation: default_rotation(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            sampler: SamplerConfig::default(),
        }
    }
}

impl SamplerConfig {
    /// Parse the configured rotation string
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the rotation name is unknown
    pub fn rotation(&self) -> Result<Rotation> {
        self.rotation
            .parse::<Rotation>()
            .map_err(|e| crate::error::Hps167Error::Config(toml::de::Error::custom(e)))
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hps167::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), hps167::error::Hps167Error>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if self.serial.port.is_empty() {
            return Err(crate::error::Hps167Error::Config(
                toml::de::Error::custom("serial port cannot be empty"),
            ));
        }

        if !SUPPORTED_BAUD_RATES.contains(&self.serial.baud_rate) {
            return Err(crate::error::Hps167Error::Config(
                toml::de::Error::custom(format!(
                    "baud_rate must be one of: {:?}",
                    SUPPORTED_BAUD_RATES
                )),
            ));
        }

        if self.sampler.interval_ms == 0 || self.sampler.interval_ms > 1000 {
            return Err(crate::error::Hps167Error::Config(
                toml::de::Error::custom("interval_ms must be between 1 and 1000"),
            ));
        }

        if self.sampler.max_consecutive_errors == 0 || self.sampler.max_consecutive_errors > 100 {
            return Err(crate::error::Hps167Error::Config(
                toml::de::Error::custom("max_consecutive_errors must be between 1 and 100"),
            ));
        }

        // Rejects unknown rotation names
        self.sampler.rotation()?;

        Ok(())
    }
}
