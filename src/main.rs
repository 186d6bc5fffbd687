//! # HPS167 Driver
//!
//! Samples a Hypersen HPS167 Time-of-Flight distance sensor over a serial
//! link and logs the decoded range readings.
//!
//! The binary provides the collaborators the driver core treats as external:
//! a tokio interval as the periodic scheduler, a tokio-serial port as the
//! port adapter, and a logging publisher as the output sink.

use anyhow::Result;
use tokio::time::{interval, Duration};
use tracing::info;

mod config;
mod driver;
mod error;
mod frame;
mod publisher;
mod serial;

use config::Config;
use driver::Hps167Driver;
use publisher::LogPublisher;
use serial::Hps167Serial;

/// Number of ticks between status log messages (10 s at the 50 Hz default)
const STATUS_LOG_INTERVAL_TICKS: u64 = 500;

/// Main entry point for the HPS167 driver
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration (first CLI argument, defaults otherwise)
///    - Open the serial port and start the measurement cycle
///
/// 2. **Main Loop**
///    - Tick the driver at the configured interval (default 20 ms / 50 Hz)
///    - Log driver status periodically
///    - Handle Ctrl+C for graceful shutdown
///
/// 3. **Graceful Shutdown**
///    - Stop the measurement cycle
///    - Log final diagnostics
///
/// # Errors
///
/// Returns error if the configuration is invalid or the serial port cannot
/// be opened at startup. Runtime I/O failures are not fatal: the driver
/// reopens the port on its own and keeps retrying at the tick rate.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("HPS167 driver v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let port = Hps167Serial::open(&config.serial)?;
    let mut driver = Hps167Driver::new(
        port,
        LogPublisher::new(),
        config.sampler.rotation()?,
        config.sampler.max_consecutive_errors,
    );

    driver.start().await;

    let mut ticker = interval(Duration::from_millis(config.sampler.interval_ms));
    info!(
        "Sampling at {} ms intervals, press Ctrl+C to exit",
        config.sampler.interval_ms
    );

    let mut tick_count: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                driver.tick().await;
                tick_count += 1;

                if tick_count % STATUS_LOG_INTERVAL_TICKS == 0 {
                    driver.print_info();
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    driver.stop();
    driver.print_info();

    Ok(())
}
