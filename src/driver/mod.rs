//! # Measurement State Machine
//!
//! Owns the HPS167 sample cycle: sending the continuous-ranging command once
//! per start, collecting streamed bytes on every scheduler tick, decoding
//! frames out of the unaligned stream, and reopening the port after sustained
//! communication failures.
//!
//! The driver is single-threaded cooperative: it is invoked by one external
//! periodic callback ([`Hps167Driver::tick`]), never blocks inside a tick,
//! and performs no synchronization of its own because ticks never overlap.
//! No failure here is fatal; the cycle retries indefinitely at the tick rate.

use std::time::{Duration, Instant};

use bytes::{Buf, BytesMut};
use tracing::{debug, info, trace, warn};

use crate::frame::decoder::{try_decode, DecodeError};
use crate::frame::encoder::continuous_ranging_command;
use crate::frame::protocol::RESPONSE_FRAME_LEN;
use crate::publisher::{RangePublisher, Rotation};
use crate::serial::port_trait::RangefinderPort;

/// Receive accumulator capacity; comfortably holds several response frames
const RX_BUFFER_CAPACITY: usize = 64;

/// Bytes pulled from the port per read call within a tick
const READ_CHUNK_LEN: usize = 32;

/// Lifecycle states of the measurement cycle
///
/// `Stopped → Starting → Sampling ⇄ Recovering → Stopped`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No commands sent, no bytes read
    Stopped,
    /// Start command pending; the write is retried each tick until it succeeds
    Starting,
    /// Command sent; the sensor streams responses which each tick collects
    Sampling,
    /// Port treated as failed; each tick issues one reopen request
    Recovering,
}

/// Diagnostics counters recorded by the cycle and read externally
#[derive(Debug, Clone, Default)]
pub struct DriverStats {
    /// Communication errors: failed writes, failed reads, failed reopens,
    /// and ticks that saw corruption without producing a valid frame
    pub comms_errors: u64,

    /// Readings decoded and handed to the publisher
    pub frames_published: u64,

    /// Time spent in the most recent tick that produced a reading
    pub last_collect: Option<Duration>,
}

/// HPS167 measurement driver
///
/// Generic over the port and publisher collaborators so the cycle can be
/// exercised against mocks; the binary wires in [`crate::serial::Hps167Serial`]
/// and [`crate::publisher::LogPublisher`].
pub struct Hps167Driver<P: RangefinderPort, S: RangePublisher> {
    port: P,
    publisher: S,
    rotation: Rotation,
    state: DriverState,
    /// Receive accumulator; cleared across cycles, never reallocated
    rx: BytesMut,
    consecutive_errors: u32,
    max_consecutive_errors: u32,
    stats: DriverStats,
}

impl<P: RangefinderPort, S: RangePublisher> Hps167Driver<P, S> {
    /// Create a stopped driver
    ///
    /// # Arguments
    ///
    /// * `port` - Serial port collaborator
    /// * `publisher` - Reading consumer
    /// * `rotation` - Mounting rotation forwarded with every reading
    /// * `max_consecutive_errors` - Failed ticks tolerated before the port
    ///   is treated as failed and reopened
    pub fn new(port: P, publisher: S, rotation: Rotation, max_consecutive_errors: u32) -> Self {
        Self {
            port,
            publisher,
            rotation,
            state: DriverState::Stopped,
            rx: BytesMut::with_capacity(RX_BUFFER_CAPACITY),
            consecutive_errors: 0,
            max_consecutive_errors,
            stats: DriverStats::default(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Diagnostics counters (owned here, read externally)
    pub fn stats(&self) -> &DriverStats {
        &self.stats
    }

    /// Start the measurement cycle
    ///
    /// Transitions `Stopped → Starting`, clears the receive buffer and error
    /// counter, and writes the continuous-ranging command. On write success
    /// the driver enters `Sampling`; on failure it stays `Starting` and the
    /// next tick retries the write.
    pub async fn start(&mut self) {
        if self.state != DriverState::Stopped {
            debug!("start() ignored in state {:?}", self.state);
            return;
        }

        self.state = DriverState::Starting;
        self.rx.clear();
        self.consecutive_errors = 0;
        self.try_send_start_command().await;
    }

    /// Stop the measurement cycle
    ///
    /// Takes effect immediately: no further commands are written, buffered
    /// bytes are discarded, and subsequent ticks are no-ops until the next
    /// [`start`](Self::start).
    pub fn stop(&mut self) {
        if self.state != DriverState::Stopped {
            info!("measurement cycle stopped");
        }
        self.state = DriverState::Stopped;
        self.rx.clear();
        self.consecutive_errors = 0;
    }

    /// Run one measurement cycle step
    ///
    /// Invoked once per fixed interval by the external scheduler. Never
    /// blocks; all port operations are non-blocking or bounded-time.
    pub async fn tick(&mut self) {
        match self.state {
            DriverState::Stopped => {}
            DriverState::Starting => self.try_send_start_command().await,
            DriverState::Sampling => self.collect().await,
            DriverState::Recovering => self.recover().await,
        }
    }

    /// Log the diagnostics counters
    pub fn print_info(&self) {
        info!(
            state = ?self.state,
            comms_errors = self.stats.comms_errors,
            frames_published = self.stats.frames_published,
            last_collect = ?self.stats.last_collect,
            "driver status"
        );
    }

    /// Write the continuous-ranging command; on success enter `Sampling`
    ///
    /// Continuous mode streams responses without re-issuing the command, so
    /// this is written exactly once per start/recover cycle.
    async fn try_send_start_command(&mut self) {
        match self.port.write_all(&continuous_ranging_command()).await {
            Ok(()) => {
                debug!("continuous ranging command sent");
                self.state = DriverState::Sampling;
            }
            Err(e) => {
                warn!("failed to send ranging command: {}", e);
                self.note_comms_error();
            }
        }
    }

    /// Drain available port bytes and decode every complete frame
    async fn collect(&mut self) {
        let started = Instant::now();
        let mut chunk = [0u8; READ_CHUNK_LEN];

        loop {
            match self.port.read_available(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => {
                    self.rx.extend_from_slice(&chunk[..n]);
                    if self.rx.len() >= RX_BUFFER_CAPACITY {
                        break;
                    }
                }
                Err(e) => {
                    warn!("serial read failed: {}", e);
                    self.note_comms_error();
                    return;
                }
            }
        }

        let mut published = 0u64;
        let mut saw_corrupt = false;

        loop {
            match try_decode(&self.rx) {
                Ok(reading) => {
                    self.rx.advance(RESPONSE_FRAME_LEN);
                    self.consecutive_errors = 0;
                    published += 1;
                    trace!(distance_m = reading.distance_m, "frame decoded");
                    self.publisher.publish(&reading, self.rotation);
                }
                // Partial frame: keep the bytes and wait for the next tick
                Err(DecodeError::Incomplete) => break,
                // Resync within the same tick: drop one leading byte and retry
                Err(DecodeError::Corrupt) => {
                    self.rx.advance(1);
                    saw_corrupt = true;
                }
            }
        }

        if published > 0 {
            self.stats.frames_published += published;
            self.stats.last_collect = Some(started.elapsed());
        } else if saw_corrupt {
            // At most one error per tick, however many resync steps it took
            debug!("no valid frame recovered this tick");
            self.note_comms_error();
        }
    }

    /// One reopen attempt; on success re-enter `Starting` and re-issue the
    /// start command, on failure stay `Recovering` for a later tick
    async fn recover(&mut self) {
        match self.port.reopen().await {
            Ok(()) => {
                info!("serial port reopened, restarting measurement");
                self.rx.clear();
                self.consecutive_errors = 0;
                self.state = DriverState::Starting;
                self.try_send_start_command().await;
            }
            Err(e) => {
                warn!("serial port reopen failed: {}", e);
                self.stats.comms_errors += 1;
            }
        }
    }

    /// Count a communication error and enter recovery past the threshold
    fn note_comms_error(&mut self) {
        self.stats.comms_errors += 1;
        self.consecutive_errors += 1;

        if self.consecutive_errors > self.max_consecutive_errors
            && self.state != DriverState::Recovering
        {
            warn!(
                consecutive_errors = self.consecutive_errors,
                "error threshold exceeded, scheduling port reopen"
            );
            self.state = DriverState::Recovering;
            self.rx.clear();
        }
    }
}
