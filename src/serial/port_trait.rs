//! Trait abstraction for serial port operations to enable testing

use async_trait::async_trait;
use std::io;

/// Trait for rangefinder serial port I/O operations
///
/// All operations are non-blocking or bounded-time by contract: the
/// measurement cycle runs on a shared scheduler and a blocking read would
/// stall every tick behind it.
#[async_trait]
pub trait RangefinderPort: Send {
    /// Write all data to the port and flush it
    async fn write_all(&mut self, data: &[u8]) -> io::Result<()>;

    /// Read whatever bytes are currently pending into `buf`
    ///
    /// Returns `Ok(0)` when nothing is available; never waits for data.
    async fn read_available(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Close and reopen the underlying device in place
    ///
    /// Invoked by the recovery path after sustained communication failures.
    async fn reopen(&mut self) -> io::Result<()>;
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Mock serial port for driver tests
    ///
    /// Reads are scripted: each queued chunk is returned by one
    /// `read_available` call, then the port reports no pending bytes.
    /// Handles are cloneable so tests can inspect traffic after handing
    /// ownership to the driver.
    #[derive(Clone, Default)]
    pub struct MockPort {
        pub pending_reads: Arc<Mutex<VecDeque<Vec<u8>>>>,
        pub written_data: Arc<Mutex<Vec<Vec<u8>>>>,
        pub read_calls: Arc<Mutex<usize>>,
        pub reopen_calls: Arc<Mutex<usize>>,
        pub write_error: Arc<Mutex<Option<io::ErrorKind>>>,
        pub read_error: Arc<Mutex<Option<io::ErrorKind>>>,
        pub reopen_error: Arc<Mutex<Option<io::ErrorKind>>>,
    }

    impl MockPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn queue_read(&self, data: &[u8]) {
            self.pending_reads.lock().unwrap().push_back(data.to_vec());
        }

        pub fn written(&self) -> Vec<Vec<u8>> {
            self.written_data.lock().unwrap().clone()
        }

        pub fn read_calls(&self) -> usize {
            *self.read_calls.lock().unwrap()
        }

        pub fn reopen_calls(&self) -> usize {
            *self.reopen_calls.lock().unwrap()
        }

        pub fn set_write_error(&self, error: Option<io::ErrorKind>) {
            *self.write_error.lock().unwrap() = error;
        }

        pub fn set_read_error(&self, error: Option<io::ErrorKind>) {
            *self.read_error.lock().unwrap() = error;
        }

        pub fn set_reopen_error(&self, error: Option<io::ErrorKind>) {
            *self.reopen_error.lock().unwrap() = error;
        }
    }

    #[async_trait]
    impl RangefinderPort for MockPort {
        async fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
            if let Some(error) = *self.write_error.lock().unwrap() {
                return Err(io::Error::new(error, "mock write error"));
            }
            self.written_data.lock().unwrap().push(data.to_vec());
            Ok(())
        }

        async fn read_available(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            *self.read_calls.lock().unwrap() += 1;

            if let Some(error) = *self.read_error.lock().unwrap() {
                return Err(io::Error::new(error, "mock read error"));
            }

            let mut pending = self.pending_reads.lock().unwrap();
            match pending.pop_front() {
                Some(chunk) => {
                    let n = chunk.len().min(buf.len());
                    buf[..n].copy_from_slice(&chunk[..n]);
                    if n < chunk.len() {
                        // Remainder stays queued for the next call
                        pending.push_front(chunk[n..].to_vec());
                    }
                    Ok(n)
                }
                None => Ok(0),
            }
        }

        async fn reopen(&mut self) -> io::Result<()> {
            *self.reopen_calls.lock().unwrap() += 1;
            if let Some(error) = *self.reopen_error.lock().unwrap() {
                return Err(io::Error::new(error, "mock reopen error"));
            }
            Ok(())
        }
    }
}
