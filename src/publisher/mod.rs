//! # Range Publisher Module
//!
//! Narrow output interface through which the measurement cycle hands decoded
//! readings to downstream consumers. Publishing is fire-and-forget; the
//! driver core never consumes a return value and never filters readings
//! (over-range values included) before handing them off.

use std::str::FromStr;

use tracing::info;

use crate::frame::protocol::Reading;

/// Sensor mounting orientation relative to the vehicle body
///
/// Forwarded alongside every reading so consumers can attribute the measured
/// distance to the correct axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// Sensor faces downward (typical rangefinder mounting)
    DownwardFacing,
    /// Sensor faces forward
    ForwardFacing,
    /// Sensor faces upward
    UpwardFacing,
    /// Sensor faces backward
    BackwardFacing,
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::DownwardFacing
    }
}

impl FromStr for Rotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "downward" => Ok(Rotation::DownwardFacing),
            "forward" => Ok(Rotation::ForwardFacing),
            "upward" => Ok(Rotation::UpwardFacing),
            "backward" => Ok(Rotation::BackwardFacing),
            other => Err(format!(
                "unknown rotation '{}' (expected downward, forward, upward or backward)",
                other
            )),
        }
    }
}

/// Trait for reading consumers
///
/// Implementations receive every validated reading the driver decodes, in
/// decode order, together with the configured mounting rotation.
pub trait RangePublisher: Send {
    /// Hand one decoded reading to the consumer (fire-and-forget)
    fn publish(&mut self, reading: &Reading, rotation: Rotation);
}

/// Publisher that logs readings via `tracing`
///
/// Used by the binary; library consumers substitute their own sink (a data
/// bus, a channel, a recorder).
#[derive(Debug, Default)]
pub struct LogPublisher;

impl LogPublisher {
    pub fn new() -> Self {
        Self
    }
}

impl RangePublisher for LogPublisher {
    fn publish(&mut self, reading: &Reading, rotation: Rotation) {
        info!(
            distance_m = reading.distance_m,
            magnitude = reading.magnitude,
            ambient = reading.ambient,
            precision = reading.precision,
            over_range = reading.is_over_range(),
            rotation = ?rotation,
            "range reading"
        );
    }
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock publisher recording every published reading for inspection
    #[derive(Clone, Default)]
    pub struct MockPublisher {
        pub published: Arc<Mutex<Vec<(Reading, Rotation)>>>,
    }

    impl MockPublisher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn published(&self) -> Vec<(Reading, Rotation)> {
            self.published.lock().unwrap().clone()
        }
    }

    impl RangePublisher for MockPublisher {
        fn publish(&mut self, reading: &Reading, rotation: Rotation) {
            self.published.lock().unwrap().push((*reading, rotation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_parsing() {
        assert_eq!("downward".parse::<Rotation>(), Ok(Rotation::DownwardFacing));
        assert_eq!("forward".parse::<Rotation>(), Ok(Rotation::ForwardFacing));
        assert_eq!("upward".parse::<Rotation>(), Ok(Rotation::UpwardFacing));
        assert_eq!("backward".parse::<Rotation>(), Ok(Rotation::BackwardFacing));
        assert!("sideways".parse::<Rotation>().is_err());
    }

    #[test]
    fn test_rotation_default_is_downward() {
        // Default mounting for a rangefinder
        assert_eq!(Rotation::default(), Rotation::DownwardFacing);
    }

    #[test]
    fn test_mock_publisher_records_readings() {
        use mocks::MockPublisher;

        let mut publisher = MockPublisher::new();
        let handle = publisher.clone();

        let reading = Reading {
            distance_m: 1.753,
            magnitude: 25.8608,
            ambient: 1,
            precision: 1,
        };
        publisher.publish(&reading, Rotation::DownwardFacing);

        let published = handle.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, reading);
        assert_eq!(published[0].1, Rotation::DownwardFacing);
    }
}
