//! Reporting Units
//!
//! Picks the display unit for a nanosecond average.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Nanoseconds per microsecond
pub const NANOS_PER_MICRO: u64 = 1_000;
/// Nanoseconds per millisecond
pub const NANOS_PER_MILLI: u64 = 1_000_000;

/// Display unit for an average iteration time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Nanoseconds (`ns`)
    #[serde(rename = "ns")]
    Nanoseconds,
    /// Microseconds (`us`)
    #[serde(rename = "us")]
    Microseconds,
    /// Milliseconds (`ms`)
    #[serde(rename = "ms")]
    Milliseconds,
}

impl TimeUnit {
    /// Choose a unit for an average given in nanoseconds.
    ///
    /// Up to and including 1 µs stays in nanoseconds, up to and including 1 ms
    /// is shown in microseconds, anything slower in milliseconds.
    pub fn select(average_ns: f64) -> Self {
        if average_ns <= NANOS_PER_MICRO as f64 {
            TimeUnit::Nanoseconds
        } else if average_ns <= NANOS_PER_MILLI as f64 {
            TimeUnit::Microseconds
        } else {
            TimeUnit::Milliseconds
        }
    }

    /// Length of one unit in nanoseconds
    pub fn nanos(self) -> u64 {
        match self {
            TimeUnit::Nanoseconds => 1,
            TimeUnit::Microseconds => NANOS_PER_MICRO,
            TimeUnit::Milliseconds => NANOS_PER_MILLI,
        }
    }

    /// Short label used in report lines
    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "ns",
            TimeUnit::Microseconds => "us",
            TimeUnit::Milliseconds => "ms",
        }
    }

    /// Convert a nanosecond value into this unit
    pub fn convert(self, nanos: f64) -> f64 {
        nanos / self.nanos() as f64
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ns" => Ok(TimeUnit::Nanoseconds),
            "us" | "µs" => Ok(TimeUnit::Microseconds),
            "ms" => Ok(TimeUnit::Milliseconds),
            other => Err(format!("Unknown time unit: {}", other)),
        }
    }
}
