//! Measurement Configuration
//!
//! Durations that steer calibration and the size of the measured batch.

use std::time::Duration;

/// Default calibration ("heating") time
pub const DEFAULT_HEATING_DURATION: Duration = Duration::from_millis(500);

/// Default target duration of the measured batch
pub const DEFAULT_TARGET_MEASUREMENT_DURATION: Duration = Duration::from_secs(1);

/// Settings for a single measurement context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementConfig {
    /// Calibration continues until this much time has been accumulated
    pub heating_duration: Duration,
    /// The measured batch is sized to take roughly this long
    pub target_measurement_duration: Duration,
    /// Lower bound on the planned iteration count (never below 1)
    pub min_iterations: u64,
    /// Optional upper bound on the planned iteration count
    pub max_iterations: Option<u64>,
}

impl MeasurementConfig {
    /// Configuration with explicit heating and measurement targets
    pub fn new(heating_duration: Duration, target_measurement_duration: Duration) -> Self {
        Self {
            heating_duration,
            target_measurement_duration,
            ..Self::default()
        }
    }

    /// Set the calibration duration
    pub fn with_heating_duration(mut self, duration: Duration) -> Self {
        self.heating_duration = duration;
        self
    }

    /// Set the measured batch target duration
    pub fn with_target_measurement_duration(mut self, duration: Duration) -> Self {
        self.target_measurement_duration = duration;
        self
    }

    /// Set the minimum planned iteration count
    pub fn with_min_iterations(mut self, min: u64) -> Self {
        self.min_iterations = min;
        self
    }

    /// Set the maximum planned iteration count
    pub fn with_max_iterations(mut self, max: Option<u64>) -> Self {
        self.max_iterations = max;
        self
    }

    /// Heating threshold in nanoseconds
    pub fn heating_ns(&self) -> u64 {
        saturating_nanos(self.heating_duration)
    }

    /// Measurement target in nanoseconds
    pub fn target_ns(&self) -> u64 {
        saturating_nanos(self.target_measurement_duration)
    }

    /// Clamp a planned iteration count into the configured bounds.
    ///
    /// The minimum wins over the maximum, and the result is never zero.
    pub fn clamp_iterations(&self, planned: u64) -> u64 {
        let min = self.min_iterations.max(1);
        let max = self.max_iterations.unwrap_or(u64::MAX).max(min);
        planned.clamp(min, max)
    }
}

/// Nanoseconds in `duration`, saturating at `u64::MAX`
pub(crate) fn saturating_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            heating_duration: DEFAULT_HEATING_DURATION,
            target_measurement_duration: DEFAULT_TARGET_MEASUREMENT_DURATION,
            min_iterations: 1,
            max_iterations: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MeasurementConfig::default();
        assert_eq!(config.heating_ns(), 500_000_000);
        assert_eq!(config.target_ns(), 1_000_000_000);
        assert_eq!(config.min_iterations, 1);
        assert_eq!(config.max_iterations, None);
    }

    #[test]
    fn test_huge_durations_saturate() {
        let huge = Duration::from_secs(1 << 55);
        let config = MeasurementConfig::new(huge, huge);
        assert_eq!(config.heating_ns(), u64::MAX);
        assert_eq!(config.target_ns(), u64::MAX);

        assert_eq!(saturating_nanos(Duration::MAX), u64::MAX);
        assert_eq!(saturating_nanos(Duration::from_millis(3)), 3_000_000);
    }

    #[test]
    fn test_clamp_never_zero() {
        let config = MeasurementConfig::default().with_min_iterations(0);
        assert_eq!(config.clamp_iterations(0), 1);
        assert_eq!(config.clamp_iterations(40), 40);
    }

    #[test]
    fn test_clamp_min_wins_over_max() {
        let config = MeasurementConfig::default()
            .with_min_iterations(200)
            .with_max_iterations(Some(50));
        assert_eq!(config.clamp_iterations(10), 200);
        assert_eq!(config.clamp_iterations(10_000), 200);
    }

    #[test]
    fn test_clamp_respects_max() {
        let config = MeasurementConfig::default().with_max_iterations(Some(1_000));
        assert_eq!(config.clamp_iterations(1_000_000), 1_000);
    }
}
