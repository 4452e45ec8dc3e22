//! Configuration loading from pace.toml
//!
//! PaceBench configuration can be specified in a `pace.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use pacebench_core::MeasurementConfig;
use pacebench_report::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Name of the configuration file looked up by [`PaceConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "pace.toml";

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration TOML
    #[error("invalid configuration in {}: {}", .path.display(), .source)]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// A duration string could not be parsed
    #[error("invalid duration {0:?}: {1}")]
    Duration(String, &'static str),
}

/// PaceBench configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaceConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Calibration duration before measurement (e.g., "500ms")
    #[serde(default = "default_heating")]
    pub heating_time: String,
    /// Target duration of the measured batch (e.g., "1s")
    #[serde(default = "default_measurement")]
    pub measurement_time: String,
    /// Minimum number of measured iterations
    #[serde(default)]
    pub min_iterations: Option<u64>,
    /// Maximum number of measured iterations
    #[serde(default)]
    pub max_iterations: Option<u64>,
    /// Pin the benchmark thread to this CPU (Linux only)
    #[serde(default)]
    pub pin_cpu: Option<usize>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            heating_time: default_heating(),
            measurement_time: default_measurement(),
            min_iterations: None,
            max_iterations: None,
            pin_cpu: None,
        }
    }
}

fn default_heating() -> String {
    "500ms".to_string()
}
fn default_measurement() -> String {
    "1s".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report format: "human", "json" or "csv"
    #[serde(default)]
    pub format: OutputFormat,
    /// Write the report to this file instead of stdout
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl RunnerConfig {
    /// Resolve into the measurement settings used by every context
    pub fn measurement_config(&self) -> Result<MeasurementConfig, ConfigError> {
        Ok(MeasurementConfig::new(
            PaceConfig::parse_duration(&self.heating_time)?,
            PaceConfig::parse_duration(&self.measurement_time)?,
        )
        .with_min_iterations(self.min_iterations.unwrap_or(1))
        .with_max_iterations(self.max_iterations))
    }
}

impl PaceConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find `pace.toml` by walking up from the current directory
    pub fn find() -> Option<PathBuf> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Some(config_path);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Discover and load configuration; `Ok(None)` when no file exists
    pub fn discover() -> Result<Option<Self>, ConfigError> {
        match Self::find() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration");
                Self::load(path).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# PaceBench Configuration

[runner]
# Calibration time used to estimate the cost of one iteration
heating_time = "500ms"
# Target duration of the measured batch
measurement_time = "1s"
# Minimum measured iterations (uncomment to enable)
# min_iterations = 10
# Maximum measured iterations (uncomment to enable)
# max_iterations = 1000000
# Pin the benchmark thread to one CPU, Linux only (uncomment to enable)
# pin_cpu = 0

[output]
# Report format: human, json, csv
format = "human"
# Report file (uncomment to write the report to a file instead of stdout)
# path = "target/pacebench/report.json"
"#
        .to_string()
    }

    /// Parse duration string (e.g., "3s", "500ms", "2m")
    pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ConfigError::Duration(s.to_string(), "empty duration"));
        }

        // Find where the number ends and unit begins
        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic() || *c == 'µ')
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .trim()
            .parse()
            .map_err(|_| ConfigError::Duration(s.to_string(), "invalid number"))?;
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Duration(
                s.to_string(),
                "must be a non-negative number",
            ));
        }

        let multiplier: u64 = match unit_part.trim().to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" | "" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(ConfigError::Duration(s.to_string(), "unknown unit")),
        };

        Ok(Duration::from_nanos((value * multiplier as f64) as u64))
    }
}
