//! Report Data Structures

use chrono::{DateTime, Utc};
use pacebench_core::{MeasurementConfig, TimeUnit};
use serde::{Deserialize, Serialize};

/// Outcome of one benchmark case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Benchmark name
    pub name: String,
    /// Argument display text (value or type name) for parameterized cases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
    /// Average time per iteration, expressed in `unit`
    pub average: f64,
    /// Display unit of `average`
    pub unit: TimeUnit,
    /// Average time per iteration in nanoseconds
    pub average_ns: f64,
    /// Measured iterations
    pub iterations: u64,
}

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// Benchmark cases in execution order
    pub results: Vec<Record>,
}

impl Report {
    /// Build a report stamped with the current time
    pub fn new(config: ReportConfig, results: Vec<Record>) -> Self {
        Self {
            meta: ReportMeta::new(config),
            results,
        }
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Report layout version
    pub schema_version: u32,
    /// pacebench version that produced the report
    pub version: String,
    /// Generation time (UTC)
    pub timestamp: DateTime<Utc>,
    /// Host description
    pub system: SystemInfo,
    /// Measurement settings
    pub config: ReportConfig,
}

impl ReportMeta {
    /// Metadata for the running process
    pub fn new(config: ReportConfig) -> Self {
        Self {
            schema_version: 1,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            system: SystemInfo::current(),
            config,
        }
    }
}

/// Host description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system
    pub os: String,
    /// CPU architecture
    pub arch: String,
}

impl SystemInfo {
    /// Describe the host this process runs on
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

/// Measurement configuration captured in report metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Calibration time in nanoseconds
    pub heating_time_ns: u64,
    /// Measurement target in nanoseconds
    pub measurement_time_ns: u64,
    /// Minimum planned iterations
    pub min_iterations: u64,
    /// Maximum planned iterations
    pub max_iterations: Option<u64>,
}

impl From<&MeasurementConfig> for ReportConfig {
    fn from(config: &MeasurementConfig) -> Self {
        Self {
            heating_time_ns: config.heating_ns(),
            measurement_time_ns: config.target_ns(),
            min_iterations: config.min_iterations,
            max_iterations: config.max_iterations,
        }
    }
}
