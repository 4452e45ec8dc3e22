//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
///
/// Serializes the benchmark report into machine-readable JSON format.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Record, ReportConfig};
    use pacebench_core::{MeasurementConfig, TimeUnit};

    #[test]
    fn test_json_contains_records() {
        let report = Report::new(
            ReportConfig::from(&MeasurementConfig::default()),
            vec![Record {
                name: "sleep".to_string(),
                argument: Some("20".to_string()),
                average: 20.1,
                unit: TimeUnit::Milliseconds,
                average_ns: 20_100_000.0,
                iterations: 50,
            }],
        );

        let json = generate_json_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["results"][0]["name"], "sleep");
        assert_eq!(value["results"][0]["argument"], "20");
        assert_eq!(value["results"][0]["unit"], "ms");
        assert_eq!(value["results"][0]["iterations"], 50);
        assert_eq!(value["meta"]["config"]["heating_time_ns"], 500_000_000);
    }

    #[test]
    fn test_json_parses_back() {
        let report = Report::new(
            ReportConfig::from(&MeasurementConfig::default()),
            vec![Record {
                name: "noop".to_string(),
                argument: None,
                average: 1.25,
                unit: TimeUnit::Nanoseconds,
                average_ns: 1.25,
                iterations: 800_000_000,
            }],
        );

        let json = generate_json_report(&report).unwrap();
        assert!(!json.contains("\"argument\""));
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.results, report.results);
    }
}
