//! Embedded Runner — measure without the CLI and post-process the records
//!
//! Run with: cargo run --example embedded_runner -p pacebench-demos --release

use pacebench::prelude::*;
use pacebench::{OutputFormat, Report, ReportConfig, format_line, render};
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let config = MeasurementConfig::default()
        .with_heating_duration(Duration::from_millis(200))
        .with_target_measurement_duration(Duration::from_millis(500));

    // Lines go to stdout as each case finishes
    let mut runner = Runner::new(config);

    runner.run_single("string_format", |ctx| {
        while ctx.advance() {
            do_not_optimize(format!("{}-{}", do_not_optimize(42), "x"));
        }
    })?;

    runner.run_parameterized("string_repeat", [16usize, 256, 4096], |ctx, n| {
        while ctx.advance() {
            do_not_optimize("ab".repeat(n));
        }
    })?;

    let records = runner.into_records();
    if let Some(slowest) = records
        .iter()
        .max_by(|a, b| a.average_ns.total_cmp(&b.average_ns))
    {
        println!("\nslowest: {}", format_line(slowest));
    }

    let report = Report::new(ReportConfig::from(&config), records);
    println!("{}", render(&report, OutputFormat::Json)?);

    Ok(())
}
