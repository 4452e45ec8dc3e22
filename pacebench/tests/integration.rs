//! Integration tests for PaceBench
//!
//! These tests run real workloads end to end, using short heating and
//! measurement targets so the suite stays fast.

use pacebench::prelude::*;
use pacebench::{Phase, Record, format_line};
use std::time::Duration;

fn sleep_ms(ms: u64) {
    std::thread::sleep(Duration::from_millis(ms));
}

fn short_config() -> MeasurementConfig {
    MeasurementConfig::new(Duration::from_millis(100), Duration::from_millis(200))
}

/// `thread::sleep` never returns early; allow generous scheduler overshoot.
fn assert_close_ms(record: &Record, expected_ms: f64) {
    assert_eq!(record.unit, TimeUnit::Milliseconds, "{record:?}");
    assert!(
        record.average >= expected_ms * 0.98 && record.average < expected_ms * 1.5,
        "expected ~{expected_ms}ms, got {}",
        format_line(record)
    );
}

/// A 57ms sleeping body measured implicitly reports ~57ms.
#[test]
fn test_implicit_sleep_57ms() {
    let mut runner = Runner::quiet(short_config());

    let record = runner
        .run_single("sleep", |ctx| {
            while ctx.advance() {
                sleep_ms(57);
            }
        })
        .unwrap();

    assert_close_ms(&record, 57.0);
    assert!(record.iterations >= 1);
    // 2 calibration bodies (114ms), then round(200 / 57) = 4 measured
    assert!(record.iterations <= 4, "{record:?}");
}

/// Only the bracketed 10ms counts; the 30ms of setup does not.
#[test]
fn test_explicit_excludes_setup() {
    let mut runner = Runner::quiet(MeasurementConfig::new(
        Duration::from_millis(50),
        Duration::from_millis(100),
    ));

    let record = runner
        .run_single("setup_excluded", |ctx| {
            while ctx.advance_explicit() {
                sleep_ms(30);
                ctx.mark_start();
                sleep_ms(10);
                ctx.mark_stop();
            }
        })
        .unwrap();

    assert_close_ms(&record, 10.0);
    assert!(record.average < 20.0);
}

/// The guard form closes its window at the end of each loop body.
#[test]
fn test_explicit_with_timing_window() {
    let mut runner = Runner::quiet(MeasurementConfig::new(
        Duration::from_millis(40),
        Duration::from_millis(80),
    ));

    let record = runner
        .run_single("guarded", |ctx| {
            while ctx.advance_explicit() {
                sleep_ms(15);
                let _window = ctx.time();
                sleep_ms(8);
            }
        })
        .unwrap();

    assert_close_ms(&record, 8.0);
}

/// Each argument gets its own line and its own calibration.
#[test]
fn test_parameterized_sleeps() {
    let mut runner = Runner::quiet(short_config());

    let records = runner
        .run_parameterized("sleep", [20u64, 30, 57], |ctx, ms| {
            while ctx.advance() {
                sleep_ms(ms);
            }
        })
        .unwrap();

    assert_eq!(records.len(), 3);
    for (record, ms) in records.iter().zip([20u64, 30, 57]) {
        assert_eq!(record.name, "sleep");
        assert_eq!(record.argument.as_deref(), Some(ms.to_string().as_str()));
        assert_close_ms(record, ms as f64);
    }

    // Budgets are derived per argument: ~10 for 20ms, ~4 for 57ms
    assert!(records[0].iterations > records[2].iterations);
}

struct TypeA;
struct TypeB;

struct SleepBySize;

impl TypedBench for SleepBySize {
    fn run<T: 'static>(&mut self, ctx: &mut Context) {
        let ms = if std::any::type_name::<T>().ends_with("TypeA") {
            2
        } else {
            4
        };
        while ctx.advance() {
            sleep_ms(ms);
        }
    }
}

/// Type-tag arguments are reported by type name.
#[test]
fn test_type_tag_arguments() {
    let mut runner = Runner::quiet(MeasurementConfig::new(
        Duration::from_millis(10),
        Duration::from_millis(20),
    ));

    let records = runner
        .run_typed::<(TypeA, TypeB), _>("by_type", &mut SleepBySize)
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].argument.as_deref(), Some("TypeA"));
    assert_eq!(records[1].argument.as_deref(), Some("TypeB"));
    assert!(format_line(&records[0]).starts_with("by_type TypeA: avg "));
    assert!(records[1].average_ns > records[0].average_ns);
}

/// Fast bodies land in nanoseconds or microseconds, never below one iteration.
#[test]
fn test_fast_body_units() {
    let mut runner = Runner::quiet(MeasurementConfig::new(
        Duration::from_millis(5),
        Duration::from_millis(10),
    ));

    let record = runner
        .run_single("add", |ctx| {
            let mut x = 0u64;
            while ctx.advance() {
                x = do_not_optimize(x.wrapping_add(1));
            }
        })
        .unwrap();

    assert!(record.iterations > 1);
    assert!(record.average_ns >= 0.0);
    assert_ne!(record.unit, TimeUnit::Milliseconds);
    assert_eq!(record.unit, TimeUnit::select(record.average_ns));
}

/// The context passes through the phases strictly in order.
#[test]
fn test_phase_sequence() {
    let mut ctx = Context::new(MeasurementConfig::new(
        Duration::from_millis(2),
        Duration::from_millis(4),
    ));
    assert_eq!(ctx.phase(), Phase::NotStarted);

    let mut seen = vec![ctx.phase()];
    while ctx.advance() {
        if seen.last() != Some(&ctx.phase()) {
            seen.push(ctx.phase());
        }
        std::hint::black_box((0..32u32).product::<u32>());
    }
    seen.push(ctx.phase());

    assert_eq!(
        seen,
        vec![
            Phase::NotStarted,
            Phase::Calibrating,
            Phase::Measuring,
            Phase::Finished
        ]
    );
    assert!(ctx.iterations() >= 1);
    assert!(ctx.average_time(1) >= 0.0);
}

/// Iteration bounds cap the planned batch.
#[test]
fn test_iteration_cap() {
    let config = short_config().with_max_iterations(Some(2));
    let mut runner = Runner::quiet(config);

    let record = runner
        .run_single("capped", |ctx| {
            while ctx.advance() {
                sleep_ms(5);
            }
        })
        .unwrap();

    assert_eq!(record.iterations, 2);
    assert_close_ms(&record, 5.0);
}

/// Records are reproducible from the same average.
#[test]
fn test_formatting_is_deterministic() {
    let record = Record {
        name: "sleep".to_string(),
        argument: Some("57".to_string()),
        average: TimeUnit::Milliseconds.convert(57_123_456.0),
        unit: TimeUnit::select(57_123_456.0),
        average_ns: 57_123_456.0,
        iterations: 4,
    };
    assert_eq!(
        format_line(&record),
        "sleep 57: avg 57.123ms (4 iterations)"
    );
    assert_eq!(format_line(&record), format_line(&record.clone()));
}
