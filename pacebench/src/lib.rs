#![warn(missing_docs)]
//! # PaceBench
//!
//! Micro-benchmarking harness that calibrates an iteration budget, runs it as
//! one timed batch and reports the mean time per iteration.
//!
//! - **Calibrated batches**: a heating phase estimates the cost of one
//!   iteration; the measured batch is sized to a target duration and timed
//!   with a single clock read around all of it
//! - **Two timing protocols**: time whole loop bodies, or only the parts
//!   bracketed by a timing window
//! - **Parameterized runs**: over argument values or over types
//! - **Readable units**: averages are shown in ns, us or ms
//!
//! ## Quick Start
//!
//! ```no_run
//! use pacebench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let suite = Suite::new()
//!         .bench("sum", |ctx| {
//!             while ctx.advance() {
//!                 do_not_optimize((0..1000u64).sum::<u64>());
//!             }
//!         })
//!         .bench_with_args("fill", [64usize, 4096], |ctx, n| {
//!             while ctx.advance() {
//!                 do_not_optimize(vec![0u8; n]);
//!             }
//!         });
//!
//!     pacebench::run(suite)
//! }
//! ```
//!
//! ## Excluding Setup
//!
//! ```
//! # use pacebench::prelude::*;
//! # use std::time::Duration;
//! let config = MeasurementConfig::new(Duration::from_millis(5), Duration::from_millis(10));
//! let mut runner = Runner::quiet(config);
//! let record = runner
//!     .run_single("sort", |ctx| {
//!         while ctx.advance_explicit() {
//!             let mut data: Vec<u32> = (0..512).rev().collect();
//!             ctx.timed(|| data.sort_unstable());
//!             do_not_optimize(data);
//!         }
//!     })
//!     .unwrap();
//! assert!(record.iterations >= 1);
//! ```

pub mod hint;

// Re-export core types
pub use pacebench_core::{
    Clock, Context, DEFAULT_HEATING_DURATION, DEFAULT_TARGET_MEASUREMENT_DURATION,
    MeasurementConfig, Phase, TimeUnit, Timer, TimingWindow, TypeList, TypeVisitor, TypedBench,
    type_label,
};

// Re-export report types
pub use pacebench_report::{OutputFormat, Record, Report, ReportConfig, format_line, render};

// Re-export runners and harness
pub use pacebench_cli::{Cli, PaceConfig, Runner, RunnerError, Suite, run_with_cli};

pub use hint::{clobber_memory, do_not_optimize};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::hint::{clobber_memory, do_not_optimize};
    pub use crate::{Context, MeasurementConfig, Runner, Suite, TimeUnit, TypedBench};
}

/// Run the PaceBench CLI harness for a suite.
///
/// Call this from your benchmark binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     pacebench::run(suite)
/// }
/// ```
pub use pacebench_cli::run;
