//! Benchmark Runners
//!
//! Each case gets a fresh [`Context`], runs to completion, and is turned into
//! a [`Record`] written to the output as one report line.
//!
//! ```text
//! Runner ──▶ Context::new ──▶ user body (advance loop) ──▶ Finished
//!                                                           │
//!          Record { average, unit, iterations } ◀──────────┘
//! ```
//!
//! Cases run one after another on the calling thread; no two contexts are
//! ever alive at the same time.

use pacebench_core::{
    Context, MeasurementConfig, TimeUnit, TypeList, TypeVisitor, TypedBench, type_label,
};
use pacebench_report::{Record, format_line};
use std::fmt::Display;
use std::io::Write;
use thiserror::Error;

/// Errors from running benchmark cases
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A report line could not be written
    #[error("failed to write report line for {name}: {source}")]
    Output {
        /// Benchmark name
        name: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Runs benchmark cases and reports each one as it finishes
pub struct Runner {
    config: MeasurementConfig,
    out: Box<dyn Write>,
    records: Vec<Record>,
}

impl Runner {
    /// Runner reporting to stdout
    pub fn new(config: MeasurementConfig) -> Self {
        Self::with_output(config, std::io::stdout())
    }

    /// Runner reporting to an arbitrary writer
    pub fn with_output(config: MeasurementConfig, out: impl Write + 'static) -> Self {
        Self {
            config,
            out: Box::new(out),
            records: Vec::new(),
        }
    }

    /// Runner that only collects records
    pub fn quiet(config: MeasurementConfig) -> Self {
        Self::with_output(config, std::io::sink())
    }

    /// Measurement settings applied to every case
    pub fn config(&self) -> &MeasurementConfig {
        &self.config
    }

    /// Records of every case run so far, in order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consume the runner, returning its records
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Run one benchmark body.
    ///
    /// `f` is called exactly once and must drive the context until
    /// `advance()` (or `advance_explicit()`) returns `false`.
    ///
    /// # Panics
    /// If `f` returns before the context has finished.
    pub fn run_single<F>(&mut self, name: &str, f: F) -> Result<Record, RunnerError>
    where
        F: FnOnce(&mut Context),
    {
        let ctx = measure_case(&self.config, name, f);
        self.emit(name, None, &ctx)
    }

    /// Run one benchmark body per argument, in order.
    ///
    /// Every argument gets its own context and therefore its own calibration.
    pub fn run_parameterized<A, I, F>(
        &mut self,
        name: &str,
        args: I,
        mut f: F,
    ) -> Result<Vec<Record>, RunnerError>
    where
        I: IntoIterator<Item = A>,
        A: Display,
        F: FnMut(&mut Context, A),
    {
        let mut records = Vec::new();
        for arg in args {
            let label = arg.to_string();
            let ctx = measure_case(&self.config, name, |ctx| f(ctx, arg));
            records.push(self.emit(name, Some(label), &ctx)?);
        }
        Ok(records)
    }

    /// Run a type-generic benchmark body once per type in `L`.
    ///
    /// The report argument is the type's name.
    pub fn run_typed<L, B>(&mut self, name: &str, bench: &mut B) -> Result<Vec<Record>, RunnerError>
    where
        L: TypeList,
        B: TypedBench,
    {
        let mut visitor = TypedCases {
            runner: self,
            name,
            bench,
            records: Vec::with_capacity(L::LEN),
            error: None,
        };
        L::for_each(&mut visitor);

        match visitor.error {
            Some(err) => Err(err),
            None => Ok(visitor.records),
        }
    }

    /// Select the unit, format the line, and remember the record
    fn emit(
        &mut self,
        name: &str,
        argument: Option<String>,
        ctx: &Context,
    ) -> Result<Record, RunnerError> {
        let average_ns = ctx.average_time(1);
        let unit = TimeUnit::select(average_ns);

        let record = Record {
            name: name.to_string(),
            argument,
            average: ctx.average_time(unit.nanos()),
            unit,
            average_ns,
            iterations: ctx.iterations(),
        };

        tracing::debug!(
            name,
            argument = record.argument.as_deref(),
            average_ns,
            iterations = record.iterations,
            calibration_iterations = ctx.calibration_iterations(),
            "benchmark finished"
        );

        writeln!(self.out, "{}", format_line(&record))
            .and_then(|()| self.out.flush())
            .map_err(|source| RunnerError::Output {
                name: name.to_string(),
                source,
            })?;

        self.records.push(record.clone());
        Ok(record)
    }
}

/// Run `f` against a fresh context and hand back the finished context
fn measure_case<F>(config: &MeasurementConfig, name: &str, f: F) -> Context
where
    F: FnOnce(&mut Context),
{
    tracing::debug!(name, "running benchmark");

    let mut ctx = Context::new(*config);
    // Opaque call so a body without visible effects is not elided
    let f = std::hint::black_box(f);
    f(&mut ctx);

    assert!(
        ctx.is_finished(),
        "benchmark `{name}` returned before its loop finished; \
         loop on ctx.advance() or ctx.advance_explicit() until it returns false"
    );
    ctx
}

struct TypedCases<'r, 'b, B> {
    runner: &'r mut Runner,
    name: &'r str,
    bench: &'b mut B,
    records: Vec<Record>,
    error: Option<RunnerError>,
}

impl<B: TypedBench> TypeVisitor for TypedCases<'_, '_, B> {
    fn visit<T: 'static>(&mut self) {
        if self.error.is_some() {
            return;
        }

        let bench = &mut *self.bench;
        let ctx = measure_case(&self.runner.config, self.name, |ctx| bench.run::<T>(ctx));
        match self
            .runner
            .emit(self.name, Some(type_label::<T>().to_string()), &ctx)
        {
            Ok(record) => self.records.push(record),
            Err(err) => self.error = Some(err),
        }
    }
}
