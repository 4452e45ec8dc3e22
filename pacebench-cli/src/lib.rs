#![warn(missing_docs)]
//! PaceBench CLI Library
//!
//! Runners, configuration and the command-line harness for benchmark binaries.
//! Build a [`Suite`] and hand it to [`run`] from your `main`:
//!
//! ```ignore
//! use pacebench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let suite = Suite::new().bench("sum", |ctx| {
//!         while ctx.advance() {
//!             do_not_optimize((0..1000u64).sum::<u64>());
//!         }
//!     });
//!     pacebench::run(suite)
//! }
//! ```

mod config;
mod runner;
mod suite;

pub use config::*;
pub use runner::{Runner, RunnerError};
pub use suite::Suite;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pacebench_core::{MeasurementConfig, pin_to_cpu};
use pacebench_report::{OutputFormat, Report, ReportConfig, render};
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// PaceBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "pacebench")]
#[command(author, version, about = "PaceBench - calibrated micro-benchmarks")]
pub struct Cli {
    /// Optional subcommand (Run, List, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter benchmarks by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Calibration time (e.g. "500ms", "2s")
    #[arg(long)]
    pub heating: Option<String>,

    /// Target duration of the measured batch (e.g. "1s")
    #[arg(long)]
    pub measurement: Option<String>,

    /// Minimum number of measured iterations
    #[arg(long)]
    pub min_iterations: Option<u64>,

    /// Maximum number of measured iterations
    #[arg(long)]
    pub max_iterations: Option<u64>,

    /// Pin the benchmark thread to this CPU (Linux only)
    #[arg(long)]
    pub pin_cpu: Option<usize>,

    /// Report format: human, json, csv
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Report file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to the nearest pace.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// List matching benchmarks without running them
    #[arg(long)]
    pub list: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run benchmarks (default)
    Run,
    /// List registered benchmarks
    List,
    /// Write a default pace.toml into the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the PaceBench CLI for `suite` with the process arguments.
pub fn run(suite: Suite) -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli, suite)
}

/// Run the PaceBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli, mut suite: Suite) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => PaceConfig::load(path)?,
        None => PaceConfig::discover()?.unwrap_or_default(),
    };

    match cli.command {
        Some(Commands::List) => list_benchmarks(&cli, &suite),
        Some(Commands::Init { force }) => init_config(Path::new(CONFIG_FILE_NAME), force),
        None if cli.list => list_benchmarks(&cli, &suite),
        Some(Commands::Run) | None => run_benchmarks(&cli, &config, &mut suite),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "pacebench=debug"
    } else {
        "pacebench=info"
    };
    // A subscriber may already be installed when embedded in a larger program
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn compile_filter(cli: &Cli) -> anyhow::Result<Regex> {
    Regex::new(&cli.filter).with_context(|| format!("invalid filter pattern {:?}", cli.filter))
}

fn list_benchmarks(cli: &Cli, suite: &Suite) -> anyhow::Result<()> {
    let filter = compile_filter(cli)?;

    println!("PaceBench Plan:");
    let mut total = 0;
    for (name, arguments) in suite.matching(Some(&filter)) {
        if arguments.is_empty() {
            println!("├── {}", name);
            total += 1;
        } else {
            println!("├── {} [{}]", name, arguments.join(", "));
            total += arguments.len();
        }
    }
    println!("{} benchmark cases found.", total);

    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    std::fs::write(path, PaceConfig::default_toml())
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Build the measurement settings by layering: pace.toml → CLI overrides.
pub fn build_measurement_config(
    cli: &Cli,
    config: &PaceConfig,
) -> anyhow::Result<MeasurementConfig> {
    let mut runner = config.runner.clone();
    if let Some(heating) = &cli.heating {
        runner.heating_time = heating.clone();
    }
    if let Some(measurement) = &cli.measurement {
        runner.measurement_time = measurement.clone();
    }
    runner.min_iterations = cli.min_iterations.or(runner.min_iterations);
    runner.max_iterations = cli.max_iterations.or(runner.max_iterations);

    Ok(runner.measurement_config()?)
}

fn run_benchmarks(cli: &Cli, config: &PaceConfig, suite: &mut Suite) -> anyhow::Result<()> {
    let filter = compile_filter(cli)?;
    let measurement = build_measurement_config(cli, config)?;
    let format = cli.format.unwrap_or(config.output.format);
    let output = cli.output.clone().or_else(|| config.output.path.clone());

    let selected = suite.matching(Some(&filter)).count();
    if selected == 0 {
        println!("No benchmarks found.");
        return Ok(());
    }

    if let Some(cpu) = cli.pin_cpu.or(config.runner.pin_cpu) {
        match pin_to_cpu(cpu) {
            Ok(()) => tracing::debug!(cpu, "pinned benchmark thread"),
            Err(e) => tracing::warn!(cpu, error = %e, "failed to pin benchmark thread"),
        }
    }

    tracing::info!(
        benchmarks = selected,
        heating_ms = measurement.heating_duration.as_millis() as u64,
        measurement_ms = measurement.target_measurement_duration.as_millis() as u64,
        "running benchmarks"
    );

    let start_time = Instant::now();
    let mut runner = Runner::new(measurement);
    suite.run(&mut runner, Some(&filter))?;
    let results = runner.into_records();

    tracing::info!(
        cases = results.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "benchmarks complete"
    );

    // Human lines were already streamed; only a file target needs them again
    if format == OutputFormat::Human && output.is_none() {
        return Ok(());
    }

    let report = Report::new(ReportConfig::from(&measurement), results);
    let rendered = render(&report, format)?;
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let mut file = std::fs::File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            file.write_all(rendered.as_bytes())?;
            println!("Report written to: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
