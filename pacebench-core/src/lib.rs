#![warn(missing_docs)]
//! PaceBench Core - Measurement Engine
//!
//! This crate provides the execution environment for benchmarks:
//! - [`Context`], the calibration/measurement state machine handed to
//!   benchmark bodies, with implicit and explicit timing protocols
//! - [`MeasurementConfig`] for heating and measurement targets
//! - [`TimeUnit`] selection for reporting averages
//! - A resettable monotonic [`Timer`] behind the [`Clock`] trait
//! - Type-tag parameterization via [`TypeList`] and [`TypedBench`]
//! - Optional CPU affinity pinning

mod config;
mod context;
mod measure;
mod types;
mod unit;

pub use config::{
    DEFAULT_HEATING_DURATION, DEFAULT_TARGET_MEASUREMENT_DURATION, MeasurementConfig,
};
pub use context::{Context, Phase, TimingWindow};
pub use measure::{Clock, Timer, pin_to_cpu};
pub use types::{TypeList, TypeVisitor, TypedBench, type_label};
pub use unit::{NANOS_PER_MICRO, NANOS_PER_MILLI, TimeUnit};
