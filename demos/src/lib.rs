//! PaceBench Demos
//!
//! Runnable demonstrations of PaceBench. This crate is not published; it
//! exists solely to host examples that depend on `pacebench`.
//!
//! Run any demo with:
//! ```sh
//! cargo run --example <name> -p pacebench-demos --release
//! ```
//!
//! | Example | Feature |
//! |---------|---------|
//! | `implicit_timing` | `advance()` loops, whole-body timing |
//! | `explicit_timing` | `advance_explicit()` with `mark_start`/`mark_stop`, `time()`, `timed()` |
//! | `params` | argument values and type tags |
//! | `embedded_runner` | driving a `Runner` directly without the CLI |
