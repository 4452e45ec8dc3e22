//! Context - The Measurement State Machine
//!
//! A [`Context`] is handed to a benchmark body by `&mut` reference and used as
//! the loop condition. It moves through four phases:
//!
//! ```text
//! NotStarted ──▶ Calibrating ──▶ Measuring ──▶ Finished
//! ```
//!
//! Calibration observes how long loop bodies take until the heating threshold
//! has been accumulated, then extrapolates a fixed iteration budget sized to
//! the measurement target. Measurement runs exactly that many bodies and reads
//! the clock once around the whole batch, so per-iteration clock overhead never
//! lands in the result.
//!
//! Two protocols drive the machine:
//! - [`Context::advance`] times whole loop bodies implicitly.
//! - [`Context::advance_explicit`] only counts time bracketed by
//!   [`Context::mark_start`] / [`Context::mark_stop`] (or a [`TimingWindow`]).
//!
//! A single context must be driven by one protocol only.

use crate::config::MeasurementConfig;
use crate::measure::{Clock, Timer};

/// Phase of a measurement context
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// No loop body has run yet
    NotStarted,
    /// Estimating per-iteration cost
    Calibrating,
    /// Running the planned batch
    Measuring,
    /// Done; results can be read
    Finished,
}

/// Iteration controller and elapsed-time accumulator for one benchmark case.
///
/// Contract violations (driving the loop after it finished, reading results
/// before it finished) panic.
#[derive(Debug)]
pub struct Context<C: Clock = Timer> {
    phase: Phase,
    clock: C,
    config: MeasurementConfig,

    // Calibration: accumulated body time, bodies observed.
    // Explicit measurement also accumulates here.
    elapsed_ns: u64,
    calibration_iterations: u64,

    iterations: u64,
    planned_iterations: u64,
    final_elapsed_ns: u64,
}

impl Context<Timer> {
    /// Create a context backed by the monotonic [`Timer`]
    pub fn new(config: MeasurementConfig) -> Self {
        Self::with_clock(config, Timer::start())
    }
}

impl Default for Context<Timer> {
    fn default() -> Self {
        Self::new(MeasurementConfig::default())
    }
}

impl<C: Clock> Context<C> {
    /// Create a context driven by a custom clock
    pub fn with_clock(config: MeasurementConfig, clock: C) -> Self {
        Self {
            phase: Phase::NotStarted,
            clock,
            config,
            elapsed_ns: 0,
            calibration_iterations: 0,
            iterations: 0,
            planned_iterations: 0,
            final_elapsed_ns: 0,
        }
    }

    /// Loop condition for implicitly timed benchmarks.
    ///
    /// ```ignore
    /// while ctx.advance() {
    ///     do_not_optimize(work());
    /// }
    /// ```
    ///
    /// # Panics
    /// When called again after it returned `false`.
    #[track_caller]
    pub fn advance(&mut self) -> bool {
        match self.phase {
            Phase::NotStarted => {
                self.clock.reset();
                self.phase = Phase::Calibrating;
                true
            }
            Phase::Calibrating => {
                self.elapsed_ns = self.elapsed_ns.saturating_add(self.clock.elapsed_ns());
                self.calibration_iterations += 1;
                if self.elapsed_ns >= self.config.heating_ns() {
                    self.begin_measuring();
                }
                self.clock.reset();
                true
            }
            Phase::Measuring => {
                if self.iterations < self.planned_iterations {
                    self.iterations += 1;
                    true
                } else {
                    let total = self.clock.elapsed_ns();
                    self.finish(total);
                    false
                }
            }
            Phase::Finished => finished_violation("advance"),
        }
    }

    /// Loop condition for explicitly timed benchmarks.
    ///
    /// Performs no clock reads of its own: only time recorded between
    /// [`mark_start`](Self::mark_start) and [`mark_stop`](Self::mark_stop)
    /// counts.
    ///
    /// ```ignore
    /// while ctx.advance_explicit() {
    ///     let input = setup();
    ///     ctx.timed(|| do_not_optimize(work(&input)));
    /// }
    /// ```
    ///
    /// # Panics
    /// When called again after it returned `false`.
    #[track_caller]
    pub fn advance_explicit(&mut self) -> bool {
        match self.phase {
            Phase::NotStarted => {
                self.phase = Phase::Calibrating;
                true
            }
            Phase::Calibrating => {
                self.calibration_iterations += 1;
                if self.elapsed_ns >= self.config.heating_ns() {
                    self.begin_measuring();
                }
                true
            }
            Phase::Measuring => {
                if self.iterations < self.planned_iterations {
                    self.iterations += 1;
                    true
                } else {
                    let total = self.elapsed_ns;
                    self.finish(total);
                    false
                }
            }
            Phase::Finished => finished_violation("advance_explicit"),
        }
    }

    /// Open a timing window (explicit protocol)
    #[track_caller]
    pub fn mark_start(&mut self) {
        if self.phase == Phase::Finished {
            finished_violation("mark_start");
        }
        self.clock.reset();
    }

    /// Close the timing window and add its length to the accumulator
    #[track_caller]
    pub fn mark_stop(&mut self) {
        if self.phase == Phase::Finished {
            finished_violation("mark_stop");
        }
        self.elapsed_ns = self.elapsed_ns.saturating_add(self.clock.elapsed_ns());
    }

    /// Open a timing window that closes when the guard is dropped.
    ///
    /// The window closes on every exit path, including unwinding out of the
    /// timed code.
    #[track_caller]
    pub fn time(&mut self) -> TimingWindow<'_, C> {
        self.mark_start();
        TimingWindow { ctx: self }
    }

    /// Run `f` inside a timing window and return its result
    #[track_caller]
    pub fn timed<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let _window = self.time();
        f()
    }

    /// Average time per measured iteration, expressed in units of `unit_ns`
    /// nanoseconds (`1` for nanoseconds, `1_000` for microseconds, ...).
    ///
    /// # Panics
    /// Unless the context has finished, or when `unit_ns` is zero.
    #[track_caller]
    pub fn average_time(&self, unit_ns: u64) -> f64 {
        assert!(
            self.phase == Phase::Finished,
            "average_time() requires a finished context (phase is {:?})",
            self.phase
        );
        assert!(unit_ns > 0, "average_time() unit must be non-zero");
        // iterations >= 1 once finished
        self.final_elapsed_ns as f64 / unit_ns as f64 / self.iterations as f64
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the measured batch has completed
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Measured iterations completed so far
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Loop bodies observed during calibration
    pub fn calibration_iterations(&self) -> u64 {
        self.calibration_iterations
    }

    /// Planned batch size, known once calibration has ended
    pub fn planned_iterations(&self) -> Option<u64> {
        (self.phase >= Phase::Measuring).then_some(self.planned_iterations)
    }

    /// Total elapsed time of the measured batch, once finished
    pub fn measured_ns(&self) -> Option<u64> {
        self.is_finished().then_some(self.final_elapsed_ns)
    }

    /// Configuration this context runs with
    pub fn config(&self) -> &MeasurementConfig {
        &self.config
    }

    /// Close calibration: fix the batch size and start counting.
    ///
    /// The body that runs right after this transition is the first measured
    /// iteration.
    fn begin_measuring(&mut self) {
        let planned = self.plan_iterations();

        tracing::debug!(
            calibration_ns = self.elapsed_ns,
            calibration_iterations = self.calibration_iterations,
            planned_iterations = planned,
            "calibration complete"
        );

        self.planned_iterations = planned;
        self.iterations = 1;
        self.elapsed_ns = 0;
        self.phase = Phase::Measuring;
    }

    fn plan_iterations(&self) -> u64 {
        if self.elapsed_ns == 0 || self.calibration_iterations == 0 {
            tracing::warn!(
                calibration_iterations = self.calibration_iterations,
                "calibration measured no elapsed time; using minimum iteration count"
            );
            return self.config.clamp_iterations(0);
        }

        let per_iteration_ns = self.elapsed_ns as f64 / self.calibration_iterations as f64;
        let planned = (self.config.target_ns() as f64 / per_iteration_ns).round();
        // float-to-int casts saturate
        self.config.clamp_iterations(planned as u64)
    }

    fn finish(&mut self, total_ns: u64) {
        self.final_elapsed_ns = total_ns;
        self.phase = Phase::Finished;
    }
}

#[track_caller]
fn finished_violation(operation: &str) -> ! {
    panic!(
        "{operation}() called on a finished context; \
         the benchmark loop must stop once advance returns false"
    )
}

/// Guard for an explicit timing window, see [`Context::time`].
#[must_use = "the timing window closes as soon as the guard is dropped"]
pub struct TimingWindow<'a, C: Clock = Timer> {
    ctx: &'a mut Context<C>,
}

impl<C: Clock> Drop for TimingWindow<'_, C> {
    fn drop(&mut self) {
        self.ctx.mark_stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Clock advanced by hand; clones share the same "now".
    #[derive(Debug, Clone, Default)]
    struct ManualClock {
        now: Rc<Cell<u64>>,
        start: u64,
    }

    impl ManualClock {
        fn tick(&self, ns: u64) {
            self.now.set(self.now.get() + ns);
        }
    }

    impl Clock for ManualClock {
        fn reset(&mut self) {
            self.start = self.now.get();
        }

        fn elapsed_ns(&self) -> u64 {
            self.now.get() - self.start
        }
    }

    fn manual_context(heating_ns: u64, target_ns: u64) -> (Context<ManualClock>, ManualClock) {
        let clock = ManualClock::default();
        let config = MeasurementConfig::new(
            std::time::Duration::from_nanos(heating_ns),
            std::time::Duration::from_nanos(target_ns),
        );
        (Context::with_clock(config, clock.clone()), clock)
    }

    #[test]
    fn test_implicit_budget_from_calibration() {
        let (mut ctx, clock) = manual_context(100, 1_000);

        let mut bodies = 0;
        while ctx.advance() {
            clock.tick(30);
            bodies += 1;
        }

        // 4 calibration bodies reach 120ns >= 100ns; 1000 / 30 rounds to 33
        assert_eq!(ctx.calibration_iterations(), 4);
        assert_eq!(ctx.planned_iterations(), Some(33));
        assert_eq!(ctx.iterations(), 33);
        assert_eq!(bodies, 4 + 33);
        assert_eq!(ctx.measured_ns(), Some(33 * 30));
        assert_eq!(ctx.average_time(1), 30.0);
    }

    #[test]
    fn test_phases_advance_in_order() {
        let (mut ctx, clock) = manual_context(50, 500);
        assert_eq!(ctx.phase(), Phase::NotStarted);

        let mut seen = Vec::new();
        while ctx.advance() {
            if seen.last() != Some(&ctx.phase()) {
                seen.push(ctx.phase());
            }
            clock.tick(20);
        }
        seen.push(ctx.phase());

        assert_eq!(
            seen,
            vec![Phase::Calibrating, Phase::Measuring, Phase::Finished]
        );
    }

    #[test]
    fn test_iterations_only_count_while_measuring() {
        let (mut ctx, clock) = manual_context(100, 200);

        while ctx.advance() {
            if ctx.phase() == Phase::Calibrating {
                assert_eq!(ctx.iterations(), 0);
                assert_eq!(ctx.planned_iterations(), None);
            }
            clock.tick(10);
        }
        assert_eq!(ctx.iterations(), 20);
    }

    #[test]
    fn test_zero_time_calibration_clamps_to_one() {
        let (mut ctx, _clock) = manual_context(0, 1_000);

        let mut bodies = 0;
        while ctx.advance() {
            bodies += 1;
        }

        assert_eq!(ctx.planned_iterations(), Some(1));
        assert_eq!(ctx.iterations(), 1);
        assert_eq!(bodies, 2);
        assert_eq!(ctx.average_time(1), 0.0);
    }

    #[test]
    fn test_iteration_bounds_clamp_plan() {
        let clock = ManualClock::default();
        let config = MeasurementConfig::new(
            std::time::Duration::from_nanos(10),
            std::time::Duration::from_nanos(10_000),
        )
        .with_max_iterations(Some(5));
        let mut ctx = Context::with_clock(config, clock.clone());

        while ctx.advance() {
            clock.tick(10);
        }
        assert_eq!(ctx.iterations(), 5);
        assert_eq!(ctx.average_time(1), 10.0);
    }

    #[test]
    fn test_explicit_ignores_untimed_work() {
        let (mut ctx, clock) = manual_context(40, 100);

        while ctx.advance_explicit() {
            clock.tick(50); // setup
            ctx.mark_start();
            clock.tick(10);
            ctx.mark_stop();
            clock.tick(5); // teardown
        }

        assert_eq!(ctx.calibration_iterations(), 4);
        assert_eq!(ctx.iterations(), 10);
        assert_eq!(ctx.measured_ns(), Some(100));
        assert_eq!(ctx.average_time(1), 10.0);
    }

    #[test]
    fn test_timing_window_guard() {
        let (mut ctx, clock) = manual_context(40, 100);

        while ctx.advance_explicit() {
            clock.tick(1_000);
            let _window = ctx.time();
            clock.tick(20);
        }

        assert_eq!(ctx.average_time(1), 20.0);
        assert_eq!(ctx.iterations(), 5);
    }

    #[test]
    fn test_timed_returns_value() {
        let (mut ctx, clock) = manual_context(10, 30);

        let mut sum = 0u64;
        while ctx.advance_explicit() {
            sum += ctx.timed(|| {
                clock.tick(10);
                1
            });
        }

        assert_eq!(ctx.iterations(), 3);
        assert_eq!(sum, 1 + 3);
        assert_eq!(ctx.average_time(1), 10.0);
    }

    #[test]
    fn test_timing_window_closes_on_panic() {
        let (mut ctx, clock) = manual_context(1_000, 1_000);
        assert!(ctx.advance_explicit());

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            ctx.timed(|| {
                clock.tick(25);
                if clock.now.get() > 0 {
                    panic!("workload failed");
                }
            })
        }));
        assert!(result.is_err());
        assert_eq!(ctx.elapsed_ns, 25);
    }

    #[test]
    fn test_average_time_units() {
        let (mut ctx, clock) = manual_context(1_000_000, 10_000_000);
        while ctx.advance() {
            clock.tick(2_000_000);
        }
        assert_eq!(ctx.average_time(1), 2_000_000.0);
        assert_eq!(ctx.average_time(1_000), 2_000.0);
        assert_eq!(ctx.average_time(1_000_000), 2.0);
    }

    #[test]
    fn test_real_timer_average_is_non_negative() {
        let config = MeasurementConfig::new(
            std::time::Duration::from_millis(1),
            std::time::Duration::from_millis(2),
        );
        let mut ctx = Context::new(config);
        while ctx.advance() {
            std::hint::black_box((0..100u64).sum::<u64>());
        }
        assert!(ctx.iterations() >= 1);
        assert!(ctx.average_time(1) >= 0.0);
    }

    #[test]
    #[should_panic(expected = "advance() called on a finished context")]
    fn test_advance_after_finish_panics() {
        let (mut ctx, clock) = manual_context(10, 10);
        while ctx.advance() {
            clock.tick(10);
        }
        ctx.advance();
    }

    #[test]
    #[should_panic(expected = "advance_explicit() called on a finished context")]
    fn test_advance_explicit_after_finish_panics() {
        let (mut ctx, clock) = manual_context(10, 10);
        while ctx.advance_explicit() {
            ctx.timed(|| clock.tick(10));
        }
        ctx.advance_explicit();
    }

    #[test]
    #[should_panic(expected = "mark_start() called on a finished context")]
    fn test_mark_start_after_finish_panics() {
        let (mut ctx, clock) = manual_context(10, 10);
        while ctx.advance() {
            clock.tick(10);
        }
        ctx.mark_start();
    }

    #[test]
    #[should_panic(expected = "mark_stop() called on a finished context")]
    fn test_mark_stop_after_finish_panics() {
        let (mut ctx, clock) = manual_context(10, 10);
        while ctx.advance_explicit() {
            ctx.timed(|| clock.tick(10));
        }
        ctx.mark_stop();
    }

    #[test]
    #[should_panic(expected = "requires a finished context")]
    fn test_average_before_finish_panics() {
        let (mut ctx, _clock) = manual_context(10, 10);
        ctx.advance();
        ctx.average_time(1);
    }
}
