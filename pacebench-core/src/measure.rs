//! Monotonic Timing
//!
//! The [`Clock`] trait is the only timing surface the measurement context
//! relies on: reset a reference point, read nanoseconds elapsed since it.
//! [`Timer`] implements it on top of `std::time::Instant`.

use crate::config::saturating_nanos;
use std::time::{Duration, Instant};

/// A resettable monotonic clock.
pub trait Clock {
    /// Move the reference point to now.
    fn reset(&mut self);

    /// Nanoseconds elapsed since the last reset (or since construction).
    fn elapsed_ns(&self) -> u64;
}

// ─── Timer ───────────────────────────────────────────────────────────────────

/// Monotonic wall-clock timer used by every benchmark context.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since the last reset
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for Timer {
    #[inline(always)]
    fn reset(&mut self) {
        self.start = Instant::now();
    }

    #[inline(always)]
    fn elapsed_ns(&self) -> u64 {
        saturating_nanos(self.start.elapsed())
    }
}

/// Set CPU affinity to pin the current thread to a specific core
///
/// Keeps a benchmark on one core so frequency and cache state stay comparable
/// between calibration and measurement.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    if cpu >= libc::CPU_SETSIZE as usize {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("CPU index {cpu} exceeds CPU_SETSIZE"),
        ));
    }

    // SAFETY: cpu_set_t is plain data; CPU_ZERO/CPU_SET only write into the
    // set we own, and sched_setaffinity reads it for the calling thread (pid 0).
    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let result = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);

        if result == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// CPU pinning is only implemented on Linux.
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> Result<(), std::io::Error> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "CPU pinning is only supported on Linux",
    ))
}
