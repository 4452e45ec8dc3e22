//! Explicit Timing — only the bracketed part of each iteration counts
//!
//! Run with: cargo run --example explicit_timing -p pacebench-demos --release

use pacebench::prelude::*;
use std::time::Duration;

fn shuffled(n: u32) -> Vec<u32> {
    // Cheap deterministic permutation; quality is irrelevant here
    (0..n).map(|i| i.wrapping_mul(2654435761) % n).collect()
}

fn main() -> anyhow::Result<()> {
    let suite = Suite::new()
        // 30ms of untimed setup, 10ms of timed work: reports ~10ms
        .bench("setup_excluded", |ctx| {
            while ctx.advance_explicit() {
                std::thread::sleep(Duration::from_millis(30));
                ctx.mark_start();
                std::thread::sleep(Duration::from_millis(10));
                ctx.mark_stop();
            }
        })
        // The window closes when the guard drops, even on early exit
        .bench("sort_10k_guarded", |ctx| {
            while ctx.advance_explicit() {
                let mut data = shuffled(10_000);
                {
                    let _window = ctx.time();
                    data.sort_unstable();
                }
                do_not_optimize(data);
            }
        })
        .bench("sort_10k_timed", |ctx| {
            while ctx.advance_explicit() {
                let mut data = shuffled(10_000);
                ctx.timed(|| data.sort_unstable());
                do_not_optimize(data);
            }
        });

    pacebench::run(suite)
}
