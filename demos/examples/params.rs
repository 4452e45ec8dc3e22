//! Parameterized Benchmarks — argument values and type tags
//!
//! Each argument is calibrated and reported on its own line:
//!
//! ```text
//! sleep 20: avg 20.081ms (50 iterations)
//! vec_push u8: avg 1.204us (812345 iterations)
//! ```
//!
//! Run with: cargo run --example params -p pacebench-demos --release

use pacebench::prelude::*;
use std::time::Duration;

/// Push 1024 `None` values into a `Vec<Option<T>>`; measured once per element type.
struct VecPush;

impl TypedBench for VecPush {
    fn run<T: 'static>(&mut self, ctx: &mut Context) {
        while ctx.advance() {
            let mut v: Vec<Option<T>> = Vec::new();
            for _ in 0..1024 {
                v.push(None);
            }
            do_not_optimize(v);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let suite = Suite::new()
        .bench_with_args("sleep", [20u64, 30, 57], |ctx, ms| {
            while ctx.advance() {
                std::thread::sleep(Duration::from_millis(ms));
            }
        })
        .bench_with_args("linear_scan", [100u64, 1_000, 10_000], |ctx, n| {
            let data: Vec<u64> = (0..n).collect();
            let target = n - 1;
            while ctx.advance() {
                do_not_optimize(data.iter().position(|&x| x == do_not_optimize(target)));
            }
        })
        .bench_typed::<(u8, u64, [u64; 8]), _>("vec_push", VecPush);

    pacebench::run(suite)
}
