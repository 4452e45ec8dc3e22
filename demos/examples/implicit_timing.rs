//! Implicit Timing — the whole loop body is measured
//!
//! Run with: cargo run --example implicit_timing -p pacebench-demos --release

use pacebench::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let suite = Suite::new()
        .bench("sum_1000", |ctx| {
            while ctx.advance() {
                do_not_optimize((0..1000u64).map(do_not_optimize).sum::<u64>());
            }
        })
        .bench("hashmap_insert_1000", |ctx| {
            while ctx.advance() {
                let mut map = HashMap::new();
                for i in 0..1000u32 {
                    map.insert(i, i.wrapping_mul(2654435761));
                }
                do_not_optimize(map.len());
            }
        })
        .bench("write_buffer", |ctx| {
            let mut buffer = vec![0u8; 4096];
            while ctx.advance() {
                buffer.fill(0xAB);
                clobber_memory();
            }
            do_not_optimize(buffer);
        })
        .bench("sleep_57ms", |ctx| {
            while ctx.advance() {
                std::thread::sleep(Duration::from_millis(57));
            }
        });

    pacebench::run(suite)
}
