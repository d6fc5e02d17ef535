//! # Block Salvage Benchmarks
//!
//! | Benchmark | Measures |
//! |-----------|----------|
//! | salvage-scan/garbage_ratio | Full pass over stores with 0%, 25%, 75% shredded slots |
//! | salvage-scan/compressed_pages | Full pass where every page needs decompression |

use criterion::{criterion_group, criterion_main};

use salvage_tests::benchmarks::salvage_scan::{
    bench_scan_clean_vs_shredded, bench_scan_compressed,
};

criterion_group!(benches, bench_scan_clean_vs_shredded, bench_scan_compressed);
criterion_main!(benches);
