//! # Block Salvage Benchmarks
//!
//! Scan throughput over synthetic damaged stores.

pub mod salvage_scan;
