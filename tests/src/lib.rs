//! # Block Salvage Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Scan throughput over synthetic damaged stores
//! └── integration/      # File-backed salvage passes
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p salvage-tests
//!
//! # With salvage logs
//! RUST_LOG=block_salvage=debug cargo test -p salvage-tests integration::
//!
//! # Benchmarks
//! cargo bench -p salvage-tests
//! ```

pub mod benchmarks;
pub mod integration;
