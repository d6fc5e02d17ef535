//! # Integration Scenarios
//!
//! Salvage passes over real files on disk.

pub mod fixtures;
mod file_salvage;
