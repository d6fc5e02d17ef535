//! # Domain Layer
//!
//! Pure domain logic for the Block Salvage subsystem.
//! No I/O happens here; the service drives the ports.
//!
//! ## Modules
//!
//! - `address` - Address cookies for recovered pages
//! - `compression` - Dictionary-based Zstd page compression
//! - `config` - Store layout and salvage settings
//! - `errors` - Domain error types and garbage classification
//! - `layout` - Description sector, page header and page images
//! - `salvage` - Scan state, probe outcomes, pass report

pub mod address;
pub mod compression;
pub mod config;
pub mod errors;
pub mod layout;
pub mod salvage;
