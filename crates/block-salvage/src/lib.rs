//! # Block Salvage Engine
//!
//! Recovers every intact page from a damaged block-storage file.
//!
//! A block-storage file is a description sector followed by pages laid out on
//! allocation-unit boundaries. Salvage ignores the free list and every index:
//! it walks the file one allocation unit at a time, hands each verified page
//! back to the host and frees everything else.
//!
//! ```text
//!  0      512          1536   2048   2560
//!  +------+------------+------+------+
//!  | desc | page lsn=7 | junk | p=12 |
//!  +------+------------+------+------+
//!         ^ cursor      ^ freed, cursor += A
//! ```
//!
//! ## Protocol
//!
//! 1. `salvage_start` truncates partial trailing units and resets the description sector
//! 2. `salvage_next` returns pages in file order until `None`
//! 3. `salvage_end(success)` finishes; a failed pass marks the store inconsistent
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Aligned Truncation | File length after start is `sector + k * A` |
//! | 2 | Monotonic Cursor | Each `salvage_next` only moves the cursor forward |
//! | 3 | Verified Pages Only | A page is returned only after checksum and decompression succeed |
//! | 4 | Unit Skip | A rejected offset frees exactly one allocation unit |
//! | 5 | LSN Watermark | Store LSN is at least every returned page's LSN |
//! | 6 | Quiet EOF | `salvage_next` at end of file performs no I/O |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Formats, configuration, scan state
//! - `ports/` - Port traits (inbound API, outbound SPI)
//! - `adapters/` - File and in-memory devices, CRC32, verifier, free-extent list
//! - `service/` - The store implementing `SalvageApi`
//!
//! ## Usage
//!
//! ```no_run
//! use block_salvage::{FileSalvageService, SalvageApi, SalvageConfig};
//!
//! # fn main() -> Result<(), block_salvage::SalvageError> {
//! let mut store = FileSalvageService::open("table.blk", SalvageConfig::default())?;
//!
//! store.salvage_start()?;
//! while let Some(page) = store.salvage_next()? {
//!     println!("{} lsn={} {}B", page.address, page.lsn(), page.size());
//! }
//! let report = store.salvage_end(true)?;
//! println!("recovered {} pages", report.pages_recovered);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export key types for convenience
pub use adapters::{
    Crc32Checksum, ExtentList, FileBlockDevice, InMemoryBlockDevice, PageImageVerifier,
};
pub use domain::address::{AddressCookie, BlockAddress, ADDRESS_COOKIE_MAX};
pub use domain::compression::{
    default_compressor, CompressionConfig, CompressionError, DefaultCompressor, NoOpCompressor,
    PageCompressor,
};
#[cfg(feature = "compression")]
pub use domain::compression::ZstdCompressor;
pub use domain::config::SalvageConfig;
pub use domain::errors::{
    ConfigError, CookieError, DeviceError, GarbageReason, SalvageError, SpaceError,
    VerificationError,
};
pub use domain::layout::{DescriptionRecord, PageContent, PageHeader, PageImage, PageImageError};
pub use domain::salvage::{SalvageReport, SalvagedPage, ScanState};
pub use ports::inbound::SalvageApi;
pub use ports::outbound::{BlockDevice, BlockVerifier, ChecksumProvider, SpaceTracker};
pub use service::{BlockSalvageService, FileSalvageService, SalvageDependencies};
