//! # Salvage Configuration
//!
//! Immutable configuration for a block store opened for salvage.
//!
//! The values describe the persisted layout of the file (description sector,
//! allocation quantum, largest legal page) plus the decompression settings the
//! verified read needs. All fields have defaults matching a freshly created store.

use serde::{Deserialize, Serialize};

use crate::domain::compression::CompressionConfig;
use crate::domain::errors::ConfigError;
use crate::domain::layout::DescriptionRecord;

/// Default allocation quantum in bytes.
pub const DEFAULT_ALLOCATION_SIZE: u32 = 512;

/// Smallest allocation quantum the layout supports.
pub const MIN_ALLOCATION_SIZE: u32 = 512;

/// Default size of the leading description sector.
pub const DEFAULT_DESCRIPTION_SECTOR_SIZE: u32 = 512;

/// Default largest legal on-disk page (512 MiB).
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 512 * 1024 * 1024;

/// Default decompression-bomb limit (100 MiB).
pub const DEFAULT_MAX_DECOMPRESSED_SIZE: usize = 100 * 1024 * 1024;

/// Configuration for a block store under salvage.
///
/// ## Layout Contract
///
/// - Byte 0 holds a `description_sector_size`-byte description sector
/// - Pages start at `description_sector_size + k * allocation_size`
/// - Page sizes are multiples of `allocation_size`, at most `max_page_size`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalvageConfig {
    /// Allocation quantum (default: 512).
    pub allocation_size: u32,

    /// Size of the leading description sector (default: 512).
    pub description_sector_size: u32,

    /// Maximum declared page size accepted by the scanner (default: 512 MiB).
    pub max_page_size: u32,

    /// Page payload compression settings.
    pub compression: CompressionConfig,

    /// Upper bound on a page's declared in-memory size (default: 100 MiB).
    pub max_decompressed_size: usize,
}

impl Default for SalvageConfig {
    fn default() -> Self {
        Self {
            allocation_size: DEFAULT_ALLOCATION_SIZE,
            description_sector_size: DEFAULT_DESCRIPTION_SECTOR_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            compression: CompressionConfig::default(),
            max_decompressed_size: DEFAULT_MAX_DECOMPRESSED_SIZE,
        }
    }
}

impl SalvageConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the allocation quantum.
    pub fn with_allocation_size(mut self, size: u32) -> Self {
        self.allocation_size = size;
        self
    }

    /// Set the description sector size.
    pub fn with_description_sector_size(mut self, size: u32) -> Self {
        self.description_sector_size = size;
        self
    }

    /// Set the maximum page size.
    pub fn with_max_page_size(mut self, size: u32) -> Self {
        self.max_page_size = size;
        self
    }

    /// Set the compression configuration.
    pub fn with_compression(mut self, compression: CompressionConfig) -> Self {
        self.compression = compression;
        self
    }

    /// Set the decompression limit.
    pub fn with_max_decompressed_size(mut self, limit: usize) -> Self {
        self.max_decompressed_size = limit;
        self
    }

    /// Check the layout invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let alloc = self.allocation_size;
        if alloc < MIN_ALLOCATION_SIZE || !alloc.is_power_of_two() {
            return Err(ConfigError::InvalidAllocationSize(alloc));
        }

        if (self.description_sector_size as usize) < DescriptionRecord::ENCODED_LEN {
            return Err(ConfigError::SectorTooSmall {
                size: self.description_sector_size,
                min: DescriptionRecord::ENCODED_LEN,
            });
        }

        if self.max_page_size == 0 || self.max_page_size % alloc != 0 {
            return Err(ConfigError::InvalidMaxPageSize {
                max_page_size: self.max_page_size,
                allocation_size: alloc,
            });
        }

        if !(1..=22).contains(&self.compression.level) {
            return Err(ConfigError::InvalidCompressionLevel(self.compression.level));
        }

        Ok(())
    }

    /// Length the file is cut to by salvage start.
    ///
    /// Bytes trailing the last whole allocation unit cannot hold a page. Files
    /// no longer than the description sector are left alone.
    pub fn truncated_len(&self, file_len: u64) -> u64 {
        let sector = self.description_sector_size as u64;
        if file_len <= sector {
            return file_len;
        }
        let alloc = self.allocation_size as u64;
        sector + ((file_len - sector) / alloc) * alloc
    }
}
