//! Builders for synthetic (and deliberately damaged) block-storage files.

use crate::adapters::Crc32Checksum;
use crate::domain::compression::{NoOpCompressor, PageCompressor};
use crate::domain::config::SalvageConfig;
use crate::domain::layout::{PageImage, PAGE_HEADER_SIZE};

/// Lays out a store image unit by unit.
///
/// The description sector starts out as junk so tests can see salvage reset it.
pub struct StoreImageBuilder {
    config: SalvageConfig,
    bytes: Vec<u8>,
}

impl StoreImageBuilder {
    pub fn new(config: &SalvageConfig) -> Self {
        Self {
            config: config.clone(),
            bytes: vec![0xEE; config.description_sector_size as usize],
        }
    }

    /// Offset the next appended region will start at.
    pub fn offset(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Append an uncompressed page holding `payload`.
    pub fn page(self, lsn: u64, payload: &[u8]) -> Self {
        self.page_with(lsn, 0, payload, &NoOpCompressor)
    }

    /// Append a page built with `compressor`.
    pub fn page_with(
        mut self,
        lsn: u64,
        page_type: u8,
        payload: &[u8],
        compressor: &dyn PageCompressor,
    ) -> Self {
        let image = PageImage::build(
            lsn,
            page_type,
            payload,
            compressor,
            &Crc32Checksum,
            &self.config,
        )
        .expect("page image");
        self.bytes.extend_from_slice(&image);
        self
    }

    /// Append an uncompressed page occupying exactly `size` bytes.
    pub fn page_of_size(self, lsn: u64, size: u32) -> Self {
        let payload = vec![lsn as u8; size as usize - PAGE_HEADER_SIZE];
        self.page(lsn, &payload)
    }

    /// Append a page of `size` bytes whose payload has one flipped bit.
    pub fn corrupt_page(mut self, lsn: u64, size: u32) -> Self {
        let start = self.bytes.len();
        self = self.page_of_size(lsn, size);
        self.bytes[start + PAGE_HEADER_SIZE + 1] ^= 0x01;
        self
    }

    /// Append `units` allocation units filled with `fill`.
    ///
    /// A fill of 0 gives zero-size headers; most other fills give sizes far
    /// above the page limit.
    pub fn garbage(mut self, units: usize, fill: u8) -> Self {
        let len = units * self.config.allocation_size as usize;
        self.bytes.resize(self.bytes.len() + len, fill);
        self
    }

    /// Append raw bytes, e.g. a partial unit at the end of the file.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// The reference damaged file: a 1024-byte page (LSN 7) at 512, a page with a
/// bad checksum at 1536 and a 512-byte page (LSN 12) at 2048. 2560 bytes in
/// total.
pub fn reference_store(config: &SalvageConfig) -> Vec<u8> {
    StoreImageBuilder::new(config)
        .page_of_size(7, 1024)
        .corrupt_page(30, 512)
        .page_of_size(12, 512)
        .build()
}
