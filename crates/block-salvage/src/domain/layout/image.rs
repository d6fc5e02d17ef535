//! # Page Images
//!
//! Building checksummed, allocation-aligned page images, and the verified
//! content handed back for each recovered page.

use thiserror::Error;

use crate::domain::compression::{CompressionError, PageCompressor};
use crate::domain::config::SalvageConfig;
use crate::ports::outbound::ChecksumProvider;

use super::header::{checksum_parts, PageHeader, CHECKSUM_FIELD, FLAG_COMPRESSED, PAGE_HEADER_SIZE};

/// Verified content of a recovered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// Header as read from disk.
    pub header: PageHeader,
    /// Payload after decompression, exactly `header.mem_len` bytes.
    pub data: Vec<u8>,
}

/// Reasons a page image cannot be built.
#[derive(Debug, Error)]
pub enum PageImageError {
    #[error(transparent)]
    Compression(#[from] CompressionError),

    /// The padded image would exceed `max_page_size`.
    #[error("page image of {size} bytes exceeds the maximum page size {max}")]
    TooLarge { size: u64, max: u32 },

    /// The payload would be rejected on decompression.
    #[error("payload of {len} bytes exceeds the decompression limit {limit}")]
    PayloadTooLarge { len: u64, limit: usize },
}

/// Builder for on-disk page images.
///
/// Used by hosts writing reconciled pages after salvage, and by tests to lay
/// out damaged files.
pub struct PageImage;

impl PageImage {
    /// Build a page image for `payload`.
    ///
    /// The payload is compressed when the compressor is enabled and
    /// compression actually saves space. The image is zero-padded to a
    /// multiple of `config.allocation_size` and its checksum field is filled
    /// in. Images a salvage pass under `config` would reject are refused.
    pub fn build<PC, CS>(
        lsn: u64,
        page_type: u8,
        payload: &[u8],
        compressor: &PC,
        checksum: &CS,
        config: &SalvageConfig,
    ) -> Result<Vec<u8>, PageImageError>
    where
        PC: PageCompressor + ?Sized,
        CS: ChecksumProvider + ?Sized,
    {
        let mem_len = u32::try_from(payload.len())
            .ok()
            .filter(|&len| len as usize <= config.max_decompressed_size)
            .ok_or(PageImageError::PayloadTooLarge {
                len: payload.len() as u64,
                limit: config.max_decompressed_size,
            })?;

        let mut flags = 0u8;
        let compressed;
        let stored: &[u8] = if compressor.is_enabled() {
            compressed = compressor.compress(payload)?;
            if compressed.len() < payload.len() {
                flags |= FLAG_COMPRESSED;
                &compressed
            } else {
                payload
            }
        } else {
            payload
        };

        let size = align_up(PAGE_HEADER_SIZE + stored.len(), config.allocation_size as usize);
        let size_field = u32::try_from(size)
            .ok()
            .filter(|&size| size <= config.max_page_size)
            .ok_or(PageImageError::TooLarge {
                size: size as u64,
                max: config.max_page_size,
            })?;
        let mut image = vec![0u8; size];

        // stored.len() < size, so it fits too.
        let header = PageHeader {
            lsn,
            size: size_field,
            checksum: 0,
            disk_len: stored.len() as u32,
            mem_len,
            page_type,
            flags,
        };
        header.encode(&mut image);
        image[PAGE_HEADER_SIZE..PAGE_HEADER_SIZE + stored.len()].copy_from_slice(stored);

        let sum = checksum.checksum_parts(&checksum_parts(&image));
        image[CHECKSUM_FIELD].copy_from_slice(&sum.to_le_bytes());

        Ok(image)
    }
}

/// Round `len` up to the next multiple of `align`.
pub(crate) fn align_up(len: usize, align: usize) -> usize {
    len.div_ceil(align) * align
}
