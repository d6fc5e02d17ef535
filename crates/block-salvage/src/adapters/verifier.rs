//! # Page Image Verifier
//!
//! Default `BlockVerifier`: the checksum check and decompression that make up
//! the verified read.
//!
//! ## Security Invariants
//!
//! - The checksum is checked before any header length field is trusted
//! - A declared in-memory size above the limit is rejected before decompression
//! - Decompression output is capped at the declared in-memory size

use crate::domain::compression::{security::validate_declared_mem_len, PageCompressor};
use crate::domain::errors::VerificationError;
use crate::domain::layout::{checksum_parts, PageContent, PageHeader, PAGE_HEADER_SIZE};
use crate::ports::outbound::{BlockVerifier, ChecksumProvider};

/// Verifies page images built by `PageImage::build`.
pub struct PageImageVerifier<CS, PC> {
    checksum: CS,
    compressor: PC,
    max_decompressed_size: usize,
}

impl<CS: ChecksumProvider, PC: PageCompressor> PageImageVerifier<CS, PC> {
    pub fn new(checksum: CS, compressor: PC, max_decompressed_size: usize) -> Self {
        Self {
            checksum,
            compressor,
            max_decompressed_size,
        }
    }

    pub fn checksum_provider(&self) -> &CS {
        &self.checksum
    }

    pub fn compressor(&self) -> &PC {
        &self.compressor
    }
}

impl<CS: ChecksumProvider, PC: PageCompressor> BlockVerifier for PageImageVerifier<CS, PC> {
    fn verify(
        &self,
        image: &[u8],
        expected_checksum: u32,
    ) -> Result<PageContent, VerificationError> {
        let header = PageHeader::decode(image)
            .ok_or(VerificationError::ShortImage { len: image.len() })?;

        let actual = self.checksum.checksum_parts(&checksum_parts(image));
        if actual != expected_checksum {
            return Err(VerificationError::ChecksumMismatch {
                expected: expected_checksum,
                actual,
            });
        }

        let room = image.len() - PAGE_HEADER_SIZE;
        if header.disk_len as usize > room {
            return Err(VerificationError::PayloadOverflow {
                disk_len: header.disk_len,
                size: header.size,
            });
        }
        let stored = &image[PAGE_HEADER_SIZE..PAGE_HEADER_SIZE + header.disk_len as usize];

        if validate_declared_mem_len(header.mem_len, self.max_decompressed_size).is_err() {
            return Err(VerificationError::DecompressedTooLarge {
                mem_len: header.mem_len,
                limit: self.max_decompressed_size,
            });
        }

        let data = if header.is_compressed() {
            let data = self
                .compressor
                .decompress(stored, header.mem_len as usize)
                .map_err(|e| VerificationError::Decompression {
                    message: e.to_string(),
                })?;
            if data.len() != header.mem_len as usize {
                return Err(VerificationError::DecompressedLength {
                    expected: header.mem_len,
                    actual: data.len(),
                });
            }
            data
        } else {
            if header.mem_len != header.disk_len {
                return Err(VerificationError::LengthMismatch {
                    disk_len: header.disk_len,
                    mem_len: header.mem_len,
                });
            }
            stored.to_vec()
        };

        Ok(PageContent { header, data })
    }
}
