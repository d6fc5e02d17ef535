//! # Outbound Ports (Driven Ports)
//!
//! Collaborators the salvage engine drives. The host supplies these; the
//! crate ships default adapters under `adapters/`.
//!
//! | Port | Default adapter |
//! |------|-----------------|
//! | `BlockDevice` | `FileBlockDevice`, `InMemoryBlockDevice` |
//! | `ChecksumProvider` | `Crc32Checksum` |
//! | `BlockVerifier` | `PageImageVerifier` |
//! | `SpaceTracker` | `ExtentList` |

use crate::domain::errors::{DeviceError, SpaceError, VerificationError};
use crate::domain::layout::PageContent;

/// Positional I/O on the block-storage file.
///
/// Every call is synchronous and bounded; there is no partial success.
pub trait BlockDevice {
    /// Current length of the file in bytes.
    fn file_size(&self) -> Result<u64, DeviceError>;

    /// Fill `buf` from `offset`. Reading past the end of the file is an error.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), DeviceError>;

    /// Write all of `data` at `offset`, extending the file if needed.
    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), DeviceError>;

    /// Set the file length to `len`.
    fn truncate(&mut self, len: u64) -> Result<(), DeviceError>;

    /// Flush written data to stable storage.
    fn sync(&mut self) -> Result<(), DeviceError>;
}

/// Abstract interface for checksum computation.
pub trait ChecksumProvider: Send + Sync {
    /// Compute the checksum of `data`.
    fn checksum(&self, data: &[u8]) -> u32;

    /// Compute the checksum of the concatenation of `parts`.
    fn checksum_parts(&self, parts: &[&[u8]]) -> u32 {
        self.checksum(&parts.concat())
    }

    /// Verify a checksum matches.
    fn verify(&self, data: &[u8], expected: u32) -> bool {
        self.checksum(data) == expected
    }
}

/// The verified block read: checksum check plus decompression.
///
/// Receives a page image already read from disk. Any failure means the image
/// is not a page; the scanner does not distinguish between failure kinds.
pub trait BlockVerifier {
    /// Verify `image` against `expected_checksum` and decode its payload.
    fn verify(&self, image: &[u8], expected_checksum: u32)
        -> Result<PageContent, VerificationError>;
}

/// Free-space bookkeeping for regions salvage decides are garbage.
pub trait SpaceTracker {
    /// Record `[offset, offset + len)` as free.
    ///
    /// A region already entirely free must be accepted unchanged: a second
    /// pass over the same store frees the same garbage units again.
    fn mark_free(&mut self, offset: u64, len: u64) -> Result<(), SpaceError>;

    /// Drop all accumulated free-space state.
    fn discard(&mut self);
}
