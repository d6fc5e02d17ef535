//! # Domain Errors
//!
//! Error types for the Block Salvage subsystem.
//!
//! ## Design Principles
//!
//! - Only infrastructure failures and protocol misuse are errors
//! - Corruption found while scanning is a value ([`GarbageReason`]), never an `Err`
//! - No panics in domain logic (use Result instead)

use std::fmt;
use std::io;

use thiserror::Error;

/// Errors that abort a salvage call.
///
/// When one of these is returned from `salvage_next`, the scan cursor is left at
/// its last successfully advanced value.
#[derive(Debug, Error)]
pub enum SalvageError {
    /// Read, write or truncate on the underlying file failed.
    #[error("Block device error: {0}")]
    Device(#[from] DeviceError),

    /// Free-space bookkeeping refused to record a freed region.
    #[error("Free-space tracking error: {0}")]
    Space(#[from] SpaceError),

    /// Store configuration is unusable.
    #[error("Invalid salvage configuration: {0}")]
    Config(#[from] ConfigError),

    /// An address cookie could not be produced.
    #[error("Address cookie error: {0}")]
    Cookie(#[from] CookieError),

    /// `salvage_next` or `salvage_end` called without an active pass.
    #[error("No salvage pass in progress (call salvage_start first)")]
    NotStarted,

    /// `salvage_start` called while a pass is still active.
    #[error("A salvage pass is already in progress (call salvage_end first)")]
    AlreadyStarted,
}

/// Block device I/O errors.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Read of `len` bytes at `offset` failed.
    #[error("read of {len} bytes at offset {offset} failed: {source}")]
    Read {
        offset: u64,
        len: usize,
        #[source]
        source: io::Error,
    },

    /// Write of `len` bytes at `offset` failed.
    #[error("write of {len} bytes at offset {offset} failed: {source}")]
    Write {
        offset: u64,
        len: usize,
        #[source]
        source: io::Error,
    },

    /// Truncating the file to `len` bytes failed.
    #[error("truncate to {len} bytes failed: {source}")]
    Truncate {
        len: u64,
        #[source]
        source: io::Error,
    },

    /// Opening, stat or sync of the file failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Another process holds the salvage lock on this file.
    #[error("file is locked by another process: {path}")]
    Locked { path: String },
}

impl DeviceError {
    /// Wrap an I/O error with a short description of the failed operation.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        DeviceError::Io {
            context: context.into(),
            source,
        }
    }
}

/// Free-space tracker errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpaceError {
    /// The region partially overlaps one that is already free.
    #[error("region [{offset}, {end}) overlaps an existing free extent", end = .offset + .len)]
    Overlap { offset: u64, len: u64 },

    /// Zero-length regions cannot be freed.
    #[error("cannot free an empty region at offset {offset}")]
    EmptyRegion { offset: u64 },

    /// Backing store for the free list failed.
    #[error("free-list backend failure: {message}")]
    Backend { message: String },
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("allocation size {0} must be a power of two and at least 512")]
    InvalidAllocationSize(u32),

    #[error("description sector size {size} is smaller than the {min}-byte description record")]
    SectorTooSmall { size: u32, min: usize },

    #[error("maximum page size {max_page_size} must be a non-zero multiple of allocation size {allocation_size}")]
    InvalidMaxPageSize {
        max_page_size: u32,
        allocation_size: u32,
    },

    #[error("compression level {0} is outside 1..=22")]
    InvalidCompressionLevel(i32),
}

/// Failure of the verified page read (checksum + decompression).
///
/// The scanner treats every variant the same way: the probed unit is garbage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("image too short for a page header ({len} bytes)")]
    ShortImage { len: usize },

    #[error("checksum mismatch: expected {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("payload length {disk_len} does not fit in a {size}-byte page")]
    PayloadOverflow { disk_len: u32, size: u32 },

    #[error("uncompressed page declares {mem_len} bytes but stores {disk_len}")]
    LengthMismatch { disk_len: u32, mem_len: u32 },

    #[error("decompression failed: {message}")]
    Decompression { message: String },

    #[error("decompressed {actual} bytes, header declares {expected}")]
    DecompressedLength { expected: u32, actual: usize },

    #[error("declared in-memory size {mem_len} exceeds limit {limit}")]
    DecompressedTooLarge { mem_len: u32, limit: usize },
}

/// Address cookie encode/decode errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookieError {
    #[error("offset {offset} is not on an allocation boundary")]
    MisalignedOffset { offset: u64 },

    #[error("size {size} is not a multiple of the allocation size")]
    MisalignedSize { size: u32 },

    #[error("cookie is truncated")]
    Truncated,

    #[error("cookie field overflows its integer type")]
    Overflow,

    #[error("{0} trailing bytes after cookie")]
    TrailingBytes(usize),
}

/// Why a probed allocation unit was classified as garbage.
///
/// This is not an error: it is the expected steady state when scanning a
/// damaged file, and it travels through `Probe::Garbage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GarbageReason {
    /// Header declares a zero-byte page.
    ZeroSize,
    /// Declared size is not a multiple of the allocation size.
    Misaligned { size: u32 },
    /// Declared size exceeds the configured maximum page size.
    TooLarge { size: u32, max: u32 },
    /// Declared page runs past the end of the file.
    PastEof { end: u64, file_size: u64 },
    /// Header looked plausible but the verified read failed.
    Verification(VerificationError),
}

impl GarbageReason {
    /// Whether the unit was rejected before the full page was read.
    pub fn is_structural(&self) -> bool {
        !matches!(self, GarbageReason::Verification(_))
    }
}

impl fmt::Display for GarbageReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GarbageReason::ZeroSize => write!(f, "zero page size"),
            GarbageReason::Misaligned { size } => {
                write!(f, "page size {} is not allocation-aligned", size)
            }
            GarbageReason::TooLarge { size, max } => {
                write!(f, "page size {} exceeds maximum {}", size, max)
            }
            GarbageReason::PastEof { end, file_size } => {
                write!(f, "page ends at {} past file size {}", end, file_size)
            }
            GarbageReason::Verification(e) => write!(f, "verification failed: {}", e),
        }
    }
}
