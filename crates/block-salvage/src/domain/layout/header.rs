//! # Page Header
//!
//! Fixed 32-byte little-endian prefix of every on-disk page.
//!
//! ```text
//!  0        8      12         16        20        24   25    26      32
//!  +--------+------+----------+---------+---------+----+-----+-------+
//!  | lsn    | size | checksum | disk_len| mem_len |type|flags| rsvd  |
//!  +--------+------+----------+---------+---------+----+-----+-------+
//! ```
//!
//! Nothing in a header read during salvage is trusted until the page has been
//! through the structural checks and the verified read.

use std::ops::Range;

/// Encoded header length in bytes.
pub const PAGE_HEADER_SIZE: usize = 32;

/// Header flag: payload is zstd-compressed.
pub const FLAG_COMPRESSED: u8 = 0x01;

/// Byte range of the checksum field within a page image.
pub const CHECKSUM_FIELD: Range<usize> = 12..16;

/// Decoded page header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageHeader {
    /// Log sequence number of the page.
    pub lsn: u64,
    /// On-disk size including this header, a multiple of the allocation size.
    pub size: u32,
    /// CRC32 of the `size`-byte image with the checksum field zeroed.
    pub checksum: u32,
    /// Payload bytes stored after the header.
    pub disk_len: u32,
    /// Payload length once decompressed.
    pub mem_len: u32,
    /// Caller-defined page type, opaque to salvage.
    pub page_type: u8,
    /// Header flags (`FLAG_COMPRESSED`).
    pub flags: u8,
}

impl PageHeader {
    /// Decode a header from the start of `buf`.
    ///
    /// Returns `None` when `buf` is shorter than [`PAGE_HEADER_SIZE`].
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < PAGE_HEADER_SIZE {
            return None;
        }
        Some(Self {
            lsn: u64::from_le_bytes(buf[0..8].try_into().ok()?),
            size: u32::from_le_bytes(buf[8..12].try_into().ok()?),
            checksum: u32::from_le_bytes(buf[12..16].try_into().ok()?),
            disk_len: u32::from_le_bytes(buf[16..20].try_into().ok()?),
            mem_len: u32::from_le_bytes(buf[20..24].try_into().ok()?),
            page_type: buf[24],
            flags: buf[25],
        })
    }

    /// Encode into the first [`PAGE_HEADER_SIZE`] bytes of `buf`.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is shorter than the header.
    pub fn encode(&self, buf: &mut [u8]) {
        let out = &mut buf[..PAGE_HEADER_SIZE];
        out[0..8].copy_from_slice(&self.lsn.to_le_bytes());
        out[8..12].copy_from_slice(&self.size.to_le_bytes());
        out[12..16].copy_from_slice(&self.checksum.to_le_bytes());
        out[16..20].copy_from_slice(&self.disk_len.to_le_bytes());
        out[20..24].copy_from_slice(&self.mem_len.to_le_bytes());
        out[24] = self.page_type;
        out[25] = self.flags;
        out[26..32].fill(0);
    }

    /// Whether the payload is stored compressed.
    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_COMPRESSED != 0
    }
}

/// The three slices a page checksum covers: the image with its checksum
/// field replaced by zeros.
///
/// `image` must be at least [`PAGE_HEADER_SIZE`] bytes.
pub fn checksum_parts(image: &[u8]) -> [&[u8]; 3] {
    const ZEROS: [u8; 4] = [0; 4];
    [
        &image[..CHECKSUM_FIELD.start],
        &ZEROS,
        &image[CHECKSUM_FIELD.end..],
    ]
}
