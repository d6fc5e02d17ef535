//! # Description Sector
//!
//! The leading sector of every block-storage file. Salvage never reads it; it
//! rewrites it with a fresh default record before scanning.

use thiserror::Error;

use crate::ports::outbound::ChecksumProvider;

/// Errors decoding a description sector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptionError {
    #[error("description sector is {len} bytes, need at least {min}")]
    Short { len: usize, min: usize },

    #[error("bad description magic {0:#010x}")]
    BadMagic(u32),

    #[error("unsupported description version {major}.{minor}")]
    UnsupportedVersion { major: u16, minor: u16 },

    #[error("description checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },
}

/// Store metadata held in the description sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionRecord {
    pub magic: u32,
    pub major: u16,
    pub minor: u16,
}

impl Default for DescriptionRecord {
    fn default() -> Self {
        Self {
            magic: Self::MAGIC,
            major: Self::MAJOR_VERSION,
            minor: Self::MINOR_VERSION,
        }
    }
}

impl DescriptionRecord {
    /// Magic number identifying a block-storage file.
    pub const MAGIC: u32 = 0x0012_0897;
    pub const MAJOR_VERSION: u16 = 1;
    pub const MINOR_VERSION: u16 = 0;

    /// Bytes used by the record at the start of the sector.
    pub const ENCODED_LEN: usize = 12;

    /// Encode a full `sector_size`-byte sector: record, checksum, zero padding.
    ///
    /// The checksum covers the whole sector with the checksum field zeroed.
    pub fn encode_sector<CS: ChecksumProvider + ?Sized>(
        &self,
        sector_size: usize,
        checksum: &CS,
    ) -> Vec<u8> {
        let mut sector = vec![0u8; sector_size.max(Self::ENCODED_LEN)];
        sector[0..4].copy_from_slice(&self.magic.to_le_bytes());
        sector[4..6].copy_from_slice(&self.major.to_le_bytes());
        sector[6..8].copy_from_slice(&self.minor.to_le_bytes());
        let sum = checksum.checksum(&sector);
        sector[8..12].copy_from_slice(&sum.to_le_bytes());
        sector
    }

    /// Decode and validate a description sector.
    pub fn decode<CS: ChecksumProvider + ?Sized>(
        sector: &[u8],
        checksum: &CS,
    ) -> Result<Self, DescriptionError> {
        if sector.len() < Self::ENCODED_LEN {
            return Err(DescriptionError::Short {
                len: sector.len(),
                min: Self::ENCODED_LEN,
            });
        }

        let magic = u32::from_le_bytes([sector[0], sector[1], sector[2], sector[3]]);
        if magic != Self::MAGIC {
            return Err(DescriptionError::BadMagic(magic));
        }

        let major = u16::from_le_bytes([sector[4], sector[5]]);
        let minor = u16::from_le_bytes([sector[6], sector[7]]);
        if major != Self::MAJOR_VERSION {
            return Err(DescriptionError::UnsupportedVersion { major, minor });
        }

        let stored = u32::from_le_bytes([sector[8], sector[9], sector[10], sector[11]]);
        let computed = checksum.checksum_parts(&[&sector[..8], &[0u8; 4], &sector[12..]]);
        if stored != computed {
            return Err(DescriptionError::ChecksumMismatch { stored, computed });
        }

        Ok(Self {
            magic,
            major,
            minor,
        })
    }
}
