//! # Address Cookies
//!
//! Opaque locators for recovered pages.
//!
//! A cookie packs `(offset, size, checksum)` as three unsigned LEB128 varints,
//! with offset and size stored in allocation units:
//!
//! ```text
//! varint((offset - sector_size) / allocation_size)
//! varint(size / allocation_size)
//! varint(checksum)
//! ```

use std::fmt;

use crate::domain::config::SalvageConfig;
use crate::domain::errors::CookieError;

/// Longest possible encoded cookie: 10 + 5 + 5 bytes.
pub const ADDRESS_COOKIE_MAX: usize = 20;

/// Encoded address of one page.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AddressCookie {
    bytes: Vec<u8>,
}

/// Decoded cookie fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockAddress {
    pub offset: u64,
    pub size: u32,
    pub checksum: u32,
}

impl AddressCookie {
    /// Encode the address of a page at `offset` of `size` bytes.
    pub fn encode(
        offset: u64,
        size: u32,
        checksum: u32,
        config: &SalvageConfig,
    ) -> Result<Self, CookieError> {
        let sector = config.description_sector_size as u64;
        let alloc = config.allocation_size as u64;

        if offset < sector || (offset - sector) % alloc != 0 {
            return Err(CookieError::MisalignedOffset { offset });
        }
        if size as u64 % alloc != 0 {
            return Err(CookieError::MisalignedSize { size });
        }

        let mut bytes = Vec::with_capacity(ADDRESS_COOKIE_MAX);
        put_varint(&mut bytes, (offset - sector) / alloc);
        put_varint(&mut bytes, size as u64 / alloc);
        put_varint(&mut bytes, checksum as u64);
        Ok(Self { bytes })
    }

    /// Wrap bytes received from a caller. Validation happens in [`Self::decode`].
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Decode back into an absolute address.
    pub fn decode(&self, config: &SalvageConfig) -> Result<BlockAddress, CookieError> {
        let sector = config.description_sector_size as u64;
        let alloc = config.allocation_size as u64;

        let mut input = self.bytes.as_slice();
        let units = get_varint(&mut input)?;
        let size_units = get_varint(&mut input)?;
        let checksum = get_varint(&mut input)?;
        if !input.is_empty() {
            return Err(CookieError::TrailingBytes(input.len()));
        }

        let offset = units
            .checked_mul(alloc)
            .and_then(|o| o.checked_add(sector))
            .ok_or(CookieError::Overflow)?;
        let size = size_units
            .checked_mul(alloc)
            .and_then(|s| u32::try_from(s).ok())
            .ok_or(CookieError::Overflow)?;
        let checksum = u32::try_from(checksum).map_err(|_| CookieError::Overflow)?;

        Ok(BlockAddress {
            offset,
            size,
            checksum,
        })
    }

    /// Encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take ownership of the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for AddressCookie {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for AddressCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddressCookie({})", hex::encode(&self.bytes))
    }
}

impl fmt::Display for AddressCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.bytes))
    }
}

fn put_varint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

fn get_varint(input: &mut &[u8]) -> Result<u64, CookieError> {
    let mut value = 0u64;
    for (i, &byte) in input.iter().enumerate() {
        let shift = 7 * i as u32;
        if shift >= 64 || (shift == 63 && byte > 1) {
            return Err(CookieError::Overflow);
        }
        value |= ((byte & 0x7f) as u64) << shift;
        if byte & 0x80 == 0 {
            *input = &input[i + 1..];
            return Ok(value);
        }
    }
    Err(CookieError::Truncated)
}
