//! # Probe Outcomes
//!
//! Classification of a single allocation-aligned offset.

use std::ops::Range;

use crate::domain::address::AddressCookie;
use crate::domain::errors::GarbageReason;
use crate::domain::layout::PageContent;

/// Outcome of probing one offset.
///
/// Corruption is a value here, not an error: it is the normal case when
/// scanning a damaged file.
#[derive(Debug)]
pub enum Probe {
    /// The unit at the probed offset is not the start of a page.
    Garbage(GarbageReason),
    /// A verified page starts at the probed offset.
    Valid(PageContent),
}

/// A page recovered by salvage, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalvagedPage {
    /// Cookie addressing this page.
    pub address: AddressCookie,
    /// Byte offset of the page in the file.
    pub offset: u64,
    /// Verified header and decompressed payload.
    pub content: PageContent,
}

impl SalvagedPage {
    /// On-disk size of the page.
    pub fn size(&self) -> u32 {
        self.content.header.size
    }

    /// Sequence number of the page.
    pub fn lsn(&self) -> u64 {
        self.content.header.lsn
    }

    /// Checksum stored in the page header.
    pub fn checksum(&self) -> u32 {
        self.content.header.checksum
    }

    /// Byte range the page occupies.
    pub fn range(&self) -> Range<u64> {
        self.offset..self.offset + self.size() as u64
    }

    /// Decompressed payload.
    pub fn data(&self) -> &[u8] {
        &self.content.data
    }
}
