//! # Salvage Report
//!
//! Running tally of one salvage pass, returned by `salvage_end`.

use crate::domain::errors::GarbageReason;

/// Result of a salvage pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalvageReport {
    /// Bytes removed from the end of the file by salvage start
    pub bytes_truncated: u64,
    /// Number of valid pages returned to the caller
    pub pages_recovered: u64,
    /// Total size of returned pages
    pub bytes_recovered: u64,
    /// Allocation units classified as garbage
    pub units_skipped: u64,
    /// Total size of garbage units marked free
    pub bytes_freed: u64,
    /// Units rejected by the header checks
    pub structural_rejections: u64,
    /// Units whose header looked valid but failed the verified read
    pub verification_failures: u64,
    /// Lowest LSN among recovered pages
    pub lowest_lsn: Option<u64>,
    /// Highest LSN among recovered pages
    pub highest_lsn: Option<u64>,
    /// Store LSN watermark when the pass finished
    pub final_lsn: u64,
    /// Caller's verdict passed to `salvage_end`
    pub success: bool,
}

impl SalvageReport {
    /// Create empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a page handed back to the caller
    pub fn add_page(&mut self, lsn: u64, size: u32) {
        self.pages_recovered += 1;
        self.bytes_recovered += size as u64;

        match self.lowest_lsn {
            None => self.lowest_lsn = Some(lsn),
            Some(l) if lsn < l => self.lowest_lsn = Some(lsn),
            _ => {}
        }

        match self.highest_lsn {
            None => self.highest_lsn = Some(lsn),
            Some(h) if lsn > h => self.highest_lsn = Some(lsn),
            _ => {}
        }
    }

    /// Record one garbage unit
    pub fn add_garbage(&mut self, reason: &GarbageReason, unit: u32) {
        self.units_skipped += 1;
        self.bytes_freed += unit as u64;
        if reason.is_structural() {
            self.structural_rejections += 1;
        } else {
            self.verification_failures += 1;
        }
    }
}
