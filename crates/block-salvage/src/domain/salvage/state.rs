//! # Scan State
//!
//! Position of an in-progress salvage pass.

use super::report::SalvageReport;

/// Mutable state of one salvage pass.
///
/// Created by salvage start and consumed by salvage end. Every offset below
/// `scan_cursor` has been classified and is never looked at again.
#[derive(Debug, Clone)]
pub struct ScanState {
    file_size: u64,
    scan_cursor: u64,
    report: SalvageReport,
}

impl ScanState {
    /// Begin a scan of a file of `file_size` bytes at `start`.
    pub fn new(file_size: u64, start: u64) -> Self {
        Self {
            file_size,
            scan_cursor: start,
            report: SalvageReport::new(),
        }
    }

    /// File length the scan is bounded by.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Next offset to examine.
    pub fn scan_cursor(&self) -> u64 {
        self.scan_cursor
    }

    /// Whether the whole file has been classified.
    pub fn at_eof(&self) -> bool {
        self.scan_cursor >= self.file_size
    }

    /// Move the cursor forward by `len` bytes.
    pub(crate) fn advance(&mut self, len: u64) {
        self.scan_cursor += len;
    }

    pub fn report(&self) -> &SalvageReport {
        &self.report
    }

    pub(crate) fn report_mut(&mut self) -> &mut SalvageReport {
        &mut self.report
    }

    pub(crate) fn into_report(self) -> SalvageReport {
        self.report
    }
}
