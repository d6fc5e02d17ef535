//! # Inbound Ports (Driving Ports)
//!
//! The salvage protocol a host drives to rebuild a damaged store.

use crate::domain::errors::SalvageError;
use crate::domain::salvage::{SalvageReport, SalvagedPage};

/// Primary API for salvaging a block store.
///
/// A pass is `salvage_start`, then `salvage_next` until it returns `None`
/// (or the host gives up), then exactly one `salvage_end`.
pub trait SalvageApi {
    /// Begin a pass.
    ///
    /// Truncates trailing bytes that cannot hold a page, rewrites the
    /// description sector and places the cursor at the first page slot.
    ///
    /// ## Errors
    ///
    /// - `AlreadyStarted`: a pass is still active
    /// - `Device`: truncate or sector rewrite failed; the pass is not started
    fn salvage_start(&mut self) -> Result<(), SalvageError>;

    /// Return the next verified page, or `None` at end of file.
    ///
    /// Garbage units between pages are freed and skipped one allocation unit
    /// at a time. Reaching end of file performs no I/O.
    ///
    /// ## Errors
    ///
    /// - `NotStarted`: no active pass
    /// - `Device`: a read failed; the cursor stays at the failing offset
    /// - `Space`: the free-space tracker refused a region
    fn salvage_next(&mut self) -> Result<Option<SalvagedPage>, SalvageError>;

    /// Finish the pass.
    ///
    /// `success == false` marks the store inconsistent and throws away the
    /// free-space state gathered during the pass.
    ///
    /// ## Errors
    ///
    /// - `NotStarted`: no active pass
    fn salvage_end(&mut self, success: bool) -> Result<SalvageReport, SalvageError>;
}
