//! # Candidate Header Checks
//!
//! Structural plausibility of a header read from an arbitrary offset.
//!
//! ## Security Invariants
//!
//! - A declared size is never used to read before it passes these checks
//! - A page may not extend past the end of the file

use crate::domain::config::SalvageConfig;
use crate::domain::errors::GarbageReason;

use super::header::PageHeader;

/// Check whether `header`, read at `offset`, could describe a real page.
pub fn check_candidate(
    header: &PageHeader,
    offset: u64,
    file_size: u64,
    config: &SalvageConfig,
) -> Result<(), GarbageReason> {
    let size = header.size;

    if size == 0 {
        return Err(GarbageReason::ZeroSize);
    }

    if size % config.allocation_size != 0 {
        return Err(GarbageReason::Misaligned { size });
    }

    if size > config.max_page_size {
        return Err(GarbageReason::TooLarge {
            size,
            max: config.max_page_size,
        });
    }

    let end = offset.saturating_add(size as u64);
    if end > file_size {
        return Err(GarbageReason::PastEof { end, file_size });
    }

    Ok(())
}
