//! # Config Module
//!
//! Store layout and salvage tuning.

mod settings;


// Re-export public types
pub use settings::{
    SalvageConfig, DEFAULT_ALLOCATION_SIZE, DEFAULT_DESCRIPTION_SECTOR_SIZE,
    DEFAULT_MAX_DECOMPRESSED_SIZE, DEFAULT_MAX_PAGE_SIZE, MIN_ALLOCATION_SIZE,
};
