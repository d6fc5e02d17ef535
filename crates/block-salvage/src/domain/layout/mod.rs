//! # Layout Module
//!
//! On-disk formats: description sector, page header, page images.

mod description;
mod header;
mod image;
pub mod security;


// Re-export public types
pub use description::{DescriptionError, DescriptionRecord};
pub use header::{checksum_parts, PageHeader, CHECKSUM_FIELD, FLAG_COMPRESSED, PAGE_HEADER_SIZE};
pub use image::{PageContent, PageImage, PageImageError};
pub(crate) use image::align_up;
