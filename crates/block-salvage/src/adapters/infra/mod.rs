//! Infrastructure Adapters
//!
//! Implementations of infrastructure traits (Checksum).

mod checksum;

pub use checksum::Crc32Checksum;
