//! # Adapters Layer
//!
//! Default implementations of the outbound ports.
//!
//! | Adapter | Port |
//! |---------|------|
//! | `FileBlockDevice` | `BlockDevice` (std file, `fs2` lock) |
//! | `InMemoryBlockDevice` | `BlockDevice` (tests, fault injection) |
//! | `Crc32Checksum` | `ChecksumProvider` |
//! | `PageImageVerifier` | `BlockVerifier` |
//! | `ExtentList` | `SpaceTracker` |

pub mod device;
pub mod infra;
pub mod space;
pub mod verifier;

pub use device::{FileBlockDevice, InMemoryBlockDevice};
pub use infra::Crc32Checksum;
pub use space::ExtentList;
pub use verifier::PageImageVerifier;
