//! Block device adapters.

mod file;
mod memory;

pub use file::FileBlockDevice;
pub use memory::InMemoryBlockDevice;
