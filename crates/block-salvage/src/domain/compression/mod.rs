//! # Compression Module
//!
//! Zstd page payload compression for the verified read and the page builder.

mod compressor;
pub mod security;


// Re-export public types
#[cfg(feature = "compression")]
pub use compressor::ZstdCompressor;
pub use compressor::{CompressionConfig, CompressionError, NoOpCompressor, PageCompressor};

/// Compressor used by the file-backed store for this build.
#[cfg(feature = "compression")]
pub type DefaultCompressor = ZstdCompressor;

/// Compressor used by the file-backed store for this build.
#[cfg(not(feature = "compression"))]
pub type DefaultCompressor = NoOpCompressor;

/// Build the default compressor from `config`.
#[cfg(feature = "compression")]
pub fn default_compressor(config: &CompressionConfig) -> DefaultCompressor {
    ZstdCompressor::new(config.clone())
}

/// Build the default compressor from `config`.
#[cfg(not(feature = "compression"))]
pub fn default_compressor(_config: &CompressionConfig) -> DefaultCompressor {
    NoOpCompressor
}
