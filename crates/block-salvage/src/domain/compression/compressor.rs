//! # Page Compression
//!
//! Optional dictionary-based Zstd compression of page payloads.
//!
//! Whether an individual page is compressed is recorded in its header flags;
//! the compressor is only consulted for pages carrying the compressed flag.

use std::io::{self, Read};

use serde::{Deserialize, Serialize};

// =============================================================================
// COMPRESSION CONFIGURATION
// =============================================================================

/// Configuration for page compression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Pre-trained dictionary bytes
    /// None = use standard compression without dictionary
    pub dictionary: Option<Vec<u8>>,
    /// Compression level (1-22, default 3)
    pub level: i32,
    /// Compress payloads of newly built pages
    pub enabled: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            dictionary: None,
            level: 3,
            enabled: true,
        }
    }
}

impl CompressionConfig {
    /// Create config with dictionary
    pub fn with_dictionary(dict: Vec<u8>) -> Self {
        Self {
            dictionary: Some(dict),
            ..Self::default()
        }
    }

    /// Config that stores payloads verbatim
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Create config for testing (no dictionary, fast)
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            dictionary: None,
            level: 1,
            enabled: true,
        }
    }
}

// =============================================================================
// COMPRESSION ERROR
// =============================================================================

/// Errors during compression/decompression
#[derive(Debug)]
pub enum CompressionError {
    /// Compression failed
    CompressFailed(io::Error),
    /// Decompression failed
    DecompressFailed(io::Error),
    /// Output grew past the caller's limit
    OutputTooLarge { limit: usize },
    /// Compressed payload found but this build has no decompressor
    Unsupported,
}

impl std::fmt::Display for CompressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompressionError::CompressFailed(e) => write!(f, "Compression failed: {}", e),
            CompressionError::DecompressFailed(e) => write!(f, "Decompression failed: {}", e),
            CompressionError::OutputTooLarge { limit } => {
                write!(f, "Decompressed output exceeds {} bytes", limit)
            }
            CompressionError::Unsupported => {
                write!(f, "Page is compressed but compression support is disabled")
            }
        }
    }
}

impl std::error::Error for CompressionError {}

// =============================================================================
// COMPRESSOR TRAIT
// =============================================================================

/// Trait for page payload compression implementations
pub trait PageCompressor: Send + Sync {
    /// Compress data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError>;

    /// Decompress data, failing once the output passes `limit` bytes
    fn decompress(&self, data: &[u8], limit: usize) -> Result<Vec<u8>, CompressionError>;

    /// Check if newly built pages should be compressed
    fn is_enabled(&self) -> bool;
}

/// Drain `reader`, refusing to produce more than `limit` bytes.
#[cfg_attr(not(feature = "compression"), allow(dead_code))]
fn read_bounded<R: Read>(reader: R, limit: usize) -> Result<Vec<u8>, CompressionError> {
    let mut output = Vec::new();
    reader
        .take(limit as u64 + 1)
        .read_to_end(&mut output)
        .map_err(CompressionError::DecompressFailed)?;
    if output.len() > limit {
        return Err(CompressionError::OutputTooLarge { limit });
    }
    Ok(output)
}

// =============================================================================
// ZSTD COMPRESSOR
// =============================================================================

/// Zstd-based compressor with optional dictionary support
#[cfg(feature = "compression")]
pub struct ZstdCompressor {
    config: CompressionConfig,
}

#[cfg(feature = "compression")]
impl ZstdCompressor {
    /// Create a new Zstd compressor
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    /// Create with default settings
    pub fn default_compressor() -> Self {
        Self::new(CompressionConfig::default())
    }
}

#[cfg(feature = "compression")]
impl PageCompressor for ZstdCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        use std::io::Write;

        if let Some(ref dict) = self.config.dictionary {
            let encoder = zstd::dict::EncoderDictionary::copy(dict, self.config.level);
            let mut output = Vec::new();
            let mut encoder =
                zstd::stream::Encoder::with_prepared_dictionary(&mut output, &encoder)
                    .map_err(CompressionError::CompressFailed)?;
            encoder
                .write_all(data)
                .map_err(CompressionError::CompressFailed)?;
            encoder.finish().map_err(CompressionError::CompressFailed)?;
            Ok(output)
        } else {
            zstd::encode_all(data, self.config.level).map_err(CompressionError::CompressFailed)
        }
    }

    fn decompress(&self, data: &[u8], limit: usize) -> Result<Vec<u8>, CompressionError> {
        if let Some(ref dict) = self.config.dictionary {
            let decoder = zstd::dict::DecoderDictionary::copy(dict);
            let decoder = zstd::stream::Decoder::with_prepared_dictionary(data, &decoder)
                .map_err(CompressionError::DecompressFailed)?;
            read_bounded(decoder, limit)
        } else {
            let decoder =
                zstd::stream::Decoder::new(data).map_err(CompressionError::DecompressFailed)?;
            read_bounded(decoder, limit)
        }
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }
}

// =============================================================================
// NO-OP COMPRESSOR
// =============================================================================

/// Compressor for stores that never compress.
///
/// Building passes data through unchanged; a page that claims to be compressed
/// cannot be decoded and fails verification.
pub struct NoOpCompressor;

impl PageCompressor for NoOpCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        Ok(data.to_vec())
    }

    fn decompress(&self, _data: &[u8], _limit: usize) -> Result<Vec<u8>, CompressionError> {
        Err(CompressionError::Unsupported)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
