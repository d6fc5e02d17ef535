//! # Compression Security
//!
//! Decompression bomb prevention for salvaged pages.
//!
//! A damaged header can declare any in-memory size; the declared size is
//! checked before any decompression work is attempted.

/// Validate a page's declared in-memory size against the configured limit.
pub fn validate_declared_mem_len(mem_len: u32, limit: usize) -> Result<(), &'static str> {
    if mem_len as usize > limit {
        return Err("Declared in-memory size exceeds maximum");
    }
    Ok(())
}
