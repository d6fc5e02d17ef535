//! Shared setup for file-backed scenarios.

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber once; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Write `bytes` to a fresh store file under `dir`.
pub fn write_store(dir: &Path, bytes: &[u8]) -> std::io::Result<PathBuf> {
    let path = dir.join("store.blk");
    std::fs::write(&path, bytes)?;
    Ok(path)
}
