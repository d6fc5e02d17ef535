//! # File Block Device
//!
//! `BlockDevice` over a regular file.
//!
//! With the `locking` feature the device holds an exclusive advisory lock
//! (`fs2`, flock on Unix) for its whole lifetime, so two salvage passes can
//! never run over the same file at once.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "locking")]
use fs2::FileExt;

use crate::domain::errors::DeviceError;
use crate::ports::outbound::BlockDevice;

/// Block-storage file opened for salvage.
pub struct FileBlockDevice {
    file: File,
    path: PathBuf,
}

impl FileBlockDevice {
    /// Open an existing file read-write and take the salvage lock.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::Locked` if another process holds the lock.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DeviceError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| DeviceError::io(format!("open {}", path.display()), e))?;

        #[cfg(feature = "locking")]
        file.try_lock_exclusive()
            .map_err(|_| DeviceError::Locked {
                path: path.display().to_string(),
            })?;

        #[cfg(feature = "tracing-log")]
        tracing::debug!("[salvage] opened {} for salvage", path.display());

        Ok(Self { file, path })
    }

    /// Path the device was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlockDevice for FileBlockDevice {
    fn file_size(&self) -> Result<u64, DeviceError> {
        self.file
            .metadata()
            .map(|m| m.len())
            .map_err(|e| DeviceError::io("stat", e))
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), DeviceError> {
        let len = buf.len();
        self.file
            .seek(SeekFrom::Start(offset))
            .and_then(|_| self.file.read_exact(buf))
            .map_err(|source| DeviceError::Read {
                offset,
                len,
                source,
            })
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), DeviceError> {
        let len = data.len();
        self.file
            .seek(SeekFrom::Start(offset))
            .and_then(|_| self.file.write_all(data))
            .map_err(|source| DeviceError::Write {
                offset,
                len,
                source,
            })
    }

    fn truncate(&mut self, len: u64) -> Result<(), DeviceError> {
        self.file
            .set_len(len)
            .map_err(|source| DeviceError::Truncate { len, source })
    }

    fn sync(&mut self) -> Result<(), DeviceError> {
        self.file.sync_all().map_err(|e| DeviceError::io("sync", e))
    }
}

#[cfg(feature = "locking")]
impl Drop for FileBlockDevice {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_file(dir: &TempDir, len: usize) -> PathBuf {
        let path = dir.path().join("store.blk");
        std::fs::write(&path, vec![0xA5u8; len]).unwrap();
        path
    }

    #[test]
    fn test_read_write_truncate() {
        let dir = TempDir::new().unwrap();
        let path = make_file(&dir, 2048);
        let mut dev = FileBlockDevice::open(&path).unwrap();

        assert_eq!(dev.file_size().unwrap(), 2048);

        dev.write_at(512, b"page").unwrap();
        let mut buf = [0u8; 4];
        dev.read_at(512, &mut buf).unwrap();
        assert_eq!(&buf, b"page");

        dev.truncate(1024).unwrap();
        assert_eq!(dev.file_size().unwrap(), 1024);
    }

    #[test]
    fn test_read_past_end_fails() {
        let dir = TempDir::new().unwrap();
        let path = make_file(&dir, 1024);
        let mut dev = FileBlockDevice::open(&path).unwrap();

        let mut buf = [0u8; 512];
        let err = dev.read_at(768, &mut buf).unwrap_err();
        assert!(matches!(err, DeviceError::Read { offset: 768, len: 512, .. }));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = FileBlockDevice::open(dir.path().join("missing.blk"));
        assert!(matches!(result, Err(DeviceError::Io { .. })));
    }

    #[cfg(feature = "locking")]
    #[test]
    fn test_second_open_is_locked_out() {
        let dir = TempDir::new().unwrap();
        let path = make_file(&dir, 1024);

        let first = FileBlockDevice::open(&path).unwrap();
        let second = FileBlockDevice::open(&path);
        assert!(matches!(second, Err(DeviceError::Locked { .. })));

        drop(first);
        assert!(FileBlockDevice::open(&path).is_ok());
    }
}
