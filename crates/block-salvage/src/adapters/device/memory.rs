//! # In-Memory Block Device
//!
//! `BlockDevice` backed by a `Vec<u8>`, with fault injection for the read,
//! write and truncate paths.

use std::io;

use crate::domain::errors::DeviceError;
use crate::ports::outbound::BlockDevice;

/// Block device held entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBlockDevice {
    data: Vec<u8>,
    reads: u64,
    writes: u64,
    truncates: u64,
    syncs: u64,
    fail_reads_at: Option<u64>,
    fail_writes: bool,
    fail_truncate: bool,
}

impl InMemoryBlockDevice {
    /// Device holding `data`.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    /// Current contents.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Take the contents.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Number of successful `read_at` calls.
    pub fn read_count(&self) -> u64 {
        self.reads
    }

    /// Number of successful `write_at` calls.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Number of successful `truncate` calls.
    pub fn truncate_count(&self) -> u64 {
        self.truncates
    }

    /// Number of `sync` calls.
    pub fn sync_count(&self) -> u64 {
        self.syncs
    }

    /// Fail every read whose range covers `offset`. `None` clears the fault.
    pub fn fail_reads_at(&mut self, offset: Option<u64>) {
        self.fail_reads_at = offset;
    }

    /// Make every write fail.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Make truncate fail.
    pub fn fail_truncate(&mut self, fail: bool) {
        self.fail_truncate = fail;
    }

    fn injected(kind: io::ErrorKind) -> io::Error {
        io::Error::new(kind, "injected fault")
    }
}

impl BlockDevice for InMemoryBlockDevice {
    fn file_size(&self) -> Result<u64, DeviceError> {
        Ok(self.data.len() as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), DeviceError> {
        let len = buf.len();
        let end = offset + len as u64;

        if let Some(bad) = self.fail_reads_at {
            if offset <= bad && bad < end {
                return Err(DeviceError::Read {
                    offset,
                    len,
                    source: Self::injected(io::ErrorKind::Other),
                });
            }
        }

        if end > self.data.len() as u64 {
            return Err(DeviceError::Read {
                offset,
                len,
                source: Self::injected(io::ErrorKind::UnexpectedEof),
            });
        }

        buf.copy_from_slice(&self.data[offset as usize..end as usize]);
        self.reads += 1;
        Ok(())
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), DeviceError> {
        if self.fail_writes {
            return Err(DeviceError::Write {
                offset,
                len: data.len(),
                source: Self::injected(io::ErrorKind::Other),
            });
        }

        let start = offset as usize;
        let end = start + data.len();
        if end > self.data.len() {
            self.data.resize(end, 0);
        }
        self.data[start..end].copy_from_slice(data);
        self.writes += 1;
        Ok(())
    }

    fn truncate(&mut self, len: u64) -> Result<(), DeviceError> {
        if self.fail_truncate {
            return Err(DeviceError::Truncate {
                len,
                source: Self::injected(io::ErrorKind::Other),
            });
        }
        self.data.resize(len as usize, 0);
        self.truncates += 1;
        Ok(())
    }

    fn sync(&mut self) -> Result<(), DeviceError> {
        self.syncs += 1;
        Ok(())
    }
}
