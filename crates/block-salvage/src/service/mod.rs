//! # Block Salvage Service
//!
//! The block store under salvage: owns the device and the collaborators, and
//! implements `SalvageApi`.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements `SalvageApi` (start / next / end)
//! 2. Keeps the store-wide LSN watermark and consistency flag
//! 3. Uses dependency injection for the device, verifier and free-space tracker

mod helpers;
mod salvage;

use std::path::Path;

use crate::adapters::{Crc32Checksum, ExtentList, FileBlockDevice, PageImageVerifier};
use crate::domain::compression::{default_compressor, DefaultCompressor};
use crate::domain::config::SalvageConfig;
use crate::domain::errors::SalvageError;
use crate::domain::salvage::ScanState;
use crate::ports::outbound::{BlockDevice, BlockVerifier, ChecksumProvider, SpaceTracker};

/// A block store opened for salvage.
///
/// Holding `&mut` to the service for the whole pass is what keeps the scan
/// single-threaded; there is no internal locking.
pub struct BlockSalvageService<D, V, S, CS>
where
    D: BlockDevice,
    V: BlockVerifier,
    S: SpaceTracker,
    CS: ChecksumProvider,
{
    /// File being salvaged.
    pub(crate) device: D,
    /// Checksum + decompression for candidate pages.
    pub(crate) verifier: V,
    /// Receives every region classified as garbage.
    pub(crate) space: S,
    /// Checksum for the description sector.
    pub(crate) checksum: CS,
    /// Layout of the store.
    pub(crate) config: SalvageConfig,
    /// Highest LSN known to the store.
    pub(crate) lsn: u64,
    /// Cleared by a failed salvage.
    pub(crate) consistent: bool,
    /// Present between start and end.
    pub(crate) scan: Option<ScanState>,
    /// One allocation unit, reused across probes.
    pub(crate) scratch: Vec<u8>,
}

/// Dependencies for BlockSalvageService
pub struct SalvageDependencies<D, V, S, CS> {
    pub device: D,
    pub verifier: V,
    pub space: S,
    pub checksum: CS,
}

/// The store as opened from a file with the default adapters.
pub type FileSalvageService = BlockSalvageService<
    FileBlockDevice,
    PageImageVerifier<Crc32Checksum, DefaultCompressor>,
    ExtentList,
    Crc32Checksum,
>;

impl<D, V, S, CS> BlockSalvageService<D, V, S, CS>
where
    D: BlockDevice,
    V: BlockVerifier,
    S: SpaceTracker,
    CS: ChecksumProvider,
{
    /// Create a store over the given dependencies.
    ///
    /// Fails with `SalvageError::Config` if `config` does not validate.
    pub fn new(
        deps: SalvageDependencies<D, V, S, CS>,
        config: SalvageConfig,
    ) -> Result<Self, SalvageError> {
        config.validate()?;
        Ok(Self {
            device: deps.device,
            verifier: deps.verifier,
            space: deps.space,
            checksum: deps.checksum,
            config,
            lsn: 0,
            consistent: true,
            scan: None,
            scratch: Vec::new(),
        })
    }

    /// Seed the LSN watermark, e.g. from the last checkpoint.
    pub fn with_lsn(mut self, lsn: u64) -> Self {
        self.lsn = lsn;
        self
    }

    /// Highest LSN seen. Pages written after salvage must use a larger one.
    pub fn lsn(&self) -> u64 {
        self.lsn
    }

    /// False once a salvage pass has ended unsuccessfully.
    pub fn is_consistent(&self) -> bool {
        self.consistent
    }

    /// State of the active pass, if any.
    pub fn scan_state(&self) -> Option<&ScanState> {
        self.scan.as_ref()
    }

    pub fn config(&self) -> &SalvageConfig {
        &self.config
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn space(&self) -> &S {
        &self.space
    }

    pub fn space_mut(&mut self) -> &mut S {
        &mut self.space
    }

    /// Take the store apart, returning the dependencies.
    pub fn into_parts(self) -> SalvageDependencies<D, V, S, CS> {
        SalvageDependencies {
            device: self.device,
            verifier: self.verifier,
            space: self.space,
            checksum: self.checksum,
        }
    }
}

impl FileSalvageService {
    /// Open the file at `path` with the default adapters.
    ///
    /// With the `locking` feature, the file stays locked until the service is
    /// dropped.
    pub fn open(path: impl AsRef<Path>, config: SalvageConfig) -> Result<Self, SalvageError> {
        let device = FileBlockDevice::open(path)?;
        let verifier = PageImageVerifier::new(
            Crc32Checksum,
            default_compressor(&config.compression),
            config.max_decompressed_size,
        );
        Self::new(
            SalvageDependencies {
                device,
                verifier,
                space: ExtentList::new(),
                checksum: Crc32Checksum,
            },
            config,
        )
    }
}
