//! # Block Salvage Service - Helper Methods
//!
//! Private helper methods for the BlockSalvageService.

use super::*;
use crate::domain::errors::{GarbageReason, VerificationError};
use crate::domain::layout::security::check_candidate;
use crate::domain::layout::{DescriptionRecord, PageHeader};
use crate::domain::salvage::Probe;

impl<D, V, S, CS> BlockSalvageService<D, V, S, CS>
where
    D: BlockDevice,
    V: BlockVerifier,
    S: SpaceTracker,
    CS: ChecksumProvider,
{
    /// Write a fresh default description record over sector 0.
    pub(crate) fn reinit_description_sector(&mut self) -> Result<(), SalvageError> {
        let sector = DescriptionRecord::default().encode_sector(
            self.config.description_sector_size as usize,
            &self.checksum,
        );
        self.device.write_at(0, &sector)?;
        self.device.sync()?;
        Ok(())
    }

    /// Classify the allocation unit at `offset`.
    ///
    /// Only device failures are errors. Anything wrong with the bytes
    /// themselves comes back as `Probe::Garbage`.
    pub(crate) fn probe(&mut self, offset: u64, file_size: u64) -> Result<Probe, SalvageError> {
        let unit = self.config.allocation_size as usize;
        self.scratch.resize(unit, 0);
        self.device.read_at(offset, &mut self.scratch[..unit])?;

        let Some(header) = PageHeader::decode(&self.scratch[..unit]) else {
            return Ok(Probe::Garbage(GarbageReason::Verification(
                VerificationError::ShortImage { len: unit },
            )));
        };

        if let Err(reason) = check_candidate(&header, offset, file_size, &self.config) {
            return Ok(Probe::Garbage(reason));
        }

        // Multi-unit pages get their own buffer; scratch stays one unit.
        let size = header.size as usize;
        let verified = if size > unit {
            let mut image = vec![0u8; size];
            self.device.read_at(offset, &mut image)?;
            self.verifier.verify(&image, header.checksum)
        } else {
            self.verifier.verify(&self.scratch[..size], header.checksum)
        };

        match verified {
            Ok(content) => Ok(Probe::Valid(content)),
            Err(e) => Ok(Probe::Garbage(GarbageReason::Verification(e))),
        }
    }
}
