//! # Salvage Protocol
//!
//! `SalvageApi` for the block store.

use super::*;
use crate::domain::address::AddressCookie;
use crate::domain::salvage::{Probe, SalvageReport, SalvagedPage};
use crate::ports::inbound::SalvageApi;

impl<D, V, S, CS> SalvageApi for BlockSalvageService<D, V, S, CS>
where
    D: BlockDevice,
    V: BlockVerifier,
    S: SpaceTracker,
    CS: ChecksumProvider,
{
    fn salvage_start(&mut self) -> Result<(), SalvageError> {
        if self.scan.is_some() {
            return Err(SalvageError::AlreadyStarted);
        }

        // Trailing bytes past the last whole allocation unit can't hold a page.
        let len = self.device.file_size()?;
        let file_size = self.config.truncated_len(len);
        if file_size != len {
            self.device.truncate(file_size)?;
        }

        self.reinit_description_sector()?;

        let mut scan = ScanState::new(file_size, self.config.description_sector_size as u64);
        scan.report_mut().bytes_truncated = len - file_size;
        self.scan = Some(scan);

        #[cfg(feature = "tracing-log")]
        tracing::info!(
            "[salvage] started: {} bytes, truncated {} trailing bytes, description sector reset",
            file_size,
            len - file_size
        );

        Ok(())
    }

    fn salvage_next(&mut self) -> Result<Option<SalvagedPage>, SalvageError> {
        let unit = self.config.allocation_size;

        loop {
            let scan = self.scan.as_ref().ok_or(SalvageError::NotStarted)?;
            if scan.at_eof() {
                return Ok(None);
            }
            let offset = scan.scan_cursor();
            let file_size = scan.file_size();

            match self.probe(offset, file_size)? {
                Probe::Garbage(reason) => {
                    #[cfg(feature = "tracing-log")]
                    tracing::debug!(
                        "[salvage] skipping {}B at file offset {}: {}",
                        unit,
                        offset,
                        reason
                    );

                    // Free before advancing so a failed free leaves the unit unclassified.
                    self.space.mark_free(offset, unit as u64)?;
                    let scan = self.scan.as_mut().ok_or(SalvageError::NotStarted)?;
                    scan.report_mut().add_garbage(&reason, unit);
                    scan.advance(unit as u64);
                }
                Probe::Valid(content) => {
                    let header = content.header;
                    let address =
                        AddressCookie::encode(offset, header.size, header.checksum, &self.config)?;

                    self.lsn = self.lsn.max(header.lsn);

                    let scan = self.scan.as_mut().ok_or(SalvageError::NotStarted)?;
                    scan.report_mut().add_page(header.lsn, header.size);
                    scan.advance(header.size as u64);

                    #[cfg(feature = "tracing-log")]
                    tracing::debug!(
                        "[salvage] recovered {}B page at file offset {} (lsn {})",
                        header.size,
                        offset,
                        header.lsn
                    );

                    return Ok(Some(SalvagedPage {
                        address,
                        offset,
                        content,
                    }));
                }
            }
        }
    }

    fn salvage_end(&mut self, success: bool) -> Result<SalvageReport, SalvageError> {
        let scan = self.scan.take().ok_or(SalvageError::NotStarted)?;

        if !success {
            self.consistent = false;
            self.space.discard();

            #[cfg(feature = "tracing-log")]
            tracing::warn!(
                "[salvage] failed at file offset {}; store marked inconsistent, free list discarded",
                scan.scan_cursor()
            );
        }

        let mut report = scan.into_report();
        report.final_lsn = self.lsn;
        report.success = success;

        #[cfg(feature = "tracing-log")]
        tracing::info!(
            "[salvage] finished: {} pages, {} units skipped, lsn {}",
            report.pages_recovered,
            report.units_skipped,
            report.final_lsn
        );

        Ok(report)
    }
}
