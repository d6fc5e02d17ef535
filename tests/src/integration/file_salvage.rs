//! # File-Backed Salvage
//!
//! Full passes over store files created in a temp dir, driven through
//! `FileSalvageService` exactly as a host would.

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::TempDir;

    use block_salvage::test_utils::{reference_store, StoreImageBuilder};
    use block_salvage::{
        BlockDevice, Crc32Checksum, DescriptionRecord, FileSalvageService, NoOpCompressor,
        PageImage, SalvageApi, SalvageConfig, SalvagedPage,
    };

    use crate::integration::fixtures::{init_tracing, write_store};

    fn drain(store: &mut FileSalvageService) -> Result<Vec<SalvagedPage>> {
        let mut pages = Vec::new();
        while let Some(page) = store.salvage_next()? {
            pages.push(page);
        }
        Ok(pages)
    }

    #[test]
    fn test_reference_store_on_disk() -> Result<()> {
        init_tracing();
        let dir = TempDir::new()?;
        let config = SalvageConfig::default();
        let path = write_store(dir.path(), &reference_store(&config))?;

        let mut store = FileSalvageService::open(&path, config)?;
        store.salvage_start()?;
        let pages = drain(&mut store)?;
        let report = store.salvage_end(true)?;

        let found: Vec<(u64, u32, u64)> =
            pages.iter().map(|p| (p.offset, p.size(), p.lsn())).collect();
        assert_eq!(found, vec![(512, 1024, 7), (2048, 512, 12)]);
        assert_eq!(store.lsn(), 12);
        assert_eq!(store.space().extents(), vec![(1536, 512)]);
        assert_eq!(report.units_skipped, 1);
        drop(store);

        let on_disk = std::fs::read(&path)?;
        assert_eq!(on_disk.len(), 2560);
        DescriptionRecord::decode(&on_disk[..512], &Crc32Checksum)?;
        Ok(())
    }

    #[test]
    fn test_partial_trailing_unit_removed_from_file() -> Result<()> {
        init_tracing();
        let dir = TempDir::new()?;
        let config = SalvageConfig::default();
        let mut bytes = reference_store(&config);
        bytes.extend_from_slice(&[0x5A; 300]);
        let path = write_store(dir.path(), &bytes)?;

        let mut store = FileSalvageService::open(&path, config)?;
        store.salvage_start()?;
        assert_eq!(std::fs::metadata(&path)?.len(), 2560);

        assert_eq!(drain(&mut store)?.len(), 2);
        let report = store.salvage_end(true)?;
        assert_eq!(report.bytes_truncated, 300);
        Ok(())
    }

    #[test]
    fn test_rewritten_page_found_by_next_pass() -> Result<()> {
        init_tracing();
        let dir = TempDir::new()?;
        let config = SalvageConfig::default();
        let path = write_store(dir.path(), &reference_store(&config))?;

        let mut store = FileSalvageService::open(&path, config.clone())?;
        store.salvage_start()?;
        drain(&mut store)?;
        store.salvage_end(true)?;

        // Reconciled page goes into the freed unit with an LSN above the watermark.
        let (offset, len) = store.space().extents()[0];
        let image = PageImage::build(
            store.lsn() + 1,
            0,
            b"reconciled",
            &NoOpCompressor,
            &Crc32Checksum,
            &config,
        )?;
        assert_eq!(image.len() as u64, len);
        store.device_mut().write_at(offset, &image)?;
        store.device_mut().sync()?;
        drop(store);

        let mut store = FileSalvageService::open(&path, config)?;
        store.salvage_start()?;
        let pages = drain(&mut store)?;
        store.salvage_end(true)?;

        let lsns: Vec<u64> = pages.iter().map(|p| p.lsn()).collect();
        assert_eq!(lsns, vec![7, 13, 12]);
        assert_eq!(pages[1].data(), b"reconciled");
        assert_eq!(store.lsn(), 13);
        assert!(store.space().is_empty());
        Ok(())
    }

    #[test]
    fn test_failed_pass_marks_store_inconsistent() -> Result<()> {
        init_tracing();
        let dir = TempDir::new()?;
        let config = SalvageConfig::default();
        let path = write_store(dir.path(), &reference_store(&config))?;

        let mut store = FileSalvageService::open(&path, config.clone())?;
        store.salvage_start()?;
        store.salvage_next()?;
        let report = store.salvage_end(false)?;

        assert!(!report.success);
        assert_eq!(report.pages_recovered, 1);
        assert!(!store.is_consistent());
        assert!(store.space().is_empty());
        drop(store);

        // Lock is released with the store; a fresh pass can run.
        let mut store = FileSalvageService::open(&path, config)?;
        store.salvage_start()?;
        assert_eq!(drain(&mut store)?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_compressed_and_corrupt_pages() -> Result<()> {
        use block_salvage::ZstdCompressor;

        init_tracing();
        let dir = TempDir::new()?;
        let config = SalvageConfig::default();
        let zstd = ZstdCompressor::new(config.compression.clone());
        let rows = b"key=0001 value=alpha;".repeat(400);

        let bytes = StoreImageBuilder::new(&config)
            .page_with(20, 1, &rows, &zstd)
            .corrupt_page(99, 1024)
            .garbage(2, 0x00)
            .page_with(21, 2, &rows, &NoOpCompressor)
            .build();
        let path = write_store(dir.path(), &bytes)?;

        let mut store = FileSalvageService::open(&path, config)?;
        store.salvage_start()?;
        let pages = drain(&mut store)?;
        let report = store.salvage_end(true)?;

        assert_eq!(pages.len(), 2);
        assert!(pages[0].content.header.is_compressed());
        assert!(!pages[1].content.header.is_compressed());
        assert_eq!(pages[0].data(), &rows[..]);
        assert_eq!(pages[1].data(), &rows[..]);
        assert_eq!(store.lsn(), 21);
        assert_eq!(report.verification_failures, 1);
        assert_eq!(report.units_skipped, 4);
        Ok(())
    }

    #[test]
    fn test_config_loaded_from_json() -> Result<()> {
        init_tracing();
        let dir = TempDir::new()?;
        let config_path = dir.path().join("salvage.json");
        std::fs::write(
            &config_path,
            r#"{ "allocation_size": 1024, "max_page_size": 65536 }"#,
        )?;
        let config: SalvageConfig = serde_json::from_slice(&std::fs::read(&config_path)?)?;
        assert_eq!(config.description_sector_size, 512);

        let bytes = StoreImageBuilder::new(&config)
            .garbage(1, 0xC3)
            .page(5, b"one kilobyte unit")
            .build();
        let path = write_store(dir.path(), &bytes)?;

        let mut store = FileSalvageService::open(&path, config)?;
        store.salvage_start()?;
        let pages = drain(&mut store)?;

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].offset, 512 + 1024);
        assert_eq!(pages[0].size(), 1024);
        Ok(())
    }

    #[test]
    fn test_invalid_config_refused_before_scan() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_store(dir.path(), &[0u8; 1024])?;
        let config = SalvageConfig::default().with_max_page_size(1000);

        assert!(FileSalvageService::open(&path, config).is_err());
        assert_eq!(std::fs::metadata(&path)?.len(), 1024);
        Ok(())
    }
}
