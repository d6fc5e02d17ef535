//! # Salvage Scan Benchmarks
//!
//! Conditions:
//! - Clean stores: every probe is a page
//! - Shredded stores: random garbage between pages, one unit skipped per probe
//! - Compressed pages: verified read includes zstd decompression

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::time::Duration;

use block_salvage::test_utils::StoreImageBuilder;
use block_salvage::{
    BlockSalvageService, Crc32Checksum, DefaultCompressor, ExtentList, InMemoryBlockDevice,
    PageImageVerifier, SalvageApi, SalvageConfig, SalvageDependencies,
};

type BenchService = BlockSalvageService<
    InMemoryBlockDevice,
    PageImageVerifier<Crc32Checksum, DefaultCompressor>,
    ExtentList,
    Crc32Checksum,
>;

fn make_service(bytes: Vec<u8>, config: &SalvageConfig) -> BenchService {
    let deps = SalvageDependencies {
        device: InMemoryBlockDevice::new(bytes),
        verifier: PageImageVerifier::new(
            Crc32Checksum,
            block_salvage::default_compressor(&config.compression),
            config.max_decompressed_size,
        ),
        space: ExtentList::new(),
        checksum: Crc32Checksum,
    };
    BlockSalvageService::new(deps, config.clone()).expect("valid config")
}

/// Store of `pages` pages of 1-4 units with `garbage_ratio` of the slots shredded.
fn synthetic_store(config: &SalvageConfig, pages: usize, garbage_ratio: f64) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut builder = StoreImageBuilder::new(config);
    for lsn in 0..pages as u64 {
        if rng.gen_bool(garbage_ratio) {
            let mut junk = vec![0u8; config.allocation_size as usize * rng.gen_range(1..4)];
            rng.fill(&mut junk[..]);
            builder = builder.raw(&junk);
        } else {
            let units = rng.gen_range(1..=4u32);
            builder = builder.page_of_size(lsn, units * config.allocation_size);
        }
    }
    builder.build()
}

fn run_pass(bytes: &[u8], config: &SalvageConfig) -> u64 {
    let mut service = make_service(bytes.to_vec(), config);
    service.salvage_start().expect("start");
    while let Some(page) = service.salvage_next().expect("next") {
        black_box(page.data());
    }
    service.salvage_end(true).expect("end").bytes_recovered
}

pub fn bench_scan_clean_vs_shredded(c: &mut Criterion) {
    let config = SalvageConfig::default();
    let mut group = c.benchmark_group("salvage-scan");
    group.measurement_time(Duration::from_secs(10));

    for ratio in [0.0, 0.25, 0.75] {
        let bytes = synthetic_store(&config, 2_000, ratio);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("garbage_ratio", format!("{:.2}", ratio)),
            &bytes,
            |b, bytes| b.iter(|| black_box(run_pass(bytes, &config))),
        );
    }

    group.finish();
}

pub fn bench_scan_compressed(c: &mut Criterion) {
    let config = SalvageConfig::default();
    let compressor = block_salvage::default_compressor(&config.compression);
    let rows = b"key=000042 value=some moderately repetitive row text;".repeat(200);

    let mut builder = StoreImageBuilder::new(&config);
    for lsn in 0..500 {
        builder = builder.page_with(lsn, 0, &rows, &compressor);
    }
    let bytes = builder.build();

    let mut group = c.benchmark_group("salvage-scan");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("compressed_pages", |b| {
        b.iter(|| black_box(run_pass(&bytes, &config)))
    });
    group.finish();
}
