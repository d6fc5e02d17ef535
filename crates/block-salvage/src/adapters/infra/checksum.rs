use crate::ports::outbound::ChecksumProvider;

/// Default checksum provider using crc32fast.
///
/// CRC32 (IEEE) over page images and the description sector.
#[derive(Debug, Default, Clone, Copy)]
pub struct Crc32Checksum;

impl ChecksumProvider for Crc32Checksum {
    fn checksum(&self, data: &[u8]) -> u32 {
        crc32fast::hash(data)
    }

    fn checksum_parts(&self, parts: &[&[u8]]) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize()
    }
}
