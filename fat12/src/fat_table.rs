// 12-bit FAT entry decoding
//
// FAT12 packs two entries into every three bytes. An even-numbered
// cluster takes the low 12 bits of the u16 at its byte offset, an
// odd-numbered one the high 12 bits.

use std::io::{Read, Seek};

use retrofat_core::{ImageReader, Result};

use crate::boot_sector::BootSector;

/// First value of the end-of-chain marker range.
pub const END_OF_CHAIN: u16 = 0xFF8;

/// Whether a FAT value terminates a cluster chain.
pub fn is_end_of_chain(cluster: u16) -> bool {
    cluster >= END_OF_CHAIN
}

/// Walks the first FAT of a volume.
pub struct FatTable {
    fat_offset: u64,
}

impl FatTable {
    pub fn new(boot: &BootSector) -> Self {
        FatTable {
            fat_offset: boot.fat_offset(),
        }
    }

    /// Look up the FAT entry for `current`, returning the next cluster
    /// in the chain (or an end-of-chain marker value).
    ///
    /// Reserved values 0x000/0x001 are returned as-is; callers
    /// terminate solely on the end-of-chain threshold.
    pub fn next_cluster<R: Read + Seek>(
        &self,
        image: &mut ImageReader<R>,
        current: u16,
    ) -> Result<u16> {
        let offset = self.fat_offset + (current as u64 * 3) / 2;
        let raw = image.read_at(offset, 2)?;
        let packed = u16::from_le_bytes([raw[0], raw[1]]);

        Ok(if current % 2 == 0 {
            packed & 0x0FFF
        } else {
            (packed >> 4) & 0x0FFF
        })
    }
}
