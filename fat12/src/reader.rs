// FAT12 filesystem reader

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use log::{debug, info};
use retrofat_core::{Error, ImageReader, Result};

use crate::boot_sector::{BootSector, BOOT_SECTOR_LEN};
use crate::directory::{DirEntry, DIR_ENTRY_LEN};
use crate::fat_table::{self, FatTable};

/// Read-only view of a FAT12 volume: root directory listing and file
/// extraction over one shared image source.
pub struct Fat12Reader<R: Read + Seek> {
    image: ImageReader<R>,
    boot: BootSector,
    fat: FatTable,
}

impl Fat12Reader<File> {
    /// Open a FAT12 image from a filesystem path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(ImageReader::open(path)?)
    }
}

impl<R: Read + Seek> Fat12Reader<R> {
    pub fn new(mut image: ImageReader<R>) -> Result<Self> {
        let raw: [u8; BOOT_SECTOR_LEN] = image.read_array(0)?;
        let boot = BootSector::decode(&raw);
        let fat = FatTable::new(&boot);

        info!("FAT12 volume geometry:");
        info!("  Bytes per sector: {}", boot.bytes_per_sector);
        info!("  Sectors per cluster: {}", boot.sectors_per_cluster);
        info!("  Root entries: {}", boot.root_entry_count);
        info!("  Root directory offset: {:#x}", boot.root_dir_offset());
        info!("  Data region offset: {:#x}", boot.data_region_offset());

        Ok(Self { image, boot, fat })
    }

    pub fn boot_sector(&self) -> &BootSector {
        &self.boot
    }

    /// Volume label from the boot sector, padding trimmed.
    pub fn volume_label(&self) -> String {
        self.boot.volume_label_string()
    }

    /// Volume serial number from the boot sector.
    pub fn volume_serial(&self) -> u32 {
        self.boot.serial_number
    }

    /// Decode the root directory slot at `index`.
    pub fn root_entry(&mut self, index: u16) -> Result<DirEntry> {
        let offset = self.boot.root_dir_offset() + index as u64 * DIR_ENTRY_LEN as u64;
        let raw: [u8; DIR_ENTRY_LEN] = self.image.read_array(offset)?;
        Ok(DirEntry::decode(&raw))
    }

    /// Iterate over every root directory slot in order.
    ///
    /// Lazy and restartable: each slot is decoded on demand from its
    /// index and the geometry, with no state carried between runs.
    pub fn root_entries(&mut self) -> RootEntries<'_, R> {
        RootEntries {
            reader: self,
            index: 0,
        }
    }

    /// Read one full cluster from the data region.
    pub fn read_cluster(&mut self, cluster: u16) -> Result<Vec<u8>> {
        let cluster_size = self.boot.bytes_per_cluster() as usize;
        let offset = self.boot.data_region_offset()
            + (cluster as u64).saturating_sub(2) * cluster_size as u64;

        self.image.read_at(offset, cluster_size).map_err(|e| match e {
            Error::TruncatedImage {
                offset,
                needed,
                available,
            } => Error::ShortRead {
                offset,
                wanted: needed,
                got: available,
            },
            other => other,
        })
    }

    /// Reconstruct a file's bytes by walking its cluster chain.
    ///
    /// The final cluster is truncated to `file_size % cluster_size`
    /// bytes; when the size is an exact multiple of the cluster size
    /// that remainder is zero and the last cluster contributes
    /// nothing, reproducing the historical extraction output. The walk
    /// is bounded by the volume's cluster count so a looping chain
    /// reports `CorruptChain` instead of spinning forever.
    pub fn extract(&mut self, entry: &DirEntry) -> Result<Vec<u8>> {
        let cluster_size = self.boot.bytes_per_cluster() as usize;
        let max_steps = self.boot.total_clusters().max(1);
        let start = entry.starting_cluster;

        debug!(
            "extracting {} ({} bytes) from cluster {}",
            entry.file_name(),
            entry.file_size,
            start
        );

        let mut output = Vec::new();
        let mut current = start;
        let mut steps = 0u32;

        while !fat_table::is_end_of_chain(current) {
            steps += 1;
            if steps > max_steps {
                return Err(Error::CorruptChain {
                    start_cluster: start,
                    steps,
                });
            }

            let mut buffer = self.read_cluster(current)?;
            current = self.fat.next_cluster(&mut self.image, current)?;

            if fat_table::is_end_of_chain(current) {
                buffer.truncate(entry.file_size as usize % cluster_size);
            }

            output.extend_from_slice(&buffer);
        }

        debug!("chain for {} spanned {} cluster(s)", entry.file_name(), steps);
        Ok(output)
    }
}

/// Iterator over root directory slots, in slot order.
pub struct RootEntries<'a, R: Read + Seek> {
    reader: &'a mut Fat12Reader<R>,
    index: u16,
}

impl<R: Read + Seek> Iterator for RootEntries<'_, R> {
    type Item = Result<DirEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.reader.boot.root_entry_count {
            return None;
        }
        let item = self.reader.root_entry(self.index);
        self.index += 1;
        Some(item)
    }
}
