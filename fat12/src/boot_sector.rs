// FAT12 boot sector decoding
//
// The boot sector is a fixed little-endian layout; the first 62 bytes
// carry everything this crate needs. Decoding is a pure function over
// a byte slice; nothing here touches the image source.

use byteorder::{ByteOrder, LittleEndian};

use crate::directory::DIR_ENTRY_LEN;

/// Number of decoded boot sector bytes (3+8+2+1+2+1+2+2+1+2+2+2+4+4+2+1+4+11+8).
pub const BOOT_SECTOR_LEN: usize = 62;

/// Decoded boot sector fields plus the layout math derived from them.
#[derive(Debug, Clone)]
pub struct BootSector {
    pub oem_name: [u8; 8],
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub fat_count: u8,
    pub root_entry_count: u16,
    pub total_sectors: u16,
    pub media_descriptor: u8,
    pub sectors_per_fat: u16,
    pub sectors_per_track: u16,
    pub head_count: u16,
    pub hidden_sectors: u32,
    pub total_sectors_32: u32,
    pub drive_number: u16,
    pub boot_signature: u8,
    pub serial_number: u32,
    pub volume_label: [u8; 11],
    pub filesystem_id: [u8; 8],
}

impl BootSector {
    /// Decode the fixed boot sector layout from its 62 bytes.
    pub fn decode(raw: &[u8; BOOT_SECTOR_LEN]) -> Self {
        let mut oem_name = [0u8; 8];
        oem_name.copy_from_slice(&raw[3..11]);
        let mut volume_label = [0u8; 11];
        volume_label.copy_from_slice(&raw[43..54]);
        let mut filesystem_id = [0u8; 8];
        filesystem_id.copy_from_slice(&raw[54..62]);

        BootSector {
            oem_name,
            bytes_per_sector: LittleEndian::read_u16(&raw[11..13]),
            sectors_per_cluster: raw[13],
            reserved_sectors: LittleEndian::read_u16(&raw[14..16]),
            fat_count: raw[16],
            root_entry_count: LittleEndian::read_u16(&raw[17..19]),
            total_sectors: LittleEndian::read_u16(&raw[19..21]),
            media_descriptor: raw[21],
            sectors_per_fat: LittleEndian::read_u16(&raw[22..24]),
            sectors_per_track: LittleEndian::read_u16(&raw[24..26]),
            head_count: LittleEndian::read_u16(&raw[26..28]),
            hidden_sectors: LittleEndian::read_u32(&raw[28..32]),
            total_sectors_32: LittleEndian::read_u32(&raw[32..36]),
            drive_number: LittleEndian::read_u16(&raw[36..38]),
            boot_signature: raw[38],
            serial_number: LittleEndian::read_u32(&raw[39..43]),
            volume_label,
            filesystem_id,
        }
    }

    /// Bytes in one cluster.
    pub fn bytes_per_cluster(&self) -> u32 {
        self.bytes_per_sector as u32 * self.sectors_per_cluster as u32
    }

    /// Byte offset of the first FAT.
    ///
    /// A fixed one-sector skip past the boot sector, not derived from
    /// the reserved sector count; only correct for volumes with one
    /// reserved sector, which is what the sample images use.
    pub fn fat_offset(&self) -> u64 {
        self.bytes_per_sector as u64
    }

    /// Byte offset of the first root directory slot.
    pub fn root_dir_offset(&self) -> u64 {
        let bps = self.bytes_per_sector as u64;
        self.reserved_sectors as u64 * bps
            + self.fat_count as u64 * self.sectors_per_fat as u64 * bps
    }

    /// Byte offset of the data region (cluster 2).
    pub fn data_region_offset(&self) -> u64 {
        self.root_dir_offset() + self.root_entry_count as u64 * DIR_ENTRY_LEN as u64
    }

    /// Total sector count, preferring the 16-bit field.
    pub fn sector_count(&self) -> u32 {
        if self.total_sectors != 0 {
            self.total_sectors as u32
        } else {
            self.total_sectors_32
        }
    }

    /// Number of data clusters on the volume, used to bound chain walks.
    pub fn total_clusters(&self) -> u32 {
        let first_data_sector =
            (self.data_region_offset() / self.bytes_per_sector as u64) as u32;
        let data_sectors = self.sector_count().saturating_sub(first_data_sector);
        data_sectors / self.sectors_per_cluster as u32
    }

    /// Volume label with trailing padding spaces removed.
    pub fn volume_label_string(&self) -> String {
        trim_padding(&self.volume_label)
    }

    /// Filesystem identifier with trailing padding spaces removed.
    pub fn filesystem_id_string(&self) -> String {
        trim_padding(&self.filesystem_id)
    }
}

fn trim_padding(field: &[u8]) -> String {
    let end = field
        .iter()
        .rposition(|&b| b != b' ')
        .map_or(0, |i| i + 1);
    String::from_utf8_lossy(&field[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_boot_sector() -> [u8; BOOT_SECTOR_LEN] {
        let mut raw = [0u8; BOOT_SECTOR_LEN];
        raw[0..3].copy_from_slice(&[0xEB, 0x3C, 0x90]);
        raw[3..11].copy_from_slice(b"MSDOS5.0");
        LittleEndian::write_u16(&mut raw[11..13], 512); // bytes per sector
        raw[13] = 1; // sectors per cluster
        LittleEndian::write_u16(&mut raw[14..16], 1); // reserved sectors
        raw[16] = 2; // FAT count
        LittleEndian::write_u16(&mut raw[17..19], 224); // root entries
        LittleEndian::write_u16(&mut raw[19..21], 2880); // total sectors
        raw[21] = 0xF0; // media descriptor
        LittleEndian::write_u16(&mut raw[22..24], 9); // sectors per FAT
        LittleEndian::write_u16(&mut raw[24..26], 18);
        LittleEndian::write_u16(&mut raw[26..28], 2);
        LittleEndian::write_u32(&mut raw[28..32], 0);
        LittleEndian::write_u32(&mut raw[32..36], 0);
        LittleEndian::write_u16(&mut raw[36..38], 0);
        raw[38] = 0x29;
        LittleEndian::write_u32(&mut raw[39..43], 0x1A2B_3C4D);
        raw[43..54].copy_from_slice(b"TESTVOL    ");
        raw[54..62].copy_from_slice(b"FAT12   ");
        raw
    }

    #[test]
    fn decodes_standard_floppy_geometry() {
        let boot = BootSector::decode(&sample_boot_sector());
        assert_eq!(boot.bytes_per_sector, 512);
        assert_eq!(boot.sectors_per_cluster, 1);
        assert_eq!(boot.reserved_sectors, 1);
        assert_eq!(boot.fat_count, 2);
        assert_eq!(boot.root_entry_count, 224);
        assert_eq!(boot.sectors_per_fat, 9);
        assert_eq!(boot.serial_number, 0x1A2B_3C4D);
        assert_eq!(boot.volume_label_string(), "TESTVOL");
        assert_eq!(boot.filesystem_id_string(), "FAT12");
    }

    #[test]
    fn derived_offsets_for_standard_floppy() {
        let boot = BootSector::decode(&sample_boot_sector());
        // 1 reserved sector + 2 FATs * 9 sectors, all 512 bytes wide.
        assert_eq!(boot.root_dir_offset(), 512 + 2 * 9 * 512);
        assert_eq!(
            boot.data_region_offset(),
            boot.root_dir_offset() + 224 * 32
        );
        assert_eq!(boot.bytes_per_cluster(), 512);
    }

    #[test]
    fn data_region_follows_root_directory() {
        let boot = BootSector::decode(&sample_boot_sector());
        assert!(boot.root_dir_offset() > 0);
        assert!(boot.data_region_offset() > boot.root_dir_offset());
    }

    #[test]
    fn sector_count_falls_back_to_32_bit_field() {
        let mut raw = sample_boot_sector();
        LittleEndian::write_u16(&mut raw[19..21], 0);
        LittleEndian::write_u32(&mut raw[32..36], 65_536);
        let boot = BootSector::decode(&raw);
        assert_eq!(boot.sector_count(), 65_536);
    }

    #[test]
    fn total_clusters_excludes_metadata_sectors() {
        let boot = BootSector::decode(&sample_boot_sector());
        // 2880 sectors minus boot, FATs, and 14 root directory sectors.
        assert_eq!(boot.total_clusters(), 2880 - (1 + 18 + 14));
    }
}
