// Root directory entry decoding and 8.3 name handling

use byteorder::{ByteOrder, LittleEndian};

/// Size of one root directory slot in bytes.
pub const DIR_ENTRY_LEN: usize = 32;

/// Directory entry attribute bits.
pub mod attributes {
    pub const READ_ONLY: u8 = 0x01;
    pub const HIDDEN: u8 = 0x02;
    pub const SYSTEM: u8 = 0x04;
    pub const VOLUME_ID: u8 = 0x08;
    pub const DIRECTORY: u8 = 0x10;
    pub const ARCHIVE: u8 = 0x20;
}

/// One 32-byte root directory slot, decoded.
///
/// Immutable once read; a slot is re-derivable from its index and the
/// volume geometry alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: [u8; 8],
    pub extension: [u8; 3],
    pub attributes: u8,
    pub modified_time: u16,
    pub modified_date: u16,
    pub starting_cluster: u16,
    pub file_size: u32,
}

impl DirEntry {
    /// Decode a 32-byte directory slot.
    ///
    /// Layout: 8-byte name, 3-byte extension, attribute byte, 10
    /// reserved bytes, packed time, packed date, starting cluster,
    /// file size. The reserved bytes are skipped.
    pub fn decode(raw: &[u8; DIR_ENTRY_LEN]) -> Self {
        let mut name = [0u8; 8];
        name.copy_from_slice(&raw[0..8]);
        let mut extension = [0u8; 3];
        extension.copy_from_slice(&raw[8..11]);

        DirEntry {
            name,
            extension,
            attributes: raw[11],
            modified_time: LittleEndian::read_u16(&raw[22..24]),
            modified_date: LittleEndian::read_u16(&raw[24..26]),
            starting_cluster: LittleEndian::read_u16(&raw[26..28]),
            file_size: LittleEndian::read_u32(&raw[28..32]),
        }
    }

    /// Whether this slot holds a listable, extractable file.
    ///
    /// A slot is skipped when its starting cluster is zero, its first
    /// name byte marks it free/deleted (0x00, 0x20, 0xE5, 0x05), or
    /// the volume-label attribute bit is set.
    pub fn is_valid(&self) -> bool {
        if self.starting_cluster == 0 {
            return false;
        }
        if matches!(self.name[0], 0x00 | 0x20 | 0xE5 | 0x05) {
            return false;
        }
        self.attributes & attributes::VOLUME_ID == 0
    }

    /// Name field with trailing padding spaces removed.
    ///
    /// Only trailing 0x20 bytes are stripped; FAT12 permits embedded
    /// spaces in short names and those are kept.
    pub fn base_name(&self) -> String {
        trim_trailing_spaces(&self.name)
    }

    /// Extension field with trailing padding spaces removed.
    pub fn extension_str(&self) -> String {
        trim_trailing_spaces(&self.extension)
    }

    /// Reconstructed short filename: `NAME.EXT`, or just `NAME` when
    /// the trimmed extension is empty.
    pub fn file_name(&self) -> String {
        let base = self.base_name();
        let ext = self.extension_str();
        if ext.is_empty() {
            base
        } else {
            format!("{}.{}", base, ext)
        }
    }
}

fn trim_trailing_spaces(field: &[u8]) -> String {
    let end = field
        .iter()
        .rposition(|&b| b != b' ')
        .map_or(0, |i| i + 1);
    String::from_utf8_lossy(&field[..end]).into_owned()
}
