// FAT12 on-disk structure decoding: boot sector, root directory,
// 12-bit cluster chains, and file extraction.

pub mod boot_sector;
pub mod directory;
pub mod fat_table;
pub mod listing;
pub mod reader;
pub mod timestamps;

pub use boot_sector::BootSector;
pub use directory::DirEntry;
pub use fat_table::{FatTable, END_OF_CHAIN};
pub use reader::Fat12Reader;
