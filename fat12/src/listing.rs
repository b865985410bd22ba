// Directory listing formatting
//
// Pure string builders so the layout is testable without an image or
// a terminal; the CLI only prints what these return.

use crate::directory::DirEntry;
use crate::timestamps;

/// Format an integer with comma thousands grouping.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Two-line volume header shown above the listing.
pub fn volume_header(label: &str, serial: u32) -> String {
    format!(
        " Volume name is {}\n Volume Serial Number is {:X}",
        label, serial
    )
}

/// One listing line: name, extension, grouped size, date, time.
pub fn entry_line(entry: &DirEntry) -> String {
    format!(
        "{:<8} {:<3} {:>12} {}  {}",
        entry.base_name(),
        entry.extension_str(),
        group_thousands(entry.file_size as u64),
        timestamps::format_date(entry.modified_date),
        timestamps::format_time(entry.modified_time),
    )
}

/// Trailing summary line with file count and total bytes.
pub fn summary_line(count: usize, total_bytes: u64) -> String {
    format!(
        "{:>9} file(s) {:>13} bytes",
        count,
        group_thousands(total_bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_commas() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(13), "13");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(1_000_000_000), "1,000,000,000");
    }

    #[test]
    fn entry_line_layout() {
        let entry = DirEntry {
            name: *b"HELLO   ",
            extension: *b"TXT",
            attributes: 0x20,
            // 2:30p on 03-26-89
            modified_time: (14 << 11) | (30 << 5),
            modified_date: (9 << 9) | (3 << 5) | 26,
            starting_cluster: 2,
            file_size: 13,
        };
        assert_eq!(
            entry_line(&entry),
            "HELLO    TXT           13 03-26-89   2:30p"
        );
    }

    #[test]
    fn summary_line_layout() {
        assert_eq!(
            summary_line(1, 13),
            "        1 file(s)            13 bytes"
        );
        assert_eq!(
            summary_line(12, 1_456_238),
            "       12 file(s)     1,456,238 bytes"
        );
    }

    #[test]
    fn volume_header_lines() {
        assert_eq!(
            volume_header("TESTVOL", 0x1A2B3C4D),
            " Volume name is TESTVOL\n Volume Serial Number is 1A2B3C4D"
        );
    }
}
