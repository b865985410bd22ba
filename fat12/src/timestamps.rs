// MS-DOS packed date/time handling
//
// Date: bits 15-9 year since 1980, bits 8-5 month, bits 4-0 day.
// Time: bits 15-11 hours, bits 10-5 minutes, bits 4-0 seconds/2.

use chrono::{NaiveDate, NaiveDateTime};

/// Unpack a FAT date into (year, month, day).
pub fn unpack_date(date: u16) -> (u16, u8, u8) {
    let year = ((date >> 9) & 0x7F) + 1980;
    let month = ((date >> 5) & 0x0F) as u8;
    let day = (date & 0x1F) as u8;
    (year, month, day)
}

/// Unpack a FAT time into (hours, minutes, seconds).
pub fn unpack_time(time: u16) -> (u8, u8, u8) {
    let hours = ((time >> 11) & 0x1F) as u8;
    let minutes = ((time >> 5) & 0x3F) as u8;
    let seconds = ((time & 0x1F) * 2) as u8;
    (hours, minutes, seconds)
}

/// Convert a packed date/time pair to a [`NaiveDateTime`].
///
/// Returns `None` for field values outside the calendar (month 0,
/// day 32, and so on), which unformatted slots commonly contain.
pub fn to_datetime(date: u16, time: u16) -> Option<NaiveDateTime> {
    let (year, month, day) = unpack_date(date);
    let (hours, minutes, seconds) = unpack_time(time);
    NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)?
        .and_hms_opt(hours as u32, minutes as u32, seconds as u32)
}

/// Format a packed date as `MM-DD-YY`.
pub fn format_date(date: u16) -> String {
    let (year, month, day) = unpack_date(date);
    format!("{:02}-{:02}-{:02}", month, day, year % 100)
}

/// Format a packed time as `H:MM` plus an `a`/`p` meridian.
///
/// Hours above 12 wrap to the afternoon; hour 0 prints as 12. Hour 12
/// itself keeps the `a` meridian, matching historical output.
pub fn format_time(time: u16) -> String {
    let (mut hours, minutes, _) = unpack_time(time);
    let mut meridian = 'a';

    if hours > 12 {
        hours -= 12;
        meridian = 'p';
    }
    if hours == 0 {
        hours = 12;
    }

    format!("{:>2}:{:02}{}", hours, minutes, meridian)
}
