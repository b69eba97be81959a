//! Header timestamps: `YYYY/MM/DD HH:MM:SS`, 24-hour, zero-padded.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::constants::TIMESTAMP_FORMAT;

pub fn format_timestamp<Tz>(datetime: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    datetime.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time in header format.
pub fn now() -> String {
    format_timestamp(&Local::now())
}
