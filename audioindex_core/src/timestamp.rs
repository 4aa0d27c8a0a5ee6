//! Extraction of recording start times from file names.
//!
//! Deployment recordings are named `<prefix>_<id>_<DDMMYY>_<HHMMSS>.<ext>`,
//! for example `glider_19_010119_235950.wav` for a recording started on
//! 2019-01-01 at 23:59:50. The third and fourth underscore-separated fields
//! (zero-indexed positions 2 and 3 of the file stem) carry the start time.
//! The convention is specific to this dataset and deliberately kept as a
//! single documented parsing function rather than generalized.

use std::ffi::OsStr;
use std::path::Path;

use chrono::NaiveDateTime;
use thiserror::Error;

/// chrono format the concatenated date and time fields are parsed with.
pub const TIMESTAMP_FORMAT: &str = "%d%m%y%H%M%S";

/// Minimum number of underscore-separated fields in a conforming name.
const MIN_FIELDS: usize = 4;

/// Errors produced when a file name does not encode a start time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// The name does not contain enough underscore-separated fields.
    #[error("expected at least 4 underscore-separated fields, found {found}")]
    TooFewFields { found: usize },

    /// The date and time fields do not form a valid timestamp.
    #[error("'{value}' does not parse as ddmmyyhhmmss: {source}")]
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError,
    },
}

/// Parse the start time encoded in a recording file name.
///
/// The extension is ignored. Two-digit years expand by chrono's `%y`
/// century rule: 00-68 become 20xx, 69-99 become 19xx.
pub fn start_time(file_name: &str) -> Result<NaiveDateTime, TimestampError> {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or(file_name);

    let fields: Vec<&str> = stem.split('_').collect();
    if fields.len() < MIN_FIELDS {
        return Err(TimestampError::TooFewFields {
            found: fields.len(),
        });
    }

    let value = format!("{}{}", fields[2], fields[3]);
    NaiveDateTime::parse_from_str(&value, TIMESTAMP_FORMAT)
        .map_err(|source| TimestampError::InvalidTimestamp { value, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn datetime(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn parses_conforming_names() {
        assert_eq!(
            start_time("glider_19_010119_235950.wav").unwrap(),
            datetime(2019, 1, 1, 23, 59, 50)
        );
    }

    #[test]
    fn ignores_fields_beyond_the_timestamp() {
        assert_eq!(
            start_time("glider_19_020304_050607_retake.wav").unwrap(),
            datetime(2004, 3, 2, 5, 6, 7)
        );
    }

    #[test]
    fn expands_two_digit_years_with_the_century_rule() {
        assert_eq!(
            start_time("glider_19_010168_000000.wav").unwrap(),
            datetime(2068, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            start_time("glider_19_010169_000000.wav").unwrap(),
            datetime(1969, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn rejects_names_with_too_few_fields() {
        assert_eq!(
            start_time("glider_010119.wav").unwrap_err(),
            TimestampError::TooFewFields { found: 2 }
        );
        assert_eq!(
            start_time("glider_19_010119.wav").unwrap_err(),
            TimestampError::TooFewFields { found: 3 }
        );
    }

    #[test]
    fn rejects_non_numeric_timestamp_fields() {
        assert!(matches!(
            start_time("glider_19_0101xx_235950.wav"),
            Err(TimestampError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(matches!(
            start_time("glider_19_320119_235950.wav"),
            Err(TimestampError::InvalidTimestamp { .. })
        ));
    }
}
