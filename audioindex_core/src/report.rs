//! Row formatting and report assembly.

use chrono::{NaiveDateTime, TimeDelta};

use crate::InventoryError;

/// Column header of the report.
pub const REPORT_HEADER: &str =
    "dataset_name, filename, audio_start, audio_end, audio_sample_rate_khz";

/// chrono format both timestamps are rendered with.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One inventoried recording, ready to be rendered as a report row.
#[derive(Clone, Debug, PartialEq)]
pub struct FileRecord {
    /// Name of the recording within the input directory.
    pub file_name: String,
    /// Start of the recording, decoded from the file name.
    pub start_time: NaiveDateTime,
    /// End of the recording: start time plus the probed duration.
    pub end_time: NaiveDateTime,
    /// Probed sample rate converted to kHz.
    pub sample_rate_khz: f64,
}

impl FileRecord {
    /// Build a record from the probed metadata.
    ///
    /// The end time is computed with calendar-aware arithmetic, so a
    /// recording started just before midnight rolls over into the next
    /// day, month or year as needed.
    pub fn new(
        file_name: String,
        start_time: NaiveDateTime,
        duration_secs: u64,
        sample_rate_hz: u64,
    ) -> Result<Self, InventoryError> {
        let end_time = i64::try_from(duration_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| start_time.checked_add_signed(delta))
            .ok_or_else(|| InventoryError::EndTimeOutOfRange {
                file_name: file_name.clone(),
            })?;

        Ok(Self {
            file_name,
            start_time,
            end_time,
            sample_rate_khz: sample_rate_hz as f64 / 1000.0,
        })
    }

    fn to_row(&self, dataset_name: &str) -> String {
        format!(
            "{dataset_name}, {}, {}, {}, {}",
            self.file_name,
            self.start_time.format(TIME_FORMAT),
            self.end_time.format(TIME_FORMAT),
            format_khz(self.sample_rate_khz),
        )
    }
}

/// Render a sample rate with an explicit decimal point even when whole, so
/// 48000 Hz reads as `48.0` and 44100 Hz as `44.1`.
fn format_khz(khz: f64) -> String {
    if khz.fract() == 0.0 {
        format!("{khz:.1}")
    } else {
        format!("{khz}")
    }
}

/// Assemble the complete report: the header line, then one row per record.
///
/// Rows are joined by single newlines with no trailing newline after the
/// last row; an empty inventory renders as exactly the header line.
pub fn render(dataset_name: &str, records: &[FileRecord]) -> String {
    let rows: Vec<String> = records
        .iter()
        .map(|record| record.to_row(dataset_name))
        .collect();
    format!("{REPORT_HEADER}\n{}", rows.join("\n"))
}
