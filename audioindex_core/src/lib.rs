use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use log::info;
use thiserror::Error;

pub mod probe;
pub mod report;
pub mod timestamp;

pub use probe::MetadataProbe;
pub use report::{FileRecord, REPORT_HEADER, TIME_FORMAT};

use crate::timestamp::TimestampError;

/// Dataset label written in the first column of every row unless overridden.
pub const DEFAULT_DATASET_NAME: &str = "Glider SPAms 2019";

/// Report file name used when no output path is configured.
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "dataset_files.csv";

/// File extension a recording must carry unless overridden, without the dot.
pub const DEFAULT_EXTENSION: &str = "wav";

/// Audio inspection tool invoked unless overridden.
pub const DEFAULT_TOOL: &str = "soxi";

/// Errors that can occur while building a dataset inventory.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Wrapper around IO errors encountered while reading the input
    /// directory or writing the report.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Error returned when the configured input path is not a directory.
    #[error("input path '{0}' is not a directory")]
    NotADirectory(PathBuf),

    /// Error returned when a directory entry name is not valid UTF-8.
    #[error("file name '{0}' is not valid UTF-8")]
    NonUtf8FileName(PathBuf),

    /// Error returned when a file name does not follow the recording
    /// naming convention.
    #[error(
        "file name '{file_name}' does not follow the \
         '<prefix>_<id>_<ddmmyy>_<hhmmss>' naming convention: {reason}"
    )]
    FilenameConvention {
        file_name: String,
        reason: TimestampError,
    },

    /// Error returned when the inspection tool cannot be spawned.
    #[error("failed to launch inspection tool '{tool}': {source}")]
    ProbeLaunch {
        tool: String,
        source: std::io::Error,
    },

    /// Error returned when the inspection tool exits unsuccessfully.
    #[error("inspection tool failed for '{file_name}' ({status}): {stderr}")]
    ProbeFailed {
        file_name: String,
        status: ExitStatus,
        stderr: String,
    },

    /// Error returned when the inspection tool output cannot be read as an
    /// integer.
    #[error("could not read {query} for '{file_name}' from tool output '{raw}'")]
    ProbeOutput {
        file_name: String,
        query: &'static str,
        raw: String,
    },

    /// Error returned when adding the duration to the start time leaves the
    /// supported calendar range.
    #[error("recording '{file_name}' ends outside the supported date range")]
    EndTimeOutOfRange { file_name: String },
}

/// Configuration for one inventory run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Canonicalized directory scanned for recordings.
    pub input_dir: PathBuf,
    /// Path the finished report is written to.
    pub output_path: PathBuf,
    /// Dataset label emitted in the first column of every row.
    pub dataset_name: String,
    /// File extension a recording must carry, without the dot.
    pub extension: String,
    /// Inspection tool invoked for duration and sample rate queries.
    pub tool: String,
}

impl Config {
    /// Construct a [`Config`] with default settings, canonicalizing the
    /// input directory.
    pub fn new<P: AsRef<Path>>(input_dir: P) -> Result<Self, InventoryError> {
        Self::builder(input_dir).build()
    }

    /// Start building a [`Config`] for `input_dir`.
    pub fn builder<P: AsRef<Path>>(input_dir: P) -> ConfigBuilder {
        ConfigBuilder {
            input_dir: input_dir.as_ref().to_path_buf(),
            output_path: None,
            dataset_name: DEFAULT_DATASET_NAME.to_owned(),
            extension: DEFAULT_EXTENSION.to_owned(),
            tool: DEFAULT_TOOL.to_owned(),
        }
    }
}

/// Builder for [`Config`].
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    input_dir: PathBuf,
    output_path: Option<PathBuf>,
    dataset_name: String,
    extension: String,
    tool: String,
}

impl ConfigBuilder {
    /// Override the dataset label.
    pub fn dataset_name<S: Into<String>>(mut self, name: S) -> Self {
        self.dataset_name = name.into();
        self
    }

    /// Write the report to `path` instead of `dataset_files.csv` inside the
    /// input directory.
    pub fn output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Override the recording extension, without the dot.
    pub fn extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.extension = extension.into();
        self
    }

    /// Override the inspection tool; a bare name is resolved via `PATH`.
    pub fn tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = tool.into();
        self
    }

    /// Validate the settings and build the [`Config`].
    pub fn build(self) -> Result<Config, InventoryError> {
        let input_dir = fs::canonicalize(&self.input_dir)?;
        if !input_dir.is_dir() {
            return Err(InventoryError::NotADirectory(input_dir));
        }

        let output_path = self
            .output_path
            .unwrap_or_else(|| input_dir.join(DEFAULT_OUTPUT_FILE_NAME));

        Ok(Config {
            input_dir,
            output_path,
            dataset_name: self.dataset_name,
            extension: self.extension,
            tool: self.tool,
        })
    }
}

/// Progress notifications emitted while the inventory is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Emitted once, before the first recording is queried.
    Start { total_files: usize },
    /// Emitted after a recording has been fully queried.
    Advance { file_name: String, processed: usize },
    /// Emitted after the report has been written.
    Finish,
}

/// Outcome of a completed inventory run.
#[derive(Clone, Debug)]
pub struct InventorySummary {
    /// Number of recordings written to the report.
    pub recordings: usize,
    /// Path the report was written to.
    pub output_path: PathBuf,
}

/// Return the recording file names `run` would inventory, in processing
/// order, without querying metadata or writing anything.
pub fn plan_recordings(config: &Config) -> Result<Vec<String>, InventoryError> {
    list_recordings(&config.input_dir, &config.extension)
}

/// Build the inventory described by `config` and write the report.
pub fn run(config: Config) -> Result<InventorySummary, InventoryError> {
    run_with_progress(config, |_| {})
}

/// Like [`run`], reporting progress through the supplied callback.
///
/// Recordings are processed strictly one at a time, in sorted name order;
/// the first error aborts the run before the report is written.
pub fn run_with_progress<F>(
    config: Config,
    mut progress: F,
) -> Result<InventorySummary, InventoryError>
where
    F: FnMut(ProgressEvent),
{
    let file_names = list_recordings(&config.input_dir, &config.extension)?;
    info!(
        "inventorying {} recording(s) in '{}'",
        file_names.len(),
        config.input_dir.display()
    );
    progress(ProgressEvent::Start {
        total_files: file_names.len(),
    });

    let probe = MetadataProbe::new(config.tool.as_str());
    let mut records = Vec::with_capacity(file_names.len());
    for (index, file_name) in file_names.iter().enumerate() {
        let start_time = timestamp::start_time(file_name).map_err(|reason| {
            InventoryError::FilenameConvention {
                file_name: file_name.clone(),
                reason,
            }
        })?;

        let path = config.input_dir.join(file_name);
        let duration_secs = probe.duration_secs(&path)?;
        let sample_rate_hz = probe.sample_rate_hz(&path)?;

        records.push(FileRecord::new(
            file_name.clone(),
            start_time,
            duration_secs,
            sample_rate_hz,
        )?);
        progress(ProgressEvent::Advance {
            file_name: file_name.clone(),
            processed: index + 1,
        });
    }

    let report = report::render(&config.dataset_name, &records);
    fs::write(&config.output_path, report)?;
    info!("wrote report to '{}'", config.output_path.display());
    progress(ProgressEvent::Finish);

    Ok(InventorySummary {
        recordings: records.len(),
        output_path: config.output_path,
    })
}

/// List the file names in `input_dir` carrying `extension`, sorted
/// lexicographically.
///
/// Subdirectories are never entered and non-file entries are skipped. The
/// sorted order keeps reruns over an unchanged directory byte-identical.
fn list_recordings(input_dir: &Path, extension: &str) -> Result<Vec<String>, InventoryError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.path().extension().and_then(|ext| ext.to_str()) != Some(extension) {
            continue;
        }
        let file_name = entry
            .file_name()
            .into_string()
            .map_err(|name| InventoryError::NonUtf8FileName(PathBuf::from(name)))?;
        names.push(file_name);
    }
    names.sort_unstable();
    Ok(names)
}
