//! Duration and sample rate queries against an external inspection tool.
//!
//! The tool contract is minimal: invoked with a mode flag and a file path it
//! prints a single number to stdout and exits 0. `soxi` from the SoX
//! distribution satisfies it (`-D` prints the duration in seconds, `-r` the
//! sample rate in Hz). The file path is always passed as a discrete
//! argument, so names containing spaces or shell metacharacters cannot
//! alter the command. Queries block without a timeout.

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::InventoryError;

/// Flag that makes the tool print the duration in seconds.
const DURATION_FLAG: &str = "-D";

/// Flag that makes the tool print the sample rate in Hz.
const SAMPLE_RATE_FLAG: &str = "-r";

/// Handle for the configured inspection tool.
#[derive(Clone, Debug)]
pub struct MetadataProbe {
    tool: String,
}

impl MetadataProbe {
    /// Create a probe invoking `tool`; a bare name is resolved via `PATH`.
    pub fn new<S: Into<String>>(tool: S) -> Self {
        Self { tool: tool.into() }
    }

    /// Query the duration of `path` in whole seconds.
    pub fn duration_secs(&self, path: &Path) -> Result<u64, InventoryError> {
        self.query(DURATION_FLAG, "duration", path)
    }

    /// Query the sample rate of `path` in Hz.
    pub fn sample_rate_hz(&self, path: &Path) -> Result<u64, InventoryError> {
        self.query(SAMPLE_RATE_FLAG, "sample rate", path)
    }

    fn query(
        &self,
        flag: &str,
        query: &'static str,
        path: &Path,
    ) -> Result<u64, InventoryError> {
        let output = Command::new(&self.tool)
            .arg(flag)
            .arg(path)
            .output()
            .map_err(|source| InventoryError::ProbeLaunch {
                tool: self.tool.clone(),
                source,
            })?;

        let file_name = display_name(path);
        if !output.status.success() {
            return Err(InventoryError::ProbeFailed {
                file_name,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        let raw = String::from_utf8_lossy(&output.stdout).trim().to_owned();
        debug!("{} {flag} '{}' -> '{raw}'", self.tool, path.display());
        leading_integer(&raw).ok_or(InventoryError::ProbeOutput {
            file_name,
            query,
            raw,
        })
    }
}

/// Parse the leading run of ASCII digits as an integer.
///
/// The inspection tool may print fractional or annotated values (`soxi -D`
/// emits `20.000000`); the leading digits carry the whole-second and
/// whole-Hz counts the inventory needs. Returns `None` when the text does
/// not start with a digit or the value overflows.
fn leading_integer(text: &str) -> Option<u64> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    text[..end].parse().ok()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
