//! Human-readable and JSON reports for the command line.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use md5::{Digest, Md5};
use rb_core::{megabytes, EntropyProfile, ReductionResult, ReductionSummary};
use serde::Serialize;

/// Suffix appended to the input name for the reduced file.
pub const REDUCED_SUFFIX: &str = ".reduced";

/// `<input>.reduced`, next to the input.
pub fn output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(REDUCED_SUFFIX);
    PathBuf::from(name)
}

/// Uppercase MD5 hex digest.
pub fn md5_hex(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hex::encode_upper(hasher.finalize())
}

/// First and last 8 hex digits of a block, uppercase, always joined by
/// `...`. Blocks shorter than 4 bytes repeat their digits on both sides.
pub fn hex_preview(block: &[u8]) -> String {
    let digits = hex::encode_upper(block);
    let head = &digits[..digits.len().min(8)];
    let tail = &digits[digits.len().saturating_sub(8)..];
    format!("{}...{}", head, tail)
}

/// Wall-clock duration as `HH:MM:SS`. Hours do not wrap at 24.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}

/// Path, size and digest of one side of a reduction.
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub path: String,
    pub size: u64,
    pub size_mb: f64,
    pub md5: String,
}

impl FileInfo {
    pub fn new(path: &Path, data: &[u8]) -> Self {
        Self {
            path: path.display().to_string(),
            size: data.len() as u64,
            size_mb: megabytes(data.len() as u64),
            md5: md5_hex(data),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReductionReport {
    pub input: FileInfo,
    pub output: FileInfo,
    pub reduction: ReductionSummary,
    pub mode_block_preview: String,
    pub elapsed: String,
}

impl ReductionReport {
    pub fn new(input: FileInfo, output: FileInfo, result: &ReductionResult, elapsed: Duration) -> Self {
        Self {
            input,
            output,
            reduction: result.summary(),
            mode_block_preview: hex_preview(&result.mode_block),
            elapsed: format_elapsed(elapsed),
        }
    }
}

impl fmt::Display for ReductionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.reduction;
        writeln!(f, "INPUT      : {}", self.input.path)?;
        writeln!(f, "Size       : {:.2} MB", self.input.size_mb)?;
        writeln!(f, "Hash MD5   : {}", self.input.md5)?;
        writeln!(
            f,
            "String HEX : {} (length = {})",
            self.mode_block_preview, r.block_len
        )?;
        writeln!(f, "Count      : {} (occurrences)", r.occurrence_count)?;
        writeln!(f)?;
        writeln!(f, "OUTPUT     : {}", self.output.path)?;
        writeln!(f, "Size       : {:.2} MB", self.output.size_mb)?;
        writeln!(f, "Hash MD5   : {}", self.output.md5)?;
        writeln!(f)?;
        writeln!(f, "Reduction  : {:.2} %", r.reduction_percent)?;
        writeln!(f, "Time       : {}", self.elapsed)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntropyReport {
    pub path: String,
    pub entropy: f64,
    /// Per-block breakdown; absent when no block length applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<EntropyProfile>,
}

impl EntropyReport {
    pub fn new(path: &Path, entropy: f64, profile: Option<EntropyProfile>) -> Self {
        Self {
            path: path.display().to_string(),
            entropy: (entropy * 100.0).round() / 100.0,
            profile,
        }
    }
}

impl fmt::Display for EntropyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The entropy of the file is: {:.2}", self.entropy)
    }
}
