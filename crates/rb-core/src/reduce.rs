//! Removal of the dominant repeated block from a buffer.

use serde::Serialize;

use crate::entropy::shannon_entropy;
use crate::error::{Error, NotReducibleReason, Result};
use crate::frequency::analyze;
use crate::hexstream::{strip_hex_occurrences, to_hex};
use crate::types::{megabytes, DEFAULT_BLOCK_LEN, MIN_REDUCIBLE_SIZE};

/// Settings for one reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReduceOptions {
    /// Length of the blocks counted by the frequency analysis.
    pub block_len: usize,
    /// Buffers shorter than this are refused.
    pub min_size: usize,
    /// Also compute the entropy of the input.
    pub with_entropy: bool,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            block_len: DEFAULT_BLOCK_LEN,
            min_size: MIN_REDUCIBLE_SIZE,
            with_entropy: false,
        }
    }
}

impl ReduceOptions {
    pub fn block_len(mut self, block_len: usize) -> Self {
        self.block_len = block_len;
        self
    }

    pub fn min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn with_entropy(mut self, with_entropy: bool) -> Self {
        self.with_entropy = with_entropy;
        self
    }
}

/// Outcome of a successful reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct ReductionResult {
    pub original_size: u64,
    pub reduced_size: u64,
    pub block_len: usize,
    /// Content of the removed block.
    pub mode_block: Vec<u8>,
    /// Block-aligned occurrences counted by the frequency analysis.
    pub occurrence_count: usize,
    /// Hex-stream matches actually removed. Can exceed `occurrence_count`
    /// when the block also appears off its block boundaries.
    pub removed_matches: usize,
    /// Entropy of the input, when requested.
    pub entropy: Option<f64>,
    /// The reduced buffer.
    pub output: Vec<u8>,
}

impl ReductionResult {
    pub fn original_mb(&self) -> f64 {
        megabytes(self.original_size)
    }

    pub fn reduced_mb(&self) -> f64 {
        megabytes(self.reduced_size)
    }

    /// `|reduced - original| / original * 100`.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        let diff = self.original_size.abs_diff(self.reduced_size) as f64;
        diff / self.original_size as f64 * 100.0
    }

    /// Serializable view without the output bytes.
    pub fn summary(&self) -> ReductionSummary {
        ReductionSummary {
            original_size: self.original_size,
            reduced_size: self.reduced_size,
            original_mb: self.original_mb(),
            reduced_mb: self.reduced_mb(),
            block_len: self.block_len,
            mode_block_hex: to_hex(&self.mode_block),
            occurrence_count: self.occurrence_count,
            removed_matches: self.removed_matches,
            reduction_percent: (self.reduction_percent() * 100.0).round() / 100.0,
            entropy: self.entropy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReductionSummary {
    pub original_size: u64,
    pub reduced_size: u64,
    pub original_mb: f64,
    pub reduced_mb: f64,
    pub block_len: usize,
    pub mode_block_hex: String,
    pub occurrence_count: usize,
    pub removed_matches: usize,
    pub reduction_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entropy: Option<f64>,
}

/// Finds the most frequent block of a buffer and removes it.
#[derive(Debug, Clone, Default)]
pub struct Reducer {
    options: ReduceOptions,
}

impl Reducer {
    pub fn new(options: ReduceOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReduceOptions {
        &self.options
    }

    /// Reduce `data`. Fails without producing output when the block length
    /// is zero, the buffer is empty, or the policy gate refuses it.
    pub fn reduce(&self, data: &[u8]) -> Result<ReductionResult> {
        let opts = &self.options;
        let table = analyze(data, opts.block_len)?;
        let mode = table.mode()?;

        if data.len() < opts.min_size {
            return Err(Error::NotReducible(NotReducibleReason::TooSmall {
                size: data.len(),
                min: opts.min_size,
            }));
        }
        if mode.count < 2 {
            return Err(Error::NotReducible(NotReducibleReason::SingleOccurrence));
        }

        log::info!(
            "mode block: {} bytes, {} occurrences of {} blocks",
            mode.data.len(),
            mode.count,
            table.total_blocks()
        );

        let entropy = opts.with_entropy.then(|| shannon_entropy(data));
        let stripped = strip_hex_occurrences(data, mode.data);

        Ok(ReductionResult {
            original_size: data.len() as u64,
            reduced_size: stripped.data.len() as u64,
            block_len: opts.block_len,
            mode_block: mode.data.to_vec(),
            occurrence_count: mode.count,
            removed_matches: stripped.matches,
            entropy,
            output: stripped.data,
        })
    }
}

/// Reduce `data` with the default policy and the given block length.
pub fn reduce(data: &[u8], block_len: usize) -> Result<ReductionResult> {
    Reducer::new(ReduceOptions::default().block_len(block_len)).reduce(data)
}
