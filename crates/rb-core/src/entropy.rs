use rayon::prelude::*;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::histogram::ByteHistogram;

/// Shannon entropy of `data` in bits per byte, in `[0, 8]`.
/// An empty buffer has entropy 0.
pub fn shannon_entropy(data: &[u8]) -> f64 {
    ByteHistogram::from_data_parallel(data).entropy()
}

/// Per-block Shannon entropy. Returns one value per block of `block_len`
/// bytes; the last block may be short.
pub fn block_entropies(data: &[u8], block_len: usize) -> Result<Vec<f32>> {
    if block_len == 0 {
        return Err(Error::InvalidConfiguration(
            "block length must be a positive integer".into(),
        ));
    }

    Ok(data
        .par_chunks(block_len)
        .map(|chunk| ByteHistogram::from_data(chunk).entropy() as f32)
        .collect())
}

/// Whole-buffer entropy plus the spread of per-block values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntropyProfile {
    pub entropy: f64,
    pub block_len: usize,
    pub blocks: usize,
    pub min: f32,
    pub avg: f32,
    pub max: f32,
}

impl EntropyProfile {
    pub fn compute(data: &[u8], block_len: usize) -> Result<Self> {
        let per_block = block_entropies(data, block_len)?;

        let (min, avg, max) = if per_block.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let min = per_block.iter().copied().fold(f32::INFINITY, f32::min);
            let max = per_block.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            let avg = per_block.iter().sum::<f32>() / per_block.len() as f32;
            (min, avg, max)
        };

        Ok(Self {
            entropy: shannon_entropy(data),
            block_len,
            blocks: per_block.len(),
            min,
            avg,
            max,
        })
    }
}
