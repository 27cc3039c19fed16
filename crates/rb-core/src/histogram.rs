//! Byte histogram of a buffer, the basis of the entropy estimate.

use rayon::prelude::*;

/// Buffers at least this large are counted on rayon's thread pool.
const PARALLEL_THRESHOLD: usize = 1024 * 1024;

/// Histogram of byte values (0-255).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteHistogram {
    /// Count of each byte value (index = byte value).
    pub counts: [u64; 256],
    /// Total number of bytes counted.
    pub total: u64,
}

impl Default for ByteHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteHistogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self {
            counts: [0; 256],
            total: 0,
        }
    }

    /// Count `data` on the current thread.
    pub fn from_data(data: &[u8]) -> Self {
        let mut hist = Self::new();
        for &byte in data {
            hist.counts[byte as usize] += 1;
        }
        hist.total = data.len() as u64;
        hist
    }

    /// Count `data`, splitting large buffers across worker threads.
    /// Produces the same histogram as [`ByteHistogram::from_data`].
    pub fn from_data_parallel(data: &[u8]) -> Self {
        if data.len() < PARALLEL_THRESHOLD {
            return Self::from_data(data);
        }

        let num_threads = rayon::current_num_threads().max(1);
        let chunk_size = (data.len() / num_threads).max(PARALLEL_THRESHOLD);

        data.par_chunks(chunk_size)
            .map(Self::from_data)
            .reduce(Self::new, |mut a, b| {
                a.merge(&b);
                a
            })
    }

    /// Merge another histogram into this one.
    pub fn merge(&mut self, other: &ByteHistogram) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
        self.total += other.total;
    }

    /// Shannon entropy in bits per byte. Zero-probability values contribute
    /// nothing; an empty histogram has entropy 0.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        let total = self.total as f64;
        let mut entropy = 0.0;

        for &count in &self.counts {
            if count > 0 {
                let p = count as f64 / total;
                entropy -= p * p.log2();
            }
        }

        entropy
    }
}
