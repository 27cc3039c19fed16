/// Default block length used for frequency analysis.
pub const DEFAULT_BLOCK_LEN: usize = 512;

/// Number of bytes in one megabyte for display purposes.
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Buffers shorter than this (0.20 MB) are refused by the reducer.
/// The comparison is strict: a buffer of exactly this size is accepted.
pub const MIN_REDUCIBLE_SIZE: usize = 209_715;

/// Size in megabytes, rounded to two decimals. Display value only.
pub fn megabytes(bytes: u64) -> f64 {
    let mb = bytes as f64 / BYTES_PER_MB as f64;
    (mb * 100.0).round() / 100.0
}

/// One fixed-length block of a buffer, borrowed in place.
/// The final block of a buffer may be shorter than the block length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Position of the block in scan order.
    pub index: usize,
    /// Byte offset of the block within the buffer.
    pub offset: u64,
    pub data: &'a [u8],
}

impl<'a> Block<'a> {
    /// Returns the exclusive end offset of this block.
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.data.len() as u64)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The most frequent block of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeBlock<'a> {
    pub data: &'a [u8],
    /// Number of block-aligned occurrences.
    pub count: usize,
    /// Scan index of the first occurrence.
    pub first_index: usize,
}
