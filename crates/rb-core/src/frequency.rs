//! Block frequency analysis.
//!
//! Partitions a buffer into fixed-length, non-overlapping blocks and counts
//! how often each distinct block value occurs. Keys borrow from the analyzed
//! buffer, so no block is copied.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::{Block, ModeBlock};

/// Occurrence statistics for one distinct block value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStats {
    /// Number of block-aligned occurrences.
    pub count: usize,
    /// Scan index of the first occurrence.
    pub first_index: usize,
}

/// Split `data` into blocks of `block_len` bytes in scan order.
/// The last block is short when `data.len()` is not a multiple of `block_len`.
pub fn blocks(data: &[u8], block_len: usize) -> Result<impl Iterator<Item = Block<'_>>> {
    check_block_len(block_len)?;
    Ok(data.chunks(block_len).enumerate().map(move |(index, chunk)| Block {
        index,
        offset: (index * block_len) as u64,
        data: chunk,
    }))
}

/// Count every distinct block of `data`. An empty buffer yields an empty table.
pub fn analyze(data: &[u8], block_len: usize) -> Result<FrequencyTable<'_>> {
    let mut table = FrequencyTable::new(block_len)?;
    for block in blocks(data, block_len)? {
        table.record(block);
    }

    log::debug!(
        "analyzed {} blocks of {} bytes: {} distinct",
        table.total_blocks(),
        block_len,
        table.len()
    );

    Ok(table)
}

fn check_block_len(block_len: usize) -> Result<()> {
    if block_len == 0 {
        return Err(Error::InvalidConfiguration(
            "block length must be a positive integer".into(),
        ));
    }
    Ok(())
}

/// Distinct block values with their counts, kept in first-seen order.
#[derive(Debug, Clone)]
pub struct FrequencyTable<'a> {
    block_len: usize,
    /// Block value -> slot in `entries`.
    slots: HashMap<&'a [u8], usize>,
    /// One entry per distinct value, in discovery order.
    entries: Vec<(&'a [u8], BlockStats)>,
    total_blocks: usize,
}

impl<'a> FrequencyTable<'a> {
    /// Create an empty table for blocks of `block_len` bytes.
    pub fn new(block_len: usize) -> Result<Self> {
        check_block_len(block_len)?;
        Ok(Self {
            block_len,
            slots: HashMap::new(),
            entries: Vec::new(),
            total_blocks: 0,
        })
    }

    fn record(&mut self, block: Block<'a>) {
        match self.slots.entry(block.data) {
            Entry::Occupied(slot) => {
                self.entries[*slot.get()].1.count += 1;
            }
            Entry::Vacant(slot) => {
                slot.insert(self.entries.len());
                self.entries.push((
                    block.data,
                    BlockStats {
                        count: 1,
                        first_index: block.index,
                    },
                ));
            }
        }
        self.total_blocks += 1;
    }

    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Number of distinct block values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the number of blocks scanned.
    pub fn total_blocks(&self) -> usize {
        self.total_blocks
    }

    /// Occurrences of `block`, zero if it was never seen.
    pub fn count(&self, block: &[u8]) -> usize {
        self.slots
            .get(block)
            .map(|&slot| self.entries[slot].1.count)
            .unwrap_or(0)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a [u8], BlockStats)> + '_ {
        self.entries.iter().copied()
    }

    /// The most frequent block. Ties go to the block seen first.
    pub fn mode(&self) -> Result<ModeBlock<'a>> {
        let mut best: Option<(&'a [u8], BlockStats)> = None;
        for &(data, stats) in &self.entries {
            match best {
                Some((_, b)) if b.count >= stats.count => {}
                _ => best = Some((data, stats)),
            }
        }

        best.map(|(data, stats)| ModeBlock {
            data,
            count: stats.count,
            first_index: stats.first_index,
        })
        .ok_or(Error::NoData)
    }

    /// Up to `n` entries ordered by count (descending), then first-seen order.
    pub fn top(&self, n: usize) -> Vec<(&'a [u8], BlockStats)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then(a.1.first_index.cmp(&b.1.first_index))
        });
        ranked.truncate(n);
        ranked
    }
}

/// Free-function form of [`FrequencyTable::mode`].
pub fn select_mode<'a>(table: &FrequencyTable<'a>) -> Result<ModeBlock<'a>> {
    table.mode()
}
