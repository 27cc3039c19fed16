//! Removal of a byte pattern from the hex-digit view of a buffer.
//!
//! A buffer of `n` bytes is viewed as a stream of `2n` lowercase hex digits
//! (nibbles). Every non-overlapping occurrence of the pattern's digits is
//! removed left to right, exactly as a literal string replace over the hex
//! text would, and the remaining digits are packed back into bytes.
//!
//! A digit-stream match can start on a byte boundary (even digit) or in the
//! middle of a byte (odd digit). Both are found with `memmem` directly on
//! the bytes, so the hex text itself is never built:
//!
//! - even matches are plain occurrences of the pattern;
//! - odd matches are occurrences of the pattern shifted by one nibble, with
//!   the two half-bytes at either end checked separately.

use memchr::memmem;

/// Lowercase hex representation of `bytes`, two digits per byte.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Output of [`strip_hex_occurrences`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped {
    pub data: Vec<u8>,
    /// Number of digit-stream matches removed.
    pub matches: usize,
}

/// Remove every non-overlapping occurrence of `pattern`'s hex digits from
/// the hex-digit stream of `data`, scanning left to right, and return the
/// remaining digits as bytes.
pub fn strip_hex_occurrences(data: &[u8], pattern: &[u8]) -> Stripped {
    if pattern.is_empty() || data.len() < pattern.len() {
        return Stripped {
            data: data.to_vec(),
            matches: 0,
        };
    }

    let width = 2 * pattern.len();
    let total = 2 * data.len();
    let aligned = AlignedSearch::new(pattern);
    let shifted = ShiftedSearch::new(pattern);

    let mut writer = NibbleWriter::new();
    let mut matches = 0;
    let mut cursor = 0;
    let mut next_aligned = aligned.find_from(data, 0);
    let mut next_shifted = shifted.find_from(data, 0);

    loop {
        if next_aligned.is_some_and(|pos| pos < cursor) {
            next_aligned = aligned.find_from(data, cursor);
        }
        if next_shifted.is_some_and(|pos| pos < cursor) {
            next_shifted = shifted.find_from(data, cursor);
        }

        let pos = match (next_aligned, next_shifted) {
            (Some(a), Some(s)) => a.min(s),
            (Some(a), None) => a,
            (None, Some(s)) => s,
            (None, None) => break,
        };

        writer.push_digits(data, cursor, pos);
        cursor = pos + width;
        matches += 1;
    }
    writer.push_digits(data, cursor, total);

    log::debug!(
        "removed {} hex-stream matches of a {}-byte pattern, {} -> {} bytes",
        matches,
        pattern.len(),
        data.len(),
        writer.out.len()
    );

    Stripped {
        data: writer.finish(),
        matches,
    }
}

/// Digit of `data`'s hex stream at position `pos`.
fn nibble(data: &[u8], pos: usize) -> u8 {
    let b = data[pos / 2];
    if pos % 2 == 0 {
        b >> 4
    } else {
        b & 0x0F
    }
}

/// Matches starting at even digits, i.e. byte-aligned occurrences.
struct AlignedSearch<'p> {
    finder: memmem::Finder<'p>,
}

impl<'p> AlignedSearch<'p> {
    fn new(pattern: &'p [u8]) -> Self {
        Self {
            finder: memmem::Finder::new(pattern),
        }
    }

    /// First even digit position `>= from` where a match starts.
    fn find_from(&self, data: &[u8], from: usize) -> Option<usize> {
        let start = (from + 1) / 2;
        if start > data.len() {
            return None;
        }
        self.finder
            .find(&data[start..])
            .map(|k| 2 * (start + k))
    }
}

/// Matches starting at odd digits. For a pattern `p` of length `L`, a match
/// at digit `2i + 1` requires:
///
/// - low nibble of `data[i]` == high nibble of `p[0]`
/// - `data[i + 1 .. i + L]` == `p` shifted left by one nibble
/// - high nibble of `data[i + L]` == low nibble of `p[L - 1]`
struct ShiftedSearch {
    inner: Vec<u8>,
    finder: memmem::Finder<'static>,
    head: u8,
    tail: u8,
    len: usize,
}

impl ShiftedSearch {
    fn new(pattern: &[u8]) -> Self {
        let inner: Vec<u8> = pattern
            .windows(2)
            .map(|w| (w[0] << 4) | (w[1] >> 4))
            .collect();
        let finder = memmem::Finder::new(&inner).into_owned();
        Self {
            inner,
            finder,
            head: pattern[0] >> 4,
            tail: pattern[pattern.len() - 1] & 0x0F,
            len: pattern.len(),
        }
    }

    /// First odd digit position `>= from` where a match starts.
    fn find_from(&self, data: &[u8], from: usize) -> Option<usize> {
        let mut i = from / 2;
        loop {
            // The match needs bytes i ..= i + len.
            if i + self.len >= data.len() {
                return None;
            }
            let base = i + 1;
            let q = self.finder.find(&data[base..])?;
            i = base + q - 1;
            if i + self.len >= data.len() {
                return None;
            }
            debug_assert_eq!(&data[i + 1..i + self.len], &self.inner[..]);
            if data[i] & 0x0F == self.head && data[i + self.len] >> 4 == self.tail {
                return Some(2 * i + 1);
            }
            i += 1;
        }
    }
}

/// Packs hex digits back into bytes, copying whole bytes when the stream is
/// byte-aligned.
struct NibbleWriter {
    out: Vec<u8>,
    pending: Option<u8>,
}

impl NibbleWriter {
    fn new() -> Self {
        Self {
            out: Vec::new(),
            pending: None,
        }
    }

    fn push_nibble(&mut self, v: u8) {
        match self.pending.take() {
            Some(high) => self.out.push((high << 4) | v),
            None => self.pending = Some(v),
        }
    }

    /// Append digits `[start, end)` of `data`'s hex stream.
    fn push_digits(&mut self, data: &[u8], start: usize, end: usize) {
        if start >= end {
            return;
        }

        let mut start = start;
        if start % 2 == 1 {
            self.push_nibble(nibble(data, start));
            start += 1;
        }

        let whole = &data[start / 2..end / 2];
        if !whole.is_empty() {
            match self.pending {
                None => self.out.extend_from_slice(whole),
                Some(mut high) => {
                    self.out.reserve(whole.len());
                    for &b in whole {
                        self.out.push((high << 4) | (b >> 4));
                        high = b & 0x0F;
                    }
                    self.pending = Some(high);
                }
            }
        }

        if end % 2 == 1 {
            self.push_nibble(nibble(data, end - 1));
        }
    }

    fn finish(self) -> Vec<u8> {
        // Every removed match is an even number of digits.
        debug_assert!(self.pending.is_none());
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    /// Literal string replacement over the hex text.
    fn reference(data: &[u8], pattern: &[u8]) -> (Vec<u8>, usize) {
        let hex = to_hex(data);
        let needle = to_hex(pattern);
        let matches = hex.matches(needle.as_str()).count();
        let reduced = hex.replace(needle.as_str(), "");
        let bytes = (0..reduced.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&reduced[i..i + 2], 16).unwrap())
            .collect();
        (bytes, matches)
    }

    fn check(data: &[u8], pattern: &[u8]) {
        let got = strip_hex_occurrences(data, pattern);
        let (want, matches) = reference(data, pattern);
        assert_eq!(got.data, want, "data {:02x?} pattern {:02x?}", data, pattern);
        assert_eq!(got.matches, matches);
    }

    #[test]
    fn to_hex_lowercase() {
        assert_eq!(to_hex(&[0x00, 0xAB, 0xcc, 0x7f]), "00abcc7f");
        assert_eq!(to_hex(&[]), "");
        assert_eq!(to_hex(&[0xCC; 4]), hex::encode([0xCCu8; 4]));
    }

    #[test]
    fn removes_aligned_blocks() {
        let mut data = vec![0xCC; 16];
        data.extend_from_slice(b"keep");
        data.extend_from_slice(&[0xCC; 8]);
        let out = strip_hex_occurrences(&data, &[0xCC; 8]);
        assert_eq!(out.data, b"keep");
        assert_eq!(out.matches, 3);
    }

    #[test]
    fn removes_nibble_shifted_match() {
        // hex "1cccc2": "cc" at digit 1, then again at digit 3.
        let out = strip_hex_occurrences(&[0x1C, 0xCC, 0xC2], &[0xCC]);
        assert_eq!(out.data, vec![0x12]);
        assert_eq!(out.matches, 2);
    }

    #[test]
    fn shifted_match_with_longer_pattern() {
        // hex "0a" + "bcde" + "f0": "abcdef" matches at digit 1.
        let data = [0x0A, 0xBC, 0xDE, 0xF0];
        let out = strip_hex_occurrences(&data, &[0xAB, 0xCD, 0xEF]);
        assert_eq!(out.data, vec![0x00]);
        assert_eq!(out.matches, 1);
        check(&data, &[0xAB, 0xCD, 0xEF]);
    }

    #[test]
    fn removes_match_straddling_blocks() {
        // Pattern appears across the boundary of two 2-byte blocks.
        let data = [0x11, 0xAA, 0xBB, 0x22];
        let out = strip_hex_occurrences(&data, &[0xAA, 0xBB]);
        assert_eq!(out.data, vec![0x11, 0x22]);
    }

    #[test]
    fn overlapping_candidates_are_not_double_counted() {
        // "ccc" style runs: only non-overlapping matches are removed.
        check(&[0xCC, 0xCC, 0xCC], &[0xCC, 0xCC]);
        check(&[0xCC; 7], &[0xCC, 0xCC]);
        check(&[0x0C, 0xCC, 0xCC, 0xC0], &[0xCC, 0xCC]);
    }

    #[test]
    fn no_match_returns_input() {
        let data = b"nothing to see here";
        let out = strip_hex_occurrences(data, b"zz");
        assert_eq!(out.data, data.to_vec());
        assert_eq!(out.matches, 0);
    }

    #[test]
    fn pattern_longer_than_data() {
        let out = strip_hex_occurrences(b"ab", b"abc");
        assert_eq!(out.data, b"ab".to_vec());
        assert_eq!(out.matches, 0);
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(strip_hex_occurrences(&[], &[0xCC]).data, Vec::<u8>::new());
        assert_eq!(strip_hex_occurrences(b"abc", &[]).data, b"abc".to_vec());
    }

    #[test]
    fn whole_buffer_is_pattern() {
        let out = strip_hex_occurrences(&[0xCC; 64], &[0xCC; 64]);
        assert!(out.data.is_empty());
        assert_eq!(out.matches, 1);
    }

    #[test]
    fn matches_literal_hex_replace_on_random_inputs() {
        // A small alphabet of nibble-heavy bytes makes shifted matches common.
        const ALPHABET: [u8; 6] = [0xCC, 0xC1, 0x1C, 0x11, 0x0C, 0xC0];
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let len = rng.gen_range(0..64);
            let data: Vec<u8> = (0..len)
                .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
                .collect();
            let plen = rng.gen_range(1..5);
            let pattern: Vec<u8> = (0..plen)
                .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
                .collect();
            check(&data, &pattern);
        }
    }
}
