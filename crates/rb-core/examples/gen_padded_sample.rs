//! Generates a padded sample file for trying out `reducebin`.
//! Run with: `cargo run -p rb-core --example gen_padded_sample -- [path] [megabytes]`
//!
//! The file starts with an MZ-style header, then alternates 64 KB of `0xCC`
//! filler with 4 KB of pseudo-random "code", ending on a short odd-sized tail.

use std::fs;
use std::path::PathBuf;

use rb_core::{megabytes, reduce, DEFAULT_BLOCK_LEN};

fn main() {
    let mut args = std::env::args().skip(1);
    let path = PathBuf::from(args.next().unwrap_or_else(|| "padded_sample.bin".into()));
    let mb: usize = args
        .next()
        .map(|s| s.parse().expect("megabytes must be a number"))
        .unwrap_or(8);

    let data = padded_sample(mb * 1024 * 1024);
    fs::write(&path, &data).expect("failed to write sample");
    println!("  {} ({} bytes, {:.2} MB)", path.display(), data.len(), megabytes(data.len() as u64));

    match reduce(&data, DEFAULT_BLOCK_LEN) {
        Ok(result) => println!(
            "  expected reduction: {} -> {} bytes ({:.2} %)",
            result.original_size,
            result.reduced_size,
            result.reduction_percent()
        ),
        Err(e) => println!("  not reducible: {}", e),
    }
}

fn padded_sample(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size + 4096);

    let mut header = vec![0u8; 512];
    header[0] = b'M';
    header[1] = b'Z';
    header[0x3C] = 0x80;
    data.extend_from_slice(&header);

    // LCG pseudo-random "code"
    let mut state: u32 = 0xDEAD_BEEF;
    while data.len() < size {
        data.extend(std::iter::repeat(0xCCu8).take(64 * 1024));
        for _ in 0..4096 {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            data.push((state >> 16) as u8);
        }
    }

    data.extend_from_slice(b"\x90\x90\xC3 tail");
    data
}
