use rand::{RngCore, SeedableRng};
use rb_core::{
    analyze, reduce, shannon_entropy, Error, NotReducibleReason, ReduceOptions, Reducer,
    MIN_REDUCIBLE_SIZE,
};

fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill_bytes(&mut data);
    data
}

#[test]
fn padded_sample_reduces_to_trailing_bytes() {
    let tail: Vec<u8> = vec![0x4D, 0x5A, 0x90, 0x00, 0x03, 0x00, 0x00, 0x00, 0x04, 0x01];
    let mut data = vec![0xCC; 512 * 1000];
    data.extend_from_slice(&tail);
    assert!(data.len() >= MIN_REDUCIBLE_SIZE);

    let table = analyze(&data, 512).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.count(&[0xCC; 512]), 1000);
    assert_eq!(table.count(&tail), 1);

    let result = reduce(&data, 512).unwrap();
    assert_eq!(result.mode_block, vec![0xCC; 512]);
    assert_eq!(result.occurrence_count, 1000);
    assert_eq!(result.output, tail);
}

#[test]
fn tiny_buffer_with_single_block_is_refused() {
    let data = random_bytes(100, 1);
    let err = reduce(&data, 512).unwrap_err();
    assert!(matches!(err, Error::NotReducible(_)));

    // Still refused when the size gate is lifted.
    let reducer = Reducer::new(ReduceOptions::default().min_size(0));
    assert_eq!(
        reducer.reduce(&data).unwrap_err(),
        Error::NotReducible(NotReducibleReason::SingleOccurrence)
    );
}

#[test]
fn all_distinct_blocks_are_refused() {
    let data = random_bytes(512 * 1024, 2);
    assert_eq!(
        reduce(&data, 512).unwrap_err(),
        Error::NotReducible(NotReducibleReason::SingleOccurrence)
    );
}

#[test]
fn threshold_size_is_accepted() {
    let block = random_bytes(4096, 3);
    let mut data = block.clone();
    data.extend_from_slice(&block);
    data.extend(random_bytes(MIN_REDUCIBLE_SIZE - data.len(), 4));
    assert_eq!(data.len(), MIN_REDUCIBLE_SIZE);

    let result = reduce(&data, 4096).unwrap();
    assert_eq!(result.occurrence_count, 2);
    assert_eq!(result.reduced_size as usize, MIN_REDUCIBLE_SIZE - 2 * 4096);

    let smaller = &data[..MIN_REDUCIBLE_SIZE - 1];
    assert!(matches!(
        reduce(smaller, 4096),
        Err(Error::NotReducible(NotReducibleReason::TooSmall { .. }))
    ));
}

#[test]
fn second_pass_never_grows() {
    // Padding interleaved with block-aligned chunks of varying length.
    let mut data = Vec::new();
    for i in 0..200 {
        data.extend(vec![0x00; 512]);
        data.extend(random_bytes(512 * (1 + i % 3), i as u64));
    }

    let first = reduce(&data, 512).unwrap();
    assert!(first.reduced_size < first.original_size);

    match reduce(&first.output, 512) {
        Ok(second) => assert!(second.reduced_size <= first.reduced_size),
        Err(e) => assert!(matches!(e, Error::NotReducible(_))),
    }
}

#[test]
fn padding_is_low_entropy() {
    let mut data = vec![0xCC; 512 * 1000];
    data.extend_from_slice(b"0123456789");
    assert!(shannon_entropy(&data) < 0.01);
    assert!(shannon_entropy(&random_bytes(1 << 20, 5)) > 7.99);
}
