// Integration tests for the LZ4 block layer (src/block/)
//
// Coverage:
//   - compress_fast / decompress_safe round trips over literal-only, repetitive,
//     mixed and incompressible inputs, and across acceleration factors
//   - compress_bound is never exceeded
//   - Lz4Block implements the BlockCompressor contract (bound / compress / decompress)
//   - Blocks produced here follow the LZ4 parsing restrictions (last 5 bytes literal)
//   - Malformed blocks are rejected without panicking
//   - compress_block_to_vec / decompress_block_to_vec helpers and their errors

use tfutil::block::{
    compress_block_to_vec, compress_bound, compress_default, compress_fast, decompress_block_to_vec,
    decompress_safe, BlockCompressor, Lz4Block, LZ4_ACCELERATION_MAX, LZ4_MAX_INPUT_SIZE,
};
use tfutil::BlockError;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Deterministic test data: words from a small vocabulary interleaved with
/// noise, so it has both matches and literal runs.
fn mixed_data(len: usize, seed: u32) -> Vec<u8> {
    const WORDS: &[&[u8]] = &[
        b"lorem ",
        b"ipsum ",
        b"dolor ",
        b"sit ",
        b"amet, ",
        b"consectetur ",
    ];
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    let mut out = Vec::with_capacity(len + 16);
    while out.len() < len {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        if state % 4 == 0 {
            out.push((state >> 8) as u8);
        } else {
            out.extend_from_slice(WORDS[(state >> 3) as usize % WORDS.len()]);
        }
    }
    out.truncate(len);
    out
}

fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 32) as u8
        })
        .collect()
}

fn round_trip(src: &[u8], acceleration: i32) -> Vec<u8> {
    let mut packed = vec![0u8; compress_bound(src.len() as i32) as usize];
    let n = compress_fast(src, &mut packed, acceleration).expect("compress");
    let mut out = vec![0u8; src.len()];
    let m = decompress_safe(&packed[..n], &mut out).expect("decompress");
    out.truncate(m);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn round_trip_small_inputs() {
    for len in 0..64 {
        let src = mixed_data(len, len as u32);
        assert_eq!(round_trip(&src, 1), src, "len {len}");
    }
}

#[test]
fn round_trip_mixed_data_across_accelerations() {
    let src = mixed_data(300_000, 7);
    for acc in [1, 2, 8, 64, 1000, LZ4_ACCELERATION_MAX] {
        assert_eq!(round_trip(&src, acc), src, "acceleration {acc}");
    }
}

#[test]
fn round_trip_incompressible_data_stays_within_bound() {
    let src = noise(200_000, 0x5eed);
    let bound = compress_bound(src.len() as i32) as usize;
    let mut packed = vec![0u8; bound];
    let n = compress_default(&src, &mut packed).unwrap();
    assert!(n <= bound);
    assert!(n >= src.len(), "noise should not shrink");
    assert_eq!(round_trip(&src, 1), src);
}

#[test]
fn round_trip_long_runs_and_distant_repeats() {
    let mut src = vec![0u8; 70_000];
    src.extend(noise(1_000, 3));
    src.extend(vec![b'x'; 5_000]);
    // Repeat of a chunk further back than the 64 KiB window.
    let early = src[10..2_000].to_vec();
    src.extend(early);
    assert_eq!(round_trip(&src, 1), src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Block format
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn last_five_bytes_are_literals() {
    let src = vec![b'q'; 4096];
    let block = compress_block_to_vec(&src).unwrap();
    // Final sequence: token with 5 literals and no match, then "qqqqq".
    let tail = &block[block.len() - 6..];
    assert_eq!(tail[0], 0x50);
    assert_eq!(&tail[1..], b"qqqqq");
}

#[test]
fn malformed_blocks_do_not_panic() {
    let good = compress_block_to_vec(&mixed_data(10_000, 5)).unwrap();
    let mut dst = vec![0u8; 10_000];
    for cut in 1..good.len().min(200) {
        let _ = decompress_safe(&good[..cut], &mut dst);
    }
    for i in 0..good.len().min(200) {
        let mut bad = good.clone();
        bad[i] ^= 0xA5;
        let _ = decompress_safe(&bad, &mut dst);
    }
}

#[test]
fn decode_into_short_buffer_fails() {
    let src = mixed_data(5_000, 9);
    let block = compress_block_to_vec(&src).unwrap();
    let mut dst = vec![0u8; 4_999];
    assert!(decompress_safe(&block, &mut dst).is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// BlockCompressor contract
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn lz4_block_bound() {
    assert_eq!(Lz4Block.bound(0), Some(16));
    assert_eq!(Lz4Block.bound(1 << 20), Some(1_052_704));
    assert_eq!(
        Lz4Block.bound(LZ4_MAX_INPUT_SIZE),
        Some(compress_bound(LZ4_MAX_INPUT_SIZE as i32) as usize)
    );
    assert_eq!(Lz4Block.bound(LZ4_MAX_INPUT_SIZE + 1), None);
    assert_eq!(Lz4Block.bound(usize::MAX), None);
}

#[test]
fn lz4_block_trait_round_trip() {
    let codec: &dyn BlockCompressor = &Lz4Block;
    let src = mixed_data(50_000, 21);
    let mut packed = vec![0u8; codec.bound(src.len()).unwrap()];
    let n = codec.compress(&src, &mut packed, 3).unwrap();
    let mut out = vec![0u8; src.len()];
    assert_eq!(codec.decompress(&packed[..n], &mut out), Ok(src.len()));
    assert_eq!(out, src);
}

#[test]
fn lz4_block_compress_into_small_buffer() {
    let src = noise(1_000, 1);
    let mut dst = vec![0u8; 100];
    assert_eq!(Lz4Block.compress(&src, &mut dst, 1), Err(BlockError::OutputTooSmall));
}

// ─────────────────────────────────────────────────────────────────────────────
// Vec helpers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn vec_helpers_round_trip() {
    let src = mixed_data(20_000, 2);
    let block = compress_block_to_vec(&src).unwrap();
    assert!(block.len() < src.len());
    assert_eq!(decompress_block_to_vec(&block, src.len()), Ok(src));
}

#[test]
fn vec_helpers_report_errors() {
    assert_eq!(
        decompress_block_to_vec(&[0x50, b'a'], 16),
        Err(BlockError::MalformedInput)
    );
    let block = compress_block_to_vec(&[b'k'; 100]).unwrap();
    assert_eq!(
        decompress_block_to_vec(&block, 99),
        Err(BlockError::OutputTooSmall)
    );
}
