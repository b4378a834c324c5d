//! E2E Test Suite: Stream Scenarios
//!
//! Drives the public stream API the way a caller shipping buffers between
//! processes would: compress, inspect the framing by hand, decompress, and
//! check that damaged streams come back empty from the collapsing wrappers.
//! Logging goes through a `tracing_subscriber` test writer so failures show
//! the codec's own events.

use std::sync::Once;

use tfutil::block::{decompress_safe, Lz4Block};
use tfutil::config::{BLOCK_SIZE, RECORD_HEADER_SIZE};
use tfutil::stream::record_count;
use tfutil::{compress, decompress, lz4_compress, lz4_uncompress, CodecConfig, StreamCodec};

const MAX_RECORD: usize = 1_052_704;

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Text-like data with enough repetition to compress.
fn corpus(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut n: u64 = 1;
    while out.len() < len {
        n = n.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        let line = format!("row {:>8} value {:016x} status {}\n", out.len(), n >> 20, n % 5);
        out.extend_from_slice(line.as_bytes());
    }
    out.truncate(len);
    out
}

fn read_len(stream: &[u8], at: usize) -> usize {
    u32::from_le_bytes([stream[at], stream[at + 1], stream[at + 2], stream[at + 3]]) as usize
}

// ─────────────────────────────────────────────────────────────────────────────
// 1. two_block_stream_layout
//    2,000,000 bytes make two records; walking them by hand and decoding each
//    payload with the block API gives back BLOCK_SIZE and 951,424 bytes.
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn two_block_stream_layout() {
    init_tracing();
    let data = corpus(2_000_000);
    let packed = compress(&data, 1).unwrap();

    let first_len = read_len(&packed, 0);
    assert!(first_len > 0 && first_len <= MAX_RECORD);
    let second_at = RECORD_HEADER_SIZE + first_len;
    let second_len = read_len(&packed, second_at);
    assert!(second_len > 0 && second_len <= MAX_RECORD);
    assert_eq!(second_at + RECORD_HEADER_SIZE + second_len, packed.len());

    let mut scratch = vec![0u8; BLOCK_SIZE];
    let n = decompress_safe(&packed[RECORD_HEADER_SIZE..second_at], &mut scratch).unwrap();
    assert_eq!(n, BLOCK_SIZE);
    assert_eq!(&scratch[..n], &data[..BLOCK_SIZE]);

    let second = &packed[second_at + RECORD_HEADER_SIZE..];
    let n = decompress_safe(second, &mut scratch).unwrap();
    assert_eq!(n, 951_424);
    assert_eq!(&scratch[..n], &data[BLOCK_SIZE..]);

    assert_eq!(record_count(&packed).unwrap(), 2);
    assert_eq!(decompress(&packed).unwrap(), data);
}

// ─────────────────────────────────────────────────────────────────────────────
// 2. concatenated_streams
//    Streams have no header, so two compressed streams glued together decode
//    to the two inputs glued together.
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn concatenated_streams() {
    init_tracing();
    let a = corpus(BLOCK_SIZE + 100);
    let b = corpus(4_321);
    let mut packed = compress(&a, 1).unwrap();
    packed.extend(compress(&b, 1).unwrap());

    let mut expected = a;
    expected.extend_from_slice(&b);
    assert_eq!(decompress(&packed).unwrap(), expected);
    assert_eq!(record_count(&packed).unwrap(), 3);
}

// ─────────────────────────────────────────────────────────────────────────────
// 3. damaged_streams_collapse_to_empty
//    Flipped length prefixes, truncation and trailing garbage all come back
//    empty from lz4_uncompress.
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn damaged_streams_collapse_to_empty() {
    init_tracing();
    let data = corpus(3 * BLOCK_SIZE / 2);
    let packed = lz4_compress(&data, 1);
    assert_eq!(lz4_uncompress(&packed), data);

    let mut top_bit = packed.clone();
    top_bit[3] |= 0x80;
    assert!(lz4_uncompress(&top_bit).is_empty());

    let mut zeroed = packed.clone();
    zeroed[..4].fill(0);
    assert!(lz4_uncompress(&zeroed).is_empty());

    assert!(lz4_uncompress(&packed[..packed.len() - 1]).is_empty());

    let mut trailing = packed.clone();
    trailing.push(1);
    assert!(lz4_uncompress(&trailing).is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// 4. parallel_and_sequential_interoperate
//    Streams written by either path are read by either path.
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn parallel_and_sequential_interoperate() {
    init_tracing();
    let data = corpus(7 * BLOCK_SIZE + 99);
    let codec = StreamCodec::new(Lz4Block).with_config(CodecConfig::default().with_nb_workers(4));

    let sequential = codec.compress(&data, 3).unwrap();
    let parallel = codec.compress_parallel(&data, 3).unwrap();
    assert_eq!(sequential, parallel);
    assert_eq!(codec.decompress_parallel(&sequential).unwrap(), data);
    assert_eq!(codec.decompress(&parallel).unwrap(), data);
}
