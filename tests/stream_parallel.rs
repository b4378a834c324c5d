// Integration tests for the rayon-backed stream paths (src/stream/parallel.rs)
//
// Coverage:
//   - compress_parallel output is byte-identical to compress
//   - decompress_parallel decodes sequential output and vice versa
//   - The lowest failing block is reported and nothing else is returned
//   - Errors match the sequential path, framing errors included
//   - Streams of many tiny records decode without per-record block-sized buffers
//   - Single-block inputs and one-worker configs fall back to the sequential path

use tfutil::block::{BlockCompressor, Lz4Block};
use tfutil::stream::push_record;
use tfutil::{BlockError, CodecConfig, FormatError, StreamCodec, StreamError, BLOCK_SIZE};

fn sample(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x1234_5678;
    (0..len)
        .map(|i| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            if i % 7 < 4 {
                b"abcdefgh"[i % 8]
            } else {
                state as u8
            }
        })
        .collect()
}

fn codec(nb_workers: usize) -> StreamCodec {
    StreamCodec::new(Lz4Block).with_config(CodecConfig::default().with_nb_workers(nb_workers))
}

/// Fails any block starting with `0xEE`.
struct FailOnMarker;

impl BlockCompressor for FailOnMarker {
    fn bound(&self, len: usize) -> Option<usize> {
        Lz4Block.bound(len)
    }

    fn compress(&self, src: &[u8], dst: &mut [u8], level: i32) -> Result<usize, BlockError> {
        if src.first() == Some(&0xEE) {
            return Err(BlockError::InputTooLarge);
        }
        Lz4Block.compress(src, dst, level)
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize, BlockError> {
        Lz4Block.decompress(src, dst)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Equivalence with the sequential path
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn parallel_compress_matches_sequential() {
    let data = sample(5 * BLOCK_SIZE + 777);
    let codec = codec(4);
    let sequential = codec.compress(&data, 1).unwrap();
    let parallel = codec.compress_parallel(&data, 1).unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn parallel_decompress_matches_sequential() {
    let data = sample(4 * BLOCK_SIZE + 3);
    let codec = codec(3);
    let packed = codec.compress_parallel(&data, 2).unwrap();
    assert_eq!(codec.decompress_parallel(&packed).unwrap(), data);
    assert_eq!(codec.decompress(&packed).unwrap(), data);
}

#[test]
fn small_inputs_and_one_worker_fall_back() {
    let small = sample(1_000);
    let big = sample(2 * BLOCK_SIZE + 1);
    for workers in [1, 8] {
        let codec = codec(workers);
        for data in [&small, &big] {
            let packed = codec.compress_parallel(data, 1).unwrap();
            assert_eq!(packed, codec.compress(data, 1).unwrap());
            assert_eq!(&codec.decompress_parallel(&packed).unwrap(), data);
        }
    }
    assert!(codec(4).compress_parallel(&[], 1).unwrap().is_empty());
    assert!(codec(4).decompress_parallel(&[]).unwrap().is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn lowest_failing_block_is_reported() {
    let mut data = sample(6 * BLOCK_SIZE);
    data[0] = 0;
    data[2 * BLOCK_SIZE] = 0xEE;
    data[4 * BLOCK_SIZE] = 0xEE;
    for block in [1, 3, 5] {
        data[block * BLOCK_SIZE] = 0;
    }

    let codec = StreamCodec::new(FailOnMarker).with_config(CodecConfig::default().with_nb_workers(4));
    assert_eq!(
        codec.compress_parallel(&data, 1).unwrap_err(),
        StreamError::Compress {
            block: 2,
            source: BlockError::InputTooLarge
        }
    );
}

#[test]
fn corrupt_middle_record_fails_whole_stream() {
    let data = sample(3 * BLOCK_SIZE);
    let codec = codec(4);
    let packed = codec.compress(&data, 1).unwrap();

    // Rebuild the stream with the middle record swapped for a bad block.
    let records: Vec<_> = codec.records(&packed).unwrap().map(Result::unwrap).collect();
    let mut bad = Vec::new();
    push_record(&mut bad, records[0].payload);
    push_record(&mut bad, &[0x11, b'a', 9, 0]);
    push_record(&mut bad, records[2].payload);

    assert_eq!(
        codec.decompress_parallel(&bad).unwrap_err(),
        StreamError::Decompress {
            record: 1,
            offset: records[0].encoded_len(),
            source: BlockError::MalformedInput
        }
    );
}

#[test]
fn framing_error_after_clean_records_is_reported() {
    let data = sample(2 * BLOCK_SIZE);
    let codec = codec(2);
    let mut packed = codec.compress(&data, 1).unwrap();
    let end = packed.len();
    packed.extend_from_slice(&[9, 0, 0, 0, 1, 2]);
    assert_eq!(
        codec.decompress_parallel(&packed).unwrap_err(),
        StreamError::Format(FormatError::TruncatedPayload {
            offset: end,
            length: 9,
            available: 2
        })
    );
}

#[test]
fn corrupt_payload_before_bad_prefix_wins() {
    // Record 0 is undecodable, record 1 is fine, then a zero length prefix.
    let mut bad = Vec::new();
    push_record(&mut bad, &[0x11, b'a', 9, 0]);
    push_record(&mut bad, &[0x10, b'b']);
    bad.extend_from_slice(&0u32.to_le_bytes());

    let codec = codec(4);
    let expected = StreamError::Decompress {
        record: 0,
        offset: 0,
        source: BlockError::MalformedInput,
    };
    assert_eq!(codec.decompress(&bad).unwrap_err(), expected);
    assert_eq!(codec.decompress_parallel(&bad).unwrap_err(), expected);
}

// ─────────────────────────────────────────────────────────────────────────────
// Many small records
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn many_one_byte_records_decode_in_parallel() {
    const RECORDS: usize = 100_000;
    let mut packed = Vec::with_capacity(RECORDS * 6);
    for _ in 0..RECORDS {
        push_record(&mut packed, &[0x10, b'A']);
    }

    let codec = codec(4);
    let out = codec.decompress_parallel(&packed).unwrap();
    assert_eq!(out.len(), RECORDS);
    assert!(out.iter().all(|&b| b == b'A'));
    assert_eq!(out, codec.decompress(&packed).unwrap());
}
