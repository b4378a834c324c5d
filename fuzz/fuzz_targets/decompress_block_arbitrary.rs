#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a single block, into several destination sizes.
    for cap in [0usize, 16, 4096, data.len(), tfutil::BLOCK_SIZE] {
        let mut dst = vec![0u8; cap];
        if let Ok(n) = tfutil::block::decompress_safe(data, &mut dst) {
            assert!(n <= cap);
        }
    }
});
