#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a record stream: errors are fine, panics are not.
    let strict = tfutil::decompress(data);
    let lenient = tfutil::lz4_uncompress(data);

    match strict {
        Ok(v) => assert_eq!(v, lenient),
        Err(_) => assert!(lenient.is_empty()),
    }
});
