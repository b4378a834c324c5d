#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the level; the rest is the payload.
    let (level, payload) = match data.split_first() {
        Some((&b, rest)) => (b as i32 - 8, rest),
        None => (tfutil::config::CLEVEL_DEFAULT, data),
    };

    let packed = match tfutil::compress(payload, level) {
        Ok(p) => p,
        Err(err) => panic!(
            "stream round-trip: compression of {} bytes failed: {err}",
            payload.len()
        ),
    };

    let recovered = match tfutil::decompress(&packed) {
        Ok(v) => v,
        Err(err) => panic!(
            "stream round-trip: own output unreadable ({} bytes in, {} packed): {err}",
            payload.len(),
            packed.len()
        ),
    };

    assert_eq!(
        recovered, payload,
        "stream round-trip mismatch: {} bytes in, {} bytes back",
        payload.len(),
        recovered.len()
    );
});
