// tfutil: block-framed LZ4 stream codec and lock-guarded random number services

pub mod block;
pub mod config;
pub mod error;
pub mod random;
pub mod stream;

// ── Version constants ─────────────────────────────────────────────────────────
pub const TFUTIL_VERSION_MAJOR: u32 = 0;
pub const TFUTIL_VERSION_MINOR: u32 = 3;
pub const TFUTIL_VERSION_RELEASE: u32 = 0;
pub const TFUTIL_VERSION_NUMBER: u32 =
    TFUTIL_VERSION_MAJOR * 100 * 100 + TFUTIL_VERSION_MINOR * 100 + TFUTIL_VERSION_RELEASE;
pub const TFUTIL_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the version number as `major * 10000 + minor * 100 + release`.
pub fn version_number() -> u32 {
    TFUTIL_VERSION_NUMBER
}

pub fn version_string() -> &'static str {
    TFUTIL_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use block::{BlockCompressor, Lz4Block};
pub use config::{CodecConfig, BLOCK_SIZE};
pub use error::{BlockError, FormatError, RangeError, StreamError};
pub use random::RandomService;
pub use stream::{compress, decompress, lz4_compress, lz4_uncompress, StreamCodec};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_number_matches_package_version() {
        let expected = format!(
            "{}.{}.{}",
            TFUTIL_VERSION_MAJOR, TFUTIL_VERSION_MINOR, TFUTIL_VERSION_RELEASE
        );
        assert_eq!(version_string(), expected);
        assert_eq!(version_number(), 300);
    }
}
