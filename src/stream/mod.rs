//! Block-chunked stream codec.
//!
//! A compressed stream is a plain concatenation of records:
//!
//! ```text
//! record := length: u32 LE  ++  payload: [u8; length]
//! ```
//!
//! Each payload is one [`BLOCK_SIZE`] slice of the input (the last one may be
//! shorter) compressed independently by a [`BlockCompressor`].  There is no
//! stream header, footer, version tag or checksum.  `length` is always in
//! `1..=bound(BLOCK_SIZE)`.
//!
//! Operations are all-or-nothing: a failure in any block discards everything
//! produced so far.  [`StreamCodec::compress`] / [`StreamCodec::decompress`]
//! say why through [`StreamError`]; [`lz4_compress`] / [`lz4_uncompress`] keep
//! the older contract of logging the error and returning an empty buffer.
//!
//! [`BLOCK_SIZE`]: crate::config::BLOCK_SIZE

mod compress;
mod decompress;
mod parallel;
pub mod records;

pub use records::{push_record, Record, Records};

use tracing::error;

use crate::block::{BlockCompressor, Lz4Block};
use crate::config::{CodecConfig, BLOCK_SIZE};
use crate::error::StreamError;

/// Stream codec over a block compressor `C`.
///
/// Stateless between calls; one instance may be shared by any number of
/// threads.
#[derive(Debug, Clone, Default)]
pub struct StreamCodec<C = Lz4Block> {
    compressor: C,
    config: CodecConfig,
}

impl StreamCodec {
    /// LZ4 codec with the default configuration.
    pub fn lz4() -> Self {
        StreamCodec::new(Lz4Block)
    }
}

impl<C: BlockCompressor> StreamCodec<C> {
    /// Codec over `compressor` with the default configuration.
    pub fn new(compressor: C) -> Self {
        StreamCodec {
            compressor,
            config: CodecConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    pub fn compressor(&self) -> &C {
        &self.compressor
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Largest payload a record may declare: `bound(BLOCK_SIZE)`.
    pub fn max_record_len(&self) -> Result<usize, StreamError> {
        self.compressor
            .bound(BLOCK_SIZE)
            .map(|n| n.min(u32::MAX as usize))
            .ok_or(StreamError::Bound { len: BLOCK_SIZE })
    }

    /// Validating iterator over the records of `stream`.
    pub fn records<'a>(&self, stream: &'a [u8]) -> Result<Records<'a>, StreamError> {
        Ok(Records::new(stream, self.max_record_len()?))
    }

    /// Number of records in a well-formed `stream`.
    pub fn record_count(&self, stream: &[u8]) -> Result<usize, StreamError> {
        let mut n = 0;
        for record in self.records(stream)? {
            record?;
            n += 1;
        }
        Ok(n)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LZ4 convenience functions
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `data` at `level` into an LZ4 record stream.
pub fn compress(data: &[u8], level: i32) -> Result<Vec<u8>, StreamError> {
    StreamCodec::lz4().compress(data, level)
}

/// Decompress an LZ4 record stream.
pub fn decompress(stream: &[u8]) -> Result<Vec<u8>, StreamError> {
    StreamCodec::lz4().decompress(stream)
}

/// Number of records in an LZ4 record stream.
pub fn record_count(stream: &[u8]) -> Result<usize, StreamError> {
    StreamCodec::lz4().record_count(stream)
}

/// Like [`compress`], but logs any failure and returns an empty buffer.
///
/// An empty result is ambiguous: it is also what empty `data` compresses to.
pub fn lz4_compress(data: &[u8], level: i32) -> Vec<u8> {
    compress(data, level).unwrap_or_else(|err| {
        error!(%err, len = data.len(), "LZ4 compression error");
        Vec::new()
    })
}

/// Like [`decompress`], but logs any failure and returns an empty buffer.
pub fn lz4_uncompress(stream: &[u8]) -> Vec<u8> {
    decompress(stream).unwrap_or_else(|err| {
        error!(%err, len = stream.len(), "LZ4 uncompression error");
        Vec::new()
    })
}
