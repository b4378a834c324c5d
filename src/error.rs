//! Error types for the block codec, the framed stream codec and the random
//! services.
//!
//! | Type          | Raised by                                   |
//! |---------------|---------------------------------------------|
//! | [`BlockError`]  | a single [`BlockCompressor`] call           |
//! | [`FormatError`] | framing violations found while reading a stream |
//! | [`StreamError`] | stream-level compress / decompress          |
//! | [`RangeError`]  | [`RandomService::range`] with `min > max`   |
//!
//! Stream operations never hand back partial output: any of these errors
//! replaces the whole result.
//!
//! [`BlockCompressor`]: crate::block::BlockCompressor
//! [`RandomService::range`]: crate::random::RandomService::range

use thiserror::Error;

/// Failure of one block-level compress or decompress call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlockError {
    /// The output buffer is too small to hold the result.
    #[error("output buffer too small")]
    OutputTooSmall,
    /// The input exceeds the compressor's maximum input size.
    #[error("input too large for a single block")]
    InputTooLarge,
    /// The compressed data is malformed or truncated.
    #[error("malformed compressed block")]
    MalformedInput,
    /// The primitive reported success but produced zero bytes; every record
    /// carries at least one byte on both sides of the codec.
    #[error("block produced zero bytes")]
    EmptyOutput,
}

/// Violation of the `(u32 LE length, payload)` record framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Length prefix is zero or larger than the compressor's bound for one block.
    #[error("record at offset {offset} declares invalid length {length} (allowed 1..={max})")]
    InvalidLength { offset: usize, length: u32, max: usize },
    /// Fewer than four bytes remain where a length prefix should start.
    #[error("stream ends inside a record header at offset {offset} ({available} bytes left)")]
    TruncatedHeader { offset: usize, available: usize },
    /// The payload runs past the end of the stream.
    #[error(
        "record at offset {offset} declares {length} payload bytes but only {available} remain"
    )]
    TruncatedPayload {
        offset: usize,
        length: u32,
        available: usize,
    },
}

/// Failure of a whole stream compress / decompress operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The compressor cannot size a buffer for `len` bytes.
    #[error("compressor cannot bound {len} bytes")]
    Bound { len: usize },
    /// Block `block` (0-based) failed to compress.
    #[error("block {block} failed to compress: {source}")]
    Compress {
        block: usize,
        #[source]
        source: BlockError,
    },
    /// Record `record` (0-based, header at `offset`) failed to decompress.
    #[error("record {record} at offset {offset} failed to decompress: {source}")]
    Decompress {
        record: usize,
        offset: usize,
        #[source]
        source: BlockError,
    },
    #[error("stream format error: {0}")]
    Format(#[from] FormatError),
}

impl StreamError {
    /// `true` for framing violations in the input stream.
    pub fn is_format(&self) -> bool {
        matches!(self, StreamError::Format(_))
    }

    /// `true` when the underlying block primitive reported the failure.
    pub fn is_codec(&self) -> bool {
        matches!(
            self,
            StreamError::Compress { .. } | StreamError::Decompress { .. }
        )
    }
}

/// `range(min, max)` was called with `min > max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid range: min {min} is greater than max {max}")]
pub struct RangeError {
    pub min: u64,
    pub max: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn format_error_converts_into_stream_error() {
        let err: StreamError = FormatError::TruncatedHeader {
            offset: 12,
            available: 3,
        }
        .into();
        assert!(err.is_format());
        assert!(!err.is_codec());
    }

    #[test]
    fn codec_errors_expose_block_source() {
        let err = StreamError::Decompress {
            record: 1,
            offset: 40,
            source: BlockError::MalformedInput,
        };
        assert!(err.is_codec());
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "malformed compressed block");
    }

    #[test]
    fn range_error_message_names_both_bounds() {
        let msg = RangeError { min: 9, max: 5 }.to_string();
        assert!(msg.contains('9') && msg.contains('5'));
    }
}
