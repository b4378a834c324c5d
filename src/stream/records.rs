//! Record framing: `(u32 LE length, payload[length])`, concatenated with no
//! separators, header or trailer.
//!
//! [`Records`] walks a stream without copying and validates each record as it
//! goes; [`push_record`] is the write side.

use std::iter::FusedIterator;

use crate::config::RECORD_HEADER_SIZE;
use crate::error::FormatError;

/// One length-prefixed record inside a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// 0-based position of the record in the stream.
    pub index: usize,
    /// Byte offset of the record's length prefix.
    pub offset: usize,
    /// Compressed block bytes.
    pub payload: &'a [u8],
}

impl Record<'_> {
    /// Bytes the record occupies in the stream, prefix included.
    pub fn encoded_len(&self) -> usize {
        RECORD_HEADER_SIZE + self.payload.len()
    }
}

/// Validating iterator over the records of a stream.
///
/// Each length prefix must satisfy `0 < length <= max_len`, and the payload
/// must lie entirely inside the stream.  The first violation is yielded as an
/// `Err` and ends the iteration, so a stream iterated to completion without
/// errors has been consumed exactly to its last byte.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    stream: &'a [u8],
    cursor: usize,
    index: usize,
    max_len: usize,
    failed: bool,
}

impl<'a> Records<'a> {
    /// Iterate over `stream`, accepting payloads of at most `max_len` bytes
    /// (the compressor's bound for one full block).
    pub fn new(stream: &'a [u8], max_len: usize) -> Self {
        Records {
            stream,
            cursor: 0,
            index: 0,
            max_len,
            failed: false,
        }
    }

    fn read_record(&mut self) -> Result<Record<'a>, FormatError> {
        let offset = self.cursor;
        let rest = &self.stream[offset..];

        let header = rest
            .get(..RECORD_HEADER_SIZE)
            .ok_or(FormatError::TruncatedHeader {
                offset,
                available: rest.len(),
            })?;
        let length = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);

        // Prefixes with the top bit set are negative as C `int`s; they fail
        // the upper bound here along with every other oversized value.
        if length == 0 || length as usize > self.max_len {
            return Err(FormatError::InvalidLength {
                offset,
                length,
                max: self.max_len,
            });
        }

        let body = &rest[RECORD_HEADER_SIZE..];
        let payload = body
            .get(..length as usize)
            .ok_or(FormatError::TruncatedPayload {
                offset,
                length,
                available: body.len(),
            })?;

        let record = Record {
            index: self.index,
            offset,
            payload,
        };
        self.cursor += record.encoded_len();
        self.index += 1;
        Ok(record)
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Record<'a>, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor >= self.stream.len() {
            return None;
        }
        let item = self.read_record();
        self.failed = item.is_err();
        Some(item)
    }
}

impl FusedIterator for Records<'_> {}

/// Append one record (`payload.len()` as u32 LE, then `payload`) to `out`.
///
/// `payload` must be non-empty and shorter than 4 GiB; the stream codec only
/// ever passes compressed blocks bounded by `bound(BLOCK_SIZE)`.
pub fn push_record(out: &mut Vec<u8>, payload: &[u8]) {
    debug_assert!(!payload.is_empty() && payload.len() <= u32::MAX as usize);
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
}
