//! Sequential stream decompression.
//!
//! Records are read through [`Records`], so a zero or oversized length prefix,
//! a header cut short, or a payload running past the end of the input all
//! surface as [`FormatError`](crate::error::FormatError)s before the payload
//! is touched.

use tracing::{debug, trace};

use super::records::{Record, Records};
use super::StreamCodec;
use crate::block::BlockCompressor;
use crate::config::BLOCK_SIZE;
use crate::error::{BlockError, StreamError};

impl<C: BlockCompressor> StreamCodec<C> {
    /// Decompress a record stream produced by [`compress`](Self::compress).
    ///
    /// The whole input must be consumed by well-formed records; any framing or
    /// block error discards all output.  An empty stream decodes to nothing.
    pub fn decompress(&self, stream: &[u8]) -> Result<Vec<u8>, StreamError> {
        let max_record = self.max_record_len()?;
        if stream.is_empty() {
            return Ok(Vec::new());
        }

        let mut out = Vec::new();
        let mut scratch = vec![0u8; BLOCK_SIZE];
        let mut nb_records = 0usize;

        for record in Records::new(stream, max_record) {
            let record = record?;
            let n = self.decompress_record(&record, &mut scratch)?;
            trace!(
                record = record.index,
                packed = record.payload.len(),
                raw = n,
                "decompressed record"
            );
            out.extend_from_slice(&scratch[..n]);
            nb_records += 1;
        }

        debug!(
            packed = stream.len(),
            raw = out.len(),
            records = nb_records,
            "decompressed stream"
        );
        Ok(out)
    }

    /// Decode one record into `scratch` (at least [`BLOCK_SIZE`] bytes).
    pub(super) fn decompress_record(
        &self,
        record: &Record<'_>,
        scratch: &mut [u8],
    ) -> Result<usize, StreamError> {
        let fail = |source| StreamError::Decompress {
            record: record.index,
            offset: record.offset,
            source,
        };
        match self.compressor.decompress(record.payload, scratch) {
            Ok(0) => Err(fail(BlockError::EmptyOutput)),
            Ok(n) => Ok(n),
            Err(source) => Err(fail(source)),
        }
    }
}
