//! Sequential stream compression.

use tracing::{debug, trace};

use super::records::push_record;
use super::StreamCodec;
use crate::block::BlockCompressor;
use crate::config::{BLOCK_SIZE, RECORD_HEADER_SIZE};
use crate::error::{BlockError, StreamError};

impl<C: BlockCompressor> StreamCodec<C> {
    /// Compress `data` into a record stream, one record per [`BLOCK_SIZE`]
    /// block, passing `level` through to the block compressor.
    ///
    /// Empty `data` yields an empty stream.  If any block fails, nothing is
    /// returned but the error.
    pub fn compress(&self, data: &[u8], level: i32) -> Result<Vec<u8>, StreamError> {
        let reserve = self.bound_for(data.len())?;
        if data.is_empty() {
            return Ok(Vec::new());
        }

        let nb_blocks = data.len().div_ceil(BLOCK_SIZE);
        let mut out = Vec::with_capacity(reserve + nb_blocks * RECORD_HEADER_SIZE);
        let mut scratch = vec![0u8; self.bound_for(data.len().min(BLOCK_SIZE))?];

        for (block, chunk) in data.chunks(BLOCK_SIZE).enumerate() {
            let n = self
                .compress_block(chunk, &mut scratch, level)
                .map_err(|source| StreamError::Compress { block, source })?;
            trace!(block, raw = chunk.len(), packed = n, "compressed block");
            push_record(&mut out, &scratch[..n]);
        }

        debug!(
            raw = data.len(),
            packed = out.len(),
            blocks = nb_blocks,
            level,
            "compressed stream"
        );
        Ok(out)
    }

    /// `bound(len)`, or [`StreamError::Bound`] when the compressor cannot size it.
    pub(super) fn bound_for(&self, len: usize) -> Result<usize, StreamError> {
        self.compressor.bound(len).ok_or(StreamError::Bound { len })
    }

    /// Compress one block into `scratch`; a zero-byte result counts as failure.
    pub(super) fn compress_block(
        &self,
        chunk: &[u8],
        scratch: &mut [u8],
        level: i32,
    ) -> Result<usize, BlockError> {
        match self.compressor.compress(chunk, scratch, level)? {
            0 => Err(BlockError::EmptyOutput),
            n => Ok(n),
        }
    }
}
