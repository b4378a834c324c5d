//! Multi-threaded stream compression and decompression.
//!
//! Blocks share no state, so each one is handed to a rayon worker on its own.
//! Every worker thread keeps one scratch buffer for its whole share of the
//! blocks and hands back only the bytes it produced.  Results are collected
//! in block order and written on the calling thread, which makes the output
//! byte-identical to the sequential path.
//!
//! Errors match the sequential path too.  Records ahead of the first framing
//! violation are decoded, the lowest failing record wins, and a framing error
//! is only reported when every record before it decoded cleanly.  As in the
//! sequential path, nothing is returned but the error.

use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, warn};

use super::records::{push_record, Record, Records};
use super::StreamCodec;
use crate::block::BlockCompressor;
use crate::config::{BLOCK_SIZE, RECORD_HEADER_SIZE};
use crate::error::StreamError;

impl<C: BlockCompressor> StreamCodec<C> {
    /// Parallel [`compress`](Self::compress) over `config().nb_workers` threads.
    pub fn compress_parallel(&self, data: &[u8], level: i32) -> Result<Vec<u8>, StreamError> {
        let reserve = self.bound_for(data.len())?;
        if data.len() <= BLOCK_SIZE {
            return self.compress(data, level);
        }
        let Some(pool) = self.worker_pool() else {
            return self.compress(data, level);
        };
        let scratch_len = self.bound_for(BLOCK_SIZE)?;

        let blocks: Vec<_> = pool.install(|| {
            data.par_chunks(BLOCK_SIZE)
                .enumerate()
                .map_init(
                    || vec![0u8; scratch_len],
                    |scratch, (block, chunk)| -> Result<Vec<u8>, StreamError> {
                        let n = self
                            .compress_block(chunk, scratch, level)
                            .map_err(|source| StreamError::Compress { block, source })?;
                        Ok(scratch[..n].to_vec())
                    },
                )
                .collect()
        });

        let nb_blocks = blocks.len();
        let mut out = Vec::with_capacity(reserve + nb_blocks * RECORD_HEADER_SIZE);
        for payload in blocks {
            push_record(&mut out, &payload?);
        }

        debug!(
            raw = data.len(),
            packed = out.len(),
            blocks = nb_blocks,
            workers = pool.current_num_threads(),
            level,
            "compressed stream in parallel"
        );
        Ok(out)
    }

    /// Parallel [`decompress`](Self::decompress) over `config().nb_workers` threads.
    pub fn decompress_parallel(&self, stream: &[u8]) -> Result<Vec<u8>, StreamError> {
        let max_record = self.max_record_len()?;
        let mut records: Vec<Record<'_>> = Vec::new();
        let mut framing = None;
        for record in Records::new(stream, max_record) {
            match record {
                Ok(record) => records.push(record),
                Err(err) => framing = Some(err),
            }
        }
        if records.len() <= 1 {
            return self.decompress(stream);
        }
        let Some(pool) = self.worker_pool() else {
            return self.decompress(stream);
        };

        let blocks: Vec<_> = pool.install(|| {
            records
                .par_iter()
                .map_init(
                    || vec![0u8; BLOCK_SIZE],
                    |scratch, record| -> Result<Vec<u8>, StreamError> {
                        let n = self.decompress_record(record, scratch)?;
                        Ok(scratch[..n].to_vec())
                    },
                )
                .collect()
        });

        let raw_len = blocks
            .iter()
            .map(|block| block.as_ref().map_or(0, Vec::len))
            .sum();
        let mut out = Vec::with_capacity(raw_len);
        for block in blocks {
            out.extend_from_slice(&block?);
        }
        if let Some(err) = framing {
            return Err(err.into());
        }

        debug!(
            packed = stream.len(),
            raw = out.len(),
            records = records.len(),
            workers = pool.current_num_threads(),
            "decompressed stream in parallel"
        );
        Ok(out)
    }

    /// A pool of `nb_workers` threads, or `None` to run on the calling thread.
    fn worker_pool(&self) -> Option<ThreadPool> {
        let nb_workers = self.config.nb_workers;
        if nb_workers <= 1 {
            return None;
        }
        match rayon::ThreadPoolBuilder::new().num_threads(nb_workers).build() {
            Ok(pool) => Some(pool),
            Err(err) => {
                warn!(%err, nb_workers, "cannot start worker pool, running sequentially");
                None
            }
        }
    }
}
