//! LZ4 block compression and decompression, and the [`BlockCompressor`] seam
//! the stream codec is written against.
//!
//! The stream layer only relies on the contract of [`BlockCompressor`];
//! [`Lz4Block`] is the implementation used by default.

pub mod compress;
pub mod decompress;
pub mod types;

pub use compress::{
    compress_bound, compress_default, compress_fast, LZ4_ACCELERATION_DEFAULT,
    LZ4_ACCELERATION_MAX,
};
pub use decompress::decompress_safe;
pub use types::{LZ4_DISTANCE_MAX, LZ4_MAX_INPUT_SIZE};

use crate::error::BlockError;

/// A one-shot block compression primitive.
///
/// Implementations must be reentrant: the stream codec shares one instance
/// across threads and calls it concurrently on independent buffers.
pub trait BlockCompressor: Send + Sync {
    /// Worst-case compressed size for `len` input bytes, or `None` when the
    /// compressor cannot bound that size.
    fn bound(&self, len: usize) -> Option<usize>;

    /// Compress `src` into `dst` (at least `bound(src.len())` bytes), returning
    /// the number of bytes written.  `level` is passed through unmodified.
    fn compress(&self, src: &[u8], dst: &mut [u8], level: i32) -> Result<usize, BlockError>;

    /// Decompress one block produced by [`compress`](Self::compress) into
    /// `dst`, whose length is the capacity.  Returns the decoded length.
    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize, BlockError>;
}

/// LZ4 block format; `level` is the fast-mode acceleration factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lz4Block;

impl BlockCompressor for Lz4Block {
    fn bound(&self, len: usize) -> Option<usize> {
        let len = i32::try_from(len).ok()?;
        match compress_bound(len) {
            n if n > 0 => Some(n as usize),
            _ => None,
        }
    }

    fn compress(&self, src: &[u8], dst: &mut [u8], level: i32) -> Result<usize, BlockError> {
        compress_fast(src, dst, level)
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize, BlockError> {
        decompress_safe(src, dst)
    }
}

/// Compress `src` into a right-sized `Vec` with the default acceleration.
pub fn compress_block_to_vec(src: &[u8]) -> Result<Vec<u8>, BlockError> {
    let bound = Lz4Block.bound(src.len()).ok_or(BlockError::InputTooLarge)?;
    let mut dst = vec![0u8; bound];
    let n = compress_default(src, &mut dst)?;
    dst.truncate(n);
    Ok(dst)
}

/// Decompress an LZ4 block whose decoded size is at most `capacity`.
pub fn decompress_block_to_vec(src: &[u8], capacity: usize) -> Result<Vec<u8>, BlockError> {
    let mut dst = vec![0u8; capacity];
    let n = decompress_safe(src, &mut dst)?;
    dst.truncate(n);
    Ok(dst)
}
