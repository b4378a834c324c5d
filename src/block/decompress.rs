//! LZ4 block decompression.
//!
//! [`decompress_safe`] is the Rust equivalent of `LZ4_decompress_safe`: decode
//! one complete block into a caller-sized buffer.
//!
//! # Security boundary
//!
//! This is the path that sees untrusted bytes.  Every length and offset read
//! from the block is checked against both the input and the output before it
//! is used.  Malformed or truncated input must return
//! `Err(BlockError::MalformedInput)`, and an undersized destination
//! `Err(BlockError::OutputTooSmall)`; neither may panic.

use super::types::{read_u16_le, MINMATCH, ML_BITS, ML_MASK, RUN_MASK};
use crate::error::BlockError;

/// Read the 255-run continuation of a length field starting at `*ip`.
///
/// Accumulates bytes until one below 255 is read.  Running out of input or
/// overflowing `usize` is an error.
#[inline(always)]
fn read_variable_length(src: &[u8], ip: &mut usize) -> Result<usize, BlockError> {
    let mut length = 0usize;
    loop {
        let byte = *src.get(*ip).ok_or(BlockError::MalformedInput)?;
        *ip += 1;
        length = length
            .checked_add(byte as usize)
            .ok_or(BlockError::MalformedInput)?;
        if byte != 255 {
            return Ok(length);
        }
    }
}

/// Decompress one complete LZ4 block from `src` into `dst`.
///
/// `dst.len()` is the capacity; the block must decode within it.  Returns the
/// number of bytes written.
///
/// Equivalent to `LZ4_decompress_safe`.
pub fn decompress_safe(src: &[u8], dst: &mut [u8]) -> Result<usize, BlockError> {
    if src.is_empty() {
        return Err(BlockError::MalformedInput);
    }

    let mut ip = 0usize;
    let mut op = 0usize;

    loop {
        let token = src[ip] as usize;
        ip += 1;

        // ── Literals ─────────────────────────────────────────────────────────
        let mut lit_len = token >> ML_BITS;
        if lit_len == RUN_MASK {
            lit_len += read_variable_length(src, &mut ip)?;
        }
        let lit_end = ip.checked_add(lit_len).ok_or(BlockError::MalformedInput)?;
        let literals = src.get(ip..lit_end).ok_or(BlockError::MalformedInput)?;
        dst.get_mut(op..op + lit_len)
            .ok_or(BlockError::OutputTooSmall)?
            .copy_from_slice(literals);
        op += lit_len;
        ip = lit_end;

        // The last sequence carries literals only.
        if ip == src.len() {
            return Ok(op);
        }

        // ── Match ────────────────────────────────────────────────────────────
        let offset = read_u16_le(src, ip).ok_or(BlockError::MalformedInput)? as usize;
        ip += 2;
        if offset == 0 || offset > op {
            return Err(BlockError::MalformedInput);
        }

        let mut match_len = token & ML_MASK;
        if match_len == ML_MASK {
            match_len += read_variable_length(src, &mut ip)?;
        }
        match_len += MINMATCH;

        let match_end = op.checked_add(match_len).ok_or(BlockError::MalformedInput)?;
        if match_end > dst.len() {
            return Err(BlockError::OutputTooSmall);
        }
        let start = op - offset;
        if offset >= match_len {
            dst.copy_within(start..start + match_len, op);
        } else {
            // Overlapping copy: the match repeats bytes it is producing.
            for i in 0..match_len {
                dst[op + i] = dst[start + i];
            }
        }
        op = match_end;

        if ip >= src.len() {
            // A match may not end the block.
            return Err(BlockError::MalformedInput);
        }
    }
}
