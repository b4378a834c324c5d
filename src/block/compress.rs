//! LZ4 block compression (fast mode).
//!
//! | Rust function          | LZ4 reference equivalent   |
//! |------------------------|----------------------------|
//! | [`compress_bound`]     | `LZ4_compressBound`        |
//! | [`compress_fast`]      | `LZ4_compress_fast`        |
//! | [`compress_default`]   | `LZ4_compress_default`     |
//!
//! The encoder keeps a 4096-slot hash table of input positions to find
//! back-references within a window of [`LZ4_DISTANCE_MAX`] bytes.  Each
//! sequence is a literal run followed by a match (offset + length); whatever
//! cannot be matched is emitted as a final literal run.  The match finder
//! skips ahead faster the longer it goes without a hit, scaled by the
//! acceleration factor.
//!
//! Everything works on slice indices.  Running out of output space is
//! reported as [`BlockError::OutputTooSmall`], never as a short write.

use super::types::{
    count, hash4, read_u32_le, LASTLITERALS, LZ4_DISTANCE_MAX, LZ4_HASH_SIZE_U32,
    LZ4_MAX_INPUT_SIZE, LZ4_MIN_LENGTH, LZ4_SKIP_TRIGGER, MFLIMIT, MINMATCH, ML_BITS, ML_MASK,
    RUN_MASK,
};
use crate::error::BlockError;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Default acceleration factor (1: check every position).
pub const LZ4_ACCELERATION_DEFAULT: i32 = 1;

/// Maximum allowed acceleration factor.
pub const LZ4_ACCELERATION_MAX: i32 = 65_537;

// ─────────────────────────────────────────────────────────────────────────────
// Utility
// ─────────────────────────────────────────────────────────────────────────────

/// Worst-case compressed size for a given input size.
///
/// Returns 0 if `input_size` is negative or exceeds `LZ4_MAX_INPUT_SIZE`.
/// Equivalent to `LZ4_compressBound` / `LZ4_COMPRESSBOUND`.
#[inline]
pub fn compress_bound(input_size: i32) -> i32 {
    if input_size < 0 || input_size as usize > LZ4_MAX_INPUT_SIZE {
        0
    } else {
        input_size + (input_size / 255) + 16
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output cursor
// ─────────────────────────────────────────────────────────────────────────────

/// Bounds-checked write cursor over the destination slice.
struct Sink<'a> {
    dst: &'a mut [u8],
    pos: usize,
}

impl<'a> Sink<'a> {
    fn new(dst: &'a mut [u8]) -> Self {
        Sink { dst, pos: 0 }
    }

    #[inline(always)]
    fn push(&mut self, byte: u8) -> Result<(), BlockError> {
        let slot = self.dst.get_mut(self.pos).ok_or(BlockError::OutputTooSmall)?;
        *slot = byte;
        self.pos += 1;
        Ok(())
    }

    #[inline(always)]
    fn extend(&mut self, bytes: &[u8]) -> Result<(), BlockError> {
        let end = self.pos + bytes.len();
        self.dst
            .get_mut(self.pos..end)
            .ok_or(BlockError::OutputTooSmall)?
            .copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    /// Emit the 255-run continuation bytes for a length field that overflowed
    /// its 4-bit nibble.
    #[inline(always)]
    fn push_length(&mut self, mut len: usize) -> Result<(), BlockError> {
        while len >= 255 {
            self.push(255)?;
            len -= 255;
        }
        self.push(len as u8)
    }

    /// Write a sequence token plus its literal run; returns the token position
    /// so the match-length nibble can be filled in afterwards.
    fn literals(&mut self, lits: &[u8]) -> Result<usize, BlockError> {
        let token_pos = self.pos;
        if lits.len() >= RUN_MASK {
            self.push((RUN_MASK << ML_BITS) as u8)?;
            self.push_length(lits.len() - RUN_MASK)?;
        } else {
            self.push((lits.len() << ML_BITS) as u8)?;
        }
        self.extend(lits)?;
        Ok(token_pos)
    }

    /// Write the offset and match length of the sequence started at `token_pos`.
    fn matched(&mut self, token_pos: usize, offset: usize, match_len: usize) -> Result<(), BlockError> {
        self.extend(&(offset as u16).to_le_bytes())?;
        let code = match_len - MINMATCH;
        if code >= ML_MASK {
            self.dst[token_pos] |= ML_MASK as u8;
            self.push_length(code - ML_MASK)
        } else {
            self.dst[token_pos] |= code as u8;
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Core compression loop
// ─────────────────────────────────────────────────────────────────────────────

/// Look up and replace the table slot for the 4 bytes at `pos`; returns the
/// previous occupant when it is a usable match for `pos`.
#[inline(always)]
fn probe(src: &[u8], table: &mut [u32], pos: usize) -> Option<usize> {
    let sequence = read_u32_le(src, pos);
    let h = hash4(sequence);
    let candidate = table[h] as usize;
    table[h] = pos as u32;
    if candidate < pos
        && pos - candidate <= LZ4_DISTANCE_MAX
        && read_u32_le(src, candidate) == sequence
    {
        Some(candidate)
    } else {
        None
    }
}

fn compress_block(src: &[u8], sink: &mut Sink<'_>, acceleration: usize) -> Result<(), BlockError> {
    let len = src.len();
    let mut anchor = 0usize;

    if len >= LZ4_MIN_LENGTH {
        // A match may start no later than `len - MFLIMIT` and must stop
        // LASTLITERALS bytes short of the end.
        let mflimit_plus_one = len - MFLIMIT + 1;
        let match_limit = len - LASTLITERALS;
        let mut table = vec![0u32; LZ4_HASH_SIZE_U32];

        table[hash4(read_u32_le(src, 0))] = 0;
        let mut ip = 1usize;

        'main: loop {
            // ── Find a match ─────────────────────────────────────────────────
            let mut step = 1usize;
            let mut search_match_nb = acceleration << LZ4_SKIP_TRIGGER;
            let mut candidate = loop {
                if ip + step > mflimit_plus_one {
                    break 'main;
                }
                if let Some(found) = probe(src, &mut table, ip) {
                    break found;
                }
                ip += step;
                step = search_match_nb >> LZ4_SKIP_TRIGGER;
                search_match_nb += 1;
            };

            // ── Catch up: extend the match backwards ─────────────────────────
            while ip > anchor && candidate > 0 && src[ip - 1] == src[candidate - 1] {
                ip -= 1;
                candidate -= 1;
            }

            let mut token_pos = sink.literals(&src[anchor..ip])?;

            // ── Encode match, then test the next position ────────────────────
            // A hit at the position right after a match is emitted as a
            // zero-literal sequence without going back through the skip scan.
            loop {
                let match_len =
                    MINMATCH + count(src, ip + MINMATCH, candidate + MINMATCH, match_limit);
                sink.matched(token_pos, ip - candidate, match_len)?;
                ip += match_len;
                anchor = ip;

                if ip >= mflimit_plus_one {
                    break 'main;
                }

                let filler = ip - 2;
                table[hash4(read_u32_le(src, filler))] = filler as u32;

                match probe(src, &mut table, ip) {
                    Some(next) => {
                        candidate = next;
                        token_pos = sink.literals(&[])?;
                    }
                    None => {
                        ip += 1;
                        continue 'main;
                    }
                }
            }
        }
    }

    // ── Trailing literals ────────────────────────────────────────────────────
    sink.literals(&src[anchor..])?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot public API
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src` into `dst` with a user-supplied `acceleration` factor.
///
/// `acceleration` is clamped to `1..=LZ4_ACCELERATION_MAX`; values ≤ 0 behave
/// like the default.  Equivalent to `LZ4_compress_fast`.
///
/// Returns the number of bytes written to `dst`.  An empty `src` produces the
/// one-byte empty block `0x00`.
pub fn compress_fast(src: &[u8], dst: &mut [u8], acceleration: i32) -> Result<usize, BlockError> {
    if src.len() > LZ4_MAX_INPUT_SIZE {
        return Err(BlockError::InputTooLarge);
    }
    let acceleration = acceleration.clamp(LZ4_ACCELERATION_DEFAULT, LZ4_ACCELERATION_MAX) as usize;
    let mut sink = Sink::new(dst);
    compress_block(src, &mut sink, acceleration)?;
    Ok(sink.pos)
}

/// Compress `src` into `dst` with the default acceleration factor (1).
///
/// Equivalent to `LZ4_compress_default`.
pub fn compress_default(src: &[u8], dst: &mut [u8]) -> Result<usize, BlockError> {
    compress_fast(src, dst, LZ4_ACCELERATION_DEFAULT)
}
