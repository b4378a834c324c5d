//! LZ4 block constants and the slice-level helpers shared by the encoder and
//! decoder.
//!
//!   - Block-format constants (MINMATCH, LASTLITERALS, MFLIMIT, token masks)
//!   - Hash-table sizing and the Knuth-multiplicative `hash4`
//!   - Little-endian reads (`read_u32_le`, `read_u16_le`)
//!   - `count`: forward match-length scan

// ─────────────────────────────────────────────────────────────────────────────
// Block-format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum match length encoded in an LZ4 block.
pub const MINMATCH: usize = 4;

/// Last N bytes of the input are always emitted as literals.
/// See doc/lz4_Block_format.md#parsing-restrictions.
pub const LASTLITERALS: usize = 5;

/// A match may not start within the last MFLIMIT bytes of the input.
pub const MFLIMIT: usize = 12;

/// Minimum input length that may produce any match at all.
pub const LZ4_MIN_LENGTH: usize = MFLIMIT + 1;

/// Maximum back-reference distance supported by the LZ4 format.
pub const LZ4_DISTANCE_MAX: usize = 65_535;

/// Maximum allowed input size (2 113 929 216 bytes).  Inputs larger than this
/// cannot be represented in an LZ4 block.
pub const LZ4_MAX_INPUT_SIZE: usize = 0x7E00_0000;

pub const ML_BITS: u32 = 4;
pub const ML_MASK: usize = (1 << ML_BITS) - 1;
pub const RUN_MASK: usize = (1 << (8 - ML_BITS)) - 1;

// ─────────────────────────────────────────────────────────────────────────────
// Hash table
// ─────────────────────────────────────────────────────────────────────────────

/// Hash log: number of bits kept from each hash value (16 KiB of u32 slots).
pub const LZ4_HASHLOG: u32 = 12;
/// Number of u32 entries in the hash table.
pub const LZ4_HASH_SIZE_U32: usize = 1 << LZ4_HASHLOG;

/// Higher → faster on incompressible data at the cost of compression ratio.
pub const LZ4_SKIP_TRIGGER: u32 = 6;

/// 4-byte Knuth-multiplicative hash of a match candidate.
#[inline(always)]
pub fn hash4(sequence: u32) -> usize {
    (sequence.wrapping_mul(2_654_435_761u32) >> (32 - LZ4_HASHLOG)) as usize
}

// ─────────────────────────────────────────────────────────────────────────────
// Reads
// ─────────────────────────────────────────────────────────────────────────────

/// Read four bytes at `pos` as a little-endian `u32`.
///
/// Callers guarantee `pos + 4 <= buf.len()`; the encoder only probes positions
/// below `len - LASTLITERALS`.
#[inline(always)]
pub fn read_u32_le(buf: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]])
}

#[inline(always)]
fn read_u64_le(buf: &[u8], pos: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&buf[pos..pos + 8]);
    u64::from_le_bytes(word)
}

/// Read a little-endian `u16` at `pos`, or `None` when fewer than two bytes remain.
#[inline(always)]
pub fn read_u16_le(buf: &[u8], pos: usize) -> Option<u16> {
    let bytes = buf.get(pos..pos.checked_add(2)?)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Count how many bytes match between `buf[cur..]` and `buf[candidate..]`,
/// stopping at `limit` (exclusive, measured on the `cur` side).
///
/// `candidate < cur`, so the two windows may overlap; LZ4 allows that.
#[inline(always)]
pub fn count(buf: &[u8], mut cur: usize, mut candidate: usize, limit: usize) -> usize {
    let start = cur;
    // Word-at-a-time while a full 8 bytes fit before the limit.
    while cur + 8 <= limit {
        let diff = read_u64_le(buf, cur) ^ read_u64_le(buf, candidate);
        if diff != 0 {
            return cur - start + (diff.trailing_zeros() >> 3) as usize;
        }
        cur += 8;
        candidate += 8;
    }
    while cur < limit && buf[cur] == buf[candidate] {
        cur += 1;
        candidate += 1;
    }
    cur - start
}
