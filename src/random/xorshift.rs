//! Marsaglia xorshift128: four 32-bit words advanced by shifts and xors only.
//!
//! Fast and deterministic for a given seed history; not suitable for anything
//! that needs unpredictability.

/// Initial state words `(x, y, z, w)`.
pub const XORSHIFT128_INIT: [u32; 4] = [123_456_789, 362_436_069, 987_654_321, 1];

/// xorshift128 generator state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift128 {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
}

impl Xorshift128 {
    pub const fn new() -> Self {
        let [x, y, z, w] = XORSHIFT128_INIT;
        Xorshift128 { x, y, z, w }
    }

    /// Fold `seed` into the state: `w = seed`, `z = seed ^ (seed >> 8) ^ (seed << 5)`.
    ///
    /// `x` and `y` keep their current values, so reseeding a generator that
    /// has already produced output does not restart the sequence a fresh
    /// generator would give for the same seed.
    pub fn reseed(&mut self, seed: u32) {
        self.w = seed;
        self.z = seed ^ (seed >> 8) ^ (seed << 5);
    }

    pub fn next_u32(&mut self) -> u32 {
        let t = self.x ^ (self.x << 11);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = self.w ^ (self.w >> 19) ^ (t ^ (t >> 8));
        self.w
    }

    /// Current `(x, y, z, w)`.
    pub fn state(&self) -> [u32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Default for Xorshift128 {
    fn default() -> Self {
        Self::new()
    }
}
