//! Lock-guarded pseudorandom number services.
//!
//! [`RandomService`] bundles four generator groups, each behind its own lock:
//!
//! | Group       | Methods                         | Generator                          |
//! |-------------|---------------------------------|------------------------------------|
//! | fast        | `seed_fast`, `next_fast`        | [`Xorshift128`], seedable          |
//! | uniform-32  | `next_uniform32`                | `SmallRng`, OS-entropy seeded      |
//! | uniform-64  | `next_uniform64`                | `SmallRng`, OS-entropy seeded      |
//! | range       | `range`, `range_to`             | the uniform-64 generator and lock  |
//!
//! Every call takes exactly one lock and releases it before returning, so
//! groups never wait on each other.  Within a group the values handed out
//! across all threads are one sequence in lock-acquisition order: none is
//! skipped or handed out twice.
//!
//! None of these generators is cryptographically secure.

mod xorshift;

pub use xorshift::{Xorshift128, XORSHIFT128_INIT};

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::error::RangeError;

/// The process's random number services.
#[derive(Debug)]
pub struct RandomService {
    fast: Mutex<Xorshift128>,
    uniform32: Mutex<SmallRng>,
    uniform64: Mutex<SmallRng>,
}

/// Lock `mutex`, recovering from poisoning.  No generator step can panic
/// halfway, so a poisoned guard still holds a whole state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RandomService {
    /// New services: the fast generator in its initial state, the uniform
    /// generators seeded from operating-system entropy.
    pub fn new() -> Self {
        RandomService {
            fast: Mutex::new(Xorshift128::new()),
            uniform32: Mutex::new(SmallRng::from_entropy()),
            uniform64: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Process-wide instance, created on first use and never dropped.
    pub fn global() -> &'static RandomService {
        static GLOBAL: OnceLock<RandomService> = OnceLock::new();
        GLOBAL.get_or_init(RandomService::new)
    }

    /// Reseed the fast generator (see [`Xorshift128::reseed`]).
    pub fn seed_fast(&self, seed: u32) {
        lock(&self.fast).reseed(seed);
    }

    /// Next value of the fast generator.
    pub fn next_fast(&self) -> u32 {
        lock(&self.fast).next_u32()
    }

    pub fn next_uniform32(&self) -> u32 {
        lock(&self.uniform32).next_u32()
    }

    pub fn next_uniform64(&self) -> u64 {
        lock(&self.uniform64).next_u64()
    }

    /// Uniformly distributed value in `[min, max]`, both ends inclusive.
    ///
    /// Returns [`RangeError`] when `min > max`.
    pub fn range(&self, min: u64, max: u64) -> Result<u64, RangeError> {
        if min > max {
            return Err(RangeError { min, max });
        }
        Ok(lock(&self.uniform64).gen_range(min..=max))
    }

    /// Uniformly distributed value in `[0, max]`.
    pub fn range_to(&self, max: u64) -> u64 {
        lock(&self.uniform64).gen_range(0..=max)
    }
}

impl Default for RandomService {
    fn default() -> Self {
        Self::new()
    }
}
