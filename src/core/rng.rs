//! Deterministic random number generation.
//!
//! Every random decision in an episode (which empty tile gets a station, its
//! type, each passenger's destination) draws from one `GameRng`, so an
//! episode is a pure function of its seed and the agent's actions.
//!
//! ```
//! use minimetro_rl::core::GameRng;
//!
//! let mut spawns = GameRng::new(42);
//! let mut lookahead = spawns.fork();
//!
//! let a: Vec<_> = (0..8).map(|_| spawns.gen_index(100)).collect();
//! let b: Vec<_> = (0..8).map(|_| lookahead.gen_index(100)).collect();
//! assert_ne!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive an independent stream, e.g. for a lookahead copy of the state.
    ///
    /// The n-th fork of a given seed is always the same stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Uniform index in `0..len`.
    ///
    /// Panics if `len` is zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Uniform pick from `slice`, `None` if it is empty.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
