//! Deterministic random number generation for session setup.
//!
//! Randomness enters the game in exactly two places: the initial worker
//! placement and the god-card deal. Both draw from one seeded `GameRng`
//! so a session can be replayed from its seed.
//!
//! ```
//! use santorini_rules::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! let mut xs = [1, 2, 3, 4, 5];
//! let mut ys = xs;
//! a.shuffle(&mut xs);
//! b.shuffle(&mut ys);
//! assert_eq!(xs, ys);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Setup RNG backed by ChaCha8, remembering the seed it was built from.
#[derive(Clone, Debug)]
pub struct GameRng {
    seed: u64,
    chacha: ChaCha8Rng,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            chacha: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Fresh seed from the thread RNG, for sessions without a fixed seed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed to replay this session's setup.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fair coin, used to pick which seat gets the special card.
    pub fn coin_flip(&mut self) -> bool {
        self.chacha.gen()
    }

    /// Shuffle placement spots in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.chacha);
    }

    /// Pick one of `items`, or `None` when empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.chacha)
    }
}
