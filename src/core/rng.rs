//! Seedable randomness for dealing.
//!
//! `GameRng` wraps ChaCha8 so a seed fixes every deal made from it, and its
//! stream position can be saved and restored to replay a particular round.
//!
//! ```
//! use memory_match::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut faces = vec!["Red", "Blue", "Teal", "Olive"];
//! rng.shuffle(&mut faces);
//!
//! let mut again = GameRng::new(42);
//! let mut replay = vec!["Red", "Blue", "Teal", "Olive"];
//! again.shuffle(&mut replay);
//! assert_eq!(faces, replay);
//! ```

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deal RNG.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the thread RNG.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().next_u64())
    }

    /// The seed this generator started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..=max`.
    pub fn index_inclusive(&mut self, max: usize) -> usize {
        self.inner.gen_range(0..=max)
    }

    /// In-place Fisher–Yates shuffle.
    ///
    /// For `i` from the last index down to 1, swap position `i` with a
    /// uniform pick from `[0, i]`.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index_inclusive(i);
            items.swap(i, j);
        }
    }

    /// Where this generator is in its stream.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume a stream saved with [`GameRng::state`].
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Saved stream position of a `GameRng`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(rng: &mut GameRng, n: usize) -> Vec<usize> {
        (0..n).map(|_| rng.index_inclusive(1000)).collect()
    }

    #[test]
    fn test_same_seed_same_stream() {
        assert_eq!(draws(&mut GameRng::new(42), 50), draws(&mut GameRng::new(42), 50));
        assert_ne!(draws(&mut GameRng::new(1), 10), draws(&mut GameRng::new(2), 10));
    }

    #[test]
    fn test_index_inclusive_reaches_max() {
        let mut rng = GameRng::new(7);
        let picks: Vec<_> = (0..1000).map(|_| rng.index_inclusive(3)).collect();
        assert!(picks.iter().all(|&i| i <= 3));
        assert!(picks.contains(&3));
        assert_eq!(rng.index_inclusive(0), 0);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(42);
        let mut faces: Vec<u32> = (1..=10).collect();
        rng.shuffle(&mut faces);
        assert_ne!(faces, (1..=10).collect::<Vec<_>>());

        faces.sort_unstable();
        assert_eq!(faces, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_short_slices() {
        let mut rng = GameRng::new(42);
        let mut empty: [u8; 0] = [];
        rng.shuffle(&mut empty);

        let mut one = [9];
        rng.shuffle(&mut one);
        assert_eq!(one, [9]);
    }

    #[test]
    fn test_resume_from_state() {
        let mut rng = GameRng::new(42);
        draws(&mut rng, 100);

        let saved = rng.state();
        let expected = draws(&mut rng, 10);
        assert_eq!(draws(&mut GameRng::from_state(&saved), 10), expected);

        let json = serde_json::to_string(&saved).unwrap();
        let back: GameRngState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, saved);
    }
}
