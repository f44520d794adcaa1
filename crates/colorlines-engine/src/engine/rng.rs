use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Seed of a deterministic random stream.
///
/// Seeds are strings; integer seeds are rendered to their decimal form first, so
/// `GameSeed::from(42)` and `GameSeed::from("42")` produce the same stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameSeed(String);

impl GameSeed {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Seed of the `index`-th game of a batch: `"{base}-{index}"`.
    #[must_use]
    pub fn for_game(&self, index: usize) -> Self {
        Self(format!("{}-{index}", self.0))
    }

    /// Seed of a named side stream: `"{base}/{name}"`.
    ///
    /// Used to give components their own randomness without consuming the
    /// spawn stream.
    #[must_use]
    pub fn stream(&self, name: &str) -> Self {
        Self(format!("{}/{name}", self.0))
    }

    /// 32-bit string hash (`h = 31 * h + unit` over UTF-16 code units).
    fn hash(&self) -> u32 {
        self.0
            .encode_utf16()
            .fold(0_u32, |h, unit| h.wrapping_mul(31).wrapping_add(u32::from(unit)))
    }
}

impl fmt::Display for GameSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameSeed {
    fn from(seed: &str) -> Self {
        Self(seed.to_owned())
    }
}

impl From<String> for GameSeed {
    fn from(seed: String) -> Self {
        Self(seed)
    }
}

impl From<u64> for GameSeed {
    fn from(seed: u64) -> Self {
        Self(seed.to_string())
    }
}

/// Deterministic pseudo-random stream.
///
/// The output is a pure function of the seed and the number of draws: there is no
/// global state and nothing is read from the OS. Each draw is a 32-bit
/// multiply/xorshift mix of the state.
///
/// Implements [`RngCore`], so the `rand` helpers (`choose`, `shuffle`, ...) can draw
/// from it without giving up reproducibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRng {
    state: u32,
}

/// Replacement state for seeds hashing to zero, which is a fixed point of the mix.
const ZERO_HASH_STATE: u32 = 0x9E37_79B9;

impl GameRng {
    #[must_use]
    pub fn new(seed: &GameSeed) -> Self {
        let state = match seed.hash() {
            0 => ZERO_HASH_STATE,
            h => h,
        };
        Self { state }
    }

    fn next_raw(&mut self) -> u32 {
        let mut s = self.state;
        s = (s ^ (s >> 15)).wrapping_mul(s | 1);
        s ^= s.wrapping_add((s ^ (s >> 7)).wrapping_mul(s | 61));
        self.state = s;
        s ^ (s >> 14)
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_raw()) / 4_294_967_296.0
    }

    /// Uniform index in `0..n`. Consumes one draw even when `n` is 0 or 1.
    ///
    /// # Panics
    ///
    /// Panics if `n` is 0.
    pub fn below(&mut self, n: usize) -> usize {
        assert!(n > 0, "cannot draw from an empty range");
        self.next_int(0, n - 1)
    }

    /// Uniform integer in `min..=max`, computed as `floor(f * (max - min + 1)) + min`.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn next_int(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(min <= max);
        let span = (max - min + 1) as f64;
        (self.next_f64() * span).floor() as usize + min
    }
}

impl RngCore for GameRng {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_raw());
        let hi = u64::from(self.next_raw());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_stream_for_fixed_seed() {
        let mut rng = GameRng::new(&GameSeed::from("fixed-seed"));
        let draws: Vec<_> = (0..4).map(|_| rng.next_u32()).collect();
        assert_eq!(draws, vec![3_198_807_867, 1_678_601_737, 329_401_471, 2_152_316_864]);
    }

    #[test]
    fn test_next_int_matches_floor_formula() {
        let mut rng = GameRng::new(&GameSeed::from("fixed-seed"));
        let draws: Vec<_> = (0..6).map(|_| rng.next_int(0, 8)).collect();
        assert_eq!(draws, vec![6, 3, 0, 4, 0, 6]);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let seed = GameSeed::from("fixed-seed").for_game(3);
        let mut a = GameRng::new(&seed);
        let mut b = GameRng::new(&seed);
        for _ in 0..100 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn test_derived_seeds() {
        let base = GameSeed::from("fixed-seed");
        assert_eq!(base.for_game(0).as_str(), "fixed-seed-0");
        assert_eq!(base.for_game(0).stream("agent").as_str(), "fixed-seed-0/agent");
        assert_eq!(GameSeed::from(42), GameSeed::from("42"));
        assert_ne!(
            GameRng::new(&base.for_game(0)),
            GameRng::new(&base.for_game(1))
        );
    }

    #[test]
    fn test_values_stay_in_range() {
        let mut rng = GameRng::new(&GameSeed::from("range"));
        for _ in 0..1000 {
            let f = rng.next_f64();
            assert!((0.0..1.0).contains(&f));
            let i = rng.next_int(3, 7);
            assert!((3..=7).contains(&i));
        }
        assert_eq!(rng.below(1), 0);
    }

    #[test]
    fn test_empty_seed_does_not_get_stuck() {
        let mut rng = GameRng::new(&GameSeed::from(""));
        let draws: Vec<_> = (0..3).map(|_| rng.next_u32()).collect();
        assert!(draws.iter().any(|d| *d != 0));
        assert_ne!(draws[0], draws[1]);
    }

    #[test]
    fn test_rand_helpers_are_reproducible() {
        use rand::seq::IndexedRandom as _;

        let items = [1, 2, 3, 4, 5, 6, 7, 8];
        let mut a = GameRng::new(&GameSeed::from("choose"));
        let mut b = GameRng::new(&GameSeed::from("choose"));
        for _ in 0..20 {
            assert_eq!(items.choose(&mut a), items.choose(&mut b));
        }
    }
}
