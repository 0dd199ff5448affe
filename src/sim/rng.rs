//! Random source for question generation
//!
//! Everything random in a session comes from one `RandomSource`. Production
//! uses a seeded Pcg32 so any session can be replayed from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Uniform integer and coin-flip draws.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`. Returns 0 when `bound` is 0.
    fn next_int(&mut self, bound: u32) -> u32;

    /// Fair coin.
    fn next_bool(&mut self) -> bool;

    /// Uniform integer in `[low, low + count)`.
    fn next_in(&mut self, low: i32, count: u32) -> i32 {
        low + self.next_int(count) as i32
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_int(&mut self, bound: u32) -> u32 {
        (**self).next_int(bound)
    }

    fn next_bool(&mut self) -> bool {
        (**self).next_bool()
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Seeded Pcg32 source
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: RngState,
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        let state = RngState::new(seed);
        Self {
            rng: state.to_rng(),
            state,
        }
    }

    /// Seed from the thread-local entropy source
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.state.seed
    }
}

impl RandomSource for SeededRng {
    fn next_int(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.rng.random_range(0..bound)
    }

    fn next_bool(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}

/// Replays a fixed sequence of draws; used to force specific templates.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedRng {
    draws: std::collections::VecDeque<u32>,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(draws: &[u32]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
        }
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.draws.is_empty()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn next_int(&mut self, bound: u32) -> u32 {
        let value = self.draws.pop_front().expect("scripted draws exhausted");
        assert!(value < bound, "scripted draw {value} out of range 0..{bound}");
        value
    }

    fn next_bool(&mut self) -> bool {
        self.next_int(2) == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRng::new(42);
        let mut b = SeededRng::new(42);
        for bound in 1..50 {
            assert_eq!(a.next_int(bound), b.next_int(bound));
            assert_eq!(a.next_bool(), b.next_bool());
        }
    }

    #[test]
    fn test_next_int_in_bounds() {
        let mut rng = SeededRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_int(5) < 5);
        }
        assert_eq!(rng.next_int(0), 0);
        assert_eq!(rng.next_int(1), 0);
    }

    #[test]
    fn test_next_bool_produces_both() {
        let mut rng = SeededRng::new(3);
        let trues = (0..200).filter(|_| rng.next_bool()).count();
        assert!(trues > 50 && trues < 150);
    }

    #[test]
    fn test_next_in_range() {
        let mut rng = SeededRng::new(11);
        for _ in 0..500 {
            let v = rng.next_in(20, 60);
            assert!((20..=79).contains(&v));
        }
    }

    #[test]
    fn test_seed_is_recorded() {
        assert_eq!(SeededRng::new(99).seed(), 99);
    }

    #[test]
    fn test_scripted_rng_replays() {
        let mut rng = ScriptedRng::new(&[3, 1, 0]);
        assert_eq!(rng.next_int(4), 3);
        assert!(rng.next_bool());
        assert!(!rng.next_bool());
        assert!(rng.is_exhausted());
    }
}
