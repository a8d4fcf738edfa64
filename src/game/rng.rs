//! Injectable randomness
//!
//! Shuffles, critical-hit rolls, and intent selection all read from a
//! `RandomSource`, so tests can script exact outcomes and real battles can
//! be replayed from a seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub trait RandomSource {
    /// Uniform float in [0, 1)
    fn next_float(&mut self) -> f64;

    /// Uniform index in [0, n); `n` must be non-zero
    fn next_index(&mut self, n: usize) -> usize {
        ((self.next_float() * n as f64) as usize).min(n.saturating_sub(1))
    }

    /// Uniform float in [0, 100)
    fn roll_percent(&mut self) -> f64 {
        self.next_float() * 100.0
    }
}

/// Seeded ChaCha12 source (serializable, so a saved battle resumes with the
/// exact same future rolls)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeededRandom {
    rng: ChaCha12Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        SeededRandom {
            rng: ChaCha12Rng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_float(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of values, cycling when exhausted
///
/// An empty script always yields 0.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptedRandom {
    values: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        ScriptedRandom {
            values: values.into_iter().map(|v| v.clamp(0.0, 0.999_999)).collect(),
        }
    }

    /// Source that always returns the same value
    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_float(&mut self) -> f64 {
        match self.values.pop_front() {
            Some(v) => {
                self.values.push_back(v);
                v
            }
            None => 0.0,
        }
    }
}

/// Fisher-Yates shuffle driven by a `RandomSource`
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_determinism() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        for _ in 0..20 {
            assert_eq!(a.next_float(), b.next_float());
        }
    }

    #[test]
    fn test_seeded_range() {
        let mut rng = SeededRandom::new(7);
        for _ in 0..1000 {
            let v = rng.next_float();
            assert!((0.0..1.0).contains(&v));
            assert!(rng.next_index(5) < 5);
        }
    }

    #[test]
    fn test_scripted_cycles() {
        let mut rng = ScriptedRandom::new([0.1, 0.5]);
        assert_eq!(rng.next_float(), 0.1);
        assert_eq!(rng.next_float(), 0.5);
        assert_eq!(rng.next_float(), 0.1);

        let mut empty = ScriptedRandom::default();
        assert_eq!(empty.next_float(), 0.0);
    }

    #[test]
    fn test_scripted_clamps_to_unit_interval() {
        let mut rng = ScriptedRandom::constant(1.0);
        assert!(rng.next_float() < 1.0);
        assert_eq!(rng.next_index(4), 3);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SeededRandom::new(3);
        let mut items: Vec<u32> = (0..20).collect();
        shuffle(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_seeded_random_serde_fidelity() {
        let mut rng = SeededRandom::new(99);
        rng.next_float();
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: SeededRandom = serde_json::from_str(&json).unwrap();
        for _ in 0..10 {
            assert_eq!(rng.next_float(), restored.next_float());
        }
    }
}
