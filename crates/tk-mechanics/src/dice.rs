//! Die rolling over an injected randomness source.
//!
//! Resolution functions take a [`DieRoller`] rather than an RNG directly so
//! that attacks can be resolved from a seeded [`StdRng`] or replayed from a
//! scripted sequence.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

use crate::error::{MechError, MechResult};

/// A source of individual die outcomes.
pub trait DieRoller {
    /// Roll one die, returning a value in `[1, sides]`.
    fn roll_die(&mut self, sides: u32) -> u32;
}

impl DieRoller for StdRng {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides.max(1))
    }
}

/// A roller that replays a fixed sequence of values.
///
/// Used for deterministic tests and dice-history replay. Values are clamped
/// to the requested die; an exhausted sequence yields 1s.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    values: VecDeque<u32>,
}

impl ScriptedRoller {
    /// Create a roller that yields the given values in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// How many scripted values remain.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl DieRoller for ScriptedRoller {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.values
            .pop_front()
            .unwrap_or(1)
            .clamp(1, sides.max(1))
    }
}

/// Roll `count` dice of `sides` and return each individual value.
///
/// No per-die minimum is applied here; clamping is the caller's
/// responsibility so that later replacement logic keeps per-die granularity.
pub fn roll_values(roller: &mut dyn DieRoller, count: u32, sides: u32) -> MechResult<Vec<u32>> {
    if count == 0 || sides == 0 {
        return Err(MechError::InvalidDiceSpec { count, sides });
    }
    Ok((0..count).map(|_| roller.roll_die(sides)).collect())
}

/// Roll `count` dice of `sides` and return the sum.
pub fn roll_sum(roller: &mut dyn DieRoller, count: u32, sides: u32) -> MechResult<u32> {
    Ok(roll_values(roller, count, sides)?.iter().sum())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn rolls_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let values = roll_values(&mut rng, 100, 6).unwrap();
        assert_eq!(values.len(), 100);
        assert!(values.iter().all(|v| (1..=6).contains(v)));
    }

    #[test]
    fn seeded_rolls_are_deterministic() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        assert_eq!(
            roll_values(&mut a, 5, 20).unwrap(),
            roll_values(&mut b, 5, 20).unwrap()
        );
    }

    #[test]
    fn zero_count_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(roll_values(&mut rng, 0, 6).is_err());
    }

    #[test]
    fn zero_sides_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(roll_sum(&mut rng, 2, 0).is_err());
    }

    #[test]
    fn scripted_roller_replays_sequence() {
        let mut roller = ScriptedRoller::new([1, 5, 3]);
        assert_eq!(roll_values(&mut roller, 3, 6).unwrap(), vec![1, 5, 3]);
        assert_eq!(roller.remaining(), 0);
    }

    #[test]
    fn scripted_roller_clamps_to_die() {
        let mut roller = ScriptedRoller::new([20, 0]);
        assert_eq!(roller.roll_die(6), 6);
        assert_eq!(roller.roll_die(6), 1);
    }

    #[test]
    fn exhausted_script_yields_ones() {
        let mut roller = ScriptedRoller::new([4]);
        assert_eq!(roll_values(&mut roller, 3, 8).unwrap(), vec![4, 1, 1]);
    }

    #[test]
    fn sum_matches_values() {
        let mut roller = ScriptedRoller::new([2, 3, 4]);
        assert_eq!(roll_sum(&mut roller, 3, 6).unwrap(), 9);
    }
}
