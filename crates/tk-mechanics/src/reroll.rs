//! The reroll-and-replace mechanic.
//!
//! After seeing a base attack result, the player may roll the attack's
//! reroll dice and use them to replace the lowest matching dice. A pool is
//! single-use: one [`apply_replacement`] pass per rolled pool, and a fresh
//! pool per attempt.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tk_core::{DamageType, RerollDice};

use crate::dice::{DieRoller, roll_values};
use crate::error::MechResult;
use crate::result::AttackResult;

/// Rolled reroll values grouped by die size, each group sorted descending.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RerollPool {
    groups: BTreeMap<u32, Vec<u32>>,
}

impl RerollPool {
    /// Whether the pool holds no values at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate the (die size, descending values) groups in size order.
    pub fn groups(&self) -> impl Iterator<Item = (u32, &[u32])> {
        self.groups.iter().map(|(sides, values)| (*sides, values.as_slice()))
    }

    /// The rolled values for one die size, descending.
    pub fn values_for(&self, sides: u32) -> &[u32] {
        self.groups.get(&sides).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Roll an attack's reroll dice into a pool.
///
/// Every die is rolled individually (never summed), clamped up to its
/// entry's minimum, grouped by die size, and sorted descending within the
/// group. The group key matches [`RolledDie::die_size`], so pool values can
/// be cross-referenced against an [`AttackResult`].
///
/// [`RolledDie::die_size`]: crate::result::RolledDie::die_size
pub fn roll_reroll_pool(
    reroll_dice: &[RerollDice],
    roller: &mut dyn DieRoller,
) -> MechResult<RerollPool> {
    let mut pool = RerollPool::default();
    for entry in reroll_dice {
        let values = roll_values(roller, entry.dice.count, entry.dice.sides)?;
        let group = pool.groups.entry(entry.dice.sides).or_default();
        group.extend(values.into_iter().map(|v| v.max(entry.min_per_die)));
    }
    for group in pool.groups.values_mut() {
        group.sort_unstable_by(|a, b| b.cmp(a));
    }
    Ok(pool)
}

/// Replace the lowest matching dice of a result with higher pool values.
///
/// Pure over a deep copy; the input result is never mutated. Per die size,
/// the k lowest not-yet-replaced dice are paired with the k highest pool
/// values, and a die is replaced only when the pool value is strictly
/// greater. Replaced dice keep their pre-replacement value in
/// `original_value` and are never targeted again. All totals, lifesteal
/// amounts, and grand aggregates are recomputed.
pub fn apply_replacement(result: &AttackResult, pool: &RerollPool) -> AttackResult {
    let mut out = result.clone();

    for (sides, rerolls) in pool.groups() {
        let mut candidates: Vec<(DamageType, usize, u32)> = Vec::new();
        for (damage_type, bucket) in &out.results {
            for (index, die) in bucket.rolls.iter().enumerate() {
                if !die.is_replaced && die.die_size == sides {
                    candidates.push((*damage_type, index, die.value));
                }
            }
        }
        // Stable sort: ties keep bucket/roll order, so pairing stays
        // deterministic.
        candidates.sort_by_key(|&(_, _, value)| value);

        for (&(damage_type, index, value), &reroll) in candidates.iter().zip(rerolls) {
            if reroll <= value {
                continue;
            }
            if let Some(bucket) = out.results.get_mut(&damage_type) {
                let die = &mut bucket.rolls[index];
                die.original_value = Some(die.value);
                die.value = reroll;
                die.is_replaced = true;
            }
        }
    }

    out.recompute();
    out
}
