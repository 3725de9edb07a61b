//! Resolved attack results and their aggregates.
//!
//! An [`AttackResult`] is derived and never persisted. It keeps per-die
//! granularity (size, current value, pre-replacement value) so the
//! reroll-and-replace pass can cross-reference dice, and per-source
//! lifesteal attribution so recomputation after a replacement is exact.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tk_core::DamageType;

/// One rolled die inside a damage bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolledDie {
    /// The current (possibly replaced, always min-clamped) value.
    pub value: u32,
    /// The pre-replacement value, set only when `is_replaced` is true.
    pub original_value: Option<u32>,
    /// The size of the die this value came from; the grouping key the
    /// reroll pool matches against.
    pub die_size: u32,
    /// Whether a reroll value has replaced this die.
    pub is_replaced: bool,
}

impl RolledDie {
    /// A freshly rolled, unreplaced die.
    pub fn new(value: u32, die_size: u32) -> Self {
        Self {
            value,
            original_value: None,
            die_size,
            is_replaced: false,
        }
    }
}

/// One lifesteal-bearing damage component's claim on a bucket.
///
/// Records which dice (by index range into the bucket's rolls) and which
/// flat bonus the percentage applies to, so healing can be recomputed
/// exactly after dice are replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeStealSource {
    /// Percentage of this source's subtotal healed (0-100).
    pub percentage: u32,
    /// Index of this source's first die in the bucket's rolls.
    pub dice_start: usize,
    /// Number of dice belonging to this source.
    pub dice_len: usize,
    /// The flat bonus counted into this source's subtotal.
    pub bonus: i32,
}

/// Accumulated lifesteal for one damage bucket.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeStealTally {
    /// Total healing from this bucket.
    pub healed: i32,
    /// The contributing sources, in damage-roll order.
    pub sources: Vec<LifeStealSource>,
}

impl LifeStealTally {
    /// Display label joining every contributing percentage, e.g. `10% / 20%`.
    pub fn percentage_label(&self) -> String {
        let parts: Vec<String> = self.sources.iter().map(|s| format!("{}%", s.percentage)).collect();
        parts.join(" / ")
    }
}

/// All damage of one type accumulated across an attack's components.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageBucket {
    /// Every rolled die contributing to this type, in roll order.
    pub rolls: Vec<RolledDie>,
    /// Sum of flat bonuses contributing to this type.
    pub bonus: i32,
    /// Sum of die values plus bonuses.
    pub total: i32,
    /// Lifesteal accumulated for this type; `None` when no component of
    /// this type steals life (absence, not a zero object).
    pub life_steal: Option<LifeStealTally>,
}

impl DamageBucket {
    /// Sum of the current die values, before bonuses.
    pub fn dice_sum(&self) -> i32 {
        self.rolls.iter().map(|d| d.value as i32).sum()
    }
}

/// The outcome of resolving an attack, grouped by damage type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackResult {
    /// The attack name, suffixed for critical variants.
    pub name: String,
    /// Per-type damage buckets, in canonical type order.
    pub results: BTreeMap<DamageType, DamageBucket>,
    /// Sum of every bucket's total.
    pub grand_total: i32,
    /// Sum of every bucket's lifesteal healing.
    pub total_healed: i32,
}

impl AttackResult {
    /// Recompute every bucket total, every lifesteal amount, and the grand
    /// aggregates from the current die values.
    ///
    /// Lifesteal is rederived per source from the dice it originally
    /// claimed, so buckets fed by components with different percentages
    /// recompute exactly.
    pub fn recompute(&mut self) {
        let mut grand_total = 0;
        let mut total_healed = 0;

        for bucket in self.results.values_mut() {
            bucket.total = bucket.dice_sum() + bucket.bonus;
            grand_total += bucket.total;

            if let Some(tally) = bucket.life_steal.as_mut() {
                let mut healed = 0;
                for source in &tally.sources {
                    let dice: i32 = bucket
                        .rolls
                        .iter()
                        .skip(source.dice_start)
                        .take(source.dice_len)
                        .map(|d| d.value as i32)
                        .sum();
                    healed += heal_amount(dice + source.bonus, source.percentage);
                }
                tally.healed = healed;
                total_healed += healed;
            }
        }

        self.grand_total = grand_total;
        self.total_healed = total_healed;
    }
}

/// Healing for a subtotal at a percentage: `floor(subtotal × pct / 100)`.
pub(crate) fn heal_amount(subtotal: i32, percentage: u32) -> i32 {
    (subtotal * percentage as i32).div_euclid(100)
}
