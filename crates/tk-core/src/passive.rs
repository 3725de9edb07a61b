//! Passive damage-over-time effects.
//!
//! A passive damage effect fires automatically at turn boundaries. A
//! duration of 0 means indefinite; positive durations count down at
//! end-of-turn and the effect is removed when it reaches 0.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::damage::DamageType;

/// Unique identifier for a passive damage effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectId(pub Uuid);

impl EffectId {
    /// Generate a new random effect ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EffectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// One damage component of a passive effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassiveRoll {
    /// Number of dice to roll.
    pub num_dice: u32,
    /// Number of sides per die.
    pub dice_type: u32,
    /// Flat bonus added to the rolled sum.
    #[serde(default)]
    pub bonus: i32,
    /// The damage type of this component.
    #[serde(rename = "type")]
    pub damage_type: DamageType,
}

/// A damage-over-time effect with an optional countdown duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassiveDamageEffect {
    /// Unique identifier.
    #[serde(default)]
    pub id: EffectId,
    /// Display name.
    pub name: String,
    /// Remaining turns; 0 means indefinite.
    #[serde(default)]
    pub duration: u32,
    /// Damage components applied each turn.
    #[serde(default)]
    pub damage_rolls: Vec<PassiveRoll>,
}

impl PassiveDamageEffect {
    /// Create an indefinite effect from its damage components.
    pub fn new(name: impl Into<String>, damage_rolls: Vec<PassiveRoll>) -> Self {
        Self {
            id: EffectId::new(),
            name: name.into(),
            duration: 0,
            damage_rolls,
        }
    }
}

/// Decrement timed effects at end-of-turn and drop the expired ones.
///
/// Effects that started the turn at duration 0 are indefinite and are never
/// decremented or removed; an effect whose duration reaches exactly 0 after
/// the decrement is removed.
pub fn tick_passive_damages(effects: &mut Vec<PassiveDamageEffect>) {
    effects.retain_mut(|effect| {
        if effect.duration == 0 {
            return true;
        }
        effect.duration -= 1;
        effect.duration > 0
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(name: &str, duration: u32) -> PassiveDamageEffect {
        let mut effect = PassiveDamageEffect::new(name, Vec::new());
        effect.duration = duration;
        effect
    }

    #[test]
    fn timed_effect_counts_down_and_expires() {
        let mut effects = vec![timed("Burning", 2)];
        tick_passive_damages(&mut effects);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].duration, 1);
        tick_passive_damages(&mut effects);
        assert!(effects.is_empty());
    }

    #[test]
    fn indefinite_effect_survives_forever() {
        let mut effects = vec![timed("Cursed", 0)];
        for _ in 0..10 {
            tick_passive_damages(&mut effects);
        }
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].duration, 0);
    }

    #[test]
    fn mixed_effects_tick_independently() {
        let mut effects = vec![timed("Burning", 1), timed("Cursed", 0), timed("Poisoned", 3)];
        tick_passive_damages(&mut effects);
        let names: Vec<_> = effects.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Cursed", "Poisoned"]);
        assert_eq!(effects[1].duration, 2);
    }

    #[test]
    fn serde_field_names() {
        let effect = PassiveDamageEffect::new(
            "Burning",
            vec![PassiveRoll {
                num_dice: 2,
                dice_type: 4,
                bonus: 1,
                damage_type: DamageType::Fire,
            }],
        );
        let json = serde_json::to_value(&effect).unwrap();
        let roll = &json["damageRolls"][0];
        assert_eq!(roll["numDice"], 2);
        assert_eq!(roll["diceType"], 4);
        assert_eq!(roll["type"], "fire");
    }
}
