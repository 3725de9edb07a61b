//! Attack definitions: damage rolls, lifesteal, reroll dice.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::damage::DamageType;
use crate::dice::DiceSpec;

/// Unique identifier for an attack within a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackId(pub Uuid);

impl AttackId {
    /// Generate a new random attack ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Healing granted to the attacker as a fraction of a damage roll's subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeSteal {
    /// Percentage of the subtotal healed (0-100).
    pub percentage: u32,
}

/// One damage component of an attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageRoll {
    /// The dice to roll, e.g. `2d6`.
    pub dice: DiceSpec,
    /// Floor applied to each individual die result. Values are only ever
    /// clamped up to this, never down.
    #[serde(default = "default_min", rename = "min")]
    pub min_per_die: u32,
    /// Flat bonus added to the rolled sum (may be negative).
    #[serde(default)]
    pub bonus: i32,
    /// The damage type this component contributes to.
    #[serde(rename = "type")]
    pub damage_type: DamageType,
    /// Lifesteal attached to this component, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_steal: Option<LifeSteal>,
}

fn default_min() -> u32 {
    1
}

impl DamageRoll {
    /// Create a plain damage roll with no minimum above 1 and no lifesteal.
    pub fn new(dice: DiceSpec, bonus: i32, damage_type: DamageType) -> Self {
        Self {
            dice,
            min_per_die: 1,
            bonus,
            damage_type,
            life_steal: None,
        }
    }

    /// The lifesteal percentage, or 0 when none is attached.
    pub fn life_steal_percentage(&self) -> u32 {
        self.life_steal.map(|ls| ls.percentage).unwrap_or(0)
    }
}

/// A secondary pool entry of dice that may replace an attack's lowest dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RerollDice {
    /// The dice to roll for the pool, e.g. `2d6`.
    pub dice: DiceSpec,
    /// Floor applied to each rolled reroll value.
    #[serde(default = "default_min", rename = "min")]
    pub min_per_die: u32,
}

/// A configured attack owned by exactly one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attack {
    /// Unique identifier.
    #[serde(default)]
    pub id: AttackId,
    /// Display name.
    pub name: String,
    /// Ordered damage components; order is significant.
    pub damage_rolls: Vec<DamageRoll>,
    /// Dice available for the reroll-and-replace mechanic.
    #[serde(default)]
    pub reroll_dice: Vec<RerollDice>,
    /// Whether this attack can be marked as prepared.
    #[serde(default)]
    pub is_preparable: bool,
    /// Whether this attack is currently prepared.
    #[serde(default)]
    pub is_prepared: bool,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

impl Attack {
    /// Create a named attack from its damage components.
    pub fn new(name: impl Into<String>, damage_rolls: Vec<DamageRoll>) -> Self {
        Self {
            id: AttackId::new(),
            name: name.into(),
            damage_rolls,
            reroll_dice: Vec::new(),
            is_preparable: false,
            is_prepared: false,
            description: String::new(),
        }
    }

    /// Copy this attack under a fresh ID with a suffixed name.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.id = AttackId::new();
        copy.name = format!("{} (copy)", self.name);
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slash() -> Attack {
        Attack::new(
            "Slash",
            vec![DamageRoll::new(
                DiceSpec { count: 2, sides: 6 },
                3,
                DamageType::Slashing,
            )],
        )
    }

    #[test]
    fn duplicate_gets_fresh_id_and_suffix() {
        let original = slash();
        let copy = original.duplicate();
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.name, "Slash (copy)");
        assert_eq!(copy.damage_rolls, original.damage_rolls);
    }

    #[test]
    fn serde_uses_original_field_names() {
        let attack = slash();
        let json = serde_json::to_value(&attack).unwrap();
        assert!(json.get("damageRolls").is_some());
        assert!(json.get("rerollDice").is_some());
        let roll = &json["damageRolls"][0];
        assert_eq!(roll["dice"], "2d6");
        assert_eq!(roll["type"], "slashing");
        assert_eq!(roll["min"], 1);
        // lifesteal is absence, not a zero object
        assert!(roll.get("lifeSteal").is_none());
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{
            "name": "Bite",
            "damageRolls": [{"dice": "1d4", "type": "piercing"}]
        }"#;
        let attack: Attack = serde_json::from_str(json).unwrap();
        assert_eq!(attack.name, "Bite");
        assert!(attack.reroll_dice.is_empty());
        assert_eq!(attack.damage_rolls[0].min_per_die, 1);
        assert_eq!(attack.damage_rolls[0].bonus, 0);
        assert!(attack.damage_rolls[0].life_steal.is_none());
    }

    #[test]
    fn life_steal_percentage_helper() {
        let mut roll = DamageRoll::new(DiceSpec { count: 1, sides: 6 }, 0, DamageType::Necrotic);
        assert_eq!(roll.life_steal_percentage(), 0);
        roll.life_steal = Some(LifeSteal { percentage: 25 });
        assert_eq!(roll.life_steal_percentage(), 25);
    }
}
