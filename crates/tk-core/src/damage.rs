//! Damage type enumeration and display colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A category of damage, used to bucket and color-code contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    /// Blunt-force damage (clubs, falls).
    Bludgeoning,
    /// Puncturing damage (arrows, spears).
    Piercing,
    /// Cutting damage (swords, claws).
    Slashing,
    /// Corrosive damage.
    Acid,
    /// Freezing damage.
    Cold,
    /// Burning damage.
    Fire,
    /// Pure magical force.
    Force,
    /// Electrical damage.
    Lightning,
    /// Life-draining damage.
    Necrotic,
    /// Toxic damage.
    Poison,
    /// Mental damage.
    Psychic,
    /// Searing radiant energy.
    Radiant,
    /// Concussive sound damage.
    Thunder,
}

impl DamageType {
    /// All damage types, in canonical order.
    pub const ALL: [DamageType; 13] = [
        Self::Bludgeoning,
        Self::Piercing,
        Self::Slashing,
        Self::Acid,
        Self::Cold,
        Self::Fire,
        Self::Force,
        Self::Lightning,
        Self::Necrotic,
        Self::Poison,
        Self::Psychic,
        Self::Radiant,
        Self::Thunder,
    ];

    /// The hex color associated with this type in UI output.
    pub fn color(self) -> &'static str {
        match self {
            Self::Bludgeoning => "#a1887f",
            Self::Piercing => "#757575",
            Self::Slashing => "#bdbdbd",
            Self::Acid => "#8bc34a",
            Self::Cold => "#26c6da",
            Self::Fire => "#ff7043",
            Self::Force => "#ab47bc",
            Self::Lightning => "#ffca28",
            Self::Necrotic => "#546e7a",
            Self::Poison => "#66bb6a",
            Self::Psychic => "#ec407a",
            Self::Radiant => "#ffee58",
            Self::Thunder => "#7e57c2",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bludgeoning => "bludgeoning",
            Self::Piercing => "piercing",
            Self::Slashing => "slashing",
            Self::Acid => "acid",
            Self::Cold => "cold",
            Self::Fire => "fire",
            Self::Force => "force",
            Self::Lightning => "lightning",
            Self::Necrotic => "necrotic",
            Self::Poison => "poison",
            Self::Psychic => "psychic",
            Self::Radiant => "radiant",
            Self::Thunder => "thunder",
        };
        write!(f, "{name}")
    }
}

impl FromStr for DamageType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|t| t.to_string() == lower)
            .copied()
            .ok_or_else(|| CoreError::UnknownDamageType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&DamageType::Fire).unwrap();
        assert_eq!(json, "\"fire\"");
        let back: DamageType = serde_json::from_str("\"necrotic\"").unwrap();
        assert_eq!(back, DamageType::Necrotic);
    }

    #[test]
    fn parse_round_trip() {
        for t in DamageType::ALL {
            assert_eq!(t.to_string().parse::<DamageType>().unwrap(), t);
        }
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!("Fire".parse::<DamageType>().unwrap(), DamageType::Fire);
        assert_eq!(" SLASHING ".parse::<DamageType>().unwrap(), DamageType::Slashing);
    }

    #[test]
    fn parse_unknown_fails() {
        assert!("sonic".parse::<DamageType>().is_err());
    }

    #[test]
    fn every_type_has_a_color() {
        for t in DamageType::ALL {
            assert!(t.color().starts_with('#'));
            assert_eq!(t.color().len(), 7);
        }
    }
}
