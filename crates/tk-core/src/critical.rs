//! Critical hit rule configuration.

use serde::{Deserialize, Serialize};

/// Which critical hit rule variant a character uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CriticalRule {
    /// Double every damage roll's dice count (bonuses unchanged).
    #[default]
    Default,
    /// Level-scaled "massive damage": maximize each die on top of a normal
    /// roll, plus a flat force-damage bonus by character level.
    MassiveDamage,
    /// An unrecognized rule from a newer or corrupted config. Resolution
    /// falls back to a non-critical attack.
    #[serde(other)]
    Unknown,
}

/// Per-character critical hit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalHitConfig {
    /// The selected rule variant.
    #[serde(default)]
    pub rule: CriticalRule,
    /// Character level; only consulted by [`CriticalRule::MassiveDamage`].
    #[serde(default = "default_level")]
    pub character_level: u32,
}

fn default_level() -> u32 {
    1
}

impl Default for CriticalHitConfig {
    fn default() -> Self {
        Self {
            rule: CriticalRule::Default,
            character_level: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_kebab_case_rules() {
        assert_eq!(
            serde_json::to_string(&CriticalRule::MassiveDamage).unwrap(),
            "\"massive-damage\""
        );
        let rule: CriticalRule = serde_json::from_str("\"default\"").unwrap();
        assert_eq!(rule, CriticalRule::Default);
    }

    #[test]
    fn unknown_rule_is_tolerated() {
        let rule: CriticalRule = serde_json::from_str("\"brutal-crits\"").unwrap();
        assert_eq!(rule, CriticalRule::Unknown);
    }

    #[test]
    fn config_defaults() {
        let config: CriticalHitConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.rule, CriticalRule::Default);
        assert_eq!(config.character_level, 1);
    }
}
