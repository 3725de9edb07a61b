//! Dice specifications and expressions.
//!
//! A [`DiceSpec`] is a bare `NdM` count-and-size pair; a [`DiceExpression`]
//! adds an optional flat bonus (`2d6+3`). Both parse case-insensitively and
//! serialize as the compact string form.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// A count of identical dice, e.g. `2d6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceSpec {
    /// Number of dice to roll.
    pub count: u32,
    /// Number of sides per die (at least 2).
    pub sides: u32,
}

impl DiceSpec {
    /// Create a spec, rejecting a zero count or a die with fewer than 2 sides.
    pub fn new(count: u32, sides: u32) -> Result<Self, CoreError> {
        if count == 0 || sides < 2 {
            return Err(CoreError::InvalidDiceSpec(format!("{count}d{sides}")));
        }
        Ok(Self { count, sides })
    }
}

impl FromStr for DiceSpec {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let (count_str, sides_str) = lower
            .split_once('d')
            .ok_or_else(|| CoreError::InvalidDiceSpec(s.to_string()))?;
        let count = count_str
            .parse::<u32>()
            .map_err(|_| CoreError::InvalidDiceSpec(s.to_string()))?;
        let sides = sides_str
            .parse::<u32>()
            .map_err(|_| CoreError::InvalidDiceSpec(s.to_string()))?;
        Self::new(count, sides)
    }
}

impl fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

impl Serialize for DiceSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DiceSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// A dice spec with a flat bonus, e.g. `2d6+3` or `1d8-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceExpression {
    /// The dice part of the expression.
    pub dice: DiceSpec,
    /// Flat bonus added to the rolled sum (may be negative).
    pub bonus: i32,
}

impl FromStr for DiceExpression {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || CoreError::InvalidDiceExpression(s.to_string());

        // Split off a trailing +B or -B, taking care not to confuse the
        // sign with one inside the dice part (dice parts have no signs).
        let split_at = trimmed.rfind(['+', '-']);
        let (dice_str, bonus) = match split_at {
            Some(pos) if pos > 0 => {
                let (head, tail) = trimmed.split_at(pos);
                let bonus = tail.parse::<i32>().map_err(|_| invalid())?;
                (head, bonus)
            }
            _ => (trimmed, 0),
        };

        let dice = dice_str
            .parse::<DiceSpec>()
            .map_err(|_| CoreError::InvalidDiceExpression(s.to_string()))?;
        Ok(Self { dice, bonus })
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bonus {
            0 => write!(f, "{}", self.dice),
            b if b > 0 => write!(f, "{}+{b}", self.dice),
            b => write!(f, "{}{b}", self.dice),
        }
    }
}
