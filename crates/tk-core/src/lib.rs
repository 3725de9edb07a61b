//! Core types for Tallykeep: attacks, counters, characters, and the account
//! aggregate.
//!
//! This crate defines the data model that the mechanics engine resolves and
//! the store persists. It is independent of both — you can construct an
//! [`AccountData`] programmatically or deserialize one from JSON.

/// The account aggregate: the single persisted root tree.
pub mod account;
/// Attack definitions: damage rolls, lifesteal, reroll dice.
pub mod attack;
/// Character records: hit points, turns, logs.
pub mod character;
/// Resource counters and toggleable character states.
pub mod counter;
/// Critical hit rule configuration.
pub mod critical;
/// Damage type enumeration and display colors.
pub mod damage;
/// Dice specifications and expressions.
pub mod dice;
/// Error types used throughout the crate.
pub mod error;
/// Passive damage-over-time effects.
pub mod passive;

pub use account::{ACCOUNT_VERSION, AccountData, DiceHistoryEntry};
pub use attack::{Attack, AttackId, DamageRoll, LifeSteal, RerollDice};
pub use character::{
    CharacterData, CharacterId, CharacterProfile, CharacterRecord, LogEntry, TurnState,
};
pub use counter::{
    Counter, CounterButton, CounterId, DiscountType, RestKind, StateEntry, StateId,
};
pub use critical::{CriticalHitConfig, CriticalRule};
pub use damage::DamageType;
pub use dice::{DiceExpression, DiceSpec};
pub use error::{CoreError, CoreResult};
pub use passive::{EffectId, PassiveDamageEffect, PassiveRoll, tick_passive_damages};
