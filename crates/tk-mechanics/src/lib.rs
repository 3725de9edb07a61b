//! Attack resolution engine for Tallykeep.
//!
//! Provides dice rolling, multi-type damage aggregation with lifesteal
//! accounting, two critical-hit rule variants, and the reroll-and-replace
//! mechanic. All resolution is pure over an injected [`DieRoller`], so
//! results are reproducible from a seed or a scripted sequence.

pub mod dice;
pub mod error;
pub mod reroll;
pub mod resolve;
pub mod result;

pub use dice::{DieRoller, ScriptedRoller, roll_sum, roll_values};
pub use error::{MechError, MechResult};
pub use reroll::{RerollPool, apply_replacement, roll_reroll_pool};
pub use resolve::{dad_bonus, resolve_attack, resolve_critical_attack};
pub use result::{AttackResult, DamageBucket, LifeStealSource, LifeStealTally, RolledDie};
