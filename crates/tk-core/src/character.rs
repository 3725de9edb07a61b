//! Character records: hit points, turns, logs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attack::Attack;
use crate::counter::{Counter, StateEntry, StateId};
use crate::critical::CriticalHitConfig;
use crate::passive::PassiveDamageEffect;

/// Unique identifier for a character in the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    /// Generate a new random character ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A character's hit point block and passive regeneration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterProfile {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Maximum hit points.
    #[serde(default)]
    pub max_hp: i32,
    /// Current hit points (0 to `max_hp`).
    #[serde(default)]
    pub current_hp: i32,
    /// Temporary hit points, consumed before current HP.
    #[serde(default)]
    pub temp_hp: i32,
    /// Passive regeneration applied at the start of each turn.
    #[serde(default)]
    pub regeneration: i32,
    /// Whether the character has been set up.
    #[serde(default)]
    pub is_configured: bool,
}

impl CharacterProfile {
    /// Create a configured character at full HP.
    pub fn new(name: impl Into<String>, max_hp: i32, regeneration: i32) -> Self {
        Self {
            name: name.into(),
            max_hp,
            current_hp: max_hp,
            temp_hp: 0,
            regeneration,
            is_configured: true,
        }
    }

    /// Apply damage, consuming temporary HP first. Current HP never drops
    /// below 0.
    pub fn take_damage(&mut self, amount: i32) {
        let mut remaining = amount.max(0);
        if self.temp_hp > 0 {
            let absorbed = self.temp_hp.min(remaining);
            self.temp_hp -= absorbed;
            remaining -= absorbed;
        }
        if remaining > 0 {
            self.current_hp = (self.current_hp - remaining).max(0);
        }
    }

    /// Heal up to `max_hp`. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_hp;
        self.current_hp = (self.current_hp + amount.max(0)).min(self.max_hp);
        self.current_hp - before
    }

    /// Grant temporary hit points.
    pub fn add_temp_hp(&mut self, amount: i32) {
        self.temp_hp += amount.max(0);
    }

    /// Whether the character is above 0 HP.
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Current plus temporary HP.
    pub fn total_hp(&self) -> i32 {
        self.current_hp + self.temp_hp
    }

    /// Restore full HP and drop temporary HP.
    pub fn reset_to_max(&mut self) {
        self.current_hp = self.max_hp;
        self.temp_hp = 0;
    }
}

/// Turn counter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnState {
    /// The current turn number.
    #[serde(default)]
    pub current: u32,
    /// Whether a turn is in progress.
    #[serde(default)]
    pub is_active: bool,
}

/// One line in a character's activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
    /// The turn number at the time.
    pub turn: u32,
    /// Short action label, e.g. `Damage`.
    pub action: String,
    /// Free-text details.
    pub details: String,
}

/// The HP/turn/log slice of a character record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterData {
    /// Hit points and regeneration.
    #[serde(default)]
    pub character: CharacterProfile,
    /// Turn state.
    #[serde(default)]
    pub turn: TurnState,
    /// Activity log, newest first.
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

impl CharacterData {
    /// Prepend a log entry stamped with the current turn.
    pub fn log(&mut self, action: impl Into<String>, details: impl Into<String>) {
        self.logs.insert(
            0,
            LogEntry {
                timestamp: Utc::now(),
                turn: self.turn.current,
                action: action.into(),
                details: details.into(),
            },
        );
    }

    /// Advance to the next turn and apply passive regeneration.
    pub fn start_turn(&mut self) {
        self.turn.current += 1;
        self.turn.is_active = true;
        if self.character.regeneration > 0 {
            self.character.heal(self.character.regeneration);
        }
    }

    /// Mark the current turn as finished.
    pub fn end_turn(&mut self) {
        self.turn.is_active = false;
    }
}

/// A complete character: HP block plus all owned collections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    /// Unique identifier.
    #[serde(default)]
    pub id: CharacterId,
    /// Hit points, turn state, and activity log.
    #[serde(default)]
    pub character_data: CharacterData,
    /// Configured attacks, in display order.
    #[serde(default)]
    pub attacks: Vec<Attack>,
    /// Critical hit configuration.
    #[serde(default)]
    pub critical_hit: CriticalHitConfig,
    /// Damage-over-time effects.
    #[serde(default)]
    pub passive_damages: Vec<PassiveDamageEffect>,
    /// Resource counters.
    #[serde(default)]
    pub counters: Vec<Counter>,
    /// Toggleable states.
    #[serde(default)]
    pub character_state: Vec<StateEntry>,
    /// The state highlighted in the UI, if any.
    #[serde(default)]
    pub selected_character_state_id: Option<StateId>,
}

impl CharacterRecord {
    /// Create a configured character record at full HP.
    pub fn new(name: impl Into<String>, max_hp: i32, regeneration: i32) -> Self {
        Self {
            id: CharacterId::new(),
            character_data: CharacterData {
                character: CharacterProfile::new(name, max_hp, regeneration),
                turn: TurnState::default(),
                logs: Vec::new(),
            },
            attacks: Vec::new(),
            critical_hit: CriticalHitConfig::default(),
            passive_damages: Vec::new(),
            counters: Vec::new(),
            character_state: Vec::new(),
            selected_character_state_id: None,
        }
    }

    /// The character's display name.
    pub fn name(&self) -> &str {
        &self.character_data.character.name
    }
}
