//! The account aggregate: the single persisted root tree.
//!
//! Every character and account-wide collection hangs off [`AccountData`].
//! Nothing is shared across characters; the aggregate exclusively owns all
//! nested collections and is written back wholesale on every mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::character::{CharacterId, CharacterRecord};

/// The schema version written by this build.
pub const ACCOUNT_VERSION: u32 = 2;

/// One remembered plain dice roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceHistoryEntry {
    /// The rolled expression, e.g. `2d6+3`.
    pub expression: String,
    /// Individual die values.
    pub rolls: Vec<u32>,
    /// The final total including any bonus.
    pub total: i32,
    /// When the roll happened.
    pub timestamp: DateTime<Utc>,
}

/// How many dice history entries are retained.
const DICE_HISTORY_LIMIT: usize = 50;

/// The persistence root: all characters plus account-wide settings.
///
/// The DM roster, player ledger, and UI fold state are owned by external
/// collaborators and carried here as opaque JSON so migration and
/// export/import round-trip them losslessly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    /// Schema generation of this tree.
    pub version: u32,
    /// All characters in the account.
    #[serde(default)]
    pub characters: Vec<CharacterRecord>,
    /// The character all per-character operations address, if any.
    #[serde(default)]
    pub active_character_id: Option<CharacterId>,
    /// DM-tracked monster roster (opaque).
    #[serde(default)]
    pub dm: Option<Value>,
    /// Player XP ledger (opaque).
    #[serde(default)]
    pub players: Option<Value>,
    /// UI fold/collapse state (opaque).
    #[serde(default)]
    pub character_folds: Option<Value>,
    /// Recent plain dice rolls, newest last.
    #[serde(default)]
    pub dice_history: Vec<DiceHistoryEntry>,
    /// DM todo items (opaque).
    #[serde(default)]
    pub dm_todo_items: Option<Value>,
    /// DM collapsed-character UI state (opaque).
    #[serde(default)]
    pub dm_collapsed_characters: Option<Value>,
}

impl Default for AccountData {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountData {
    /// Create an empty account at the current schema version.
    pub fn new() -> Self {
        Self {
            version: ACCOUNT_VERSION,
            characters: Vec::new(),
            active_character_id: None,
            dm: None,
            players: None,
            character_folds: None,
            dice_history: Vec::new(),
            dm_todo_items: None,
            dm_collapsed_characters: None,
        }
    }

    /// Add a character. The first character added becomes active.
    pub fn add_character(&mut self, record: CharacterRecord) -> CharacterId {
        let id = record.id;
        self.characters.push(record);
        if self.active_character_id.is_none() {
            self.active_character_id = Some(id);
        }
        id
    }

    /// Remove a character by ID, repointing the active ID if it referenced
    /// the removed character. Returns false if the ID was unknown.
    pub fn remove_character(&mut self, id: CharacterId) -> bool {
        let before = self.characters.len();
        self.characters.retain(|c| c.id != id);
        if self.characters.len() == before {
            return false;
        }
        if self.active_character_id == Some(id) {
            self.active_character_id = self.characters.first().map(|c| c.id);
        }
        true
    }

    /// Look up a character by ID.
    pub fn character(&self, id: CharacterId) -> Option<&CharacterRecord> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Look up a character mutably by ID.
    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut CharacterRecord> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    /// Find a character by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&CharacterRecord> {
        let lower = name.to_lowercase();
        self.characters
            .iter()
            .find(|c| c.name().to_lowercase() == lower)
    }

    /// Make a character active. Returns false if the ID was unknown.
    pub fn set_active(&mut self, id: CharacterId) -> bool {
        if self.character(id).is_none() {
            return false;
        }
        self.active_character_id = Some(id);
        true
    }

    /// The active character, if one is set.
    pub fn active_character(&self) -> Option<&CharacterRecord> {
        self.active_character_id.and_then(|id| self.character(id))
    }

    /// The active character, mutably.
    pub fn active_character_mut(&mut self) -> Option<&mut CharacterRecord> {
        let id = self.active_character_id?;
        self.character_mut(id)
    }

    /// Append a dice roll to the history, keeping only the most recent
    /// entries.
    pub fn push_dice_history(&mut self, entry: DiceHistoryEntry) {
        self.dice_history.push(entry);
        if self.dice_history.len() > DICE_HISTORY_LIMIT {
            let excess = self.dice_history.len() - DICE_HISTORY_LIMIT;
            self.dice_history.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_character_becomes_active() {
        let mut account = AccountData::new();
        let id = account.add_character(CharacterRecord::new("Escanor", 30, 0));
        assert_eq!(account.active_character_id, Some(id));
        account.add_character(CharacterRecord::new("Merlin", 20, 0));
        assert_eq!(account.active_character_id, Some(id));
    }

    #[test]
    fn remove_active_repoints() {
        let mut account = AccountData::new();
        let first = account.add_character(CharacterRecord::new("Escanor", 30, 0));
        let second = account.add_character(CharacterRecord::new("Merlin", 20, 0));
        assert!(account.remove_character(first));
        assert_eq!(account.active_character_id, Some(second));
        assert!(account.remove_character(second));
        assert_eq!(account.active_character_id, None);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut account = AccountData::new();
        account.add_character(CharacterRecord::new("Escanor", 30, 0));
        assert!(!account.remove_character(CharacterId::new()));
        assert_eq!(account.characters.len(), 1);
    }

    #[test]
    fn set_active_requires_existing() {
        let mut account = AccountData::new();
        let id = account.add_character(CharacterRecord::new("Escanor", 30, 0));
        assert!(!account.set_active(CharacterId::new()));
        assert_eq!(account.active_character_id, Some(id));
    }

    #[test]
    fn find_by_name_case_insensitive() {
        let mut account = AccountData::new();
        account.add_character(CharacterRecord::new("Escanor", 30, 0));
        assert!(account.find_by_name("escanor").is_some());
        assert!(account.find_by_name("ESCANOR").is_some());
        assert!(account.find_by_name("ban").is_none());
    }

    #[test]
    fn dice_history_is_bounded() {
        let mut account = AccountData::new();
        for i in 0..60 {
            account.push_dice_history(DiceHistoryEntry {
                expression: "1d6".to_string(),
                rolls: vec![1],
                total: i,
                timestamp: Utc::now(),
            });
        }
        assert_eq!(account.dice_history.len(), 50);
        assert_eq!(account.dice_history.last().unwrap().total, 59);
        assert_eq!(account.dice_history.first().unwrap().total, 10);
    }

    #[test]
    fn serde_round_trip() {
        let mut account = AccountData::new();
        account.add_character(CharacterRecord::new("Escanor", 30, 2));
        account.dm = Some(serde_json::json!({"characters": []}));
        let json = serde_json::to_string(&account).unwrap();
        let back: AccountData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, account);
    }

    #[test]
    fn empty_account_parses() {
        let account: AccountData = serde_json::from_str(r#"{"version": 2}"#).unwrap();
        assert!(account.characters.is_empty());
        assert!(account.active_character_id.is_none());
    }
}
