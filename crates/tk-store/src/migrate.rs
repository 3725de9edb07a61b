//! Schema migration pipeline: legacy scattered keys → V1 → V2.
//!
//! Three generations of persisted data exist in the wild:
//!
//! - **Legacy**: one key per collection (`dnd-character-data`,
//!   `dnd-attacks-data`, ...), single implicit character.
//! - **V1**: one unified blob under [`UNIFIED_KEY`] with top-level
//!   `character`/`attacks`/... fields, still single-character.
//! - **V2**: the unified blob holds a `characters` list plus
//!   `activeCharacterId`; per-attack lifesteal lives on the damage rolls.
//!
//! [`load_account`] walks forward through those generations on every load.
//! Parse failures never abort the pipeline; the offending key degrades to
//! absent with a warning. A migrated tree is written back under the unified
//! key first, and the legacy keys are cleared only after that write
//! succeeds.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::warn;

use tk_core::{
    ACCOUNT_VERSION, AccountData, Attack, CharacterData, CharacterRecord, Counter, DiceExpression,
    PassiveDamageEffect, StateEntry,
};

use crate::error::{StoreError, StoreResult};
use crate::kv::KvStore;

/// The key holding the unified account blob (V1 and V2).
pub const UNIFIED_KEY: &str = "dnd-account-data";

const LEGACY_CHARACTER: &str = "dnd-character-data";
const LEGACY_DM: &str = "dnd-dm-data";
const LEGACY_PLAYERS: &str = "dnd-player-data";
const LEGACY_ATTACKS: &str = "dnd-attacks-data";
const LEGACY_PASSIVE_DAMAGES: &str = "dnd-passive-damages-data";
const LEGACY_COUNTERS: &str = "dnd-counters";
const LEGACY_STATES: &str = "dnd-states";
const LEGACY_CHARACTER_FOLDS: &str = "dnd-character-folds";
const LEGACY_DICE_HISTORY: &str = "dice-roller-history";
const LEGACY_TODO_ITEMS: &str = "dnd-todo-items";
const LEGACY_COLLAPSED: &str = "collapsedCharacters";
const LEGACY_CRITICAL_CONFIG: &str = "dnd-critical-hit-config";

/// Every legacy key removed after a successful migration. The critical-hit
/// config key is cleared but never read; its data moved per-character long
/// before the unified blob existed.
const LEGACY_KEYS: [&str; 12] = [
    LEGACY_CHARACTER,
    LEGACY_DM,
    LEGACY_PLAYERS,
    LEGACY_ATTACKS,
    LEGACY_PASSIVE_DAMAGES,
    LEGACY_COUNTERS,
    LEGACY_STATES,
    LEGACY_CHARACTER_FOLDS,
    LEGACY_DICE_HISTORY,
    LEGACY_TODO_ITEMS,
    LEGACY_COLLAPSED,
    LEGACY_CRITICAL_CONFIG,
];

/// The V1 unified blob: a single implicit character spread across
/// top-level fields. Every field is optional so partially-written blobs
/// still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct V1Account {
    /// Schema generation; absent means pre-versioning, treated as 1.
    pub version: u32,
    /// HP block, turn state, and logs of the single character.
    pub character: Option<Value>,
    /// DM-tracked monster roster (opaque).
    pub dm: Option<Value>,
    /// Player XP ledger (opaque).
    pub players: Option<Value>,
    /// The single character's attacks.
    pub attacks: Option<Value>,
    /// The single character's damage-over-time effects.
    pub passive_damages: Option<Value>,
    /// Combined `{counters, states}` object.
    pub counters: Option<Value>,
    /// UI fold state (opaque).
    pub character_folds: Option<Value>,
    /// Plain dice roll history.
    pub dice_history: Option<Value>,
    /// DM todo items (opaque).
    pub dm_todo_items: Option<Value>,
    /// DM collapsed-character UI state (opaque).
    pub dm_collapsed_characters: Option<Value>,
}

/// The legacy scattered keys, each read and parsed independently.
#[derive(Debug, Clone, Default)]
pub struct LegacyBundle {
    /// `dnd-character-data`.
    pub character: Option<Value>,
    /// `dnd-dm-data`.
    pub dm: Option<Value>,
    /// `dnd-player-data`.
    pub players: Option<Value>,
    /// `dnd-attacks-data`.
    pub attacks: Option<Value>,
    /// `dnd-passive-damages-data`.
    pub passive_damages: Option<Value>,
    /// `dnd-counters`.
    pub counters: Option<Value>,
    /// `dnd-states`.
    pub states: Option<Value>,
    /// `dnd-character-folds`.
    pub character_folds: Option<Value>,
    /// `dice-roller-history`.
    pub dice_history: Option<Value>,
    /// `dnd-todo-items`.
    pub dm_todo_items: Option<Value>,
    /// `collapsedCharacters`.
    pub dm_collapsed_characters: Option<Value>,
}

impl LegacyBundle {
    /// Read every legacy key from the store, degrading unreadable or
    /// malformed keys to absent.
    pub fn read<S: KvStore>(store: &S) -> Self {
        Self {
            character: read_json(store, LEGACY_CHARACTER),
            dm: read_json(store, LEGACY_DM),
            players: read_json(store, LEGACY_PLAYERS),
            attacks: read_json(store, LEGACY_ATTACKS),
            passive_damages: read_json(store, LEGACY_PASSIVE_DAMAGES),
            counters: read_json(store, LEGACY_COUNTERS),
            states: read_json(store, LEGACY_STATES),
            character_folds: read_json(store, LEGACY_CHARACTER_FOLDS),
            dice_history: read_json(store, LEGACY_DICE_HISTORY),
            dm_todo_items: read_json(store, LEGACY_TODO_ITEMS),
            dm_collapsed_characters: read_json(store, LEGACY_COLLAPSED),
        }
    }

    /// Whether enough survived to be worth assembling into a V1 blob.
    /// Fold state and history alone do not count.
    pub fn has_data(&self) -> bool {
        self.character.is_some()
            || self.dm.is_some()
            || self.players.is_some()
            || self.attacks.is_some()
            || self.passive_damages.is_some()
            || self.counters.is_some()
    }
}

/// Assemble legacy scattered keys into a V1-shaped blob, or `None` when no
/// key carried data. Counters and states merge into one combined object.
pub fn legacy_to_v1(bundle: LegacyBundle) -> Option<V1Account> {
    if !bundle.has_data() {
        return None;
    }
    let counters = if bundle.counters.is_some() || bundle.states.is_some() {
        Some(json!({
            "counters": bundle.counters.unwrap_or_else(|| json!([])),
            "states": bundle.states.unwrap_or_else(|| json!([])),
        }))
    } else {
        None
    };
    Some(V1Account {
        version: 1,
        character: bundle.character,
        dm: bundle.dm,
        players: bundle.players,
        attacks: bundle.attacks,
        passive_damages: bundle.passive_damages,
        counters,
        character_folds: bundle.character_folds,
        dice_history: bundle.dice_history,
        dm_todo_items: bundle.dm_todo_items,
        dm_collapsed_characters: bundle.dm_collapsed_characters,
    })
}

/// Upgrade a V1 blob to the current multi-character schema. The single
/// implicit character becomes the first (and active) character record;
/// attack-level lifesteal is pushed down onto the damage rolls; passive
/// damage effects are normalized to the structured roll shape.
pub fn v1_to_v2(v1: V1Account) -> AccountData {
    let mut account = AccountData::new();
    account.dm = v1.dm;
    account.players = v1.players;
    account.character_folds = v1.character_folds;
    account.dm_todo_items = v1.dm_todo_items;
    account.dm_collapsed_characters = v1.dm_collapsed_characters;
    if let Some(history) = v1.dice_history {
        account.dice_history = match serde_json::from_value(history) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(%error, "discarding unreadable dice history");
                Vec::new()
            }
        };
    }

    let has_character = v1.character.is_some()
        || v1.attacks.is_some()
        || v1.passive_damages.is_some()
        || v1.counters.is_some();
    if !has_character {
        return account;
    }

    let mut record = CharacterRecord::default();
    if let Some(character) = v1.character {
        record.character_data = match serde_json::from_value::<CharacterData>(character) {
            Ok(data) => data,
            Err(error) => {
                warn!(%error, "discarding unreadable character data");
                CharacterData::default()
            }
        };
    }
    if let Some(Value::Array(attacks)) = v1.attacks {
        record.attacks = attacks
            .into_iter()
            .filter_map(normalize_legacy_attack)
            .collect();
    }
    if let Some(Value::Array(effects)) = v1.passive_damages {
        record.passive_damages = effects
            .into_iter()
            .filter_map(migrate_passive_damage)
            .collect();
    }
    if let Some(combined) = v1.counters {
        if let Some(Value::Array(counters)) = combined.get("counters").cloned() {
            record.counters = counters
                .into_iter()
                .filter_map(|v| parse_element::<Counter>(v, "counter"))
                .collect();
        }
        if let Some(Value::Array(states)) = combined.get("states").cloned() {
            record.character_state = states
                .into_iter()
                .filter_map(|v| parse_element::<StateEntry>(v, "state"))
                .collect();
        }
    }
    account.add_character(record);
    account
}

/// Parse one collection element, dropping just that element on failure.
fn parse_element<T: serde::de::DeserializeOwned>(value: Value, what: &'static str) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            warn!(%error, what, "dropping unreadable entry");
            None
        }
    }
}

/// Push a V1 attack-level `lifeSteal` percentage down onto every damage
/// roll that lacks its own, then parse. Rolls that already carry lifesteal
/// keep theirs.
fn normalize_legacy_attack(mut value: Value) -> Option<Attack> {
    if let Some(obj) = value.as_object_mut() {
        let top_percentage = obj
            .get("lifeSteal")
            .and_then(|ls| ls.get("percentage"))
            .and_then(Value::as_u64)
            .unwrap_or(0);
        if top_percentage > 0 {
            if let Some(rolls) = obj.get_mut("damageRolls").and_then(Value::as_array_mut) {
                for roll in rolls {
                    if let Some(roll_obj) = roll.as_object_mut() {
                        if !roll_obj.contains_key("lifeSteal") {
                            roll_obj.insert(
                                "lifeSteal".to_string(),
                                json!({ "percentage": top_percentage }),
                            );
                        }
                    }
                }
            }
            obj.remove("lifeSteal");
        }
    }
    match serde_json::from_value(value) {
        Ok(attack) => Some(attack),
        Err(error) => {
            warn!(%error, "dropping unreadable attack");
            None
        }
    }
}

/// Normalize a passive damage effect through its historical shapes:
///
/// (a) a flat `dice` expression string on the effect itself,
/// (b) a `damageRolls` array whose entries hold a `dice` string,
/// (c) the current structured `{numDice, diceType, bonus, type}` entries.
fn migrate_passive_damage(mut value: Value) -> Option<PassiveDamageEffect> {
    if let Some(obj) = value.as_object_mut() {
        if !obj.contains_key("damageRolls") {
            let rolls = match obj.remove("dice") {
                Some(dice) => json!([{ "dice": dice }]),
                None => json!([]),
            };
            obj.insert("damageRolls".to_string(), rolls);
        }
        if let Some(rolls) = obj.get_mut("damageRolls").and_then(Value::as_array_mut) {
            let old = std::mem::take(rolls);
            *rolls = old.into_iter().filter_map(structure_passive_roll).collect();
        }
    }
    match serde_json::from_value(value) {
        Ok(effect) => Some(effect),
        Err(error) => {
            warn!(%error, "dropping unreadable passive damage effect");
            None
        }
    }
}

/// Rewrite one passive damage roll entry into the structured shape.
/// Already-structured entries pass through; a `dice` expression string is
/// parsed, defaulting the damage type to force.
fn structure_passive_roll(roll: Value) -> Option<Value> {
    let Value::Object(obj) = roll else {
        return None;
    };
    if obj.contains_key("numDice") {
        return Some(Value::Object(obj));
    }
    let expr_str = obj.get("dice").and_then(Value::as_str)?;
    let expr = match expr_str.parse::<DiceExpression>() {
        Ok(expr) => expr,
        Err(error) => {
            warn!(%error, "dropping unparsable passive damage dice");
            return None;
        }
    };
    let mut structured = Map::new();
    structured.insert("numDice".to_string(), json!(expr.dice.count));
    structured.insert("diceType".to_string(), json!(expr.dice.sides));
    structured.insert("bonus".to_string(), json!(expr.bonus));
    let damage_type = obj.get("type").cloned().unwrap_or_else(|| json!("force"));
    structured.insert("type".to_string(), damage_type);
    Some(Value::Object(structured))
}

fn read_json<S: KvStore>(store: &S, key: &str) -> Option<Value> {
    let bytes = match store.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(error) => {
            warn!(key, %error, "failed to read persisted key");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(key, %error, "ignoring malformed persisted data");
            None
        }
    }
}

fn blob_version(value: &Value) -> u32 {
    value
        .get("version")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

/// Ensure the active ID points at an existing character, falling back to
/// the first character (or none).
fn normalize_active(account: &mut AccountData) {
    match account.active_character_id {
        Some(id) if account.character(id).is_some() => {}
        _ => account.active_character_id = account.characters.first().map(|c| c.id),
    }
}

/// The generation of whatever is currently persisted.
#[derive(Debug)]
pub enum PersistedShape {
    /// Nothing usable is stored.
    NoData,
    /// Only legacy scattered keys carry data.
    Legacy(LegacyBundle),
    /// A unified single-character blob.
    V1(Box<V1Account>),
    /// A current multi-character blob.
    V2(Box<AccountData>),
}

/// Classify the persisted data. A corrupt unified blob is deleted here so
/// the next load starts clean; legacy keys win over a characterless V2
/// blob (the residue of an interrupted earlier migration).
pub fn detect_shape<S: KvStore>(store: &mut S) -> PersistedShape {
    let mut unified: Option<Value> = None;
    match store.get(UNIFIED_KEY) {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(value) => unified = Some(value),
            Err(error) => {
                warn!(%error, "unified account blob is corrupt; discarding it");
                remove_unified(store);
            }
        },
        Ok(None) => {}
        Err(error) => warn!(%error, "failed to read unified account blob"),
    }

    let characterless_v2 = unified.as_ref().is_some_and(|value| {
        blob_version(value) >= ACCOUNT_VERSION
            && value
                .get("characters")
                .and_then(Value::as_array)
                .is_none_or(Vec::is_empty)
    });
    if unified.is_none() || characterless_v2 {
        let bundle = LegacyBundle::read(store);
        if bundle.has_data() {
            return PersistedShape::Legacy(bundle);
        }
    }

    let Some(unified) = unified else {
        return PersistedShape::NoData;
    };
    if blob_version(&unified) < ACCOUNT_VERSION {
        match serde_json::from_value::<V1Account>(unified) {
            Ok(v1) => PersistedShape::V1(Box::new(v1)),
            Err(error) => {
                warn!(%error, "unreadable v1 account blob; discarding it");
                remove_unified(store);
                PersistedShape::NoData
            }
        }
    } else {
        match serde_json::from_value::<AccountData>(unified) {
            Ok(account) => PersistedShape::V2(Box::new(account)),
            Err(error) => {
                warn!(%error, "unreadable account blob; discarding it");
                remove_unified(store);
                PersistedShape::NoData
            }
        }
    }
}

fn remove_unified<S: KvStore>(store: &mut S) {
    if let Err(error) = store.remove(UNIFIED_KEY) {
        warn!(%error, "failed to clear unusable account blob");
    }
}

/// Load the account, migrating forward as needed.
///
/// Already-current data loads without a single write. A corrupt unified
/// blob is deleted and replaced with a fresh empty account. After any
/// migration the result is persisted under [`UNIFIED_KEY`] and the legacy
/// keys are cleared; if that persist fails the legacy keys are left in
/// place so the next load can retry.
pub fn load_account<S: KvStore>(store: &mut S) -> AccountData {
    match detect_shape(store) {
        PersistedShape::NoData => AccountData::new(),
        PersistedShape::V2(account) => {
            let mut account = *account;
            normalize_active(&mut account);
            account
        }
        PersistedShape::V1(v1) => finish_migration(store, *v1),
        PersistedShape::Legacy(bundle) => match legacy_to_v1(bundle) {
            Some(v1) => finish_migration(store, v1),
            None => AccountData::new(),
        },
    }
}

fn finish_migration<S: KvStore>(store: &mut S, v1: V1Account) -> AccountData {
    let mut account = v1_to_v2(v1);
    normalize_active(&mut account);
    match save_account(store, &account) {
        Ok(()) => clear_legacy_keys(store),
        Err(error) => {
            warn!(%error, "failed to persist migrated account; legacy keys kept");
        }
    }
    account
}

fn clear_legacy_keys<S: KvStore>(store: &mut S) {
    for key in LEGACY_KEYS {
        if let Err(error) = store.remove(key) {
            warn!(key, %error, "failed to clear legacy key");
        }
    }
}

/// Write the account under the unified key.
pub fn save_account<S: KvStore>(store: &mut S, account: &AccountData) -> StoreResult<()> {
    let bytes = serde_json::to_vec(account).map_err(|source| StoreError::MalformedData {
        key: UNIFIED_KEY.to_string(),
        source,
    })?;
    store.set(UNIFIED_KEY, &bytes)
}

/// Serialize the account as pretty-printed JSON for export.
pub fn export_account(account: &AccountData) -> StoreResult<String> {
    serde_json::to_string_pretty(account).map_err(|source| StoreError::MalformedData {
        key: UNIFIED_KEY.to_string(),
        source,
    })
}

/// Parse an exported document, accepting current and V1 payloads. V1
/// payloads are upgraded on the way in. Documents without a `version`
/// field are rejected.
pub fn import_account(text: &str) -> StoreResult<AccountData> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| StoreError::UnrecognizedImportFormat(format!("not valid JSON: {e}")))?;
    if !value.is_object() || value.get("version").is_none() {
        return Err(StoreError::UnrecognizedImportFormat(
            "missing version field".to_string(),
        ));
    }
    let mut account = if blob_version(&value) < ACCOUNT_VERSION {
        let v1 = serde_json::from_value::<V1Account>(value)
            .map_err(|e| StoreError::UnrecognizedImportFormat(e.to_string()))?;
        v1_to_v2(v1)
    } else {
        serde_json::from_value::<AccountData>(value)
            .map_err(|e| StoreError::UnrecognizedImportFormat(e.to_string()))?
    };
    normalize_active(&mut account);
    Ok(account)
}
