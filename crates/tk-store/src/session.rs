//! The session handle: the single owner of the loaded account.
//!
//! A [`Session`] wraps a [`KvStore`] and the in-memory [`AccountData`],
//! runs the migration pipeline on load, and writes the whole aggregate
//! back after every mutation. Per-character operations address the active
//! character; with no active character (or an unknown ID) they are silent
//! no-ops that report `false` or `None` rather than erroring.

use chrono::Utc;
use tracing::warn;

use tk_core::{
    AccountData, Attack, AttackId, CharacterId, CharacterRecord, Counter, CounterId,
    CriticalHitConfig, DiceExpression, DiceHistoryEntry, EffectId, PassiveDamageEffect, RestKind,
    StateEntry, StateId, tick_passive_damages,
};
use tk_mechanics::{
    AttackResult, DieRoller, MechResult, apply_replacement, resolve_attack,
    resolve_critical_attack, roll_reroll_pool, roll_values,
};

use crate::error::StoreResult;
use crate::kv::KvStore;
use crate::migrate::{export_account, import_account, load_account, save_account};

/// The loaded account plus its backing store.
#[derive(Debug)]
pub struct Session<S: KvStore> {
    store: S,
    account: AccountData,
}

impl<S: KvStore> Session<S> {
    /// Open a session, running the migration pipeline against the store.
    pub fn load(mut store: S) -> Self {
        let account = load_account(&mut store);
        Self { store, account }
    }

    /// The loaded account.
    pub fn account(&self) -> &AccountData {
        &self.account
    }

    /// Write the account back. Persistence failures are logged, never
    /// propagated; the in-memory state stays authoritative for the session.
    fn persist(&mut self) {
        if let Err(error) = save_account(&mut self.store, &self.account) {
            warn!(%error, "failed to persist account");
        }
    }

    fn active_mut(&mut self) -> Option<&mut CharacterRecord> {
        self.account.active_character_mut()
    }

    // Characters.

    /// Create a character at full HP. The first character becomes active.
    pub fn add_character(
        &mut self,
        name: impl Into<String>,
        max_hp: i32,
        regeneration: i32,
    ) -> CharacterId {
        let id = self
            .account
            .add_character(CharacterRecord::new(name, max_hp, regeneration));
        self.persist();
        id
    }

    /// Delete a character. Returns false for an unknown ID.
    pub fn remove_character(&mut self, id: CharacterId) -> bool {
        let removed = self.account.remove_character(id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Make a character active. Returns false for an unknown ID.
    pub fn switch_character(&mut self, id: CharacterId) -> bool {
        let switched = self.account.set_active(id);
        if switched {
            self.persist();
        }
        switched
    }

    /// All characters, in creation order.
    pub fn characters(&self) -> &[CharacterRecord] {
        &self.account.characters
    }

    /// The active character, if any.
    pub fn active_character(&self) -> Option<&CharacterRecord> {
        self.account.active_character()
    }

    // Attacks on the active character.

    /// Add an attack, returning its ID, or `None` with no active character.
    pub fn add_attack(&mut self, attack: Attack) -> Option<AttackId> {
        let record = self.active_mut()?;
        let id = attack.id;
        record.attacks.push(attack);
        self.persist();
        Some(id)
    }

    /// Replace the attack with the same ID. Returns false when absent.
    pub fn update_attack(&mut self, attack: Attack) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        let Some(slot) = record.attacks.iter_mut().find(|a| a.id == attack.id) else {
            return false;
        };
        *slot = attack;
        self.persist();
        true
    }

    /// Delete an attack. Returns false when absent.
    pub fn remove_attack(&mut self, id: AttackId) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        let before = record.attacks.len();
        record.attacks.retain(|a| a.id != id);
        if record.attacks.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Copy an attack under a fresh ID, inserted right after the original.
    pub fn duplicate_attack(&mut self, id: AttackId) -> Option<AttackId> {
        let record = self.active_mut()?;
        let position = record.attacks.iter().position(|a| a.id == id)?;
        let copy = record.attacks[position].duplicate();
        let copy_id = copy.id;
        record.attacks.insert(position + 1, copy);
        self.persist();
        Some(copy_id)
    }

    /// Reorder attacks to the given ID sequence. The sequence must be a
    /// permutation of the current attacks; anything else is rejected.
    pub fn reorder_attacks(&mut self, order: &[AttackId]) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        if order.len() != record.attacks.len() {
            return false;
        }
        let mut reordered = Vec::with_capacity(order.len());
        for id in order {
            match record.attacks.iter().find(|a| a.id == *id) {
                Some(attack) => reordered.push(attack.clone()),
                None => return false,
            }
        }
        let mut seen: Vec<AttackId> = Vec::with_capacity(order.len());
        for id in order {
            if seen.contains(id) {
                return false;
            }
            seen.push(*id);
        }
        record.attacks = reordered;
        self.persist();
        true
    }

    /// Look up an attack on the active character.
    pub fn attack(&self, id: AttackId) -> Option<&Attack> {
        self.active_character()?.attacks.iter().find(|a| a.id == id)
    }

    /// Find an attack on the active character by name (case-insensitive).
    pub fn find_attack_by_name(&self, name: &str) -> Option<&Attack> {
        let lower = name.to_lowercase();
        self.active_character()?
            .attacks
            .iter()
            .find(|a| a.name.to_lowercase() == lower)
    }

    // Critical hit configuration.

    /// The active character's critical hit configuration.
    pub fn critical_config(&self) -> Option<&CriticalHitConfig> {
        self.active_character().map(|r| &r.critical_hit)
    }

    /// Replace the active character's critical hit configuration.
    pub fn set_critical_config(&mut self, config: CriticalHitConfig) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        record.critical_hit = config;
        self.persist();
        true
    }

    // Counters and states.

    /// Add a counter, returning its ID.
    pub fn add_counter(&mut self, counter: Counter) -> Option<CounterId> {
        let record = self.active_mut()?;
        let id = counter.id.clone();
        record.counters.push(counter);
        self.persist();
        Some(id)
    }

    /// Replace the counter with the same ID. Returns false when absent.
    pub fn update_counter(&mut self, counter: Counter) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        let Some(slot) = record.counters.iter_mut().find(|c| c.id == counter.id) else {
            return false;
        };
        *slot = counter;
        self.persist();
        true
    }

    /// Delete a counter. States linked to it keep their dangling link and
    /// simply stop spending.
    pub fn remove_counter(&mut self, id: &CounterId) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        let before = record.counters.len();
        record.counters.retain(|c| c.id != *id);
        if record.counters.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Adjust a counter by a delta, returning the new clamped value.
    pub fn adjust_counter(&mut self, id: &CounterId, delta: i32) -> Option<i32> {
        let record = self.active_mut()?;
        let counter = record.counters.iter_mut().find(|c| c.id == *id)?;
        let value = counter.adjust(delta);
        self.persist();
        Some(value)
    }

    /// Set a counter to its maximum.
    pub fn set_counter_to_max(&mut self, id: &CounterId) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        let Some(counter) = record.counters.iter_mut().find(|c| c.id == *id) else {
            return false;
        };
        counter.set_to_max();
        self.persist();
        true
    }

    /// Apply a rest to the active character: every counter regains its
    /// per-rest amount, and every state deactivates, whatever the rest kind.
    pub fn apply_rest(&mut self, kind: RestKind) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        for counter in &mut record.counters {
            counter.apply_rest(kind);
        }
        for state in &mut record.character_state {
            state.active = false;
        }
        let label = match kind {
            RestKind::Short => "Short rest",
            RestKind::Long => "Long rest",
        };
        record.character_data.log("Rest", label);
        self.persist();
        true
    }

    /// Add a state, returning its ID.
    pub fn add_state(&mut self, state: StateEntry) -> Option<StateId> {
        let record = self.active_mut()?;
        let id = state.id.clone();
        record.character_state.push(state);
        self.persist();
        Some(id)
    }

    /// Delete a state. Returns false when absent.
    pub fn remove_state(&mut self, id: &StateId) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        let before = record.character_state.len();
        record.character_state.retain(|s| s.id != *id);
        if record.character_state.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Toggle a state, returning its new active flag. Activating a state
    /// applies its delta to the linked counter; deactivation never refunds.
    pub fn toggle_state(&mut self, id: &StateId) -> Option<bool> {
        let record = self.active_mut()?;
        let position = record.character_state.iter().position(|s| s.id == *id)?;
        let activating = !record.character_state[position].active;
        record.character_state[position].active = activating;
        if activating {
            let linked = record.character_state[position].linked_counter_id.clone();
            let delta = record.character_state[position].activation_delta();
            if let Some(counter_id) = linked {
                if let Some(counter) = record.counters.iter_mut().find(|c| c.id == counter_id) {
                    counter.adjust(delta);
                }
            }
        }
        self.persist();
        Some(activating)
    }

    // Passive damage effects.

    /// Add a damage-over-time effect, returning its ID.
    pub fn add_passive_damage(&mut self, effect: PassiveDamageEffect) -> Option<EffectId> {
        let record = self.active_mut()?;
        let id = effect.id;
        record.passive_damages.push(effect);
        self.persist();
        Some(id)
    }

    /// Replace the effect with the same ID. Returns false when absent.
    pub fn update_passive_damage(&mut self, effect: PassiveDamageEffect) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        let Some(slot) = record.passive_damages.iter_mut().find(|e| e.id == effect.id) else {
            return false;
        };
        *slot = effect;
        self.persist();
        true
    }

    /// Delete a damage-over-time effect. Returns false when absent.
    pub fn remove_passive_damage(&mut self, id: EffectId) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        let before = record.passive_damages.len();
        record.passive_damages.retain(|e| e.id != id);
        if record.passive_damages.len() == before {
            return false;
        }
        self.persist();
        true
    }

    // Hit points and turns.

    /// Damage the active character, consuming temporary HP first.
    pub fn damage(&mut self, amount: i32) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        record.character_data.character.take_damage(amount);
        record
            .character_data
            .log("Damage", format!("Took {amount} damage"));
        self.persist();
        true
    }

    /// Heal the active character up to max HP.
    pub fn heal(&mut self, amount: i32) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        let healed = record.character_data.character.heal(amount);
        record
            .character_data
            .log("Heal", format!("Healed {healed} HP"));
        self.persist();
        true
    }

    /// Grant temporary HP to the active character.
    pub fn add_temp_hp(&mut self, amount: i32) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        record.character_data.character.add_temp_hp(amount);
        record
            .character_data
            .log("Temp HP", format!("Gained {amount} temporary HP"));
        self.persist();
        true
    }

    /// Start the active character's next turn, applying regeneration.
    pub fn start_turn(&mut self) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        record.character_data.start_turn();
        let turn = record.character_data.turn.current;
        record.character_data.log("Turn", format!("Turn {turn} started"));
        self.persist();
        true
    }

    /// End the active character's turn, ticking timed passive effects.
    pub fn end_turn(&mut self) -> bool {
        let Some(record) = self.active_mut() else {
            return false;
        };
        record.character_data.end_turn();
        tick_passive_damages(&mut record.passive_damages);
        let turn = record.character_data.turn.current;
        record.character_data.log("Turn", format!("Turn {turn} ended"));
        self.persist();
        true
    }

    // Resolution.

    /// Resolve an attack belonging to the active character.
    ///
    /// `critical` applies the character's critical hit rule; `use_reroll`
    /// rolls the attack's reroll pool and replaces the lowest matching dice.
    /// Lifesteal healing is applied to the character. Returns `Ok(None)`
    /// with no active character or an unknown attack ID.
    pub fn execute_attack(
        &mut self,
        id: AttackId,
        critical: bool,
        use_reroll: bool,
        roller: &mut dyn DieRoller,
    ) -> MechResult<Option<AttackResult>> {
        let Some(record) = self.account.active_character() else {
            return Ok(None);
        };
        let Some(attack) = record.attacks.iter().find(|a| a.id == id).cloned() else {
            return Ok(None);
        };
        let config = record.critical_hit;

        let mut result = if critical {
            resolve_critical_attack(&attack, &config, roller)?
        } else {
            resolve_attack(&attack, roller)?
        };
        if use_reroll && !attack.reroll_dice.is_empty() {
            let pool = roll_reroll_pool(&attack.reroll_dice, roller)?;
            result = apply_replacement(&result, &pool);
        }

        if let Some(record) = self.account.active_character_mut() {
            record.character_data.log(
                "Attack",
                format!("{}: {} damage", result.name, result.grand_total),
            );
            if result.total_healed > 0 {
                let healed = record.character_data.character.heal(result.total_healed);
                record
                    .character_data
                    .log("Life steal", format!("Healed {healed} HP"));
            }
        }
        self.persist();
        Ok(Some(result))
    }

    /// Roll a plain dice expression, recording it in the bounded history.
    pub fn roll_expression(
        &mut self,
        expression: &DiceExpression,
        roller: &mut dyn DieRoller,
    ) -> MechResult<DiceHistoryEntry> {
        let rolls = roll_values(roller, expression.dice.count, expression.dice.sides)?;
        let total = rolls.iter().sum::<u32>() as i32 + expression.bonus;
        let entry = DiceHistoryEntry {
            expression: expression.to_string(),
            rolls,
            total,
            timestamp: Utc::now(),
        };
        self.account.push_dice_history(entry.clone());
        self.persist();
        Ok(entry)
    }

    // Export and import.

    /// Serialize the account as pretty-printed JSON.
    pub fn export(&self) -> StoreResult<String> {
        export_account(&self.account)
    }

    /// Replace the account with an imported document and persist it. The
    /// previous account is discarded only when the import parses.
    pub fn import(&mut self, text: &str) -> StoreResult<()> {
        let account = import_account(text)?;
        self.account = account;
        self.persist();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tk_core::{DamageRoll, DamageType, DiceSpec, LifeSteal, RerollDice};
    use tk_mechanics::ScriptedRoller;

    use crate::kv::MemoryStore;
    use crate::migrate::UNIFIED_KEY;

    use super::*;

    fn session() -> Session<MemoryStore> {
        Session::load(MemoryStore::new())
    }

    fn spec(count: u32, sides: u32) -> DiceSpec {
        DiceSpec::new(count, sides).unwrap()
    }

    #[test]
    fn mutations_persist_and_reload() {
        let mut s = session();
        let id = s.add_character("Escanor", 30, 0);
        s.damage(8);

        let store = s.store.clone();
        let reloaded = Session::load(store);
        let record = reloaded.active_character().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.character_data.character.current_hp, 22);
        assert_eq!(record.character_data.logs.len(), 1);
    }

    #[test]
    fn operations_without_active_character_are_noops() {
        let mut s = session();
        assert!(!s.damage(5));
        assert!(!s.start_turn());
        assert!(s.add_attack(Attack::new("Slash", Vec::new())).is_none());
        assert!(s.store.get(UNIFIED_KEY).unwrap().is_none());
    }

    #[test]
    fn attack_crud_round_trip() {
        let mut s = session();
        s.add_character("Escanor", 30, 0);
        let attack = Attack::new(
            "Slash",
            vec![DamageRoll::new(spec(2, 6), 3, DamageType::Slashing)],
        );
        let id = s.add_attack(attack).unwrap();
        assert!(s.attack(id).is_some());
        assert!(s.find_attack_by_name("slash").is_some());

        let mut updated = s.attack(id).unwrap().clone();
        updated.name = "Heavy Slash".to_string();
        assert!(s.update_attack(updated));
        assert_eq!(s.attack(id).unwrap().name, "Heavy Slash");

        let copy = s.duplicate_attack(id).unwrap();
        assert_ne!(copy, id);
        assert_eq!(s.active_character().unwrap().attacks.len(), 2);

        assert!(s.remove_attack(copy));
        assert!(!s.remove_attack(copy));
    }

    #[test]
    fn reorder_requires_permutation() {
        let mut s = session();
        s.add_character("Escanor", 30, 0);
        let a = s.add_attack(Attack::new("A", Vec::new())).unwrap();
        let b = s.add_attack(Attack::new("B", Vec::new())).unwrap();

        assert!(!s.reorder_attacks(&[a]));
        assert!(!s.reorder_attacks(&[a, a]));
        assert!(!s.reorder_attacks(&[a, AttackId::new()]));
        assert!(s.reorder_attacks(&[b, a]));
        assert_eq!(s.active_character().unwrap().attacks[0].name, "B");
    }

    #[test]
    fn execute_attack_with_scripted_dice() {
        let mut s = session();
        s.add_character("Escanor", 30, 0);
        let id = s
            .add_attack(Attack::new(
                "Slash",
                vec![DamageRoll::new(spec(2, 6), 3, DamageType::Slashing)],
            ))
            .unwrap();

        let mut roller = ScriptedRoller::new([4, 5]);
        let result = s.execute_attack(id, false, false, &mut roller).unwrap().unwrap();
        assert_eq!(result.grand_total, 12);
        let logs = &s.active_character().unwrap().character_data.logs;
        assert!(logs.iter().any(|l| l.action == "Attack"));
    }

    #[test]
    fn execute_attack_applies_lifesteal_healing() {
        let mut s = session();
        s.add_character("Ban", 30, 0);
        s.damage(10);
        let mut roll = DamageRoll::new(spec(2, 6), 0, DamageType::Necrotic);
        roll.life_steal = Some(LifeSteal { percentage: 50 });
        let id = s.add_attack(Attack::new("Drain", vec![roll])).unwrap();

        let mut roller = ScriptedRoller::new([6, 4]);
        let result = s.execute_attack(id, false, false, &mut roller).unwrap().unwrap();
        assert_eq!(result.total_healed, 5);
        assert_eq!(
            s.active_character().unwrap().character_data.character.current_hp,
            25
        );
    }

    #[test]
    fn execute_attack_with_reroll_replaces_lowest() {
        let mut s = session();
        s.add_character("Escanor", 30, 0);
        let mut attack = Attack::new(
            "Slash",
            vec![DamageRoll::new(spec(2, 6), 0, DamageType::Slashing)],
        );
        attack.reroll_dice = vec![RerollDice {
            dice: spec(1, 6),
            min_per_die: 1,
        }];
        let id = s.add_attack(attack).unwrap();

        // Attack dice 1 and 5; reroll die 6 replaces the 1.
        let mut roller = ScriptedRoller::new([1, 5, 6]);
        let result = s.execute_attack(id, false, true, &mut roller).unwrap().unwrap();
        assert_eq!(result.grand_total, 11);
    }

    #[test]
    fn execute_unknown_attack_is_none() {
        let mut s = session();
        s.add_character("Escanor", 30, 0);
        let mut roller = ScriptedRoller::default();
        assert!(
            s.execute_attack(AttackId::new(), false, false, &mut roller)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn counters_and_states_interact() {
        let mut s = session();
        s.add_character("Barbarian", 30, 0);
        let mut counter = Counter::new("Rage", 3, 0, 3);
        counter.long_rest = 3;
        let counter_id = s.add_counter(counter).unwrap();

        let mut state = StateEntry::new("Raging");
        state.linked_counter_id = Some(counter_id);
        let state_id = s.add_state(state).unwrap();

        assert_eq!(s.toggle_state(&state_id), Some(true));
        let record = s.active_character().unwrap();
        assert_eq!(record.counters[0].value, 2);
        assert!(record.character_state[0].active);

        // Deactivation refunds nothing.
        assert_eq!(s.toggle_state(&state_id), Some(false));
        assert_eq!(s.active_character().unwrap().counters[0].value, 2);
    }

    #[test]
    fn update_counter_and_effect_by_id() {
        let mut s = session();
        s.add_character("Monk", 25, 0);
        s.add_counter(Counter::new("Ki", 5, 0, 5)).unwrap();
        s.add_passive_damage(PassiveDamageEffect::new("Burning", Vec::new()))
            .unwrap();

        let mut counter = s.active_character().unwrap().counters[0].clone();
        counter.max = 6;
        assert!(s.update_counter(counter));
        assert_eq!(s.active_character().unwrap().counters[0].max, 6);

        let mut effect = s.active_character().unwrap().passive_damages[0].clone();
        effect.duration = 4;
        assert!(s.update_passive_damage(effect));
        assert_eq!(s.active_character().unwrap().passive_damages[0].duration, 4);

        assert!(!s.update_counter(Counter::new("Other", 1, 0, 1)));
    }

    #[test]
    fn long_rest_refills_counters_and_clears_states() {
        let mut s = session();
        s.add_character("Barbarian", 30, 0);
        let mut counter = Counter::new("Rage", 0, 0, 3);
        counter.long_rest = 3;
        s.add_counter(counter).unwrap();
        let state_id = s.add_state(StateEntry::new("Raging")).unwrap();
        s.toggle_state(&state_id);

        assert!(s.apply_rest(RestKind::Long));
        let record = s.active_character().unwrap();
        assert_eq!(record.counters[0].value, 3);
        assert!(!record.character_state[0].active);
    }

    #[test]
    fn short_rest_also_clears_states() {
        let mut s = session();
        s.add_character("Barbarian", 30, 0);
        let mut counter = Counter::new("Rage", 0, 0, 3);
        counter.short_rest = 1;
        counter.long_rest = 3;
        s.add_counter(counter).unwrap();
        let state_id = s.add_state(StateEntry::new("Raging")).unwrap();
        s.toggle_state(&state_id);

        assert!(s.apply_rest(RestKind::Short));
        let record = s.active_character().unwrap();
        assert_eq!(record.counters[0].value, 1);
        assert!(!record.character_state[0].active);
    }

    #[test]
    fn end_turn_ticks_passive_damages() {
        let mut s = session();
        s.add_character("Escanor", 30, 0);
        let mut effect = PassiveDamageEffect::new("Burning", Vec::new());
        effect.duration = 1;
        s.add_passive_damage(effect).unwrap();
        s.add_passive_damage(PassiveDamageEffect::new("Cursed", Vec::new()))
            .unwrap();

        s.start_turn();
        s.end_turn();
        let record = s.active_character().unwrap();
        assert_eq!(record.passive_damages.len(), 1);
        assert_eq!(record.passive_damages[0].name, "Cursed");
    }

    #[test]
    fn roll_expression_records_history() {
        let mut s = session();
        let mut roller = ScriptedRoller::new([2, 5]);
        let entry = s
            .roll_expression(&"2d6+3".parse().unwrap(), &mut roller)
            .unwrap();
        assert_eq!(entry.total, 10);
        assert_eq!(entry.rolls, vec![2, 5]);
        assert_eq!(s.account().dice_history.len(), 1);
    }

    #[test]
    fn export_import_replaces_account() {
        let mut source = session();
        source.add_character("Escanor", 30, 0);
        let text = source.export().unwrap();

        let mut target = session();
        target.add_character("Merlin", 20, 0);
        target.import(&text).unwrap();
        assert_eq!(target.characters().len(), 1);
        assert_eq!(target.active_character().unwrap().name(), "Escanor");
    }

    #[test]
    fn failed_import_leaves_account_untouched() {
        let mut s = session();
        s.add_character("Escanor", 30, 0);
        assert!(s.import("{\"nope\": true}").is_err());
        assert_eq!(s.characters().len(), 1);
    }

    #[test]
    fn switch_character_addresses_operations() {
        let mut s = session();
        let first = s.add_character("Escanor", 30, 0);
        let second = s.add_character("Merlin", 20, 0);
        assert_eq!(s.account().active_character_id, Some(first));

        assert!(s.switch_character(second));
        s.damage(5);
        assert_eq!(
            s.active_character().unwrap().character_data.character.current_hp,
            15
        );
        assert!(!s.switch_character(CharacterId::new()));
    }
}
