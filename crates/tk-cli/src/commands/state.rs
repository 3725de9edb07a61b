use std::path::Path;

use tk_core::{DiscountType, StateEntry};

use super::{CliResult, find_counter_id, find_state_id, open_session, require_active};

pub fn add(dir: &Path, name: &str, counter: Option<&str>, cost: i32, gain: bool) -> CliResult {
    let mut session = open_session(dir);
    require_active(&session)?;

    let linked = match counter {
        Some(counter_name) => Some(find_counter_id(&session, counter_name)?),
        None => None,
    };

    let mut state = StateEntry::new(name);
    state.linked_counter_id = linked;
    state.discount_on_activate = cost;
    state.discount_type = if gain {
        DiscountType::Add
    } else {
        DiscountType::Subtract
    };
    session.add_state(state);
    println!("  Added state '{name}'");
    Ok(())
}

pub fn list(dir: &Path) -> CliResult {
    let session = open_session(dir);
    let record = session
        .active_character()
        .ok_or_else(|| "no active character".to_string())?;

    if record.character_state.is_empty() {
        println!("  No states yet.");
        return Ok(());
    }

    for state in &record.character_state {
        let flag = if state.active { "on" } else { "off" };
        let linked = state
            .linked_counter_id
            .as_ref()
            .and_then(|id| record.counters.iter().find(|c| c.id == *id))
            .map(|c| format!(" (spends from {})", c.name))
            .unwrap_or_default();
        println!("  {} [{flag}]{linked}", state.name);
    }
    Ok(())
}

pub fn toggle(dir: &Path, name: &str) -> CliResult {
    let mut session = open_session(dir);
    let id = find_state_id(&session, name)?;
    if let Some(active) = session.toggle_state(&id) {
        println!("  {name}: {}", if active { "on" } else { "off" });
    }
    Ok(())
}

pub fn remove(dir: &Path, name: &str) -> CliResult {
    let mut session = open_session(dir);
    let id = find_state_id(&session, name)?;
    session.remove_state(&id);
    println!("  Removed state '{name}'");
    Ok(())
}
