use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use tk_core::Counter;

use super::{CliResult, find_counter_id, open_session, require_active};

pub fn add(
    dir: &Path,
    name: &str,
    max: i32,
    start: Option<i32>,
    short_rest: i32,
    long_rest: i32,
) -> CliResult {
    let mut session = open_session(dir);
    require_active(&session)?;

    let mut counter = Counter::new(name, start.unwrap_or(max), 0, max);
    counter.short_rest = short_rest;
    counter.long_rest = long_rest;
    session.add_counter(counter);
    println!("  Added counter '{name}'");
    Ok(())
}

pub fn list(dir: &Path) -> CliResult {
    let session = open_session(dir);
    let record = session
        .active_character()
        .ok_or_else(|| "no active character".to_string())?;

    if record.counters.is_empty() {
        println!("  No counters yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Value", "Short rest", "Long rest"]);

    for counter in &record.counters {
        table.add_row(vec![
            counter.name.clone(),
            format!("{}/{}", counter.value, counter.max),
            counter.short_rest.to_string(),
            counter.long_rest.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

pub fn bump(dir: &Path, name: &str, delta: i32) -> CliResult {
    let mut session = open_session(dir);
    let id = find_counter_id(&session, name)?;
    if let Some(value) = session.adjust_counter(&id, delta) {
        println!("  {name}: {value}");
    }
    Ok(())
}

pub fn set_max(dir: &Path, name: &str) -> CliResult {
    let mut session = open_session(dir);
    let id = find_counter_id(&session, name)?;
    session.set_counter_to_max(&id);
    let value = session
        .active_character()
        .and_then(|r| r.counters.iter().find(|c| c.id == id))
        .map(|c| c.value)
        .unwrap_or_default();
    println!("  {name}: {value}");
    Ok(())
}

pub fn remove(dir: &Path, name: &str) -> CliResult {
    let mut session = open_session(dir);
    let id = find_counter_id(&session, name)?;
    session.remove_counter(&id);
    println!("  Removed counter '{name}'");
    Ok(())
}
