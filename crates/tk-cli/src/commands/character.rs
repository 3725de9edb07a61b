use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::{CliResult, open_session};

pub fn add(dir: &Path, name: &str, max_hp: i32, regen: i32) -> CliResult {
    if max_hp <= 0 {
        return Err("maximum HP must be positive".into());
    }
    let mut session = open_session(dir);
    if session.account().find_by_name(name).is_some() {
        return Err(format!("a character named \"{name}\" already exists"));
    }
    session.add_character(name, max_hp, regen);
    println!("  Created character '{name}' with {max_hp} HP");
    Ok(())
}

pub fn list(dir: &Path) -> CliResult {
    let session = open_session(dir);
    let characters = session.characters();

    if characters.is_empty() {
        println!("  No characters yet.");
        return Ok(());
    }

    let active_id = session.account().active_character_id;
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Name", "HP", "Attacks", "Counters"]);

    for record in characters {
        let profile = &record.character_data.character;
        let marker = if Some(record.id) == active_id { "*" } else { "" };
        let hp = if profile.temp_hp > 0 {
            format!("{}+{}/{}", profile.current_hp, profile.temp_hp, profile.max_hp)
        } else {
            format!("{}/{}", profile.current_hp, profile.max_hp)
        };
        table.add_row(vec![
            marker.to_string(),
            record.name().to_string(),
            hp,
            record.attacks.len().to_string(),
            record.counters.len().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} characters", characters.len());
    Ok(())
}

pub fn switch(dir: &Path, name: &str) -> CliResult {
    let mut session = open_session(dir);
    let id = session
        .account()
        .find_by_name(name)
        .map(|r| r.id)
        .ok_or_else(|| format!("character not found: \"{name}\""))?;
    session.switch_character(id);
    println!("  Active character: {name}");
    Ok(())
}

pub fn show(dir: &Path) -> CliResult {
    let session = open_session(dir);
    let record = session
        .active_character()
        .ok_or_else(|| "no active character".to_string())?;
    let profile = &record.character_data.character;
    let turn = &record.character_data.turn;

    println!("  {}", record.name().bold());
    println!();
    println!("  HP:     {}/{}", profile.current_hp, profile.max_hp);
    if profile.temp_hp > 0 {
        println!("  Temp:   {}", profile.temp_hp);
    }
    if profile.regeneration > 0 {
        println!("  Regen:  {}/turn", profile.regeneration);
    }
    println!(
        "  Turn:   {}{}",
        turn.current,
        if turn.is_active { " (active)" } else { "" }
    );

    if !record.attacks.is_empty() {
        println!();
        println!("  Attacks:");
        for attack in &record.attacks {
            let components: Vec<String> = attack
                .damage_rolls
                .iter()
                .map(|r| format!("{} {}", r.dice, r.damage_type))
                .collect();
            println!("    {} ({})", attack.name, components.join(", "));
        }
    }

    if !record.counters.is_empty() {
        println!();
        println!("  Counters:");
        for counter in &record.counters {
            println!("    {counter}");
        }
    }

    if !record.character_state.is_empty() {
        println!();
        println!("  States:");
        for state in &record.character_state {
            let flag = if state.active { "on" } else { "off" };
            println!("    {} [{flag}]", state.name);
        }
    }

    if !record.passive_damages.is_empty() {
        println!();
        println!("  Effects:");
        for effect in &record.passive_damages {
            let duration = if effect.duration == 0 {
                "indefinite".to_string()
            } else {
                format!("{} turns", effect.duration)
            };
            println!("    {} ({duration})", effect.name);
        }
    }

    let logs = &record.character_data.logs;
    if !logs.is_empty() {
        println!();
        println!("  Recent log:");
        for entry in logs.iter().take(5) {
            println!("    [turn {}] {}: {}", entry.turn, entry.action, entry.details);
        }
    }

    Ok(())
}

pub fn remove(dir: &Path, name: &str) -> CliResult {
    let mut session = open_session(dir);
    let id = session
        .account()
        .find_by_name(name)
        .map(|r| r.id)
        .ok_or_else(|| format!("character not found: \"{name}\""))?;
    session.remove_character(id);
    println!("  Removed character '{name}'");
    Ok(())
}
