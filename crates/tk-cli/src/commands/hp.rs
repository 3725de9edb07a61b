use std::path::Path;

use super::{CliResult, open_session, require_active};

fn print_hp(session: &tk_store::Session<tk_store::FileStore>) {
    if let Some(record) = session.active_character() {
        let profile = &record.character_data.character;
        let temp = if profile.temp_hp > 0 {
            format!(" (+{} temp)", profile.temp_hp)
        } else {
            String::new()
        };
        println!("  {}: {}/{}{}", record.name(), profile.current_hp, profile.max_hp, temp);
        if !profile.is_alive() {
            println!("  {} is down!", record.name());
        }
    }
}

pub fn damage(dir: &Path, amount: i32) -> CliResult {
    if amount < 0 {
        return Err("damage amount must not be negative".into());
    }
    let mut session = open_session(dir);
    require_active(&session)?;
    session.damage(amount);
    print_hp(&session);
    Ok(())
}

pub fn heal(dir: &Path, amount: i32) -> CliResult {
    if amount < 0 {
        return Err("heal amount must not be negative".into());
    }
    let mut session = open_session(dir);
    require_active(&session)?;
    session.heal(amount);
    print_hp(&session);
    Ok(())
}

pub fn temp(dir: &Path, amount: i32) -> CliResult {
    if amount < 0 {
        return Err("temporary HP must not be negative".into());
    }
    let mut session = open_session(dir);
    require_active(&session)?;
    session.add_temp_hp(amount);
    print_hp(&session);
    Ok(())
}
