use std::path::Path;

use tk_core::RestKind;

use super::{CliResult, open_session, require_active};

pub fn start(dir: &Path) -> CliResult {
    let mut session = open_session(dir);
    require_active(&session)?;
    session.start_turn();
    let record = session.active_character().ok_or("no active character")?;
    println!(
        "  Turn {} started ({} HP)",
        record.character_data.turn.current, record.character_data.character.current_hp
    );
    Ok(())
}

pub fn end(dir: &Path) -> CliResult {
    let mut session = open_session(dir);
    require_active(&session)?;
    session.end_turn();
    let record = session.active_character().ok_or("no active character")?;
    println!("  Turn {} ended", record.character_data.turn.current);
    Ok(())
}

pub fn rest(dir: &Path, kind: &str) -> CliResult {
    let kind = match kind.to_lowercase().as_str() {
        "short" => RestKind::Short,
        "long" => RestKind::Long,
        other => return Err(format!("unknown rest kind \"{other}\" (use short or long)")),
    };
    let mut session = open_session(dir);
    require_active(&session)?;
    session.apply_rest(kind);
    match kind {
        RestKind::Short => println!("  Short rest taken"),
        RestKind::Long => println!("  Long rest taken"),
    }
    Ok(())
}
