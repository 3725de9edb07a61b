use std::path::Path;

use tk_core::{CriticalHitConfig, CriticalRule};

use super::{CliResult, open_session, require_active};

pub fn show(dir: &Path) -> CliResult {
    let session = open_session(dir);
    let config = session
        .critical_config()
        .ok_or_else(|| "no active character".to_string())?;
    let rule = match config.rule {
        CriticalRule::Default => "default (doubled dice)",
        CriticalRule::MassiveDamage => "massive damage",
        CriticalRule::Unknown => "unknown (resolves as non-critical)",
    };
    println!("  Rule:  {rule}");
    println!("  Level: {}", config.character_level);
    Ok(())
}

pub fn set(dir: &Path, rule: &str, level: Option<u32>) -> CliResult {
    let rule = match rule.to_lowercase().as_str() {
        "default" => CriticalRule::Default,
        "massive" | "massive-damage" => CriticalRule::MassiveDamage,
        other => return Err(format!("unknown rule \"{other}\" (use default or massive)")),
    };

    let mut session = open_session(dir);
    require_active(&session)?;
    let current = session
        .critical_config()
        .map(|c| c.character_level)
        .unwrap_or(1);
    session.set_critical_config(CriticalHitConfig {
        rule,
        character_level: level.unwrap_or(current),
    });
    println!("  Critical hit rule updated");
    Ok(())
}
