use std::path::Path;

use tk_core::{PassiveDamageEffect, PassiveRoll};

use super::{CliResult, find_effect_id, open_session, parse_damage_roll, require_active};

pub fn add(dir: &Path, name: &str, components: &[String], duration: u32) -> CliResult {
    let damage_rolls = components
        .iter()
        .map(|c| {
            parse_damage_roll(c).map(|r| PassiveRoll {
                num_dice: r.dice.count,
                dice_type: r.dice.sides,
                bonus: r.bonus,
                damage_type: r.damage_type,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut session = open_session(dir);
    require_active(&session)?;

    let mut effect = PassiveDamageEffect::new(name, damage_rolls);
    effect.duration = duration;
    session.add_passive_damage(effect);
    println!("  Added effect '{name}'");
    Ok(())
}

pub fn list(dir: &Path) -> CliResult {
    let session = open_session(dir);
    let record = session
        .active_character()
        .ok_or_else(|| "no active character".to_string())?;

    if record.passive_damages.is_empty() {
        println!("  No effects yet.");
        return Ok(());
    }

    for effect in &record.passive_damages {
        let components: Vec<String> = effect
            .damage_rolls
            .iter()
            .map(|r| {
                let bonus = if r.bonus != 0 {
                    format!("{:+}", r.bonus)
                } else {
                    String::new()
                };
                format!("{}d{}{} {}", r.num_dice, r.dice_type, bonus, r.damage_type)
            })
            .collect();
        let duration = if effect.duration == 0 {
            "indefinite".to_string()
        } else {
            format!("{} turns left", effect.duration)
        };
        println!("  {} ({}): {}", effect.name, duration, components.join(", "));
    }
    Ok(())
}

pub fn remove(dir: &Path, name: &str) -> CliResult {
    let mut session = open_session(dir);
    let id = find_effect_id(&session, name)?;
    session.remove_passive_damage(id);
    println!("  Removed effect '{name}'");
    Ok(())
}
