use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use tk_core::Attack;

use super::{
    CliResult, find_attack_id, make_roller, open_session, parse_damage_roll, parse_reroll_dice,
    print_result, require_active,
};

pub fn add(dir: &Path, name: &str, components: &[String], rerolls: &[String]) -> CliResult {
    let damage_rolls = components
        .iter()
        .map(|c| parse_damage_roll(c))
        .collect::<Result<Vec<_>, _>>()?;
    let reroll_dice = rerolls
        .iter()
        .map(|r| parse_reroll_dice(r))
        .collect::<Result<Vec<_>, _>>()?;

    let mut session = open_session(dir);
    require_active(&session)?;
    if session.find_attack_by_name(name).is_some() {
        return Err(format!("an attack named \"{name}\" already exists"));
    }

    let mut attack = Attack::new(name, damage_rolls);
    attack.reroll_dice = reroll_dice;
    session.add_attack(attack);
    println!("  Added attack '{name}'");
    Ok(())
}

pub fn list(dir: &Path) -> CliResult {
    let session = open_session(dir);
    let record = session
        .active_character()
        .ok_or_else(|| "no active character".to_string())?;

    if record.attacks.is_empty() {
        println!("  No attacks yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Damage", "Lifesteal", "Reroll"]);

    for attack in &record.attacks {
        let damage: Vec<String> = attack
            .damage_rolls
            .iter()
            .map(|r| {
                let bonus = if r.bonus != 0 {
                    format!("{:+}", r.bonus)
                } else {
                    String::new()
                };
                format!("{}{} {}", r.dice, bonus, r.damage_type)
            })
            .collect();
        let lifesteal: Vec<String> = attack
            .damage_rolls
            .iter()
            .filter(|r| r.life_steal_percentage() > 0)
            .map(|r| format!("{}%", r.life_steal_percentage()))
            .collect();
        let reroll: Vec<String> = attack.reroll_dice.iter().map(|r| r.dice.to_string()).collect();

        table.add_row(vec![
            attack.name.clone(),
            damage.join(", "),
            lifesteal.join(", "),
            reroll.join(", "),
        ]);
    }

    println!("{table}");
    Ok(())
}

pub fn remove(dir: &Path, name: &str) -> CliResult {
    let mut session = open_session(dir);
    let id = find_attack_id(&session, name)?;
    session.remove_attack(id);
    println!("  Removed attack '{name}'");
    Ok(())
}

pub fn duplicate(dir: &Path, name: &str) -> CliResult {
    let mut session = open_session(dir);
    let id = find_attack_id(&session, name)?;
    session.duplicate_attack(id);
    println!("  Duplicated attack '{name}'");
    Ok(())
}

pub fn roll(dir: &Path, seed: Option<u64>, name: &str, critical: bool, use_reroll: bool) -> CliResult {
    let mut session = open_session(dir);
    let id = find_attack_id(&session, name)?;
    let mut roller = make_roller(seed);

    let result = session
        .execute_attack(id, critical, use_reroll, &mut roller)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("attack not found: \"{name}\""))?;
    print_result(&result);
    Ok(())
}
