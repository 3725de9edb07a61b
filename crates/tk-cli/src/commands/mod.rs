pub mod attack;
pub mod character;
pub mod counter;
pub mod crit;
pub mod history;
pub mod hp;
pub mod passive;
pub mod roll;
pub mod state;
pub mod transfer;
pub mod turn;

use std::path::Path;

use colored::{ColoredString, Colorize};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tk_core::{
    AttackId, CounterId, DamageRoll, DamageType, DiceExpression, EffectId, LifeSteal, RerollDice,
    StateId,
};
use tk_mechanics::AttackResult;
use tk_store::{FileStore, Session};

pub type CliResult = Result<(), String>;

/// Open (or create) the account stored under the data directory, running
/// migration as needed.
pub fn open_session(dir: &Path) -> Session<FileStore> {
    Session::load(FileStore::new(dir))
}

/// A seeded RNG when a seed was given, an OS-seeded one otherwise.
pub fn make_roller(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

pub fn require_active(session: &Session<FileStore>) -> Result<(), String> {
    if session.active_character().is_none() {
        return Err("no active character; create one with `tally character add`".into());
    }
    Ok(())
}

pub fn find_attack_id(session: &Session<FileStore>, name: &str) -> Result<AttackId, String> {
    session
        .find_attack_by_name(name)
        .map(|a| a.id)
        .ok_or_else(|| format!("attack not found: \"{name}\""))
}

pub fn find_counter_id(session: &Session<FileStore>, name: &str) -> Result<CounterId, String> {
    let lower = name.to_lowercase();
    session
        .active_character()
        .and_then(|r| r.counters.iter().find(|c| c.name.to_lowercase() == lower))
        .map(|c| c.id.clone())
        .ok_or_else(|| format!("counter not found: \"{name}\""))
}

pub fn find_state_id(session: &Session<FileStore>, name: &str) -> Result<StateId, String> {
    let lower = name.to_lowercase();
    session
        .active_character()
        .and_then(|r| {
            r.character_state
                .iter()
                .find(|s| s.name.to_lowercase() == lower)
        })
        .map(|s| s.id.clone())
        .ok_or_else(|| format!("state not found: \"{name}\""))
}

pub fn find_effect_id(session: &Session<FileStore>, name: &str) -> Result<EffectId, String> {
    let lower = name.to_lowercase();
    session
        .active_character()
        .and_then(|r| {
            r.passive_damages
                .iter()
                .find(|e| e.name.to_lowercase() == lower)
        })
        .map(|e| e.id)
        .ok_or_else(|| format!("effect not found: \"{name}\""))
}

/// Parse one damage component: `EXPR:TYPE` with optional `:lsN` (lifesteal
/// percentage) and `:minN` (per-die floor), e.g. `2d6+3:slashing:ls50`.
pub fn parse_damage_roll(text: &str) -> Result<DamageRoll, String> {
    let mut parts = text.split(':');
    let expr_str = parts.next().unwrap_or("");
    let type_str = parts
        .next()
        .ok_or_else(|| format!("missing damage type in \"{text}\" (use 2d6+3:slashing)"))?;

    let expr: DiceExpression = expr_str.parse().map_err(|e| format!("{e}"))?;
    let damage_type: DamageType = type_str.parse().map_err(|e| format!("{e}"))?;
    let mut roll = DamageRoll::new(expr.dice, expr.bonus, damage_type);

    for option in parts {
        if let Some(pct) = option.strip_prefix("ls") {
            let percentage: u32 = pct
                .parse()
                .map_err(|_| format!("bad lifesteal option \"{option}\""))?;
            roll.life_steal = Some(LifeSteal { percentage });
        } else if let Some(min) = option.strip_prefix("min") {
            roll.min_per_die = min
                .parse()
                .map_err(|_| format!("bad minimum option \"{option}\""))?;
        } else {
            return Err(format!("unknown option \"{option}\" in \"{text}\""));
        }
    }
    Ok(roll)
}

/// Parse one reroll pool entry: `NdM` with an optional `:minN` floor.
pub fn parse_reroll_dice(text: &str) -> Result<RerollDice, String> {
    let (spec_str, min) = match text.split_once(':') {
        Some((spec, option)) => {
            let min = option
                .strip_prefix("min")
                .and_then(|v| v.parse().ok())
                .ok_or_else(|| format!("unknown option in \"{text}\" (use 2d6:min2)"))?;
            (spec, min)
        }
        None => (text, 1),
    };
    let dice = spec_str.parse().map_err(|e| format!("{e}"))?;
    Ok(RerollDice {
        dice,
        min_per_die: min,
    })
}

/// The damage type name tinted with its configured color.
pub fn colored_type(damage_type: DamageType) -> ColoredString {
    match parse_hex(damage_type.color()) {
        Some((r, g, b)) => damage_type.to_string().truecolor(r, g, b),
        None => damage_type.to_string().normal(),
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Print a resolved attack: one line per damage type, replaced dice shown
/// as `old->new`, lifesteal and grand total underneath.
pub fn print_result(result: &AttackResult) {
    println!("  {}", result.name.bold());
    for (damage_type, bucket) in &result.results {
        let dice: Vec<String> = bucket
            .rolls
            .iter()
            .map(|d| {
                if d.is_replaced {
                    format!("{}->{}", d.original_value.unwrap_or(d.value), d.value)
                } else {
                    d.value.to_string()
                }
            })
            .collect();
        let mut detail = format!("[{}]", dice.join(", "));
        if bucket.bonus != 0 {
            detail.push_str(&format!(" {:+}", bucket.bonus));
        }
        println!("  {}: {} {}", colored_type(*damage_type), bucket.total, detail);
        if let Some(tally) = &bucket.life_steal {
            println!(
                "    {} {} ({})",
                "life steal".dimmed(),
                tally.healed,
                tally.percentage_label()
            );
        }
    }
    println!("  total: {}", result.grand_total.to_string().bold());
    if result.total_healed > 0 {
        println!("  healed: {}", result.total_healed.to_string().green());
    }
}
