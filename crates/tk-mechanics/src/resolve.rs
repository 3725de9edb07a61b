//! Attack resolution: normal and critical variants.

use tk_core::{Attack, CriticalHitConfig, CriticalRule, DamageRoll, DamageType};

use crate::dice::{DieRoller, roll_values};
use crate::error::MechResult;
use crate::result::{AttackResult, LifeStealSource, RolledDie};

/// Resolve an attack: roll every damage component, clamp each die up to its
/// component's minimum, and aggregate into per-type buckets with lifesteal.
pub fn resolve_attack(attack: &Attack, roller: &mut dyn DieRoller) -> MechResult<AttackResult> {
    let mut result = AttackResult {
        name: attack.name.clone(),
        ..Default::default()
    };

    for roll in &attack.damage_rolls {
        let values = roll_values(roller, roll.dice.count, roll.dice.sides)?;
        let dice = values
            .into_iter()
            .map(|v| RolledDie::new(v.max(roll.min_per_die), roll.dice.sides))
            .collect();
        add_component(&mut result, roll, dice);
    }

    result.recompute();
    Ok(result)
}

/// Resolve an attack under the character's critical hit rule.
///
/// `Default` doubles every component's dice count (bonuses unchanged).
/// `MassiveDamage` grants each die its maximum face value on top of a
/// normal roll and adds a level-scaled flat force bonus. Unknown rules
/// fall back to a plain resolution.
pub fn resolve_critical_attack(
    attack: &Attack,
    config: &CriticalHitConfig,
    roller: &mut dyn DieRoller,
) -> MechResult<AttackResult> {
    match config.rule {
        CriticalRule::Default => {
            let mut doubled = attack.clone();
            doubled.name = format!("{} (Critical)", attack.name);
            for roll in &mut doubled.damage_rolls {
                roll.dice.count *= 2;
            }
            resolve_attack(&doubled, roller)
        }
        CriticalRule::MassiveDamage => resolve_massive(attack, config.character_level, roller),
        CriticalRule::Unknown => resolve_attack(attack, roller),
    }
}

fn resolve_massive(
    attack: &Attack,
    character_level: u32,
    roller: &mut dyn DieRoller,
) -> MechResult<AttackResult> {
    let mut result = AttackResult {
        name: format!("{} (Massive Critical)", attack.name),
        ..Default::default()
    };

    for roll in &attack.damage_rolls {
        let values = roll_values(roller, roll.dice.count, roll.dice.sides)?;
        // Each die is maximized on top of a normal (min-clamped) roll.
        let dice = values
            .into_iter()
            .map(|v| RolledDie::new(roll.dice.sides + v.max(roll.min_per_die), roll.dice.sides))
            .collect();
        add_component(&mut result, roll, dice);
    }

    let dad = dad_bonus(character_level);
    if dad > 0 {
        // The level bonus is its own force bucket, not spread across the
        // attack's existing types.
        let bucket = result.results.entry(DamageType::Force).or_default();
        bucket.bonus += dad;
    }

    result.recompute();
    Ok(result)
}

/// Append one damage component's dice, bonus, and lifesteal claim to its
/// type bucket. Totals are left for [`AttackResult::recompute`].
fn add_component(result: &mut AttackResult, roll: &DamageRoll, dice: Vec<RolledDie>) {
    let bucket = result.results.entry(roll.damage_type).or_default();
    let dice_start = bucket.rolls.len();
    let dice_len = dice.len();
    bucket.rolls.extend(dice);
    bucket.bonus += roll.bonus;

    let percentage = roll.life_steal_percentage();
    if percentage > 0 {
        let tally = bucket.life_steal.get_or_insert_with(Default::default);
        tally.sources.push(LifeStealSource {
            percentage,
            dice_start,
            dice_len,
            bonus: roll.bonus,
        });
    }
}

/// The flat "massive damage" critical bonus for a character level.
///
/// A step table: 10 for levels 1-4, 20 for 5-10, 30 for 11-16, 40 for
/// 17-20, then 50 at 21 with +10 every 4 levels after that.
pub fn dad_bonus(character_level: u32) -> i32 {
    const TABLE: [(u32, u32, i32); 4] = [(1, 4, 10), (5, 10, 20), (11, 16, 30), (17, 20, 40)];

    if character_level == 0 {
        return 0;
    }
    for (low, high, bonus) in TABLE {
        if (low..=high).contains(&character_level) {
            return bonus;
        }
    }
    50 + 10 * ((character_level - 21) / 4) as i32
}
