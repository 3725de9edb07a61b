//! Property tests for the resolution and reroll engines.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use tk_core::{Attack, DamageRoll, DamageType, DiceSpec, LifeSteal, RerollDice};
use tk_mechanics::{apply_replacement, resolve_attack, roll_reroll_pool};

fn damage_type() -> impl Strategy<Value = DamageType> {
    (0usize..DamageType::ALL.len()).prop_map(|i| DamageType::ALL[i])
}

fn damage_roll() -> impl Strategy<Value = DamageRoll> {
    (
        1u32..=5,
        prop_oneof![Just(4u32), Just(6), Just(8), Just(10), Just(12), Just(20)],
        1u32..=4,
        0i32..=10,
        damage_type(),
        prop_oneof![
            Just(None),
            (1u32..=100).prop_map(|percentage| Some(LifeSteal { percentage }))
        ],
    )
        .prop_map(|(count, sides, min_per_die, bonus, damage_type, life_steal)| DamageRoll {
            dice: DiceSpec { count, sides },
            min_per_die,
            bonus,
            damage_type,
            life_steal,
        })
}

fn attack() -> impl Strategy<Value = Attack> {
    prop::collection::vec(damage_roll(), 1..4).prop_map(|rolls| Attack::new("Test", rolls))
}

fn reroll_dice() -> impl Strategy<Value = Vec<RerollDice>> {
    prop::collection::vec(
        (
            1u32..=3,
            prop_oneof![Just(4u32), Just(6), Just(8), Just(10), Just(12), Just(20)],
            1u32..=3,
        )
            .prop_map(|(count, sides, min_per_die)| RerollDice {
                dice: DiceSpec { count, sides },
                min_per_die,
            }),
        0..3,
    )
}

proptest! {
    #[test]
    fn every_die_respects_its_minimum(attack in attack(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = resolve_attack(&attack, &mut rng).unwrap();

        for roll in &attack.damage_rolls {
            let bucket = &result.results[&roll.damage_type];
            let upper = roll.dice.sides.max(roll.min_per_die);
            // Every die of this roll's size in its bucket is min-clamped
            // and within the die's face range.
            for die in bucket.rolls.iter().filter(|d| d.die_size == roll.dice.sides) {
                prop_assert!(die.value >= 1);
                prop_assert!(die.value <= upper);
            }
        }
    }

    #[test]
    fn grand_total_is_conserved(
        attack in attack(),
        rerolls in reroll_dice(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let base = resolve_attack(&attack, &mut rng).unwrap();
        let bucket_sum: i32 = base.results.values().map(|b| b.total).sum();
        prop_assert_eq!(base.grand_total, bucket_sum);

        let pool = roll_reroll_pool(&rerolls, &mut rng).unwrap();
        let replaced = apply_replacement(&base, &pool);
        let bucket_sum: i32 = replaced.results.values().map(|b| b.total).sum();
        prop_assert_eq!(replaced.grand_total, bucket_sum);
    }

    #[test]
    fn lifesteal_is_bounded(attack in attack(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = resolve_attack(&attack, &mut rng).unwrap();

        for bucket in result.results.values() {
            if let Some(tally) = &bucket.life_steal {
                prop_assert!(tally.healed >= 0);
                // Bonuses are non-negative here, so healing at <=100% can
                // never exceed the bucket total.
                prop_assert!(tally.healed <= bucket.total);
            }
        }
        prop_assert!(result.total_healed >= 0);
    }

    #[test]
    fn replacement_never_lowers_a_die(
        attack in attack(),
        rerolls in reroll_dice(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let base = resolve_attack(&attack, &mut rng).unwrap();
        let pool = roll_reroll_pool(&rerolls, &mut rng).unwrap();
        let replaced = apply_replacement(&base, &pool);

        for (damage_type, bucket) in &base.results {
            let after = &replaced.results[damage_type];
            prop_assert_eq!(bucket.rolls.len(), after.rolls.len());
            for (before_die, after_die) in bucket.rolls.iter().zip(&after.rolls) {
                prop_assert!(after_die.value >= before_die.value);
                if after_die.is_replaced {
                    prop_assert_eq!(after_die.original_value, Some(before_die.value));
                }
            }
        }
        prop_assert!(replaced.grand_total >= base.grand_total);
        prop_assert!(replaced.total_healed >= base.total_healed);
    }
}
