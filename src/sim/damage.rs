use rand::Rng;
use tracing::{debug, trace};

use crate::data::moves::{MoveCategory, MoveData};
use crate::data::types::effectiveness;
use crate::sim::creature::Creature;
use crate::sim::stages::{accuracy_multiplier, evasion_multiplier, stat_multiplier, StageStat, StatStages};
use crate::sim::status::StatusCondition;

pub const CRIT_CHANCE_DENOM: u32 = 16;
pub const CRIT_MULTIPLIER: f64 = 2.0;
pub const STAB_MULTIPLIER: f64 = 1.5;
const CONFUSION_POWER: u16 = 40;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRoll {
    pub damage: u16,
    pub effectiveness: f64,
    pub critical: bool,
}

impl DamageRoll {
    fn none(effectiveness: f64) -> Self {
        Self { damage: 0, effectiveness, critical: false }
    }
}

/// One side of a hit: the creature and its current stage modifiers.
#[derive(Clone, Copy)]
pub struct Battler<'a> {
    pub creature: &'a Creature,
    pub stages: &'a StatStages,
}

impl<'a> Battler<'a> {
    pub fn new(creature: &'a Creature, stages: &'a StatStages) -> Self {
        Self { creature, stages }
    }
}

fn staged(raw: u16, stage: i8) -> f64 {
    raw as f64 * stat_multiplier(stage)
}

/// Speed used for turn order: staged and floored, then halved when paralyzed.
pub fn effective_speed(creature: &Creature, stages: &StatStages) -> u32 {
    let speed = staged(creature.stats.spe, stages.get(StageStat::Speed)).floor() as u32;
    if matches!(creature.status, Some(StatusCondition::Paralysis)) {
        speed / 2
    } else {
        speed
    }
}

pub fn is_stab(attacker: &Creature, move_data: &MoveData) -> bool {
    move_data.move_type.is_some_and(|t| attacker.species.has_type(t))
}

/// Rolls for a critical hit, then computes damage.
pub fn compute_damage(
    attacker: Battler<'_>,
    defender: Battler<'_>,
    move_data: &MoveData,
    rng: &mut impl Rng,
) -> DamageRoll {
    let type_mod = effectiveness(move_data.move_type, defender.creature.types());
    if !move_data.is_damaging() || type_mod == 0.0 {
        return DamageRoll::none(type_mod);
    }
    let critical = rng.gen_range(0..CRIT_CHANCE_DENOM) == 0;
    trace!(critical, "crit roll");
    compute_damage_with(attacker, defender, move_data, critical)
}

/// Deterministic part of the damage formula.
pub fn compute_damage_with(
    attacker: Battler<'_>,
    defender: Battler<'_>,
    move_data: &MoveData,
    critical: bool,
) -> DamageRoll {
    let type_mod = effectiveness(move_data.move_type, defender.creature.types());
    if !move_data.is_damaging() || type_mod == 0.0 {
        return DamageRoll::none(type_mod);
    }

    let level_term = (2 * attacker.creature.level as u32 / 5 + 2) as f64;
    let mut base = level_term * move_data.power as f64;
    let (atk, def) = match move_data.category {
        MoveCategory::Physical => (
            staged(attacker.creature.stats.atk, attacker.stages.get(StageStat::Attack)),
            staged(defender.creature.stats.def, defender.stages.get(StageStat::Defense)),
        ),
        _ => (
            staged(attacker.creature.stats.spa, attacker.stages.get(StageStat::SpAttack)),
            staged(defender.creature.stats.spd, defender.stages.get(StageStat::SpDefense)),
        ),
    };
    base *= atk / def.max(1.0);
    if move_data.category == MoveCategory::Physical
        && matches!(attacker.creature.status, Some(StatusCondition::Burn))
    {
        base *= 0.5;
    }

    let mut damage = (base / 50.0).floor() + 2.0;
    if critical {
        damage *= CRIT_MULTIPLIER;
    }
    if is_stab(attacker.creature, move_data) {
        damage *= STAB_MULTIPLIER;
    }
    damage *= type_mod;
    let damage = (damage.floor() as u32).clamp(1, u16::MAX as u32) as u16;

    debug!(
        attacker = attacker.creature.name(),
        defender = defender.creature.name(),
        move_id = move_data.id,
        damage,
        effectiveness = type_mod,
        critical,
        "damage computed"
    );
    DamageRoll { damage, effectiveness: type_mod, critical }
}

/// Typeless 40-power physical hit against itself. No crit, STAB or burn.
pub fn confusion_damage(creature: &Creature, stages: &StatStages) -> u16 {
    let level_term = (2 * creature.level as u32 / 5 + 2) as f64;
    let atk = staged(creature.stats.atk, stages.get(StageStat::Attack));
    let def = staged(creature.stats.def, stages.get(StageStat::Defense)).max(1.0);
    let base = level_term * CONFUSION_POWER as f64 * atk / def;
    ((base / 50.0).floor() as u32 + 2).min(u16::MAX as u32) as u16
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Combined accuracy/evasion modifier, rounded to hundredths.
pub fn hit_modifier(attacker: &StatStages, defender: &StatStages) -> f64 {
    round2(
        accuracy_multiplier(attacker.get(StageStat::Accuracy))
            * evasion_multiplier(defender.get(StageStat::Evasiveness)),
    )
}

pub fn accuracy_check(
    move_data: &MoveData,
    attacker: &StatStages,
    defender: &StatStages,
    rng: &mut impl Rng,
) -> bool {
    if move_data.sure_hit {
        return true;
    }
    let draw: f64 = rng.gen();
    let threshold = move_data.accuracy as f64 * hit_modifier(attacker, defender);
    trace!(draw, threshold, move_id = move_data.id, "accuracy roll");
    draw * 100.0 <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::moves::{get_move, STRUGGLE};
    use crate::sim::stats::Nature;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn creature(species: &str, level: u8) -> Creature {
        Creature::new(species, level, Nature::Hardy, &["tackle"]).unwrap()
    }

    fn flat(mut c: Creature, atk: u16, def: u16) -> Creature {
        c.stats.atk = atk;
        c.stats.def = def;
        c.stats.spa = atk;
        c.stats.spd = def;
        c
    }

    #[test]
    fn golden_damage() {
        // Level 50, 100 power, Atk 100 vs Def 100, neutral, no STAB: 22 * 100 / 50 + 2.
        let attacker = flat(creature("pikachu", 50), 100, 100);
        let defender = flat(creature("pikachu", 50), 100, 100);
        let stages = StatStages::default();
        let mv = MoveData { power: 100, ..*get_move("tackle").unwrap() };
        let roll = compute_damage_with(
            Battler::new(&attacker, &stages),
            Battler::new(&defender, &stages),
            &mv,
            false,
        );
        assert_eq!(roll.damage, 46);
        assert_eq!(roll.effectiveness, 1.0);

        let crit = compute_damage_with(
            Battler::new(&attacker, &stages),
            Battler::new(&defender, &stages),
            &mv,
            true,
        );
        assert_eq!(crit.damage, 92);
    }

    #[test]
    fn stab_and_burn() {
        let attacker = flat(creature("eevee", 50), 100, 100);
        let defender = flat(creature("pikachu", 50), 100, 100);
        let stages = StatStages::default();
        let mv = MoveData { power: 100, ..*get_move("tackle").unwrap() };
        let a = Battler::new(&attacker, &stages);
        let d = Battler::new(&defender, &stages);
        assert_eq!(compute_damage_with(a, d, &mv, false).damage, 69);

        let mut burned = attacker.clone();
        burned.status = Some(StatusCondition::Burn);
        let b = Battler::new(&burned, &stages);
        // floor(2200 * 0.5 / 50) + 2 = 24, * 1.5
        assert_eq!(compute_damage_with(b, d, &mv, false).damage, 36);
    }

    #[test]
    fn immune_target_takes_nothing() {
        let mut rng = SmallRng::seed_from_u64(1);
        let attacker = creature("rattata", 30);
        let ghost = creature("gastly", 30);
        let stages = StatStages::default();
        let roll = compute_damage(
            Battler::new(&attacker, &stages),
            Battler::new(&ghost, &stages),
            get_move("tackle").unwrap(),
            &mut rng,
        );
        assert_eq!(roll.damage, 0);
        assert_eq!(roll.effectiveness, 0.0);
    }

    #[test]
    fn status_moves_deal_nothing_and_struggle_hits_ghosts() {
        let mut rng = SmallRng::seed_from_u64(2);
        let attacker = creature("rattata", 30);
        let ghost = creature("gastly", 30);
        let stages = StatStages::default();
        let growl = compute_damage(
            Battler::new(&attacker, &stages),
            Battler::new(&ghost, &stages),
            get_move("growl").unwrap(),
            &mut rng,
        );
        assert_eq!(growl.damage, 0);
        let struggle = compute_damage(
            Battler::new(&attacker, &stages),
            Battler::new(&ghost, &stages),
            &STRUGGLE,
            &mut rng,
        );
        assert!(struggle.damage >= 1);
    }

    #[test]
    fn damaging_hits_deal_at_least_one() {
        let mut rng = SmallRng::seed_from_u64(3);
        let weak = creature("magikarp", 1);
        let tank = creature("geodude", 100);
        let mut stages = StatStages::default();
        stages.modify(StageStat::Defense, 6);
        let weak_stages = StatStages::default();
        for _ in 0..50 {
            let roll = compute_damage(
                Battler::new(&weak, &weak_stages),
                Battler::new(&tank, &stages),
                get_move("scratch").unwrap(),
                &mut rng,
            );
            assert!(roll.damage >= 1);
        }
    }

    #[test]
    fn attack_stages_scale_damage() {
        let attacker = flat(creature("pikachu", 50), 100, 100);
        let defender = flat(creature("pikachu", 50), 100, 100);
        let neutral = StatStages::default();
        let mut boosted = StatStages::default();
        boosted.modify(StageStat::Attack, 2);
        let mv = MoveData { power: 100, ..*get_move("tackle").unwrap() };
        let roll = compute_damage_with(
            Battler::new(&attacker, &boosted),
            Battler::new(&defender, &neutral),
            &mv,
            false,
        );
        assert_eq!(roll.damage, 90);
    }

    #[test]
    fn paralysis_halves_speed() {
        let mut pikachu = creature("pikachu", 50);
        let stages = StatStages::default();
        let speed = effective_speed(&pikachu, &stages);
        pikachu.status = Some(StatusCondition::Paralysis);
        assert_eq!(effective_speed(&pikachu, &stages), speed / 2);
    }

    #[test]
    fn sure_hit_ignores_evasion() {
        let mut rng = SmallRng::seed_from_u64(4);
        let attacker = StatStages::default();
        let mut evasive = StatStages::default();
        evasive.modify(StageStat::Evasiveness, 6);
        for _ in 0..100 {
            assert!(accuracy_check(get_move("swift").unwrap(), &attacker, &evasive, &mut rng));
        }
    }

    #[test]
    fn evasion_lowers_hit_rate() {
        let mut rng = SmallRng::seed_from_u64(5);
        let attacker = StatStages::default();
        let mut evasive = StatStages::default();
        evasive.modify(StageStat::Evasiveness, 6);
        assert_eq!(hit_modifier(&attacker, &evasive), 0.33);
        let trials = 5000;
        let hits = (0..trials)
            .filter(|_| accuracy_check(get_move("tackle").unwrap(), &attacker, &evasive, &mut rng))
            .count();
        let rate = hits as f64 / trials as f64;
        assert!((rate - 0.33).abs() < 0.03, "rate {rate}");
    }

    #[test]
    fn confusion_uses_own_stats() {
        let c = flat(creature("pikachu", 50), 100, 100);
        // 22 * 40 / 50 + 2
        assert_eq!(confusion_damage(&c, &StatStages::default()), 19);
    }
}
