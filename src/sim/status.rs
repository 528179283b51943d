//! Persistent status conditions.
//!
//! A creature holds at most one condition. Each condition has three hooks
//! driven by the turn resolver: `before_turn` gates the creature's action,
//! `update` runs after its action slot, and `after_turn` applies end-of-turn
//! chip damage.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::data::types::Type;
use crate::error::{BattleError, Result};
use crate::sim::creature::Creature;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Burn,
    Paralysis,
    Freeze,
    Poison,
    BadPoison,
    Sleep,
}

impl StatusKind {
    pub fn id(self) -> &'static str {
        match self {
            StatusKind::Burn => "brn",
            StatusKind::Paralysis => "par",
            StatusKind::Freeze => "frz",
            StatusKind::Poison => "psn",
            StatusKind::BadPoison => "tox",
            StatusKind::Sleep => "slp",
        }
    }

    pub fn from_id(id: &str) -> Result<Self> {
        let kind = match id {
            "brn" => StatusKind::Burn,
            "par" => StatusKind::Paralysis,
            "frz" => StatusKind::Freeze,
            "psn" => StatusKind::Poison,
            "tox" => StatusKind::BadPoison,
            "slp" => StatusKind::Sleep,
            other => return Err(BattleError::UnknownStatus(other.to_string())),
        };
        Ok(kind)
    }

    /// Type whose members can never receive this condition.
    pub fn immune_type(self) -> Option<Type> {
        match self {
            StatusKind::Burn => Some(Type::Fire),
            StatusKind::Paralysis => Some(Type::Electric),
            StatusKind::Freeze => Some(Type::Ice),
            StatusKind::Poison | StatusKind::BadPoison => Some(Type::Poison),
            StatusKind::Sleep => None,
        }
    }

    /// Multiplier fed into the capture formula.
    pub fn catch_bonus(self) -> f64 {
        match self {
            StatusKind::Sleep | StatusKind::Freeze => 2.0,
            _ => 1.5,
        }
    }

    pub fn inflicted_message(self, name: &str) -> String {
        match self {
            StatusKind::Burn => format!("{name} was burned!"),
            StatusKind::Paralysis => format!("{name} is paralyzed! It may be unable to move!"),
            StatusKind::Freeze => format!("{name} was frozen solid!"),
            StatusKind::Poison => format!("{name} was poisoned!"),
            StatusKind::BadPoison => format!("{name} was badly poisoned!"),
            StatusKind::Sleep => format!("{name} fell asleep!"),
        }
    }

    pub fn cured_message(self, name: &str) -> String {
        match self {
            StatusKind::Burn => format!("{name}'s burn was healed!"),
            StatusKind::Paralysis => format!("{name} was cured of paralysis!"),
            StatusKind::Freeze => format!("{name} thawed out!"),
            StatusKind::Poison | StatusKind::BadPoison => format!("{name} was cured of its poisoning!"),
            StatusKind::Sleep => format!("{name} woke up!"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatusCondition {
    Burn,
    Paralysis,
    Freeze,
    Poison,
    BadPoison,
    /// Remaining action slots before the creature wakes on its next pre-turn check.
    Sleep { turns: u8 },
}

impl StatusCondition {
    pub fn kind(self) -> StatusKind {
        match self {
            StatusCondition::Burn => StatusKind::Burn,
            StatusCondition::Paralysis => StatusKind::Paralysis,
            StatusCondition::Freeze => StatusKind::Freeze,
            StatusCondition::Poison => StatusKind::Poison,
            StatusCondition::BadPoison => StatusKind::BadPoison,
            StatusCondition::Sleep { .. } => StatusKind::Sleep,
        }
    }

    /// Fresh condition of `kind`; sleep draws its counter from [1, 4].
    pub fn start(kind: StatusKind, rng: &mut impl Rng) -> Self {
        match kind {
            StatusKind::Burn => StatusCondition::Burn,
            StatusKind::Paralysis => StatusCondition::Paralysis,
            StatusKind::Freeze => StatusCondition::Freeze,
            StatusKind::Poison => StatusCondition::Poison,
            StatusKind::BadPoison => StatusCondition::BadPoison,
            StatusKind::Sleep => StatusCondition::Sleep {
                turns: rng.gen_range(1..=4),
            },
        }
    }

    /// Rebuilds a stored condition without touching the RNG.
    pub fn restore(kind: StatusKind, sleep_turns: u8) -> Self {
        match kind {
            StatusKind::Sleep => StatusCondition::Sleep { turns: sleep_turns },
            StatusKind::Burn => StatusCondition::Burn,
            StatusKind::Paralysis => StatusCondition::Paralysis,
            StatusKind::Freeze => StatusCondition::Freeze,
            StatusKind::Poison => StatusCondition::Poison,
            StatusKind::BadPoison => StatusCondition::BadPoison,
        }
    }

    pub fn sleep_turns(self) -> u8 {
        match self {
            StatusCondition::Sleep { turns } => turns,
            _ => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InflictOutcome {
    Inflicted,
    /// The chance roll failed.
    Missed,
    AlreadyAffected,
    Immune,
}

/// Attempts to give `target` a condition with a `chance` percent roll.
pub fn try_inflict(target: &mut Creature, kind: StatusKind, chance: u8, rng: &mut impl Rng) -> InflictOutcome {
    if target.status.is_some() {
        return InflictOutcome::AlreadyAffected;
    }
    if chance < 100 && rng.gen_range(0..100) >= chance {
        return InflictOutcome::Missed;
    }
    if kind.immune_type().is_some_and(|t| target.species.has_type(t)) {
        return InflictOutcome::Immune;
    }
    target.status = Some(StatusCondition::start(kind, rng));
    trace!(creature = target.name(), status = kind.id(), "status inflicted");
    InflictOutcome::Inflicted
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PreTurn {
    pub can_act: bool,
    pub message: Option<String>,
}

impl PreTurn {
    fn act() -> Self {
        Self { can_act: true, message: None }
    }

    fn act_with(message: String) -> Self {
        Self { can_act: true, message: Some(message) }
    }

    fn blocked(message: String) -> Self {
        Self { can_act: false, message: Some(message) }
    }
}

/// Pre-turn hook. May cure the condition (thaw, wake up).
pub fn before_turn(creature: &mut Creature, rng: &mut impl Rng) -> PreTurn {
    let name = creature.name().to_string();
    match creature.status {
        Some(StatusCondition::Paralysis) => {
            if rng.gen_range(0..4) == 0 {
                PreTurn::blocked(format!("{name} is paralyzed! It can't move!"))
            } else {
                PreTurn::act()
            }
        }
        Some(StatusCondition::Freeze) => {
            if rng.gen_range(0..5) == 0 {
                creature.status = None;
                PreTurn::act_with(StatusKind::Freeze.cured_message(&name))
            } else {
                PreTurn::blocked(format!("{name} is frozen solid!"))
            }
        }
        Some(StatusCondition::Sleep { turns: 0 }) => {
            creature.status = None;
            PreTurn::act_with(StatusKind::Sleep.cured_message(&name))
        }
        Some(StatusCondition::Sleep { .. }) => PreTurn::blocked(format!("{name} is fast asleep.")),
        _ => PreTurn::act(),
    }
}

/// Runs once after the creature's action slot.
pub fn update(creature: &mut Creature) {
    if let Some(StatusCondition::Sleep { turns }) = &mut creature.status {
        *turns = turns.saturating_sub(1);
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Residual {
    pub damage: u16,
    pub message: String,
}

/// End-of-turn chip damage: 1/8 of max HP, at least 1.
pub fn after_turn(creature: &mut Creature) -> Option<Residual> {
    let message = match creature.status? {
        StatusCondition::Burn => format!("{} is hurt by its burn!", creature.name()),
        StatusCondition::Poison => format!("{} is hurt by poison!", creature.name()),
        StatusCondition::BadPoison => format!("{} is hurt badly by poison!", creature.name()),
        _ => return None,
    };
    let chip = (creature.max_hp() / 8).max(1);
    let damage = creature.take_damage(chip);
    Some(Residual { damage, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stats::Nature;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn mk(species: &str) -> Creature {
        Creature::new(species, 30, Nature::Hardy, &["tackle"]).unwrap()
    }

    #[test]
    fn ids_round_trip() {
        for kind in [
            StatusKind::Burn,
            StatusKind::Paralysis,
            StatusKind::Freeze,
            StatusKind::Poison,
            StatusKind::BadPoison,
            StatusKind::Sleep,
        ] {
            assert_eq!(StatusKind::from_id(kind.id()).unwrap(), kind);
        }
        assert!(matches!(StatusKind::from_id("xyz"), Err(BattleError::UnknownStatus(_))));
    }

    #[test]
    fn type_immunities() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut vulpix = mk("vulpix");
        assert_eq!(try_inflict(&mut vulpix, StatusKind::Burn, 100, &mut rng), InflictOutcome::Immune);
        let mut zubat = mk("zubat");
        assert_eq!(
            try_inflict(&mut zubat, StatusKind::BadPoison, 100, &mut rng),
            InflictOutcome::Immune
        );
        let mut pikachu = mk("pikachu");
        assert_eq!(
            try_inflict(&mut pikachu, StatusKind::Paralysis, 100, &mut rng),
            InflictOutcome::Immune
        );
        assert_eq!(
            try_inflict(&mut pikachu, StatusKind::Sleep, 100, &mut rng),
            InflictOutcome::Inflicted
        );
    }

    #[test]
    fn only_one_condition_at_a_time() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut eevee = mk("eevee");
        assert_eq!(try_inflict(&mut eevee, StatusKind::Burn, 100, &mut rng), InflictOutcome::Inflicted);
        assert_eq!(
            try_inflict(&mut eevee, StatusKind::Poison, 100, &mut rng),
            InflictOutcome::AlreadyAffected
        );
        assert_eq!(eevee.status, Some(StatusCondition::Burn));
    }

    #[test]
    fn sleep_counter_in_range() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..200 {
            let turns = StatusCondition::start(StatusKind::Sleep, &mut rng).sleep_turns();
            assert!((1..=4).contains(&turns));
        }
    }

    #[test]
    fn sleep_wakes_after_counter_hits_zero_and_stays_awake() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut eevee = mk("eevee");
        eevee.status = Some(StatusCondition::Sleep { turns: 2 });

        for _ in 0..2 {
            let pre = before_turn(&mut eevee, &mut rng);
            assert!(!pre.can_act);
            update(&mut eevee);
        }
        let pre = before_turn(&mut eevee, &mut rng);
        assert!(pre.can_act);
        assert_eq!(pre.message.as_deref(), Some("Eevee woke up!"));
        assert_eq!(eevee.status, None);

        for _ in 0..10 {
            update(&mut eevee);
            assert!(before_turn(&mut eevee, &mut rng).can_act);
            assert_eq!(eevee.status, None);
        }
    }

    #[test]
    fn paralysis_blocks_about_a_quarter_of_turns() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut eevee = mk("eevee");
        eevee.status = Some(StatusCondition::Paralysis);
        let trials = 4000;
        let blocked = (0..trials)
            .filter(|_| !before_turn(&mut eevee, &mut rng).can_act)
            .count();
        let rate = blocked as f64 / trials as f64;
        assert!((rate - 0.25).abs() < 0.03, "rate {rate}");
        assert_eq!(eevee.status, Some(StatusCondition::Paralysis));
    }

    #[test]
    fn freeze_eventually_thaws() {
        let mut rng = SmallRng::seed_from_u64(6);
        let mut eevee = mk("eevee");
        eevee.status = Some(StatusCondition::Freeze);
        let mut thawed = false;
        for _ in 0..100 {
            let pre = before_turn(&mut eevee, &mut rng);
            if pre.can_act {
                thawed = true;
                assert_eq!(pre.message.as_deref(), Some("Eevee thawed out!"));
                break;
            }
        }
        assert!(thawed);
        assert_eq!(eevee.status, None);
    }

    #[test]
    fn residual_chip_is_an_eighth_with_floor_of_one() {
        let mut eevee = mk("eevee");
        eevee.status = Some(StatusCondition::Burn);
        let max = eevee.max_hp();
        let residual = after_turn(&mut eevee).unwrap();
        assert_eq!(residual.damage, max / 8);
        assert_eq!(residual.message, "Eevee is hurt by its burn!");

        let mut low = Creature::new("magikarp", 1, Nature::Hardy, &["splash"]).unwrap();
        low.status = Some(StatusCondition::Poison);
        assert_eq!(low.max_hp(), 10);
        assert_eq!(after_turn(&mut low).unwrap().damage, 1);
    }

    #[test]
    fn sleep_and_paralysis_have_no_residual() {
        let mut eevee = mk("eevee");
        eevee.status = Some(StatusCondition::Sleep { turns: 1 });
        assert_eq!(after_turn(&mut eevee), None);
        eevee.status = Some(StatusCondition::Paralysis);
        assert_eq!(after_turn(&mut eevee), None);
    }
}
