use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::BattleConfig;
use crate::sim::action::Action;
use crate::sim::ai::{BattleAI, RandomAI};
use crate::sim::battle::{Battle, BattlePhase, BattleResult};
use crate::sim::capture::BallKind;
use crate::sim::creature::Creature;
use crate::sim::items::ItemAction;
use crate::sim::party::Party;
use crate::sim::SideId;

const PLAYER_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// A wild encounter replayed many times with different seeds.
#[derive(Clone, Debug)]
pub struct WildSetup {
    pub party: Vec<Creature>,
    pub wild: Creature,
    pub config: BattleConfig,
    /// Thrown once the wild creature drops to half HP or below.
    pub ball: Option<BallKind>,
    pub max_turns: u32,
}

impl WildSetup {
    pub fn new(party: Vec<Creature>, wild: Creature) -> Self {
        Self {
            party,
            wild,
            config: BattleConfig::default(),
            ball: None,
            max_turns: 200,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub battles: usize,
    pub victories: usize,
    pub defeats: usize,
    pub fled: usize,
    pub captured: usize,
    /// Battles cut off at `max_turns`.
    pub unfinished: usize,
    pub total_turns: u64,
}

impl Summary {
    fn tally(&mut self, result: Option<&BattleResult>, turns: u32) {
        self.battles += 1;
        self.total_turns += u64::from(turns);
        match result {
            Some(BattleResult::Victory) => self.victories += 1,
            Some(BattleResult::Defeat) => self.defeats += 1,
            Some(BattleResult::Fled) => self.fled += 1,
            Some(BattleResult::Captured { .. }) => self.captured += 1,
            None => self.unfinished += 1,
        }
    }

    fn merge(mut self, other: Summary) -> Summary {
        self.battles += other.battles;
        self.victories += other.victories;
        self.defeats += other.defeats;
        self.fled += other.fled;
        self.captured += other.captured;
        self.unfinished += other.unfinished;
        self.total_turns += other.total_turns;
        self
    }

    pub fn average_turns(&self) -> f64 {
        if self.battles == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.battles as f64
        }
    }
}

/// Runs `battles` independent wild battles in parallel. Battle `i` is
/// seeded with `seed + i` and partial tallies are merged, so a batch is
/// reproducible regardless of how rayon schedules it.
pub fn simulate_wild_battles(setup: &WildSetup, battles: usize, seed: u64) -> anyhow::Result<Summary> {
    if battles == 0 {
        anyhow::bail!("--battles must be > 0");
    }
    (0..battles)
        .into_par_iter()
        .map(|i| {
            let (result, turns) = run_wild_battle(setup, seed.wrapping_add(i as u64))?;
            let mut partial = Summary::default();
            partial.tally(result.as_ref(), turns);
            Ok::<_, anyhow::Error>(partial)
        })
        .try_reduce(Summary::default, |a, b| Ok(a.merge(b)))
}

/// Plays one battle to completion with random move choices for the player.
pub fn run_wild_battle(setup: &WildSetup, seed: u64) -> anyhow::Result<(Option<BattleResult>, u32)> {
    let party = Party::from_creatures(setup.party.iter().cloned())?;
    let mut battle = Battle::wild(party, setup.wild.clone(), SmallRng::seed_from_u64(seed))?
        .with_config(setup.config.clone());
    let mut player_rng = SmallRng::seed_from_u64(seed ^ PLAYER_STREAM);
    let mut policy = RandomAI;
    battle.start();

    while !battle.is_over() && battle.turn() < setup.max_turns {
        match battle.phase() {
            BattlePhase::ForcedSwitch(SideId::Player) => {
                battle.choose_replacement(0)?;
                continue;
            }
            BattlePhase::ForcedSwitch(SideId::Opponent) | BattlePhase::Ended(_) => break,
            BattlePhase::ActionSelection => {}
        }
        let player_action = match (setup.ball, wild_at_half(&battle)) {
            (Some(ball), true) => Action::Item(ItemAction::Ball { ball }),
            _ => {
                let legal = battle.legal_actions(SideId::Player);
                let own = battle.side(SideId::Player).active_creature();
                let foe = battle.side(SideId::Opponent).active_creature();
                match own {
                    Some(own) => policy.choose_action(own, foe, &legal, &mut player_rng),
                    None => Action::Struggle,
                }
            }
        };
        let opponent_action = battle.opponent_action();
        battle.resolve_turn(player_action, opponent_action)?;
    }
    debug!(seed, turns = battle.turn(), result = ?battle.result(), "simulated battle");
    Ok((battle.result().cloned(), battle.turn()))
}

fn wild_at_half(battle: &Battle<SmallRng>) -> bool {
    battle
        .side(SideId::Opponent)
        .active_creature()
        .is_some_and(|c| c.current_hp * 2 <= c.max_hp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stats::Nature;

    fn setup() -> WildSetup {
        let starter = Creature::new("charmander", 15, Nature::Adamant, &["scratch", "ember"]).unwrap();
        let wild = Creature::new("rattata", 5, Nature::Hardy, &["tackle"]).unwrap();
        WildSetup::new(vec![starter], wild)
    }

    #[test]
    fn batch_is_reproducible() {
        let a = simulate_wild_battles(&setup(), 64, 7).unwrap();
        let b = simulate_wild_battles(&setup(), 64, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.battles, 64);
        assert_eq!(a.unfinished, 0);
    }

    #[test]
    fn per_battle_tallies_add_up() {
        let summary = simulate_wild_battles(&setup(), 32, 11).unwrap();
        let mut sequential = Summary::default();
        for i in 0..32u64 {
            let (result, turns) = run_wild_battle(&setup(), 11 + i).unwrap();
            sequential.tally(result.as_ref(), turns);
        }
        assert_eq!(summary, sequential);
    }

    #[test]
    fn overleveled_player_wins_every_battle() {
        let summary = simulate_wild_battles(&setup(), 50, 3).unwrap();
        assert_eq!(summary.victories, 50, "{summary:?}");
        assert!(summary.average_turns() >= 1.0);
    }

    #[test]
    fn master_ball_catches_on_first_throw() {
        let mut setup = setup();
        setup.ball = Some(BallKind::Master);
        setup.wild.current_hp = 1;
        let summary = simulate_wild_battles(&setup, 20, 5).unwrap();
        assert_eq!(summary.captured, 20);
        assert_eq!(summary.total_turns, 20);
    }

    #[test]
    fn zero_battles_is_an_error() {
        assert!(simulate_wild_battles(&setup(), 0, 1).is_err());
    }
}
