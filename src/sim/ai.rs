use rand::seq::SliceRandom;
use rand::RngCore;

use crate::sim::action::{Action, LegalActions};
use crate::sim::creature::Creature;

/// Chooses actions for computer-controlled sides.
pub trait BattleAI {
    fn choose_action(
        &mut self,
        own: &Creature,
        foe: Option<&Creature>,
        legal: &LegalActions,
        rng: &mut dyn RngCore,
    ) -> Action;
}

/// Picks uniformly among usable moves, falling back to Struggle.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomAI;

impl BattleAI for RandomAI {
    fn choose_action(
        &mut self,
        _own: &Creature,
        _foe: Option<&Creature>,
        legal: &LegalActions,
        rng: &mut dyn RngCore,
    ) -> Action {
        legal
            .attack_actions()
            .choose(rng)
            .copied()
            .unwrap_or(Action::Struggle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stats::Nature;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn random_ai_only_picks_usable_moves() {
        let own = Creature::new("pidgey", 5, Nature::Hardy, &["tackle", "gust", "sandattack"]).unwrap();
        let legal = LegalActions { moves: vec![0, 2], ..Default::default() };
        let mut rng = SmallRng::seed_from_u64(9);
        let mut seen = [0usize; 3];
        for _ in 0..300 {
            match RandomAI.choose_action(&own, None, &legal, &mut rng) {
                Action::Move(slot) => seen[slot] += 1,
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(seen[1], 0);
        assert!(seen[0] > 100 && seen[2] > 100, "{seen:?}");
    }

    #[test]
    fn random_ai_struggles_without_pp() {
        let own = Creature::new("pidgey", 5, Nature::Hardy, &["tackle"]).unwrap();
        let legal = LegalActions { struggle: true, ..Default::default() };
        let mut rng = SmallRng::seed_from_u64(10);
        assert_eq!(RandomAI.choose_action(&own, None, &legal, &mut rng), Action::Struggle);
    }
}
