use rand::Rng;
use tracing::debug;

use crate::sim::battle::{Battle, BattleKind, BattlePhase, BattleResult};
use crate::sim::creature::Creature;
use crate::sim::events::{BattleEvent, TurnReport};
use crate::sim::SideId;

impl<R: Rng> Battle<R> {
    /// Removes fainted active creatures from the listed sides, in order.
    /// The side then waits for a replacement.
    pub(crate) fn settle_faints(&mut self, sides: impl IntoIterator<Item = SideId>, report: &mut TurnReport) {
        for side in sides {
            let s = &mut self.sides[side.index()];
            if !s.active_creature().is_some_and(Creature::is_fainted) {
                continue;
            }
            let Some(creature) = s.party.remove_active() else {
                continue;
            };
            let name = creature.name().to_string();
            debug!(side = ?side, creature = %name, "fainted");
            report.message(format!("{name} fainted!"));
            report.push(BattleEvent::Fainted { side, name });
            s.fainted.push(creature);
            s.combatant.reset();
            s.needs_replacement = true;
        }
    }

    /// Decides what follows a resolved turn: the battle ends when a party is
    /// empty (player checked first), otherwise fainted creatures get replaced.
    pub(crate) fn settle_turn(&mut self, report: &mut TurnReport) {
        if self.sides[SideId::Player.index()].party.is_empty() {
            report.message("You have no more creatures that can fight!");
            report.message("You blacked out!");
            self.end_battle(BattleResult::Defeat);
            return;
        }
        if self.sides[SideId::Opponent.index()].party.is_empty() {
            if let BattleKind::Trainer { name } = &self.kind {
                report.message(format!("You defeated {name}!"));
            }
            self.end_battle(BattleResult::Victory);
            return;
        }

        self.auto_replace(SideId::Opponent, report);
        self.phase = if self.sides[SideId::Player.index()].needs_replacement {
            BattlePhase::ForcedSwitch(SideId::Player)
        } else {
            BattlePhase::ActionSelection
        };
    }
}
