use rand::Rng;
use tracing::debug;

use crate::error::{BattleError, Rejection, Result};
use crate::sim::battle::{Battle, BattleKind, BattlePhase};
use crate::sim::events::{BattleEvent, TurnReport};
use crate::sim::SideId;

impl<R: Rng> Battle<R> {
    /// Entry text, sent-out event and HP for the side's active creature.
    pub(crate) fn announce_entry(&mut self, side: SideId, report: &mut TurnReport) {
        let Some(creature) = self.sides[side.index()].active_creature() else {
            return;
        };
        let name = creature.name().to_string();
        let text = match (&self.kind, side) {
            (_, SideId::Player) => format!("Go! {name}!"),
            (BattleKind::Wild, SideId::Opponent) => format!("A wild {name} appeared!"),
            (BattleKind::Trainer { name: trainer }, SideId::Opponent) => {
                format!("{trainer} sent out {name}!")
            }
        };
        report.message(text);
        report.push(BattleEvent::SentOut {
            side,
            species_id: creature.species.id,
            name,
        });
        report.hp(side, creature);
    }

    fn announce_withdraw(&self, side: SideId, report: &mut TurnReport) {
        let Some(creature) = self.sides[side.index()].active_creature() else {
            return;
        };
        let text = match (&self.kind, side) {
            (BattleKind::Trainer { name: trainer }, SideId::Opponent) => {
                format!("{trainer} withdrew {}!", creature.name())
            }
            _ => format!("{}, come back!", creature.name()),
        };
        report.message(text);
    }

    /// Menu switch: withdraw index 0, bring in `index`, reset stages and volatiles.
    pub(crate) fn switch_in(&mut self, side: SideId, index: usize, report: &mut TurnReport) {
        self.announce_withdraw(side, report);
        let s = &mut self.sides[side.index()];
        s.party.swap_active(index);
        s.combatant.reset();
        debug!(side = ?side, index, "switched");
        self.announce_entry(side, report);
    }

    /// Sends in a creature after a faint. Only valid while the battle waits
    /// in `ForcedSwitch`.
    pub fn choose_replacement(&mut self, index: usize) -> Result<TurnReport> {
        let side = match self.phase {
            BattlePhase::ForcedSwitch(side) => side,
            _ => return Err(BattleError::WrongPhase(self.phase.clone())),
        };
        let s = &mut self.sides[side.index()];
        let creature = s.party.get(index).ok_or(Rejection::NoSuchPartyMember(index))?;
        if !creature.can_fight() {
            return Err(Rejection::CannotFight(index).into());
        }
        s.party.swap_active(index);
        s.combatant.reset();
        s.needs_replacement = false;

        let mut report = TurnReport::new();
        self.announce_entry(side, &mut report);
        if side == SideId::Player {
            report.push(BattleEvent::PartyChanged);
        }
        self.phase = BattlePhase::ActionSelection;
        Ok(report)
    }

    /// AI-controlled sides send in their new index 0 without asking.
    pub(crate) fn auto_replace(&mut self, side: SideId, report: &mut TurnReport) {
        let s = &mut self.sides[side.index()];
        if !s.needs_replacement || s.party.is_empty() {
            return;
        }
        s.needs_replacement = false;
        s.combatant.reset();
        self.announce_entry(side, report);
    }
}
