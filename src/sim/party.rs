use arrayvec::ArrayVec;

use crate::error::{BattleError, Result};
use crate::sim::creature::Creature;

pub const MAX_PARTY: usize = 6;

/// Up to six creatures; index 0 is the one in battle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Party(ArrayVec<Creature, MAX_PARTY>);

impl Party {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_creatures(creatures: impl IntoIterator<Item = Creature>) -> Result<Self> {
        let mut party = Self::new();
        for creature in creatures {
            party.add(creature).map_err(|_| BattleError::PartyFull)?;
        }
        Ok(party)
    }

    /// Appends `creature`, handing it back when the party is full.
    pub fn add(&mut self, creature: Creature) -> std::result::Result<(), Creature> {
        self.0.try_push(creature).map_err(|err| err.element())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.is_full()
    }

    pub fn active(&self) -> Option<&Creature> {
        self.0.first()
    }

    pub fn active_mut(&mut self) -> Option<&mut Creature> {
        self.0.first_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Creature> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Creature> {
        self.0.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.0.iter()
    }

    /// Swaps the active creature with the one at `index`.
    pub fn swap_active(&mut self, index: usize) {
        if index < self.0.len() {
            self.0.swap(0, index);
        }
    }

    /// Removes the active creature; the rest shift forward.
    pub fn remove_active(&mut self) -> Option<Creature> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.remove(0))
        }
    }

    /// Splits off every creature that can no longer fight, keeping order.
    pub fn drain_fainted(&mut self) -> Vec<Creature> {
        let mut fainted = Vec::new();
        let mut kept = ArrayVec::new();
        for creature in self.0.drain(..) {
            if creature.can_fight() {
                kept.push(creature);
            } else {
                fainted.push(creature);
            }
        }
        self.0 = kept;
        fainted
    }

    pub fn into_vec(self) -> Vec<Creature> {
        self.0.into_iter().collect()
    }
}

/// Anything that owns a party: a battle side, a trainer, the player's save.
pub trait HasParty {
    fn party(&self) -> &Party;
    fn party_mut(&mut self) -> &mut Party;

    fn active(&self) -> Option<&Creature> {
        self.party().active()
    }

    fn has_able_creature(&self) -> bool {
        self.party().iter().any(Creature::can_fight)
    }
}

impl HasParty for Party {
    fn party(&self) -> &Party {
        self
    }

    fn party_mut(&mut self) -> &mut Party {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stats::Nature;

    fn mk(species: &str) -> Creature {
        Creature::new(species, 10, Nature::Hardy, &["tackle"]).unwrap()
    }

    #[test]
    fn full_party_returns_the_creature() {
        let mut party = Party::from_creatures((0..6).map(|_| mk("rattata"))).unwrap();
        assert!(party.is_full());
        let rejected = party.add(mk("pidgey")).unwrap_err();
        assert_eq!(rejected.species.id, "pidgey");
        assert!(matches!(
            Party::from_creatures((0..7).map(|_| mk("rattata"))),
            Err(BattleError::PartyFull)
        ));
    }

    #[test]
    fn switching_swaps_with_index_zero() {
        let mut party = Party::from_creatures([mk("pikachu"), mk("eevee"), mk("zubat")]).unwrap();
        party.swap_active(2);
        let order: Vec<&str> = party.iter().map(|c| c.species.id).collect();
        assert_eq!(order, ["zubat", "eevee", "pikachu"]);
    }

    #[test]
    fn removing_active_shifts_forward() {
        let mut party = Party::from_creatures([mk("pikachu"), mk("eevee"), mk("zubat")]).unwrap();
        let gone = party.remove_active().unwrap();
        assert_eq!(gone.species.id, "pikachu");
        assert_eq!(party.active().unwrap().species.id, "eevee");
        assert_eq!(party.len(), 2);
    }

    #[test]
    fn drain_fainted_keeps_order() {
        let mut fainted = mk("eevee");
        fainted.current_hp = 0;
        let mut party = Party::from_creatures([mk("pikachu"), fainted, mk("zubat")]).unwrap();
        let drained = party.drain_fainted();
        assert_eq!(drained.len(), 1);
        let order: Vec<&str> = party.iter().map(|c| c.species.id).collect();
        assert_eq!(order, ["pikachu", "zubat"]);
        assert!(party.has_able_creature());
    }
}
