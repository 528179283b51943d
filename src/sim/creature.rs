use arrayvec::ArrayVec;

use crate::data::moves::{get_move, MoveData};
use crate::data::species::{get_species, SpeciesData};
use crate::data::types::Type;
use crate::error::{BattleError, Result};
use crate::sim::stats::{Nature, StatsSet};
use crate::sim::status::StatusCondition;

pub const MAX_MOVES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveSlot {
    pub data: &'static MoveData,
    pub pp: u8,
    pub max_pp: u8,
}

impl MoveSlot {
    pub fn learn(data: &'static MoveData) -> Self {
        let max_pp = data.max_pp();
        Self { data, pp: max_pp, max_pp }
    }

    pub fn has_pp(&self) -> bool {
        self.pp > 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Creature {
    pub species: &'static SpeciesData,
    pub nickname: Option<String>,
    pub level: u8,
    pub nature: Nature,
    pub stats: StatsSet,
    pub current_hp: u16,
    pub status: Option<StatusCondition>,
    pub moves: ArrayVec<MoveSlot, MAX_MOVES>,
}

impl Creature {
    pub fn new(species: &str, level: u8, nature: Nature, moves: &[&str]) -> Result<Self> {
        let species = get_species(species)?;
        if !(1..=100).contains(&level) {
            return Err(BattleError::InvalidLevel(level));
        }
        if moves.is_empty() {
            return Err(BattleError::NoMoves);
        }
        if moves.len() > MAX_MOVES {
            return Err(BattleError::TooManyMoves(moves.len()));
        }
        let mut slots = ArrayVec::new();
        for id in moves {
            slots.push(MoveSlot::learn(get_move(id)?));
        }
        let stats = StatsSet::derive(&species.base_stats, level, nature);
        Ok(Self {
            species,
            nickname: None,
            level,
            nature,
            current_hp: stats.hp,
            stats,
            status: None,
            moves: slots,
        })
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Display name: the nickname if set, the species name otherwise.
    pub fn name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(self.species.name)
    }

    pub fn types(&self) -> &'static [Type] {
        self.species.types
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    /// Returns the HP actually lost.
    pub fn take_damage(&mut self, damage: u16) -> u16 {
        let lost = damage.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    /// Returns the HP actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let restored = amount.min(self.max_hp() - self.current_hp);
        self.current_hp += restored;
        restored
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn can_fight(&self) -> bool {
        !self.is_fainted()
    }

    /// False once every move is out of PP, which forces Struggle.
    pub fn has_usable_move(&self) -> bool {
        self.moves.iter().any(MoveSlot::has_pp)
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk() -> Creature {
        Creature::new("pikachu", 25, Nature::Timid, &["thundershock", "quickattack"]).unwrap()
    }

    #[test]
    fn new_creature_is_fresh() {
        let p = mk();
        assert_eq!(p.current_hp, p.max_hp());
        assert_eq!(p.status, None);
        assert_eq!(p.moves.len(), 2);
        assert!(p.moves.iter().all(|slot| slot.pp == slot.max_pp));
        assert_eq!(p.name(), "Pikachu");
        assert_eq!(p.with_nickname("Sparky").name(), "Sparky");
    }

    #[test]
    fn rejects_bad_construction() {
        assert!(matches!(
            Creature::new("pikachu", 0, Nature::Hardy, &["tackle"]),
            Err(BattleError::InvalidLevel(0))
        ));
        assert!(matches!(
            Creature::new("pikachu", 5, Nature::Hardy, &[]),
            Err(BattleError::NoMoves)
        ));
        assert!(matches!(
            Creature::new("pikachu", 5, Nature::Hardy, &["tackle"; 5]),
            Err(BattleError::TooManyMoves(5))
        ));
        assert!(matches!(
            Creature::new("pikachu", 5, Nature::Hardy, &["hyperbeam"]),
            Err(BattleError::UnknownMove(_))
        ));
    }

    #[test]
    fn hp_stays_in_bounds() {
        let mut p = mk();
        let max = p.max_hp();
        assert_eq!(p.take_damage(5), 5);
        assert_eq!(p.heal(100), 5);
        assert_eq!(p.current_hp, max);
        assert_eq!(p.take_damage(u16::MAX), max);
        assert!(p.is_fainted());
        assert!(!p.can_fight());
    }

    #[test]
    fn struggle_needed_without_pp() {
        let mut p = mk();
        assert!(p.has_usable_move());
        for slot in p.moves.iter_mut() {
            slot.pp = 0;
        }
        assert!(!p.has_usable_move());
    }
}
