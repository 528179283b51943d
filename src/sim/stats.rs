use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::data::species::BaseStats;

#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Stat {
    Hp,
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

impl Nature {
    /// The (boosted, lowered) stat pair, `None` for neutral natures.
    pub fn modifies(self) -> Option<(Stat, Stat)> {
        use Stat::*;
        let pair = match self {
            Nature::Hardy | Nature::Docile | Nature::Serious | Nature::Bashful | Nature::Quirky => {
                return None
            }
            Nature::Lonely => (Atk, Def),
            Nature::Brave => (Atk, Spe),
            Nature::Adamant => (Atk, Spa),
            Nature::Naughty => (Atk, Spd),
            Nature::Bold => (Def, Atk),
            Nature::Relaxed => (Def, Spe),
            Nature::Impish => (Def, Spa),
            Nature::Lax => (Def, Spd),
            Nature::Timid => (Spe, Atk),
            Nature::Hasty => (Spe, Def),
            Nature::Jolly => (Spe, Spa),
            Nature::Naive => (Spe, Spd),
            Nature::Modest => (Spa, Atk),
            Nature::Mild => (Spa, Def),
            Nature::Quiet => (Spa, Spe),
            Nature::Rash => (Spa, Spd),
            Nature::Calm => (Spd, Atk),
            Nature::Gentle => (Spd, Def),
            Nature::Sassy => (Spd, Spe),
            Nature::Careful => (Spd, Spa),
        };
        Some(pair)
    }

    /// Nature adjustment as a percentage: 110, 90 or 100.
    pub fn stat_percent(self, stat: Stat) -> u32 {
        match self.modifies() {
            Some((boosted, _)) if boosted == stat => 110,
            Some((_, lowered)) if lowered == stat => 90,
            _ => 100,
        }
    }
}

pub fn calc_hp(base: u16, level: u8) -> u16 {
    (2 * base as u32 * level as u32 / 100 + 10) as u16
}

pub fn calc_stat(base: u16, level: u8, nature_percent: u32) -> u16 {
    let raw = 2 * base as u32 * level as u32 / 100 + 5;
    (raw * nature_percent / 100) as u16
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatsSet {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl StatsSet {
    pub fn derive(base: &BaseStats, level: u8, nature: Nature) -> Self {
        Self {
            hp: calc_hp(base.hp, level),
            atk: calc_stat(base.atk, level, nature.stat_percent(Stat::Atk)),
            def: calc_stat(base.def, level, nature.stat_percent(Stat::Def)),
            spa: calc_stat(base.spa, level, nature.stat_percent(Stat::Spa)),
            spd: calc_stat(base.spd, level, nature.stat_percent(Stat::Spd)),
            spe: calc_stat(base.spe, level, nature.stat_percent(Stat::Spe)),
        }
    }
}
