use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::data::normalize_id;
use crate::data::types::Type;
use crate::error::{BattleError, Result};
use crate::sim::stages::StageStat;
use crate::sim::status::StatusKind;
use crate::sim::volatile::Volatile;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EffectTarget {
    User,
    Foe,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatEffect {
    pub stat: StageStat,
    pub stages: i8,
    pub target: EffectTarget,
    /// Percent chance, 100 for guaranteed effects.
    pub chance: u8,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatusEffect {
    pub status: StatusKind,
    pub chance: u8,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VolatileEffect {
    pub volatile: Volatile,
    pub chance: u8,
}

#[derive(Debug, PartialEq)]
pub struct MoveData {
    pub id: &'static str,
    pub name: &'static str,
    /// `None` for typeless attacks.
    pub move_type: Option<Type>,
    pub category: MoveCategory,
    pub power: u16,
    /// Percent; ignored when `sure_hit` is set.
    pub accuracy: u8,
    pub sure_hit: bool,
    pub pp: u8,
    /// Tier in -1..=1.
    pub priority: i8,
    pub contact: bool,
    pub stat_effects: &'static [StatEffect],
    pub status_effect: Option<StatusEffect>,
    pub volatile_effect: Option<VolatileEffect>,
    /// Fraction of the user's max HP lost after use, as a divisor.
    pub recoil_divisor: Option<u16>,
}

impl MoveData {
    /// MaxPP of a freshly learned move.
    pub fn max_pp(&self) -> u8 {
        ((self.pp as u32 * 16) / 10).min(u8::MAX as u32) as u8
    }

    pub fn is_damaging(&self) -> bool {
        !matches!(self.category, MoveCategory::Status)
    }

    /// False for moves that only act on the user, which ignore type immunity.
    pub fn targets_foe(&self) -> bool {
        self.is_damaging()
            || self.status_effect.is_some()
            || self.volatile_effect.is_some()
            || self.stat_effects.iter().any(|e| e.target == EffectTarget::Foe)
    }

    /// Status moves with no effect at all ("But nothing happened!").
    pub fn does_nothing(&self) -> bool {
        !self.is_damaging()
            && self.stat_effects.is_empty()
            && self.status_effect.is_none()
            && self.volatile_effect.is_none()
    }
}

const BASE: MoveData = MoveData {
    id: "",
    name: "",
    move_type: Some(Type::Normal),
    category: MoveCategory::Physical,
    power: 0,
    accuracy: 100,
    sure_hit: false,
    pp: 10,
    priority: 0,
    contact: false,
    stat_effects: &[],
    status_effect: None,
    volatile_effect: None,
    recoil_divisor: None,
};

const fn foe(stat: StageStat, stages: i8, chance: u8) -> StatEffect {
    StatEffect { stat, stages, target: EffectTarget::Foe, chance }
}

const fn user(stat: StageStat, stages: i8, chance: u8) -> StatEffect {
    StatEffect { stat, stages, target: EffectTarget::User, chance }
}

const fn inflicts(status: StatusKind, chance: u8) -> Option<StatusEffect> {
    Some(StatusEffect { status, chance })
}

const fn volatile(volatile: Volatile, chance: u8) -> Option<VolatileEffect> {
    Some(VolatileEffect { volatile, chance })
}

/// Used automatically when every move is out of PP.
pub static STRUGGLE: MoveData = MoveData {
    id: "struggle",
    name: "Struggle",
    move_type: None,
    power: 50,
    sure_hit: true,
    pp: 1,
    contact: true,
    recoil_divisor: Some(4),
    ..BASE
};

pub static MOVES: phf::Map<&'static str, MoveData> = phf_map! {
    "tackle" => MoveData { id: "tackle", name: "Tackle", power: 40, pp: 35, contact: true, ..BASE },
    "scratch" => MoveData { id: "scratch", name: "Scratch", power: 40, pp: 35, contact: true, ..BASE },
    "quickattack" => MoveData {
        id: "quickattack", name: "Quick Attack", power: 40, pp: 30, priority: 1, contact: true, ..BASE
    },
    "vitalthrow" => MoveData {
        id: "vitalthrow", name: "Vital Throw", move_type: Some(Type::Fighting), power: 70,
        sure_hit: true, priority: -1, contact: true, ..BASE
    },
    "headbutt" => MoveData {
        id: "headbutt", name: "Headbutt", power: 70, pp: 15, contact: true,
        volatile_effect: volatile(Volatile::Flinch, 30), ..BASE
    },
    "bodyslam" => MoveData {
        id: "bodyslam", name: "Body Slam", power: 85, pp: 15, contact: true,
        status_effect: inflicts(StatusKind::Paralysis, 30), ..BASE
    },
    "swift" => MoveData {
        id: "swift", name: "Swift", category: MoveCategory::Special, power: 60, pp: 20,
        sure_hit: true, ..BASE
    },
    "ember" => MoveData {
        id: "ember", name: "Ember", move_type: Some(Type::Fire), category: MoveCategory::Special,
        power: 40, pp: 25, status_effect: inflicts(StatusKind::Burn, 10), ..BASE
    },
    "flamethrower" => MoveData {
        id: "flamethrower", name: "Flamethrower", move_type: Some(Type::Fire),
        category: MoveCategory::Special, power: 90, pp: 15,
        status_effect: inflicts(StatusKind::Burn, 10), ..BASE
    },
    "watergun" => MoveData {
        id: "watergun", name: "Water Gun", move_type: Some(Type::Water),
        category: MoveCategory::Special, power: 40, pp: 25, ..BASE
    },
    "thundershock" => MoveData {
        id: "thundershock", name: "Thunder Shock", move_type: Some(Type::Electric),
        category: MoveCategory::Special, power: 40, pp: 30,
        status_effect: inflicts(StatusKind::Paralysis, 10), ..BASE
    },
    "thunderbolt" => MoveData {
        id: "thunderbolt", name: "Thunderbolt", move_type: Some(Type::Electric),
        category: MoveCategory::Special, power: 90, pp: 15,
        status_effect: inflicts(StatusKind::Paralysis, 10), ..BASE
    },
    "vinewhip" => MoveData {
        id: "vinewhip", name: "Vine Whip", move_type: Some(Type::Grass), power: 45, pp: 25,
        contact: true, ..BASE
    },
    "icebeam" => MoveData {
        id: "icebeam", name: "Ice Beam", move_type: Some(Type::Ice),
        category: MoveCategory::Special, power: 90, pp: 10,
        status_effect: inflicts(StatusKind::Freeze, 10), ..BASE
    },
    "aurorabeam" => MoveData {
        id: "aurorabeam", name: "Aurora Beam", move_type: Some(Type::Ice),
        category: MoveCategory::Special, power: 65, pp: 20,
        stat_effects: &[foe(StageStat::Attack, -1, 10)], ..BASE
    },
    "bite" => MoveData {
        id: "bite", name: "Bite", move_type: Some(Type::Dark), power: 60, pp: 25, contact: true,
        volatile_effect: volatile(Volatile::Flinch, 30), ..BASE
    },
    "poisonsting" => MoveData {
        id: "poisonsting", name: "Poison Sting", move_type: Some(Type::Poison), power: 15, pp: 35,
        status_effect: inflicts(StatusKind::Poison, 30), ..BASE
    },
    "lick" => MoveData {
        id: "lick", name: "Lick", move_type: Some(Type::Ghost), power: 30, pp: 30, contact: true,
        status_effect: inflicts(StatusKind::Paralysis, 30), ..BASE
    },
    "confusion" => MoveData {
        id: "confusion", name: "Confusion", move_type: Some(Type::Psychic),
        category: MoveCategory::Special, power: 50, pp: 25,
        volatile_effect: volatile(Volatile::Confusion, 10), ..BASE
    },
    "gust" => MoveData {
        id: "gust", name: "Gust", move_type: Some(Type::Flying), category: MoveCategory::Special,
        power: 40, pp: 35, ..BASE
    },
    "rockthrow" => MoveData {
        id: "rockthrow", name: "Rock Throw", move_type: Some(Type::Rock), power: 50, accuracy: 90,
        pp: 15, ..BASE
    },
    "metalclaw" => MoveData {
        id: "metalclaw", name: "Metal Claw", move_type: Some(Type::Steel), power: 50, accuracy: 95,
        pp: 35, contact: true, stat_effects: &[user(StageStat::Attack, 1, 10)], ..BASE
    },
    "growl" => MoveData {
        id: "growl", name: "Growl", category: MoveCategory::Status, pp: 40,
        stat_effects: &[foe(StageStat::Attack, -1, 100)], ..BASE
    },
    "tailwhip" => MoveData {
        id: "tailwhip", name: "Tail Whip", category: MoveCategory::Status, pp: 30,
        stat_effects: &[foe(StageStat::Defense, -1, 100)], ..BASE
    },
    "sandattack" => MoveData {
        id: "sandattack", name: "Sand Attack", move_type: Some(Type::Ground),
        category: MoveCategory::Status, pp: 15,
        stat_effects: &[foe(StageStat::Accuracy, -1, 100)], ..BASE
    },
    "swordsdance" => MoveData {
        id: "swordsdance", name: "Swords Dance", category: MoveCategory::Status, sure_hit: true,
        pp: 20, stat_effects: &[user(StageStat::Attack, 2, 100)], ..BASE
    },
    "doubleteam" => MoveData {
        id: "doubleteam", name: "Double Team", category: MoveCategory::Status, sure_hit: true,
        pp: 15, stat_effects: &[user(StageStat::Evasiveness, 1, 100)], ..BASE
    },
    "agility" => MoveData {
        id: "agility", name: "Agility", move_type: Some(Type::Psychic),
        category: MoveCategory::Status, sure_hit: true, pp: 30,
        stat_effects: &[user(StageStat::Speed, 2, 100)], ..BASE
    },
    "thunderwave" => MoveData {
        id: "thunderwave", name: "Thunder Wave", move_type: Some(Type::Electric),
        category: MoveCategory::Status, accuracy: 90, pp: 20,
        status_effect: inflicts(StatusKind::Paralysis, 100), ..BASE
    },
    "sleeppowder" => MoveData {
        id: "sleeppowder", name: "Sleep Powder", move_type: Some(Type::Grass),
        category: MoveCategory::Status, accuracy: 75, pp: 15,
        status_effect: inflicts(StatusKind::Sleep, 100), ..BASE
    },
    "hypnosis" => MoveData {
        id: "hypnosis", name: "Hypnosis", move_type: Some(Type::Psychic),
        category: MoveCategory::Status, accuracy: 60, pp: 20,
        status_effect: inflicts(StatusKind::Sleep, 100), ..BASE
    },
    "poisonpowder" => MoveData {
        id: "poisonpowder", name: "Poison Powder", move_type: Some(Type::Poison),
        category: MoveCategory::Status, accuracy: 75, pp: 35,
        status_effect: inflicts(StatusKind::Poison, 100), ..BASE
    },
    "toxic" => MoveData {
        id: "toxic", name: "Toxic", move_type: Some(Type::Poison), category: MoveCategory::Status,
        accuracy: 90, status_effect: inflicts(StatusKind::BadPoison, 100), ..BASE
    },
    "willowisp" => MoveData {
        id: "willowisp", name: "Will-O-Wisp", move_type: Some(Type::Fire),
        category: MoveCategory::Status, accuracy: 85, pp: 15,
        status_effect: inflicts(StatusKind::Burn, 100), ..BASE
    },
    "confuseray" => MoveData {
        id: "confuseray", name: "Confuse Ray", move_type: Some(Type::Ghost),
        category: MoveCategory::Status, volatile_effect: volatile(Volatile::Confusion, 100), ..BASE
    },
    "attract" => MoveData {
        id: "attract", name: "Attract", category: MoveCategory::Status, pp: 15,
        volatile_effect: volatile(Volatile::Infatuation, 100), ..BASE
    },
    "splash" => MoveData {
        id: "splash", name: "Splash", category: MoveCategory::Status, sure_hit: true, pp: 40, ..BASE
    },
};

/// Looks a move up by name or id, ignoring case and punctuation.
pub fn get_move(name: &str) -> Result<&'static MoveData> {
    MOVES
        .get(normalize_id(name).as_str())
        .ok_or_else(|| BattleError::UnknownMove(name.to_string()))
}
