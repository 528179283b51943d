pub mod action;
pub mod ai;
pub mod battle;
pub mod capture;
pub mod combatant;
pub mod creature;
pub mod damage;
pub mod events;
pub mod faint_handler;
pub mod items;
pub mod party;
pub mod pokedex;
pub mod stages;
pub mod stats;
pub mod status;
pub mod switching;
pub mod volatile;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideId {
    Player,
    Opponent,
}

impl SideId {
    pub const BOTH: [SideId; 2] = [SideId::Player, SideId::Opponent];

    pub fn index(self) -> usize {
        match self {
            SideId::Player => 0,
            SideId::Opponent => 1,
        }
    }

    pub fn other(self) -> SideId {
        match self {
            SideId::Player => SideId::Opponent,
            SideId::Opponent => SideId::Player,
        }
    }
}
