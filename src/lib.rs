pub mod battle_logger;
pub mod config;
pub mod data;
pub mod error;
pub mod persistence;
pub mod sim;
pub mod simulate;

pub use crate::error::{BattleError, Rejection, Result};

/// The types a driver needs to run a battle.
pub mod prelude {
    pub use crate::battle_logger::BattleLog;
    pub use crate::config::BattleConfig;
    pub use crate::error::{BattleError, Rejection};
    pub use crate::persistence::{CreatureRecord, JsonPartyStore, MoveRecord, PartyStore};
    pub use crate::sim::action::{Action, LegalActions};
    pub use crate::sim::ai::{BattleAI, RandomAI};
    pub use crate::sim::battle::{Battle, BattleKind, BattleOutcome, BattlePhase, BattleResult};
    pub use crate::sim::capture::BallKind;
    pub use crate::sim::creature::Creature;
    pub use crate::sim::events::{BattleEvent, BattlePresenter, TurnReport};
    pub use crate::sim::items::{BattleItem, ItemAction, Medicine};
    pub use crate::sim::party::{HasParty, Party};
    pub use crate::sim::pokedex::Pokedex;
    pub use crate::sim::stats::Nature;
    pub use crate::sim::SideId;
}
