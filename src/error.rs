//! Error types surfaced by the battle engine.
//!
//! Configuration problems (unknown ids, malformed records) are fatal and keep a
//! battle from being constructed. Rejected action selections are recoverable:
//! the caller re-prompts and the battle state is left untouched.
use thiserror::Error;

use crate::sim::battle::BattlePhase;
use crate::sim::SideId;

pub type Result<T> = std::result::Result<T, BattleError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("unknown species id '{0}'")]
    UnknownSpecies(String),

    #[error("unknown move id '{0}'")]
    UnknownMove(String),

    #[error("unknown status id '{0}'")]
    UnknownStatus(String),

    #[error("level {0} is outside 1..=100")]
    InvalidLevel(u8),

    #[error("a creature knows at most 4 moves, got {0}")]
    TooManyMoves(usize),

    #[error("a creature must know at least one move")]
    NoMoves,

    #[error("a party holds at most 6 creatures")]
    PartyFull,

    #[error("{0:?} side has no creature able to fight")]
    NoAbleCreature(SideId),

    #[error("a wild battle needs exactly one wild creature, got {0}")]
    InvalidWildParty(usize),

    #[error("operation not allowed during {0:?}")]
    WrongPhase(BattlePhase),

    #[error("action rejected: {0}")]
    Rejected(#[from] Rejection),
}

impl BattleError {
    /// Rejected selections leave the battle untouched and can be retried.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BattleError::Rejected(_) | BattleError::WrongPhase(_))
    }
}

/// Reasons an action selection is refused before anything is resolved.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("move slot {0} does not exist")]
    NoSuchMove(usize),

    #[error("move slot {0} has no PP left")]
    NoPp(usize),

    #[error("party slot {0} does not exist")]
    NoSuchPartyMember(usize),

    #[error("party slot {0} cannot fight")]
    CannotFight(usize),

    #[error("party slot {0} is already in battle")]
    AlreadyActive(usize),

    #[error("Struggle is only available once every move is out of PP")]
    StruggleNotNeeded,

    #[error("{0} is not available to this side")]
    NotAvailable(&'static str),
}
