use serde::{Deserialize, Serialize};

use crate::sim::items::{ItemAction, ItemCategory};

/// One side's choice for a turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Index into the active creature's move set.
    Move(usize),
    /// Substituted automatically once every move is out of PP.
    Struggle,
    Item(ItemAction),
    /// Party index to bring in.
    Switch(usize),
    Flee,
}

impl Action {
    /// Ordering bracket; higher acts first. Moves are further ordered by
    /// their own priority tier.
    pub fn priority(&self) -> u8 {
        match self {
            Action::Move(_) | Action::Struggle => 1,
            Action::Item(_) => 2,
            Action::Switch(_) => 3,
            Action::Flee => 4,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Action::Move(_) | Action::Struggle)
    }
}

/// What a side may choose this turn.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalActions {
    /// Move slots with PP left.
    pub moves: Vec<usize>,
    pub struggle: bool,
    /// Party indices that can be switched in.
    pub switches: Vec<usize>,
    pub items: Vec<ItemCategory>,
    pub can_flee: bool,
}

impl LegalActions {
    /// Every attacking option as an `Action`.
    pub fn attack_actions(&self) -> Vec<Action> {
        if self.struggle {
            return vec![Action::Struggle];
        }
        self.moves.iter().map(|&slot| Action::Move(slot)).collect()
    }
}
