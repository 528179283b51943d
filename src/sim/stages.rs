//! Stat stages and their multipliers.
//!
//! Battle stats (Attack..Speed) use `(2+s)/2` above zero and `2/(2-s)` below;
//! accuracy and evasion use a fixed 13-entry table.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumCount, EnumIter, Serialize, Deserialize,
)]
pub enum StageStat {
    Attack,
    Defense,
    #[strum(to_string = "Sp. Atk")]
    SpAttack,
    #[strum(to_string = "Sp. Def")]
    SpDefense,
    Speed,
    #[strum(to_string = "accuracy")]
    Accuracy,
    #[strum(to_string = "evasiveness")]
    Evasiveness,
}

const ACCURACY_TABLE: [f64; 13] = [
    0.33, 0.36, 0.43, 0.50, 0.60, 0.75, 1.00, 1.33, 1.66, 2.00, 2.50, 2.66, 3.00,
];

/// Multiplier for Attack, Defense, Sp. Atk, Sp. Def and Speed.
pub fn stat_multiplier(stage: i8) -> f64 {
    let stage = stage.clamp(MIN_STAGE, MAX_STAGE) as f64;
    if stage >= 0.0 {
        (2.0 + stage) / 2.0
    } else {
        2.0 / (2.0 - stage)
    }
}

pub fn accuracy_multiplier(stage: i8) -> f64 {
    let stage = stage.clamp(MIN_STAGE, MAX_STAGE);
    ACCURACY_TABLE[(stage - MIN_STAGE) as usize]
}

/// Evasion counts against the attacker, so a raised evasion stage reads the
/// accuracy table from the other end.
pub fn evasion_multiplier(stage: i8) -> f64 {
    accuracy_multiplier(stage.saturating_neg())
}

/// Applies `delta` to `current`, clamped to [-6, 6]. The flag is false when
/// nothing moved, which selects the "won't go any higher/lower" message.
pub fn apply_stage(current: i8, delta: i8) -> (i8, bool) {
    let next = current.saturating_add(delta).clamp(MIN_STAGE, MAX_STAGE);
    (next, next != current)
}

/// Stage modifiers of one combatant, indexed by `StageStat` ordinal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StatStages([i8; StageStat::COUNT]);

impl StatStages {
    pub fn get(&self, stat: StageStat) -> i8 {
        self.0[stat as usize]
    }

    /// Returns the applied change (0 when the clamp absorbed all of it).
    pub fn modify(&mut self, stat: StageStat, delta: i8) -> i8 {
        let current = self.0[stat as usize];
        let (next, changed) = apply_stage(current, delta);
        self.0[stat as usize] = next;
        if changed {
            next - current
        } else {
            0
        }
    }

    pub fn reset(&mut self) {
        self.0 = [0; StageStat::COUNT];
    }
}

/// Battle text for a stage change request of `requested` that moved the
/// stage by `applied`.
pub fn stage_change_message(name: &str, stat: StageStat, requested: i8, applied: i8) -> String {
    if applied == 0 {
        let direction = if requested > 0 { "higher" } else { "lower" };
        return format!("{name}'s {stat} won't go any {direction}!");
    }
    let verb = match applied {
        1 => "rose",
        2 => "rose sharply",
        n if n >= 3 => "rose drastically",
        -1 => "fell",
        -2 => "harshly fell",
        _ => "severely fell",
    };
    format!("{name}'s {stat} {verb}!")
}
