//! Volatile conditions: short-lived effects that end when a creature leaves
//! battle. Counters are -1 when inactive, otherwise the remaining action slots.

use rand::Rng;
use strum::{Display, EnumCount, EnumIter};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumCount, EnumIter)]
pub enum Volatile {
    Flinch,
    Confusion,
    Infatuation,
}

impl Volatile {
    pub fn inflicted_message(self, name: &str) -> Option<String> {
        match self {
            Volatile::Flinch => None,
            Volatile::Confusion => Some(format!("{name} became confused!")),
            Volatile::Infatuation => Some(format!("{name} fell in love!")),
        }
    }
}

const INACTIVE: i8 = -1;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VolatileConditions([i8; Volatile::COUNT]);

impl Default for VolatileConditions {
    fn default() -> Self {
        Self([INACTIVE; Volatile::COUNT])
    }
}

impl VolatileConditions {
    pub fn is_active(&self, volatile: Volatile) -> bool {
        self.0[volatile as usize] >= 0
    }

    pub fn turns(&self, volatile: Volatile) -> Option<u8> {
        let turns = self.0[volatile as usize];
        (turns >= 0).then_some(turns as u8)
    }

    /// Starts `volatile` unless it is already running. Flinch lasts until
    /// the end of the turn, the others 2..=5 action slots.
    pub fn inflict(&mut self, volatile: Volatile, rng: &mut impl Rng) -> bool {
        if self.is_active(volatile) {
            return false;
        }
        self.0[volatile as usize] = match volatile {
            Volatile::Flinch => 0,
            Volatile::Confusion | Volatile::Infatuation => rng.gen_range(2..=5),
        };
        true
    }

    pub fn clear(&mut self, volatile: Volatile) {
        self.0[volatile as usize] = INACTIVE;
    }

    /// Active counters tick down once per action slot and stop at 0.
    pub fn decrement(&mut self) {
        for turns in self.0.iter_mut().filter(|t| **t > 0) {
            *turns -= 1;
        }
    }

    pub fn reset(&mut self) {
        self.0 = [INACTIVE; Volatile::COUNT];
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GateOutcome {
    Proceed,
    Flinched,
    /// The caller applies the self-hit damage.
    HurtItself,
    Immobilized,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VolatileGate {
    pub outcome: GateOutcome,
    pub messages: Vec<String>,
}

/// Runs after the status pre-turn hook: flinch, then confusion, then
/// infatuation. Chances are percentages.
pub fn gate_action(
    volatiles: &mut VolatileConditions,
    name: &str,
    foe_name: &str,
    confusion_chance: u8,
    infatuation_chance: u8,
    rng: &mut impl Rng,
) -> VolatileGate {
    let mut messages = Vec::new();

    if volatiles.is_active(Volatile::Flinch) {
        volatiles.clear(Volatile::Flinch);
        messages.push(format!("{name} flinched and couldn't move!"));
        return VolatileGate { outcome: GateOutcome::Flinched, messages };
    }

    match volatiles.turns(Volatile::Confusion) {
        Some(0) => {
            volatiles.clear(Volatile::Confusion);
            messages.push(format!("{name} snapped out of its confusion!"));
        }
        Some(_) => {
            messages.push(format!("{name} is confused!"));
            if rng.gen_range(0..100) < confusion_chance {
                messages.push("It hurt itself in its confusion!".to_string());
                return VolatileGate { outcome: GateOutcome::HurtItself, messages };
            }
        }
        None => {}
    }

    match volatiles.turns(Volatile::Infatuation) {
        Some(0) => {
            volatiles.clear(Volatile::Infatuation);
            messages.push(format!("{name} got over its infatuation!"));
        }
        Some(_) => {
            messages.push(format!("{name} is in love with {foe_name}!"));
            if rng.gen_range(0..100) < infatuation_chance {
                messages.push(format!("{name} is immobilized by love!"));
                return VolatileGate { outcome: GateOutcome::Immobilized, messages };
            }
        }
        None => {}
    }

    VolatileGate { outcome: GateOutcome::Proceed, messages }
}
