use crate::sim::stages::StatStages;
use crate::sim::volatile::VolatileConditions;

/// In-battle state of whichever creature is currently active on a side.
/// Nothing here survives a switch.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Combatant {
    pub stages: StatStages,
    pub volatiles: VolatileConditions,
}

impl Combatant {
    /// Called whenever a creature enters battle.
    pub fn reset(&mut self) {
        self.stages.reset();
        self.volatiles.reset();
    }
}
