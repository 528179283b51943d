//! Turn output. The engine never talks to a UI directly: each call that
//! advances a battle returns a `TurnReport` whose events a driver replays
//! in order.

use serde::Serialize;

use crate::sim::battle::BattleResult;
use crate::sim::creature::Creature;
use crate::sim::status::StatusKind;
use crate::sim::SideId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BattleEvent {
    Message {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    HpChanged {
        side: SideId,
        hp: u16,
        max_hp: u16,
    },
    StatusChanged {
        side: SideId,
        status: Option<StatusKind>,
    },
    #[serde(rename_all = "camelCase")]
    SentOut {
        side: SideId,
        species_id: &'static str,
        name: String,
    },
    Fainted {
        side: SideId,
        name: String,
    },
    /// The player's party or one of its creatures changed.
    PartyChanged,
    TurnEnded {
        turn: u32,
    },
    BattleEnded {
        result: BattleResult,
    },
}

/// Receives battle output. `show_message` returns once the player has seen
/// the text; `update_hp` must not block.
pub trait BattlePresenter {
    fn show_message(&mut self, text: &str);

    fn update_hp(&mut self, side: SideId, hp: u16, max_hp: u16);

    fn battle_ended(&mut self, _result: &BattleResult) {}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    pub events: Vec<BattleEvent>,
}

impl TurnReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn message(&mut self, text: impl Into<String>) {
        self.events.push(BattleEvent::Message { text: text.into() });
    }

    pub fn hp(&mut self, side: SideId, creature: &Creature) {
        self.events.push(BattleEvent::HpChanged {
            side,
            hp: creature.current_hp,
            max_hp: creature.max_hp(),
        });
    }

    pub fn status(&mut self, side: SideId, creature: &Creature) {
        self.events.push(BattleEvent::StatusChanged {
            side,
            status: creature.status.map(|s| s.kind()),
        });
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|event| match event {
            BattleEvent::Message { text } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_message(&self, needle: &str) -> bool {
        self.messages().any(|text| text.contains(needle))
    }

    /// Replays every event on `presenter` in order.
    pub fn present(&self, presenter: &mut impl BattlePresenter) {
        for event in &self.events {
            match event {
                BattleEvent::Message { text } => presenter.show_message(text),
                BattleEvent::HpChanged { side, hp, max_hp } => presenter.update_hp(*side, *hp, *max_hp),
                BattleEvent::BattleEnded { result } => presenter.battle_ended(result),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        lines: Vec<String>,
    }

    impl BattlePresenter for Recorder {
        fn show_message(&mut self, text: &str) {
            self.lines.push(format!("msg:{text}"));
        }

        fn update_hp(&mut self, side: SideId, hp: u16, max_hp: u16) {
            self.lines.push(format!("hp:{side:?}:{hp}/{max_hp}"));
        }
    }

    #[test]
    fn present_keeps_event_order() {
        let mut report = TurnReport::new();
        report.message("Pikachu used Tackle!");
        report.push(BattleEvent::HpChanged { side: SideId::Opponent, hp: 10, max_hp: 20 });
        report.push(BattleEvent::PartyChanged);
        report.message("It's super effective!");
        let mut recorder = Recorder::default();
        report.present(&mut recorder);
        assert_eq!(
            recorder.lines,
            vec![
                "msg:Pikachu used Tackle!",
                "hp:Opponent:10/20",
                "msg:It's super effective!"
            ]
        );
    }

    #[test]
    fn events_serialize_tagged() {
        let event = BattleEvent::HpChanged { side: SideId::Player, hp: 3, max_hp: 9 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "hpChanged");
        assert_eq!(json["maxHp"], 9);
        assert_eq!(json["side"], "player");
    }
}
