use serde_json::json;

use crate::sim::battle::BattleResult;
use crate::sim::events::{BattleEvent, BattlePresenter, TurnReport};
use crate::sim::SideId;

/// Records a battle as pipe-delimited protocol lines.
#[derive(Clone, Debug)]
pub struct BattleLog {
    format: String,
    lines: Vec<String>,
}

impl Default for BattleLog {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleLog {
    pub fn new() -> Self {
        Self::with_format("wildbattle")
    }

    pub fn with_format(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            lines: Vec::new(),
        }
    }

    /// Appends every event of a report, including the ones a presenter
    /// never sees (switches, faints, status changes).
    pub fn record(&mut self, report: &TurnReport) {
        for event in &report.events {
            self.log_event(event);
        }
    }

    pub fn log_event(&mut self, event: &BattleEvent) {
        let line = match event {
            BattleEvent::Message { text } => format!("|message|{text}"),
            BattleEvent::HpChanged { side, hp, max_hp } => {
                format!("|-hp|{}|{hp}/{max_hp}", side_ident(*side))
            }
            BattleEvent::StatusChanged { side, status: Some(kind) } => {
                format!("|-status|{}|{}", side_ident(*side), kind.id())
            }
            BattleEvent::StatusChanged { side, status: None } => {
                format!("|-curestatus|{}", side_ident(*side))
            }
            BattleEvent::SentOut { side, species_id, name } => {
                format!("|switch|{}: {name}|{species_id}", side_ident(*side))
            }
            BattleEvent::Fainted { side, name } => format!("|faint|{}: {name}", side_ident(*side)),
            BattleEvent::PartyChanged => "|party|".to_string(),
            BattleEvent::TurnEnded { turn } => format!("|turn|{turn}"),
            BattleEvent::BattleEnded { result } => format!("|end|{}", result_tag(result)),
        };
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "format": self.format,
            "log": self.lines,
        })
    }
}

impl BattlePresenter for BattleLog {
    fn show_message(&mut self, text: &str) {
        self.lines.push(format!("|message|{text}"));
    }

    fn update_hp(&mut self, side: SideId, hp: u16, max_hp: u16) {
        self.lines.push(format!("|-hp|{}|{hp}/{max_hp}", side_ident(side)));
    }

    fn battle_ended(&mut self, result: &BattleResult) {
        self.lines.push(format!("|end|{}", result_tag(result)));
    }
}

/// Singles only: p1a for the player, p2a for the opponent.
pub fn side_ident(side: SideId) -> &'static str {
    match side {
        SideId::Player => "p1a",
        SideId::Opponent => "p2a",
    }
}

fn result_tag(result: &BattleResult) -> String {
    match result {
        BattleResult::Victory => "victory".to_string(),
        BattleResult::Defeat => "defeat".to_string(),
        BattleResult::Fled => "fled".to_string(),
        BattleResult::Captured { species_id, .. } => format!("captured|{species_id}"),
    }
}
