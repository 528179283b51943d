use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tunables for a battle. Every field has a default, so a config file only
/// needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BattleConfig {
    /// First hour (0..24) counted as night for the Dusk Ball.
    pub night_start_hour: u8,
    /// First hour no longer counted as night.
    pub night_end_hour: u8,
    /// Wall-clock hour the battle takes place at; daytime when unset.
    pub local_hour: Option<u8>,
    /// Stages granted by X items.
    pub battle_item_stages: i8,
    pub confusion_self_hit_percent: u8,
    pub infatuation_immobilize_percent: u8,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            night_start_hour: 18,
            night_end_hour: 4,
            local_hour: None,
            battle_item_stages: 2,
            confusion_self_hit_percent: 50,
            infatuation_immobilize_percent: 50,
        }
    }
}

impl BattleConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// The night window may wrap past midnight (18 -> 4).
    pub fn is_night(&self) -> bool {
        let Some(hour) = self.local_hour else {
            return false;
        };
        let (start, end) = (self.night_start_hour, self.night_end_hour);
        if start <= end {
            (start..end).contains(&hour)
        } else {
            hour >= start || hour < end
        }
    }
}
