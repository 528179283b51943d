//! Save-data shapes for creatures and a file-backed party store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::data::moves::get_move;
use crate::data::species::get_species;
use crate::error::{BattleError, Result};
use crate::sim::creature::{Creature, MoveSlot, MAX_MOVES};
use crate::sim::party::MAX_PARTY;
use crate::sim::stats::{Nature, StatsSet};
use crate::sim::status::{StatusCondition, StatusKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub move_id: String,
    pub pp: u8,
    pub max_pp: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureRecord {
    pub species_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub level: u8,
    pub nature: Nature,
    #[serde(default)]
    pub status_id: Option<String>,
    #[serde(default)]
    pub sleep_turns: u8,
    pub hp: u16,
    pub moves: Vec<MoveRecord>,
}

impl Creature {
    /// Rebuilds a creature from save data. Stats are derived again from
    /// species, level and nature; HP and PP are clamped to their maxima.
    pub fn from_record(record: &CreatureRecord) -> Result<Self> {
        let species = get_species(&record.species_id)?;
        if !(1..=100).contains(&record.level) {
            return Err(BattleError::InvalidLevel(record.level));
        }
        if record.moves.is_empty() {
            return Err(BattleError::NoMoves);
        }
        if record.moves.len() > MAX_MOVES {
            return Err(BattleError::TooManyMoves(record.moves.len()));
        }
        let mut moves = ArrayVec::new();
        for m in &record.moves {
            let data = get_move(&m.move_id)?;
            moves.push(MoveSlot {
                data,
                pp: m.pp.min(m.max_pp),
                max_pp: m.max_pp,
            });
        }
        let status = match &record.status_id {
            Some(id) => Some(StatusCondition::restore(StatusKind::from_id(id)?, record.sleep_turns)),
            None => None,
        };
        let stats = StatsSet::derive(&species.base_stats, record.level, record.nature);
        Ok(Self {
            species,
            nickname: record.nickname.clone(),
            level: record.level,
            nature: record.nature,
            current_hp: record.hp.min(stats.hp),
            stats,
            status,
            moves,
        })
    }

    pub fn to_record(&self) -> CreatureRecord {
        CreatureRecord {
            species_id: self.species.id.to_string(),
            nickname: self.nickname.clone(),
            level: self.level,
            nature: self.nature,
            status_id: self.status.map(|s| s.kind().id().to_string()),
            sleep_turns: self.status.map_or(0, StatusCondition::sleep_turns),
            hp: self.current_hp,
            moves: self
                .moves
                .iter()
                .map(|m| MoveRecord {
                    move_id: m.data.id.to_string(),
                    pp: m.pp,
                    max_pp: m.max_pp,
                })
                .collect(),
        }
    }
}

/// Where the player's party lives between battles.
pub trait PartyStore {
    fn load(&self) -> anyhow::Result<Vec<Creature>>;
    fn save(&self, party: &[Creature]) -> anyhow::Result<()>;
}

/// Party stored as a JSON array of `CreatureRecord`s.
#[derive(Clone, Debug)]
pub struct JsonPartyStore {
    path: PathBuf,
}

impl JsonPartyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overflow box kept next to the party file: `party.json` ->
    /// `party.storage.json`.
    pub fn storage_path(&self) -> PathBuf {
        self.path.with_extension("storage.json")
    }

    /// Writes the party and appends `caught` overflow to the storage file,
    /// so the party file never holds more than a party's worth.
    pub fn save_with_storage(&self, party: &[Creature], caught: &[Creature]) -> anyhow::Result<()> {
        if party.len() > MAX_PARTY {
            anyhow::bail!("party has {} creatures, at most {MAX_PARTY} allowed", party.len());
        }
        self.save(party)?;
        if caught.is_empty() {
            return Ok(());
        }
        let storage = JsonPartyStore::new(self.storage_path());
        let mut boxed = if storage.path().exists() { storage.load()? } else { Vec::new() };
        boxed.extend_from_slice(caught);
        storage.save(&boxed)
    }
}

impl PartyStore for JsonPartyStore {
    fn load(&self) -> anyhow::Result<Vec<Creature>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read party {}", self.path.display()))?;
        let records: Vec<CreatureRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse party {}", self.path.display()))?;
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                Creature::from_record(record)
                    .with_context(|| format!("invalid party entry {index} ({})", record.species_id))
            })
            .collect()
    }

    fn save(&self, party: &[Creature]) -> anyhow::Result<()> {
        let records: Vec<CreatureRecord> = party.iter().map(Creature::to_record).collect();
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write party {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::party::Party;

    fn record() -> CreatureRecord {
        serde_json::from_str(
            r#"{
                "speciesId": "pikachu",
                "nickname": "Sparky",
                "level": 12,
                "nature": "timid",
                "statusId": "slp",
                "sleepTurns": 2,
                "hp": 15,
                "moves": [
                    {"moveId": "thundershock", "pp": 40, "maxPp": 48},
                    {"moveId": "quickattack", "pp": 0, "maxPp": 48}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn record_round_trip_preserves_state() {
        let creature = Creature::from_record(&record()).unwrap();
        assert_eq!(creature.name(), "Sparky");
        assert_eq!(creature.status, Some(StatusCondition::Sleep { turns: 2 }));
        assert_eq!(creature.moves[1].pp, 0);
        assert_eq!(creature.to_record(), record());
    }

    #[test]
    fn hp_and_pp_are_clamped() {
        let mut raw = record();
        raw.hp = 999;
        raw.moves[0].pp = 200;
        let creature = Creature::from_record(&raw).unwrap();
        assert_eq!(creature.current_hp, creature.max_hp());
        assert_eq!(creature.moves[0].pp, 48);
    }

    #[test]
    fn unknown_ids_are_fatal() {
        let mut raw = record();
        raw.status_id = Some("zzz".into());
        assert!(matches!(Creature::from_record(&raw), Err(BattleError::UnknownStatus(_))));
        let mut raw = record();
        raw.moves[0].move_id = "notamove".into();
        assert!(matches!(Creature::from_record(&raw), Err(BattleError::UnknownMove(_))));
        let bad_nature = r#"{"speciesId":"pikachu","level":5,"nature":"grumpy","hp":1,"moves":[]}"#;
        assert!(serde_json::from_str::<CreatureRecord>(bad_nature).is_err());
    }

    #[test]
    fn json_store_round_trip() {
        let path = std::env::temp_dir().join(format!("creature-battle-party-{}.json", std::process::id()));
        let store = JsonPartyStore::new(&path);
        let party = vec![Creature::from_record(&record()).unwrap()];
        store.save(&party).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, party);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn overflow_goes_to_the_storage_file() {
        let path = std::env::temp_dir().join(format!("creature-battle-full-{}.json", std::process::id()));
        let store = JsonPartyStore::new(&path);
        let member = Creature::from_record(&record()).unwrap();
        let party = vec![member.clone(); MAX_PARTY];
        store.save_with_storage(&party, &[member.clone()]).unwrap();
        store.save_with_storage(&party, &[member.clone()]).unwrap();

        let loaded = store.load().unwrap();
        assert!(Party::from_creatures(loaded).is_ok());
        let boxed = JsonPartyStore::new(store.storage_path()).load().unwrap();
        assert_eq!(boxed.len(), 2);
        assert!(store.save_with_storage(&vec![member; MAX_PARTY + 1], &[]).is_err());

        let _ = fs::remove_file(store.storage_path());
        let _ = fs::remove_file(path);
    }
}
