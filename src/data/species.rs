use phf::phf_map;

use crate::data::normalize_id;
use crate::data::types::Type;
use crate::error::{BattleError, Result};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BaseStats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

#[derive(Debug, PartialEq)]
pub struct SpeciesData {
    pub id: &'static str,
    pub name: &'static str,
    pub types: &'static [Type],
    pub base_stats: BaseStats,
    /// 1..=255; higher is easier to catch.
    pub catch_rate: u8,
}

impl SpeciesData {
    pub fn has_type(&self, t: Type) -> bool {
        self.types.contains(&t)
    }
}

macro_rules! species {
    ($id:literal, $name:literal, [$($t:ident),+], $hp:literal, $atk:literal, $def:literal, $spa:literal, $spd:literal, $spe:literal, $rate:literal) => {
        SpeciesData {
            id: $id,
            name: $name,
            types: &[$(Type::$t),+],
            base_stats: BaseStats { hp: $hp, atk: $atk, def: $def, spa: $spa, spd: $spd, spe: $spe },
            catch_rate: $rate,
        }
    };
}

pub static SPECIES: phf::Map<&'static str, SpeciesData> = phf_map! {
    "bulbasaur" => species!("bulbasaur", "Bulbasaur", [Grass, Poison], 45, 49, 49, 65, 65, 45, 45),
    "charmander" => species!("charmander", "Charmander", [Fire], 39, 52, 43, 60, 50, 65, 45),
    "squirtle" => species!("squirtle", "Squirtle", [Water], 44, 48, 65, 50, 64, 43, 45),
    "pikachu" => species!("pikachu", "Pikachu", [Electric], 35, 55, 40, 50, 50, 90, 190),
    "caterpie" => species!("caterpie", "Caterpie", [Bug], 45, 30, 35, 20, 20, 45, 255),
    "weedle" => species!("weedle", "Weedle", [Bug, Poison], 40, 35, 30, 20, 20, 50, 255),
    "pidgey" => species!("pidgey", "Pidgey", [Normal, Flying], 40, 45, 40, 35, 35, 56, 255),
    "rattata" => species!("rattata", "Rattata", [Normal], 30, 56, 35, 25, 35, 72, 255),
    "zubat" => species!("zubat", "Zubat", [Poison, Flying], 40, 45, 35, 30, 40, 55, 255),
    "oddish" => species!("oddish", "Oddish", [Grass, Poison], 45, 50, 55, 75, 65, 30, 255),
    "geodude" => species!("geodude", "Geodude", [Rock, Ground], 40, 80, 100, 30, 30, 20, 255),
    "magikarp" => species!("magikarp", "Magikarp", [Water], 20, 10, 55, 15, 20, 80, 255),
    "vulpix" => species!("vulpix", "Vulpix", [Fire], 38, 41, 40, 50, 65, 65, 190),
    "growlithe" => species!("growlithe", "Growlithe", [Fire], 55, 70, 45, 70, 50, 60, 190),
    "jigglypuff" => species!("jigglypuff", "Jigglypuff", [Normal, Fairy], 115, 45, 20, 45, 25, 20, 170),
    "abra" => species!("abra", "Abra", [Psychic], 25, 20, 15, 105, 55, 90, 200),
    "gastly" => species!("gastly", "Gastly", [Ghost, Poison], 30, 35, 30, 100, 35, 80, 190),
    "magnemite" => species!("magnemite", "Magnemite", [Electric, Steel], 25, 35, 70, 95, 55, 45, 190),
    "eevee" => species!("eevee", "Eevee", [Normal], 55, 55, 50, 45, 65, 55, 45),
    "lapras" => species!("lapras", "Lapras", [Water, Ice], 130, 85, 80, 85, 95, 60, 45),
    "snorlax" => species!("snorlax", "Snorlax", [Normal], 160, 110, 65, 65, 110, 30, 25),
    "mewtwo" => species!("mewtwo", "Mewtwo", [Psychic], 106, 110, 90, 154, 90, 130, 3),
};

/// Looks a species up by name or id, ignoring case and punctuation.
pub fn get_species(name: &str) -> Result<&'static SpeciesData> {
    SPECIES
        .get(normalize_id(name).as_str())
        .ok_or_else(|| BattleError::UnknownSpecies(name.to_string()))
}
