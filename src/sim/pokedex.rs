use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Species the player has caught. Owned by whoever runs the battle and
/// handed back by `Battle::finish`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pokedex {
    caught: BTreeSet<String>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time a species is registered.
    pub fn register(&mut self, species_id: &str) -> bool {
        self.caught.insert(species_id.to_string())
    }

    pub fn is_registered(&self, species_id: &str) -> bool {
        self.caught.contains(species_id)
    }

    pub fn len(&self) -> usize {
        self.caught.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caught.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.caught.iter().map(String::as_str)
    }
}
