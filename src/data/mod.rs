//! Static game data: species, moves and the type chart.

pub mod moves;
pub mod species;
pub mod types;

#[cfg(test)]
mod tests;

/// Catalog keys are lowercase ASCII alphanumerics ("Mr. Mime" -> "mrmime").
pub fn normalize_id(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
