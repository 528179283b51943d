use super::moves::{get_move, MoveCategory, MOVES, STRUGGLE};
use super::species::{get_species, SPECIES};
use super::types::Type;
use crate::error::BattleError;
use crate::sim::status::StatusKind;
use crate::sim::volatile::Volatile;

#[test]
fn charmander_stats() {
    let charmander = get_species("Charmander").expect("Charmander should exist");
    assert_eq!(charmander.base_stats.hp, 39);
    assert_eq!(charmander.base_stats.atk, 52);
    assert_eq!(charmander.types, &[Type::Fire]);
    assert_eq!(charmander.catch_rate, 45);
}

#[test]
fn species_keys_match_ids() {
    for (key, data) in SPECIES.entries() {
        assert_eq!(*key, data.id);
        assert!(!data.types.is_empty() && data.types.len() <= 2);
    }
}

#[test]
fn move_keys_match_ids_and_priorities_are_tiers() {
    for (key, data) in MOVES.entries() {
        assert_eq!(*key, data.id);
        assert!((-1..=1).contains(&data.priority), "{} priority", data.id);
    }
}

#[test]
fn thunderbolt_secondary_paralysis() {
    let thunderbolt = get_move("Thunderbolt").expect("Thunderbolt must be present");
    assert_eq!(thunderbolt.power, 90);
    let effect = thunderbolt.status_effect.expect("secondary status");
    assert_eq!(effect.status, StatusKind::Paralysis);
    assert_eq!(effect.chance, 10);
}

#[test]
fn bite_can_flinch() {
    let bite = get_move("bite").expect("Bite must be present");
    let effect = bite.volatile_effect.expect("secondary volatile");
    assert_eq!(effect.volatile, Volatile::Flinch);
    assert_eq!(effect.chance, 30);
}

#[test]
fn max_pp_is_base_times_one_point_six() {
    assert_eq!(get_move("tackle").unwrap().max_pp(), 56);
    assert_eq!(get_move("icebeam").unwrap().max_pp(), 16);
    assert_eq!(get_move("thunderbolt").unwrap().max_pp(), 24);
}

#[test]
fn struggle_is_typeless_and_not_learnable() {
    assert_eq!(STRUGGLE.move_type, None);
    assert_eq!(STRUGGLE.category, MoveCategory::Physical);
    assert!(STRUGGLE.sure_hit);
    assert!(matches!(
        get_move("struggle"),
        Err(BattleError::UnknownMove(_))
    ));
}

#[test]
fn lookups_ignore_case_and_punctuation() {
    assert_eq!(get_move("Will-O-Wisp").unwrap().id, "willowisp");
    assert_eq!(get_species("  PIKACHU ").unwrap().id, "pikachu");
    assert!(get_species("missingno").is_err());
}
