use creature_battle::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn mk(species: &str, level: u8) -> Creature {
    Creature::new(species, level, Nature::Hardy, &["growl"]).unwrap()
}

fn throw(ball: BallKind) -> Action {
    Action::Item(ItemAction::Ball { ball })
}

#[test]
fn master_ball_catches_and_registers() {
    let player = Party::from_creatures([mk("pikachu", 20)]).unwrap();
    let mut battle = Battle::wild(player, mk("rattata", 5), SmallRng::seed_from_u64(1)).unwrap();
    let report = battle.resolve_turn(throw(BallKind::Master), Action::Move(0)).unwrap();

    assert!(report.contains_message("You threw a Master Ball!"));
    assert!(report.contains_message("Gotcha! Rattata was caught!"));
    assert!(report.contains_message("Rattata's data was added to the Pokédex."));
    assert!(!report.contains_message("Rattata used Growl!"));
    assert!(report.events.contains(&BattleEvent::PartyChanged));
    assert_eq!(
        battle.result(),
        Some(&BattleResult::Captured { species_id: "rattata".into(), sent_to_storage: false })
    );

    let outcome = battle.finish();
    assert_eq!(outcome.party.len(), 2);
    assert_eq!(outcome.party[1].species.id, "rattata");
    assert!(outcome.storage.is_empty());
    assert!(outcome.pokedex.is_registered("rattata"));
}

#[test]
fn full_party_sends_catch_to_storage() {
    let six = ["pikachu", "eevee", "pidgey", "zubat", "oddish", "vulpix"].map(|s| mk(s, 20));
    let player = Party::from_creatures(six).unwrap();
    let mut pokedex = Pokedex::new();
    pokedex.register("rattata");
    let mut battle = Battle::wild(player, mk("rattata", 5), SmallRng::seed_from_u64(2))
        .unwrap()
        .with_pokedex(pokedex);
    let report = battle.resolve_turn(throw(BallKind::Master), Action::Move(0)).unwrap();

    assert!(report.contains_message("Rattata was sent to the PC."));
    assert!(!report.contains_message("added to the Pokédex"));
    assert!(!report.events.contains(&BattleEvent::PartyChanged));
    let outcome = battle.finish();
    assert_eq!(outcome.party.len(), 6);
    assert_eq!(outcome.storage.len(), 1);
    assert_eq!(outcome.pokedex.len(), 1);
}

#[test]
fn healthy_rare_creature_usually_escapes() {
    let mut caught = 0;
    for seed in 0..100 {
        let player = Party::from_creatures([mk("pikachu", 20)]).unwrap();
        let mut battle =
            Battle::wild(player, mk("bulbasaur", 50), SmallRng::seed_from_u64(seed)).unwrap();
        let report = battle.resolve_turn(throw(BallKind::Poke), Action::Move(0)).unwrap();
        if battle.is_over() {
            caught += 1;
        } else {
            assert!(report.contains_message("Bulbasaur used Growl!"));
            assert!(!report.contains_message("Gotcha!"));
        }
    }
    assert!(caught < 50, "caught {caught} of 100");
}

#[test]
fn capture_keeps_the_wild_creature_state() {
    let mut wild = mk("rattata", 5);
    wild.current_hp = 3;
    let player = Party::from_creatures([mk("pikachu", 20)]).unwrap();
    let mut battle = Battle::wild(player, wild, SmallRng::seed_from_u64(3)).unwrap();
    battle.resolve_turn(throw(BallKind::Master), Action::Move(0)).unwrap();
    let outcome = battle.finish();
    assert_eq!(outcome.party[1].current_hp, 3);
}

#[test]
fn fainted_members_still_count_toward_a_full_party() {
    let mut fainted = mk("zubat", 20);
    fainted.current_hp = 0;
    let five = ["pikachu", "eevee", "pidgey", "oddish", "vulpix"].map(|s| mk(s, 20));
    let player = Party::from_creatures(five.into_iter().chain([fainted])).unwrap();
    let mut battle = Battle::wild(player, mk("rattata", 5), SmallRng::seed_from_u64(4)).unwrap();
    let report = battle.resolve_turn(throw(BallKind::Master), Action::Move(0)).unwrap();

    assert!(report.contains_message("Rattata was sent to the PC."));
    let outcome = battle.finish();
    assert_eq!(outcome.party.len(), 6);
    assert_eq!(outcome.storage.len(), 1);
    assert!(Party::from_creatures(outcome.party).is_ok());
}
