//! Between-battle deck editing and loader round trips

use deckbattle::{
    core::{CardId, Character, MIN_DECK_SIZE},
    game::{Battle, BattleAction, BattleConfig, SeededRandom},
    loader::{catalog, CardDatabase, DeckLoader, EnemyDatabase},
    BattleError,
};
use similar_asserts::assert_eq;

fn starter_character() -> Character {
    let cards = catalog::starter_cards().unwrap();
    let deck = catalog::starter_deck().unwrap().instantiate(&cards).unwrap();
    catalog::starter_character(deck)
}

#[test]
fn test_remove_refuses_to_go_below_minimum() {
    let mut character = starter_character();
    assert_eq!(character.deck.len(), MIN_DECK_SIZE);

    let err = character
        .remove_card_from_deck(&CardId::new("strike#0"), MIN_DECK_SIZE)
        .unwrap_err();
    match err {
        BattleError::DeckBelowMinimum { size, minimum } => {
            assert_eq!(size, MIN_DECK_SIZE - 1);
            assert_eq!(minimum, MIN_DECK_SIZE);
        }
        other => panic!("expected DeckBelowMinimum, got {other:?}"),
    }
    assert_eq!(character.deck.len(), MIN_DECK_SIZE);
}

#[test]
fn test_remove_after_adding() {
    let cards = catalog::starter_cards().unwrap();
    let mut character = starter_character();
    let extra = cards.get("twin_strike").unwrap().instance("twin_strike#0");
    character.add_card_to_deck(extra);

    let removed = character
        .remove_card_from_deck(&CardId::new("strike#0"), MIN_DECK_SIZE)
        .unwrap();
    assert_eq!(removed.id.as_str(), "strike#0");
    assert_eq!(character.deck.len(), MIN_DECK_SIZE);
}

#[test]
fn test_upgrade_guard() {
    let mut character = starter_character();
    let id = CardId::new("bash#0");

    let upgraded = character.upgrade_card(&id).unwrap();
    assert!(upgraded.upgraded);
    assert_eq!(upgraded.name.as_str(), "Bash+");

    assert!(matches!(
        character.upgrade_card(&id),
        Err(BattleError::AlreadyUpgraded(_))
    ));
    assert!(matches!(
        character.upgrade_card(&CardId::new("bash#9")),
        Err(BattleError::CardNotFound(_))
    ));
}

#[test]
fn test_upgrade_carries_into_battle() {
    let mut character = starter_character();
    character.upgrade_card(&CardId::new("strike#0")).unwrap();

    let enemy = catalog::starter_enemies().unwrap().spawn("slime").unwrap();
    let mut battle = Battle::start(character, enemy, BattleConfig::default(), SeededRandom::new(3));
    battle.apply(BattleAction::Flee).unwrap();

    let character = battle.finish();
    let strike = character
        .deck
        .iter()
        .find(|c| c.id.as_str() == "strike#0")
        .unwrap();
    assert!(strike.upgraded);
    assert_eq!(character.deck.len(), MIN_DECK_SIZE);
    assert_eq!(character.current_health, character.max_health);
}

#[test]
fn test_tables_from_json() {
    let cards = CardDatabase::from_json(
        r#"[
            {"id": "strike", "name": "Strike", "type": "Attack", "energyCost": 1, "damage": 6},
            {"id": "defend", "name": "Defend", "type": "Skill", "energyCost": 1, "block": 5}
        ]"#,
    )
    .unwrap();
    let enemies = EnemyDatabase::from_json(
        r#"[{"id": "slime", "name": "Acid Slime", "maxHealth": 20, "damage": 4}]"#,
    )
    .unwrap();
    let deck = DeckLoader::parse("6 strike\n4 defend\n")
        .unwrap()
        .instantiate(&cards)
        .unwrap();
    assert_eq!(deck.len(), 10);

    let enemy = enemies.spawn("slime").unwrap();
    let character = Character::new("Silent", 70, 3).with_deck(deck);
    let battle = Battle::start(character, enemy, BattleConfig::default(), SeededRandom::new(1));
    assert_eq!(battle.hand().len(), 5);
    assert_eq!(battle.piles.draw_pile.len(), 5);
    assert!(battle.piles.is_conserved());
}
