//! Built-in starter content
//!
//! Used when no card or enemy table is given on the command line, and by
//! tests and benchmarks.

use crate::core::{Card, CardType, Character, Condition, Effect, EffectKind, EnemyMove, Rarity};
use crate::loader::card::CardDatabase;
use crate::loader::deck::{DeckLoader, DeckList};
use crate::loader::enemy::{EnemyDatabase, EnemyTemplate};
use crate::Result;

pub const STARTER_DECK: &str = "\
# Starter deck
[Main]
5 strike
4 defend
1 bash
";

pub fn starter_cards() -> Result<CardDatabase> {
    let mut db = CardDatabase::new();

    // === STARTER ===

    db.insert(
        Card::new("strike", "Strike", CardType::Attack, 1)
            .with_rarity(Rarity::Starter)
            .with_damage(6)
            .with_description("Deal 6 damage."),
    )?;
    db.insert(
        Card::new("defend", "Defend", CardType::Skill, 1)
            .with_rarity(Rarity::Starter)
            .with_block(5)
            .with_description("Gain 5 block."),
    )?;
    db.insert(
        Card::new("bash", "Bash", CardType::Attack, 2)
            .with_rarity(Rarity::Starter)
            .with_damage(8)
            .with_effect(Effect::new(EffectKind::Vulnerable, 1).with_duration(2))
            .with_description("Deal 8 damage. Apply 2 Vulnerable."),
    )?;

    // === COMMON ===

    db.insert(
        Card::new("neutralize", "Neutralize", CardType::Attack, 0)
            .with_damage(3)
            .with_effect(Effect::new(EffectKind::Weak, 1).with_duration(1))
            .with_description("Deal 3 damage. Apply 1 Weak."),
    )?;
    db.insert(
        Card::new("twin_strike", "Twin Strike", CardType::Attack, 1)
            .with_damage(5)
            .with_effect(Effect::new(EffectKind::MultiHit, 2))
            .with_description("Deal 5 damage twice."),
    )?;
    db.insert(
        Card::new("cleave", "Cleave", CardType::Attack, 1)
            .with_damage(8)
            .with_effect(Effect::new(EffectKind::Aoe, 1))
            .with_description("Deal 8 damage to all enemies."),
    )?;
    db.insert(
        Card::new("shrug_it_off", "Shrug It Off", CardType::Skill, 1)
            .with_block(8)
            .with_effect(Effect::new(EffectKind::Draw, 1))
            .with_description("Gain 8 block. Draw 1 card."),
    )?;
    db.insert(
        Card::new("ambush", "Ambush", CardType::Attack, 1)
            .with_damage(4)
            .with_effect(Effect::new(EffectKind::ConditionalDamage, 6))
            .with_description("Deal 4 damage. Deal 6 more if the enemy has no block."),
    )?;

    // === UNCOMMON ===

    db.insert(
        Card::new("inflame", "Inflame", CardType::Power, 1)
            .with_rarity(Rarity::Uncommon)
            .with_effect(Effect::new(EffectKind::Strength, 2).permanent())
            .with_description("Gain 2 Strength."),
    )?;
    db.insert(
        Card::new("footwork", "Footwork", CardType::Power, 1)
            .with_rarity(Rarity::Uncommon)
            .with_effect(Effect::new(EffectKind::Dexterity, 2).permanent())
            .with_description("Gain 2 Dexterity."),
    )?;
    db.insert(
        Card::new("firebrand", "Firebrand", CardType::Attack, 1)
            .with_rarity(Rarity::Uncommon)
            .with_damage(4)
            .with_effect(Effect::new(EffectKind::Burn, 3).with_duration(3))
            .with_description("Deal 4 damage. Apply 3 Burn for 3 turns."),
    )?;
    db.insert(
        Card::new("preparation", "Preparation", CardType::Skill, 0)
            .with_rarity(Rarity::Uncommon)
            .with_effect(Effect::new(EffectKind::Draw, 2))
            .with_effect(Effect::new(EffectKind::Discard, 1))
            .with_description("Draw 2 cards. Discard 1 card."),
    )?;
    db.insert(
        Card::new("exploit", "Exploit", CardType::Skill, 1)
            .with_rarity(Rarity::Uncommon)
            .with_effect(
                Effect::new(EffectKind::ConditionalEnergy, 2).with_condition(
                    Condition::TargetHasEffect {
                        effect: EffectKind::Vulnerable,
                    },
                ),
            )
            .with_description("If the enemy is Vulnerable, gain 2 energy."),
    )?;

    // === RARE ===

    db.insert(
        Card::new("concentrate", "Concentrate", CardType::Skill, 1)
            .with_rarity(Rarity::Rare)
            .with_effect(Effect::new(EffectKind::ZeroCostNext, 1))
            .with_effect(Effect::new(EffectKind::Draw, 1))
            .with_description("Your next card costs 0. Draw 1 card."),
    )?;
    db.insert(
        Card::new("last_stand", "Last Stand", CardType::Skill, 2)
            .with_rarity(Rarity::Rare)
            .with_effect(Effect::new(EffectKind::Heal, 8))
            .with_effect(
                Effect::new(EffectKind::ConditionalEnergy, 1)
                    .with_condition(Condition::ActorHealthBelow { percent: 50 }),
            )
            .with_description("Heal 8. If below half health, gain 1 energy."),
    )?;

    Ok(db)
}

pub fn starter_enemies() -> Result<EnemyDatabase> {
    let mut db = EnemyDatabase::new();

    db.insert(EnemyTemplate {
        id: "slime".into(),
        name: "Acid Slime".to_string(),
        max_health: 28,
        damage: 7,
        moves: Vec::new(),
    })?;
    db.insert(EnemyTemplate {
        id: "cultist".into(),
        name: "Cultist".to_string(),
        max_health: 48,
        damage: 6,
        moves: vec![
            EnemyMove::new("Incantation", 1)
                .with_effect(Effect::new(EffectKind::Strength, 2).permanent()),
            EnemyMove::new("Dark Strike", 3).with_damage(6),
        ],
    })?;
    db.insert(EnemyTemplate {
        id: "jaw_worm".into(),
        name: "Jaw Worm".to_string(),
        max_health: 42,
        damage: 11,
        moves: vec![
            EnemyMove::new("Chomp", 25).with_damage(11),
            EnemyMove::new("Thrash", 30).with_damage(7).with_block(5),
            EnemyMove::new("Bellow", 45)
                .with_block(6)
                .with_effect(Effect::new(EffectKind::Strength, 3).permanent()),
        ],
    })?;
    db.insert(EnemyTemplate {
        id: "hexer".into(),
        name: "Hexer".to_string(),
        max_health: 36,
        damage: 8,
        moves: vec![
            EnemyMove::new("Hex Bolt", 50).with_damage(8),
            EnemyMove::new("Wither", 30)
                .with_effect(Effect::new(EffectKind::Weak, 1).with_duration(2)),
            EnemyMove::new("Scorch", 20)
                .with_damage(3)
                .with_effect(Effect::new(EffectKind::Burn, 2).with_duration(2)),
        ],
    })?;

    Ok(db)
}

pub fn starter_deck() -> Result<DeckList> {
    DeckLoader::parse(STARTER_DECK)
}

/// Fresh 80 HP, 3 energy character holding `deck`
pub fn starter_character(deck: Vec<Card>) -> Character {
    Character::new("Ironclad", 80, 3).with_deck(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MIN_DECK_SIZE;

    #[test]
    fn test_catalog_builds() {
        let cards = starter_cards().unwrap();
        assert!(cards.len() >= 10);
        let enemies = starter_enemies().unwrap();
        assert_eq!(enemies.ids(), vec!["cultist", "hexer", "jaw_worm", "slime"]);
    }

    #[test]
    fn test_starter_deck_instantiates() {
        let deck = starter_deck().unwrap().instantiate(&starter_cards().unwrap()).unwrap();
        assert_eq!(deck.len(), MIN_DECK_SIZE);
        assert_eq!(deck[0].id.as_str(), "strike#0");
        assert_eq!(deck[9].id.as_str(), "bash#0");
    }

    #[test]
    fn test_starter_character() {
        let character = starter_character(Vec::new());
        assert_eq!(character.max_health, 80);
        assert_eq!(character.max_energy, 3);
    }
}
