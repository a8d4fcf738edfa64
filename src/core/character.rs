//! Player character representation
//!
//! The character owns the persistent deck. Deck edits made here happen
//! between battles and enforce the minimum deck size; edits made while a
//! battle is running go through `CardPiles` instead.

use crate::core::{Card, CardId, Effect, EffectList};
use crate::zones::upgrade_in_deck;
use crate::{BattleError, Result};
use serde::{Deserialize, Serialize};

/// Smallest deck a character may be trimmed down to between battles
pub const MIN_DECK_SIZE: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,

    pub current_health: i32,
    pub max_health: i32,

    pub current_energy: u32,
    pub max_energy: u32,

    /// Persistent deck template
    pub deck: Vec<Card>,

    /// Permanent effects granted by equipment, attached at battle start
    #[serde(default)]
    pub equipment_effects: EffectList,

    /// Inventory weight over its limit (lowers critical chance)
    #[serde(default)]
    pub over_encumbered: bool,
}

impl Character {
    pub fn new(name: impl Into<String>, max_health: i32, max_energy: u32) -> Self {
        Character {
            name: name.into(),
            current_health: max_health,
            max_health,
            current_energy: max_energy,
            max_energy,
            deck: Vec::new(),
            equipment_effects: EffectList::new(),
            over_encumbered: false,
        }
    }

    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = deck;
        self
    }

    pub fn with_equipment_effect(mut self, effect: Effect) -> Self {
        self.equipment_effects.push(effect.permanent());
        self
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn heal(&mut self, amount: i32) {
        self.current_health = (self.current_health + amount.max(0)).min(self.max_health);
    }

    pub fn add_card_to_deck(&mut self, card: Card) {
        self.deck.push(card);
    }

    /// Permanently remove a card, refusing to go below `minimum` cards
    pub fn remove_card_from_deck(&mut self, card_id: &CardId, minimum: usize) -> Result<Card> {
        let pos = self
            .deck
            .iter()
            .position(|c| &c.id == card_id)
            .ok_or_else(|| BattleError::CardNotFound(card_id.clone()))?;

        if self.deck.len() - 1 < minimum {
            return Err(BattleError::DeckBelowMinimum {
                size: self.deck.len() - 1,
                minimum,
            });
        }

        Ok(self.deck.remove(pos))
    }

    pub fn upgrade_card(&mut self, card_id: &CardId) -> Result<&Card> {
        let idx = upgrade_in_deck(&mut self.deck, card_id)?;
        Ok(&self.deck[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardType;

    fn starter_deck(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| Card::new(format!("strike#{i}"), "Strike", CardType::Attack, 1).with_damage(6))
            .collect()
    }

    #[test]
    fn test_character_creation() {
        let c = Character::new("Ironclad", 80, 3);
        assert_eq!(c.current_health, 80);
        assert_eq!(c.current_energy, 3);
        assert!(c.is_alive());
        assert!(c.deck.is_empty());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut c = Character::new("Ironclad", 80, 3);
        c.current_health = 70;
        c.heal(25);
        assert_eq!(c.current_health, 80);
    }

    #[test]
    fn test_remove_enforces_minimum() {
        let mut c = Character::new("Ironclad", 80, 3).with_deck(starter_deck(11));
        let removed = c.remove_card_from_deck(&CardId::new("strike#0"), MIN_DECK_SIZE).unwrap();
        assert_eq!(removed.id.as_str(), "strike#0");
        assert_eq!(c.deck.len(), 10);

        let err = c
            .remove_card_from_deck(&CardId::new("strike#1"), MIN_DECK_SIZE)
            .unwrap_err();
        assert!(matches!(err, BattleError::DeckBelowMinimum { size: 9, minimum: 10 }));
        assert_eq!(c.deck.len(), 10);
    }

    #[test]
    fn test_remove_missing_card() {
        let mut c = Character::new("Ironclad", 80, 3).with_deck(starter_deck(12));
        let err = c.remove_card_from_deck(&CardId::new("bash"), MIN_DECK_SIZE).unwrap_err();
        assert!(matches!(err, BattleError::CardNotFound(_)));
    }

    #[test]
    fn test_upgrade_in_deck() {
        let mut c = Character::new("Ironclad", 80, 3).with_deck(starter_deck(10));
        let card = c.upgrade_card(&CardId::new("strike#3")).unwrap();
        assert_eq!(card.damage, Some(9));
        assert!(c.upgrade_card(&CardId::new("strike#3")).is_err());
        assert_eq!(c.deck.iter().filter(|c| c.upgraded).count(), 1);
    }
}
