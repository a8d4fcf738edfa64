//! Card-definition table
//!
//! A JSON array of card definitions keyed by their definition id. Deck
//! lists refer to these ids; instances get `id#n` ids when a deck is built.

use crate::core::Card;
use crate::{BattleError, Result};
use rustc_hash::FxHashMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct CardDatabase {
    cards: FxHashMap<String, Card>,
}

impl CardDatabase {
    pub fn new() -> Self {
        CardDatabase {
            cards: FxHashMap::default(),
        }
    }

    /// Parse a JSON array of card definitions
    pub fn from_json(json: &str) -> Result<Self> {
        let cards: Vec<Card> =
            serde_json::from_str(json).map_err(|e| BattleError::InvalidCardFormat(e.to_string()))?;
        let mut db = CardDatabase::new();
        for card in cards {
            db.insert(card)?;
        }
        Ok(db)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&contents)
    }

    /// Add a definition, rejecting duplicates and negative numbers
    pub fn insert(&mut self, card: Card) -> Result<()> {
        validate(&card)?;
        let key = card.id.as_str().to_string();
        if self.cards.contains_key(&key) {
            return Err(BattleError::InvalidCardFormat(format!(
                "duplicate card id '{key}'"
            )));
        }
        self.cards.insert(key, card);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cards.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Definition ids in sorted order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.cards.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Merge another table in, later definitions replacing earlier ones
    pub fn extend(&mut self, other: CardDatabase) {
        self.cards.extend(other.cards);
    }
}

fn validate(card: &Card) -> Result<()> {
    if card.id.as_str().is_empty() || card.id.as_str().contains('#') {
        return Err(BattleError::InvalidCardFormat(format!(
            "invalid card id '{}'",
            card.id
        )));
    }
    if card.damage.is_some_and(|d| d < 0) || card.block.is_some_and(|b| b < 0) {
        return Err(BattleError::InvalidCardFormat(format!(
            "card '{}' has negative damage or block",
            card.id
        )));
    }
    Ok(())
}
