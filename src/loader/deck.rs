//! Deck list loader (.dck format)
//!
//! One entry per line, `COUNT CARD_ID`. Blank lines, `#` comments and
//! `[section]` headers are skipped; cards under `[Upgraded]` start
//! upgraded.
//!
//! ```text
//! [Main]
//! 5 strike
//! 4 defend
//! [Upgraded]
//! 1 bash
//! ```

use crate::core::{Card, CardId};
use crate::loader::card::CardDatabase;
use crate::{BattleError, Result};
use std::path::Path;

pub struct DeckLoader;

impl DeckLoader {
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<DeckList> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<DeckList> {
        let mut entries = Vec::new();
        let mut upgraded = false;

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') {
                upgraded = line.eq_ignore_ascii_case("[upgraded]");
                continue;
            }

            let (count, card_id) = line
                .split_once(char::is_whitespace)
                .and_then(|(count, rest)| Some((count.parse::<u8>().ok()?, rest.trim())))
                .filter(|(count, id)| *count > 0 && !id.is_empty())
                .ok_or_else(|| {
                    BattleError::InvalidDeckFormat(format!(
                        "line {}: expected 'COUNT CARD_ID', got '{line}'",
                        line_no + 1
                    ))
                })?;

            entries.push(DeckEntry {
                card_id: card_id.to_string(),
                count,
                upgraded,
            });
        }

        if entries.is_empty() {
            return Err(BattleError::InvalidDeckFormat("empty deck".to_string()));
        }

        Ok(DeckList { entries })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    /// Definition id in the card table
    pub card_id: String,
    pub count: u8,
    pub upgraded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckList {
    pub entries: Vec<DeckEntry>,
}

impl DeckList {
    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    /// Build card instances, numbering copies of each definition `id#0`,
    /// `id#1`, ... across the whole list
    pub fn instantiate(&self, db: &CardDatabase) -> Result<Vec<Card>> {
        let mut deck = Vec::with_capacity(self.total_cards());
        let mut copies: rustc_hash::FxHashMap<&str, usize> = Default::default();

        for entry in &self.entries {
            let definition = db.get(&entry.card_id).ok_or_else(|| {
                BattleError::InvalidDeckFormat(format!("unknown card '{}'", entry.card_id))
            })?;
            let base = if entry.upgraded {
                definition.upgraded_variant()?
            } else {
                definition.clone()
            };

            for _ in 0..entry.count {
                let n = copies.entry(entry.card_id.as_str()).or_insert(0);
                deck.push(base.instance(CardId::new(format!("{}#{n}", entry.card_id))));
                *n += 1;
            }
        }
        Ok(deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardType;

    fn db() -> CardDatabase {
        let mut db = CardDatabase::new();
        db.insert(Card::new("strike", "Strike", CardType::Attack, 1).with_damage(6))
            .unwrap();
        db.insert(Card::new("defend", "Defend", CardType::Skill, 1).with_block(5))
            .unwrap();
        db
    }

    #[test]
    fn test_parse_deck() {
        let content = r#"
# starter deck
[Main]
5 strike
4 defend

[Upgraded]
1 strike
"#;
        let deck = DeckLoader::parse(content).unwrap();
        assert_eq!(deck.entries.len(), 3);
        assert_eq!(deck.total_cards(), 10);
        assert_eq!(
            deck.entries[2],
            DeckEntry {
                card_id: "strike".to_string(),
                count: 1,
                upgraded: true
            }
        );
    }

    #[test]
    fn test_bad_line() {
        let err = DeckLoader::parse("5 strike\nstrike").unwrap_err();
        assert!(matches!(err, BattleError::InvalidDeckFormat(msg) if msg.starts_with("line 2")));
        assert!(DeckLoader::parse("# nothing\n").is_err());
    }

    #[test]
    fn test_instantiate_numbers_copies() {
        let deck = DeckLoader::parse("2 strike\n1 defend\n[Upgraded]\n1 strike")
            .unwrap()
            .instantiate(&db())
            .unwrap();
        let ids: Vec<&str> = deck.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["strike#0", "strike#1", "defend#0", "strike#2"]);
        assert!(deck[3].upgraded);
        assert_eq!(deck[3].damage, Some(9));
        assert_eq!(deck[3].name.as_str(), "Strike+");
    }

    #[test]
    fn test_instantiate_unknown_card() {
        let deck = DeckLoader::parse("1 whirlwind").unwrap();
        assert!(deck.instantiate(&db()).is_err());
    }
}
