//! Pile-change journal
//!
//! Every card movement the pile manager performs is recorded here so a
//! caller can animate or audit a step without diffing pile contents.

use crate::core::CardId;
use crate::zones::Zone;
use serde::{Deserialize, Serialize};

/// Atomic pile changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PileChange {
    /// Move a card between piles
    MoveCard {
        card_id: CardId,
        from_zone: Zone,
        to_zone: Zone,
    },

    /// Discard pile shuffled into the draw pile
    Reshuffle { count: usize },

    /// Card permanently added to the deck
    AddToDeck { card_id: CardId, to_zone: Option<Zone> },

    /// Card permanently removed from the deck (and the pile holding it)
    RemoveFromDeck {
        card_id: CardId,
        from_zone: Option<Zone>,
    },

    /// Card upgraded in place
    Upgrade { card_id: CardId },
}

/// Ordered record of pile changes since the last drain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PileJournal {
    changes: Vec<PileChange>,

    /// Is recording enabled? (simulation runs switch it off)
    enabled: bool,
}

impl PileJournal {
    pub fn new() -> Self {
        PileJournal {
            changes: Vec::new(),
            enabled: true,
        }
    }

    /// Create a journal that records nothing
    pub fn disabled() -> Self {
        PileJournal {
            changes: Vec::new(),
            enabled: false,
        }
    }

    pub fn log(&mut self, change: PileChange) {
        if self.enabled {
            self.changes.push(change);
        }
    }

    pub fn peek(&self) -> Option<&PileChange> {
        self.changes.last()
    }

    /// Take every recorded change, leaving the journal empty
    pub fn drain(&mut self) -> Vec<PileChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PileChange> {
        self.changes.iter()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_records_and_drains() {
        let mut journal = PileJournal::new();
        journal.log(PileChange::MoveCard {
            card_id: CardId::new("strike#1"),
            from_zone: Zone::DrawPile,
            to_zone: Zone::Hand,
        });
        journal.log(PileChange::Reshuffle { count: 4 });

        assert_eq!(journal.len(), 2);
        assert_eq!(journal.peek(), Some(&PileChange::Reshuffle { count: 4 }));

        let drained = journal.drain();
        assert_eq!(drained.len(), 2);
        assert!(journal.is_empty());
    }

    #[test]
    fn test_disabled_journal() {
        let mut journal = PileJournal::disabled();
        journal.log(PileChange::Reshuffle { count: 1 });
        assert!(journal.is_empty());
        assert!(!journal.is_enabled());
    }
}
