//! Card piles (draw pile, hand, discard pile) and the deck they come from

use crate::core::{Card, CardId};
use crate::game::rng::{shuffle, RandomSource};
use crate::journal::{PileChange, PileJournal};
use crate::{BattleError, Result};
use serde::{Deserialize, Serialize};

/// The three transient piles a battle moves cards between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    DrawPile,
    Hand,
    DiscardPile,
}

/// An ordered pile of cards. The top of a pile is the end of `cards`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardZone {
    pub zone_type: Zone,

    pub cards: Vec<Card>,
}

impl CardZone {
    pub fn new(zone_type: Zone) -> Self {
        CardZone {
            zone_type,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn position(&self, card_id: &CardId) -> Option<usize> {
        self.cards.iter().position(|c| &c.id == card_id)
    }

    /// Remove the first card with this id
    pub fn remove(&mut self, card_id: &CardId) -> Option<Card> {
        // remove() rather than swap_remove(): hand order is visible to
        // controllers and must stay stable for deterministic replays
        self.position(card_id).map(|pos| self.cards.remove(pos))
    }

    pub fn contains(&self, card_id: &CardId) -> bool {
        self.position(card_id).is_some()
    }

    pub fn get(&self, card_id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw from top
    pub fn draw_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn add_to_bottom(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    pub fn shuffle(&mut self, rng: &mut dyn RandomSource) {
        shuffle(&mut self.cards, rng);
    }

    pub fn ids(&self) -> impl Iterator<Item = &CardId> {
        self.cards.iter().map(|c| &c.id)
    }
}

/// Upgrade the first deck card with this id, returning its index
pub fn upgrade_in_deck(deck: &mut [Card], card_id: &CardId) -> Result<usize> {
    let idx = deck
        .iter()
        .position(|c| &c.id == card_id)
        .ok_or_else(|| BattleError::CardNotFound(card_id.clone()))?;
    deck[idx] = deck[idx].upgraded_variant()?;
    Ok(idx)
}

/// Deck plus the piles drawn from it for one battle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardPiles {
    pub deck: Vec<Card>,
    pub draw_pile: CardZone,
    pub hand: CardZone,
    pub discard_pile: CardZone,

    #[serde(skip)]
    journal: PileJournal,
}

impl CardPiles {
    /// Piles for `deck`, all empty until `initialize_from_deck`
    pub fn new(deck: Vec<Card>) -> Self {
        CardPiles {
            deck,
            draw_pile: CardZone::new(Zone::DrawPile),
            hand: CardZone::new(Zone::Hand),
            discard_pile: CardZone::new(Zone::DiscardPile),
            journal: PileJournal::new(),
        }
    }

    pub fn zone(&self, zone: Zone) -> &CardZone {
        match zone {
            Zone::DrawPile => &self.draw_pile,
            Zone::Hand => &self.hand,
            Zone::DiscardPile => &self.discard_pile,
        }
    }

    pub fn zone_mut(&mut self, zone: Zone) -> &mut CardZone {
        match zone {
            Zone::DrawPile => &mut self.draw_pile,
            Zone::Hand => &mut self.hand,
            Zone::DiscardPile => &mut self.discard_pile,
        }
    }

    pub fn journal(&self) -> &PileJournal {
        &self.journal
    }

    pub fn set_journal_enabled(&mut self, enabled: bool) {
        self.journal.set_enabled(enabled);
    }

    /// Take pile changes recorded since the last call
    pub fn drain_changes(&mut self) -> Vec<PileChange> {
        self.journal.drain()
    }

    /// Battle start: draw pile = shuffled deck, hand and discard empty
    pub fn initialize_from_deck(&mut self, rng: &mut dyn RandomSource) {
        self.draw_pile.cards = self.deck.clone();
        self.draw_pile.shuffle(rng);
        self.hand.cards.clear();
        self.discard_pile.cards.clear();
    }

    /// Draw up to `count` cards into hand, reshuffling the discard pile when
    /// the draw pile runs out. Returns the ids drawn (possibly fewer).
    pub fn draw(&mut self, count: usize, rng: &mut dyn RandomSource) -> Vec<CardId> {
        let available = self.draw_pile.len() + self.discard_pile.len();
        let mut drawn = Vec::with_capacity(count.min(available));
        for _ in 0..count {
            if self.draw_pile.is_empty() {
                if self.discard_pile.is_empty() {
                    break;
                }
                self.shuffle_discard_into_draw(rng);
            }

            if let Some(card) = self.draw_pile.draw_top() {
                self.journal.log(PileChange::MoveCard {
                    card_id: card.id.clone(),
                    from_zone: Zone::DrawPile,
                    to_zone: Zone::Hand,
                });
                drawn.push(card.id.clone());
                self.hand.add(card);
            }
        }
        drawn
    }

    /// Move all of the discard pile onto the draw pile and shuffle it
    pub fn shuffle_discard_into_draw(&mut self, rng: &mut dyn RandomSource) {
        let count = self.discard_pile.len();
        if count == 0 {
            return;
        }
        self.draw_pile.cards.append(&mut self.discard_pile.cards);
        self.draw_pile.shuffle(rng);
        self.journal.log(PileChange::Reshuffle { count });
    }

    /// Move a card from hand to the discard pile, returning a copy of it
    pub fn discard(&mut self, card_id: &CardId) -> Result<Card> {
        let card = self
            .hand
            .remove(card_id)
            .ok_or_else(|| BattleError::CardNotFound(card_id.clone()))?;
        self.journal.log(PileChange::MoveCard {
            card_id: card.id.clone(),
            from_zone: Zone::Hand,
            to_zone: Zone::DiscardPile,
        });
        self.discard_pile.add(card.clone());
        Ok(card)
    }

    /// End-of-turn cleanup: the whole hand goes to the discard pile
    pub fn discard_hand(&mut self) -> usize {
        let cards = std::mem::take(&mut self.hand.cards);
        let count = cards.len();
        for card in cards {
            self.journal.log(PileChange::MoveCard {
                card_id: card.id.clone(),
                from_zone: Zone::Hand,
                to_zone: Zone::DiscardPile,
            });
            self.discard_pile.add(card);
        }
        count
    }

    /// Discard up to `count` cards from the end of the hand
    pub fn discard_from_hand_end(&mut self, count: usize) -> Vec<CardId> {
        let mut discarded = Vec::new();
        for _ in 0..count {
            let Some(card) = self.hand.draw_top() else {
                break;
            };
            self.journal.log(PileChange::MoveCard {
                card_id: card.id.clone(),
                from_zone: Zone::Hand,
                to_zone: Zone::DiscardPile,
            });
            discarded.push(card.id.clone());
            self.discard_pile.add(card);
        }
        discarded
    }

    /// Permanently add a card. Mid-battle it enters the discard pile.
    pub fn add_card_to_deck(&mut self, card: Card) {
        self.journal.log(PileChange::AddToDeck {
            card_id: card.id.clone(),
            to_zone: Some(Zone::DiscardPile),
        });
        self.deck.push(card.clone());
        self.discard_pile.add(card);
    }

    /// Permanently remove a card from the deck and from whichever pile holds
    /// it. No minimum-size floor applies while a battle runs.
    pub fn remove_card_from_deck(&mut self, card_id: &CardId) -> Result<Card> {
        let pos = self
            .deck
            .iter()
            .position(|c| &c.id == card_id)
            .ok_or_else(|| BattleError::CardNotFound(card_id.clone()))?;
        let card = self.deck.remove(pos);

        let mut from_zone = None;
        for zone in [Zone::DrawPile, Zone::Hand, Zone::DiscardPile] {
            if self.zone_mut(zone).remove(card_id).is_some() {
                from_zone = Some(zone);
                break;
            }
        }

        self.journal.log(PileChange::RemoveFromDeck {
            card_id: card_id.clone(),
            from_zone,
        });
        Ok(card)
    }

    /// Upgrade a card in the deck and mirror it into the pile holding it
    pub fn upgrade_card(&mut self, card_id: &CardId) -> Result<&Card> {
        let idx = upgrade_in_deck(&mut self.deck, card_id)?;
        let upgraded = self.deck[idx].clone();

        for zone in [Zone::DrawPile, Zone::Hand, Zone::DiscardPile] {
            let pile = self.zone_mut(zone);
            if let Some(slot) = pile
                .cards
                .iter_mut()
                .find(|c| &c.id == card_id && !c.upgraded)
            {
                *slot = upgraded.clone();
                break;
            }
        }

        self.journal.log(PileChange::Upgrade {
            card_id: card_id.clone(),
        });
        Ok(&self.deck[idx])
    }

    /// Total cards across the three transient piles
    pub fn transient_len(&self) -> usize {
        self.draw_pile.len() + self.hand.len() + self.discard_pile.len()
    }

    /// The id multiset across the piles equals the deck's
    pub fn is_conserved(&self) -> bool {
        let mut pile_ids: Vec<&CardId> = self
            .draw_pile
            .ids()
            .chain(self.hand.ids())
            .chain(self.discard_pile.ids())
            .collect();
        let mut deck_ids: Vec<&CardId> = self.deck.iter().map(|c| &c.id).collect();
        pile_ids.sort();
        deck_ids.sort();
        pile_ids == deck_ids
    }
}
