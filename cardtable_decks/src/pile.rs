// Copyright 2026 the Cardtable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw piles: a ledger expanded into individual, orderable card instances.

use alloc::vec::Vec;

use crate::cards::Card;
use crate::ledger::DeckLedger;

/// A session-local flat sequence of cards derived from a [`DeckLedger`].
///
/// Index 0 is the top of the pile: [`DrawPile::draw`] pops from the front.
/// The pile starts in ledger iteration order (each entry repeated `count`
/// times) and is reordered only by an explicit shuffle or by cards being
/// put back on top or bottom.
///
/// Piles are never shared between decks; each session slot owns its own.
#[derive(Clone, Debug, Default)]
pub struct DrawPile {
    cards: Vec<Card>,
}

impl DrawPile {
    /// Creates an empty pile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expands a ledger into a pile, in ledger order, before any shuffle.
    #[must_use]
    pub fn from_ledger(ledger: &DeckLedger) -> Self {
        let mut cards = Vec::with_capacity(usize::try_from(ledger.total_cards()).unwrap_or_default());
        for entry in ledger.entries() {
            for _ in 0..entry.count {
                cards.push(entry.card.clone());
            }
        }
        Self { cards }
    }

    /// Number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns `true` if the pile has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The remaining cards, top first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Mutable access for in-place reordering (shuffling).
    #[must_use]
    pub fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    /// Draws the top card. `None` on an empty pile.
    pub fn draw(&mut self) -> Option<Card> {
        self.draw_at(0)
    }

    /// Draws the card at `index` (0 = top). `None` if out of range.
    pub fn draw_at(&mut self, index: usize) -> Option<Card> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    /// Puts a card on top of the pile (drawn next).
    pub fn put_top(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    /// Puts a card on the bottom of the pile (drawn last).
    pub fn put_bottom(&mut self, card: Card) {
        self.cards.push(card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::ledger::LedgerEntry;
    use alloc::vec;

    fn card(id: &str) -> Card {
        Card::new(CardId::new(id), id, "img://front")
    }

    fn ledger(entries: Vec<LedgerEntry>) -> DeckLedger {
        let mut l = DeckLedger::new();
        l.replace(entries, "test");
        l
    }

    #[test]
    fn expansion_repeats_counts_in_ledger_order() {
        let l = ledger(vec![
            LedgerEntry::new(card("a"), 2),
            LedgerEntry::new(card("b"), 1),
        ]);
        let pile = DrawPile::from_ledger(&l);

        let ids: Vec<&str> = pile.cards().iter().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, ["a", "a", "b"]);
    }

    #[test]
    fn draw_pops_the_top() {
        let l = ledger(vec![
            LedgerEntry::new(card("a"), 1),
            LedgerEntry::new(card("b"), 1),
        ]);
        let mut pile = DrawPile::from_ledger(&l);

        assert_eq!(pile.draw().unwrap().id().as_str(), "a");
        assert_eq!(pile.len(), 1);
        assert_eq!(pile.draw().unwrap().id().as_str(), "b");
        assert!(pile.draw().is_none());
    }

    #[test]
    fn draw_at_removes_the_chosen_index() {
        let l = ledger(vec![
            LedgerEntry::new(card("a"), 1),
            LedgerEntry::new(card("b"), 1),
            LedgerEntry::new(card("c"), 1),
        ]);
        let mut pile = DrawPile::from_ledger(&l);

        assert_eq!(pile.draw_at(1).unwrap().id().as_str(), "b");
        assert_eq!(pile.len(), 2);
        assert!(pile.draw_at(5).is_none());
        assert_eq!(pile.len(), 2);
    }

    #[test]
    fn put_top_is_drawn_next_put_bottom_last() {
        let mut pile = DrawPile::new();
        pile.put_bottom(card("a"));
        pile.put_top(card("b"));
        pile.put_bottom(card("c"));

        assert_eq!(pile.draw().unwrap().id().as_str(), "b");
        assert_eq!(pile.draw().unwrap().id().as_str(), "a");
        assert_eq!(pile.draw().unwrap().id().as_str(), "c");
    }
}
