// Copyright 2026 the Cardtable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deck ledgers: ordered `(card, count)` entries with merge-on-id semantics.

use alloc::string::String;
use alloc::vec::Vec;

use crate::cards::{Card, CardId};

/// One ledger line: a card and how many copies the deck runs.
///
/// `count >= 1` is an invariant of [`DeckLedger`]; an entry whose count would
/// drop to zero is removed instead.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerEntry {
    /// The card definition.
    pub card: Card,
    /// Number of copies in the deck.
    pub count: u32,
}

impl LedgerEntry {
    /// Creates an entry; a zero count is bumped to one.
    pub fn new(card: Card, count: u32) -> Self {
        Self {
            card,
            count: count.max(1),
        }
    }
}

/// The logical composition of a deck: ordered `(card, count)` entries.
///
/// This is the persisted/logical form of a deck, as opposed to the
/// session-local [`DrawPile`](crate::DrawPile). Entries keep insertion order.
/// Adding a card whose id is already present merges into the existing entry;
/// removing decrements and drops the entry at zero.
///
/// The ledger tracks whether it has unsaved changes so a persistence layer
/// can prompt before discarding. [`DeckLedger::replace`] (loading a deck)
/// resets that marker.
#[derive(Clone, Debug, Default)]
pub struct DeckLedger {
    name: String,
    entries: Vec<LedgerEntry>,
    unsaved_changes: bool,
}

impl DeckLedger {
    /// Creates an empty, unnamed ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the deck's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ledger entries in order.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the ledger has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of cards, counting copies.
    #[must_use]
    pub fn total_cards(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Number of copies of the given card id, zero if absent.
    #[must_use]
    pub fn count_of(&self, id: &CardId) -> u32 {
        self.entries
            .iter()
            .find(|e| e.card.id() == id)
            .map_or(0, |e| e.count)
    }

    /// Returns `true` if there are changes not yet persisted.
    #[must_use]
    pub fn unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    /// Clears the unsaved-changes marker after a successful save.
    pub fn mark_saved(&mut self) {
        self.unsaved_changes = false;
    }

    /// Adds one copy of a card, merging with an existing entry by id.
    pub fn add_card(&mut self, card: Card) {
        self.add_counted(card, 1);
    }

    /// Adds `count` copies of a card, merging with an existing entry by id.
    ///
    /// A zero count is a no-op.
    pub fn add_counted(&mut self, card: Card, count: u32) {
        if count == 0 {
            return;
        }
        for entry in &mut self.entries {
            if entry.card.id() == card.id() {
                entry.count += count;
                self.unsaved_changes = true;
                return;
            }
        }
        self.entries.push(LedgerEntry { card, count });
        self.unsaved_changes = true;
    }

    /// Removes one copy of the given card id.
    ///
    /// The entry is dropped when its count reaches zero. Returns `true` if a
    /// copy was removed, `false` if the id was not present.
    pub fn remove_card(&mut self, id: &CardId) -> bool {
        for i in 0..self.entries.len() {
            if self.entries[i].card.id() == id {
                self.entries[i].count -= 1;
                if self.entries[i].count == 0 {
                    self.entries.remove(i);
                }
                self.unsaved_changes = true;
                return true;
            }
        }
        false
    }

    /// Replaces the whole ledger with freshly loaded entries.
    ///
    /// Used when a deck file is opened: the new contents are by definition in
    /// sync with storage, so the unsaved-changes marker is cleared. Entries
    /// with a zero count are dropped; duplicate ids are merged in order.
    pub fn replace(&mut self, entries: Vec<LedgerEntry>, name: impl Into<String>) {
        self.name = name.into();
        self.entries.clear();
        for entry in entries {
            if entry.count == 0 {
                continue;
            }
            self.add_counted(entry.card, entry.count);
        }
        self.unsaved_changes = false;
    }
}
