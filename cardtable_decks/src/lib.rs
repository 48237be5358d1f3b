// Copyright 2026 the Cardtable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cardtable Decks: card records, deck ledgers, and draw piles.
//!
//! This crate provides the data model shared by the rest of the Cardtable
//! workspace:
//! - [`Card`]: an immutable card record supplied by an external data source.
//! - [`DeckLedger`]: the logical composition of a deck as ordered
//!   `(card, count)` entries, the unit of persistence.
//! - [`DrawPile`]: a session-local, orderable sequence of individual cards
//!   expanded from a ledger, the unit of play.
//!
//! It does **not** perform any I/O. Callers are expected to:
//! - Parse deck files (or fetch remote card metadata) elsewhere and hand the
//!   resulting entries to [`DeckLedger::replace`].
//! - Persist [`DeckLedger::entries`] through their own storage layer; with
//!   the `serde` feature the types serialize directly.
//!
//! ## Minimal example
//!
//! ```rust
//! use cardtable_decks::{Card, CardId, DeckLedger, DrawPile};
//!
//! let mut ledger = DeckLedger::new();
//! let bolt = Card::new(CardId::new("b-1"), "Bolt", "img://bolt-front");
//! ledger.add_counted(bolt.clone(), 2);
//! ledger.add_card(bolt); // merges: count is now 3
//! assert_eq!(ledger.total_cards(), 3);
//!
//! let mut pile = DrawPile::from_ledger(&ledger);
//! assert_eq!(pile.len(), 3);
//! let drawn = pile.draw().unwrap();
//! assert_eq!(drawn.display_name(), "Bolt");
//! ```
//!
//! ## Design notes
//!
//! - Cards are read-only value data. Transient play state (tapped, visible
//!   face) belongs to *placed instances* in the scene crate, never to the
//!   card record, so two placements of the same card never share state.
//! - Ledger entries keep insertion order; adding an already-present card id
//!   merges counts instead of appending a duplicate entry.
//! - A count that reaches zero removes the entry; `count >= 1` always holds.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod cards;
mod ledger;
mod pile;

pub use cards::{Card, CardFace, CardId, DeckSlot};
pub use ledger::{DeckLedger, LedgerEntry};
pub use pile::DrawPile;
