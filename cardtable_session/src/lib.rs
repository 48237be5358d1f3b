// Copyright 2026 the Cardtable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cardtable Session: the deck session controller.
//!
//! A [`DeckSession`] owns everything a single deck-testing game needs: two
//! deck ledgers plus a sideboard list, their draw piles, the scene of placed
//! objects (with a persistent pile marker per deck), the canvas view
//! transform, the gesture machine, and the two life counters. It is an
//! explicit session object — constructed per game, discarded at the end —
//! with no global state.
//!
//! ## Responsibilities
//!
//! - Loading decks: [`DeckSession::load_deck`] replaces a slot's ledger and
//!   rebuilds its draw pile by expanding counts in ledger order.
//! - Play operations: [`draw`], [`draw_at`], [`draw_from_side`],
//!   [`shuffle_deck`], [`put_back`], [`place_counter`], and
//!   [`new_game`] (reset life to 20, sweep the canvas, rebuild and shuffle
//!   both piles, deal seven cards each).
//! - Pointer surface: [`pointer_down`]/[`pointer_move`]/[`pointer_up`]/
//!   [`wheel`] forward events to the gesture machine and reconcile the
//!   resulting effects (a card dropped on a deck zone goes back into that
//!   deck's draw pile).
//! - Change notification: displays call [`DeckSession::subscribe`] and are
//!   told which list changed; they then re-read the snapshots
//!   ([`pile`], [`ledger`], [`side`]). There is no implicit property
//!   propagation.
//!
//! [`draw`]: DeckSession::draw
//! [`draw_at`]: DeckSession::draw_at
//! [`draw_from_side`]: DeckSession::draw_from_side
//! [`shuffle_deck`]: DeckSession::shuffle_deck
//! [`put_back`]: DeckSession::put_back
//! [`place_counter`]: DeckSession::place_counter
//! [`new_game`]: DeckSession::new_game
//! [`pointer_down`]: DeckSession::pointer_down
//! [`pointer_move`]: DeckSession::pointer_move
//! [`pointer_up`]: DeckSession::pointer_up
//! [`wheel`]: DeckSession::wheel
//! [`pile`]: DeckSession::pile
//! [`ledger`]: DeckSession::ledger
//! [`side`]: DeckSession::side
//!
//! ## Minimal example
//!
//! ```rust
//! use cardtable_decks::{Card, CardId, DeckSlot, LedgerEntry};
//! use cardtable_session::DeckSession;
//!
//! let mut session = DeckSession::new();
//! let bear = Card::new(CardId::new("b-1"), "Bear", "img://bear");
//! session.load_deck(DeckSlot::One, vec![LedgerEntry::new(bear, 3)], "Bears");
//!
//! assert_eq!(session.pile(DeckSlot::One).len(), 3);
//! session.draw(DeckSlot::One);
//! assert_eq!(session.pile(DeckSlot::One).len(), 2);
//! ```
//!
//! ## Concurrency
//!
//! Strictly single-threaded and event-driven: every mutation happens on the
//! caller's event thread through `&mut self`, so gestures and deck
//! operations are serialized by construction. Card-image retrieval is an
//! external collaborator's concern; the session only stores image
//! references.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod session;

pub use session::{
    DeckEvent, DeckList, DeckSession, SessionDebugInfo, SubscriberId, CARD_SIZE, COUNTER_SIZE,
    OPENING_HAND_SIZE, PILE_ONE_POSITION, PILE_TWO_POSITION, STARTING_LIFE,
};
