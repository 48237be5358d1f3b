// Copyright 2026 the Cardtable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cardtable Gesture: the pointer gesture state machine for the tabletop.
//!
//! This crate turns discrete pointer events into tabletop interactions:
//! dragging cards and pile markers, panning the canvas, tapping, flipping
//! faces, and resolving drops over deck zones. It owns only its own gesture
//! state; the scene and view transform are passed in per event, and outcomes
//! the embedder must reconcile (a card returned to a deck, a token removed)
//! are reported as [`GestureEffect`]s.
//!
//! ## States
//!
//! [`GestureMachine`] is in exactly one of four phases: `Idle`, `Panning`,
//! `DraggingCard`, or `DraggingPile`. Transitions are driven by
//! [`GestureMachine::on_pointer_down`], [`on_pointer_move`],
//! [`on_pointer_up`], and [`on_wheel`]:
//!
//! - Middle button pans; every move repositions all objects.
//! - Primary button drags the card or pile under the pointer; a double
//!   click flips a two-faced card instead of dragging.
//! - Secondary button taps/untaps cards and removes counter tokens,
//!   independent of the current phase.
//! - The wheel flips a two-faced card under the pointer, and zooms the
//!   canvas about the pointer everywhere else.
//!
//! [`on_pointer_move`]: GestureMachine::on_pointer_move
//! [`on_pointer_up`]: GestureMachine::on_pointer_up
//! [`on_wheel`]: GestureMachine::on_wheel
//!
//! ## Drop resolution
//!
//! Releasing a dragged card runs a zone query at the release point. The
//! policy is **first tagged hit wins**: the frontmost deck zone under the
//! pointer receives the card ([`GestureEffect::CardReturned`]) and the
//! visual is removed from the scene; with no zone under the pointer the
//! card stays where it was released and is sent behind the other objects.
//! A release never places a card in more than one zone.
//!
//! ## Minimal example
//!
//! ```rust
//! use cardtable_decks::{Card, CardId};
//! use cardtable_gesture::{GestureMachine, GesturePhase, PointerButton};
//! use cardtable_scene::{PlacedObject, Scene};
//! use cardtable_view2d::CanvasTransform;
//! use kurbo::{Point, Size};
//!
//! let mut scene = Scene::new();
//! let mut view = CanvasTransform::new();
//! let card = Card::new(CardId::new("c-1"), "Bear", "img://front");
//! scene.insert(PlacedObject::card(card, Point::ZERO, Size::new(100.0, 150.0)));
//!
//! let mut gestures = GestureMachine::new();
//! gestures.on_pointer_down(
//!     &mut scene,
//!     &mut view,
//!     PointerButton::Primary,
//!     Point::new(50.0, 75.0),
//!     1,
//! );
//! assert_eq!(gestures.phase(), GesturePhase::DraggingCard);
//! ```
//!
//! The machine is single-threaded by construction: it is driven through
//! `&mut self` from one event loop, so no two gestures can ever be active
//! concurrently. Releasing the pointer is the only way out of a drag.
//!
//! This crate is `no_std`.

#![no_std]

mod machine;

pub use machine::{GestureEffect, GestureMachine, GesturePhase, PointerButton};
