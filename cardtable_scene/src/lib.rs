// Copyright 2026 the Cardtable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cardtable Scene: the registry of objects placed on the tabletop.
//!
//! A [`Scene`] tracks every visual on the canvas — face-up/face-down cards,
//! counter tokens, and the two deck pile markers — each with a position,
//! z-order, tap rotation, face state, and its own copy of the compounded
//! canvas transform. It provides:
//!
//! - Generational object handles ([`ObjectId`]) that never alias after slot
//!   reuse; operations on stale handles are no-ops.
//! - Point hit testing over world-space AABBs, front-to-back
//!   ([`Scene::hits_at`]).
//! - Named drop zones derived from the pile markers' current bounds
//!   ([`Scene::zones_at`]), recomputed on demand so pile moves and view
//!   changes are always reflected.
//! - [`Scene::apply_to_all`]: applying a zoom or pan
//!   [`TransformStep`](cardtable_view2d::TransformStep) to every object's
//!   stored position and render transform. Each object carries its own copy
//!   of the compounded transform rather than inheriting a parent transform;
//!   this operation is what keeps those copies consistent with the camera.
//!
//! ## Minimal example
//!
//! ```rust
//! use cardtable_decks::{Card, CardId};
//! use cardtable_scene::{PlacedObject, Scene};
//! use kurbo::{Point, Size};
//!
//! let mut scene = Scene::new();
//! let card = Card::new(CardId::new("c-1"), "Llanowar Elves", "img://front");
//! let id = scene.insert(PlacedObject::card(
//!     card,
//!     Point::new(100.0, 100.0),
//!     Size::new(179.0, 250.0),
//! ));
//!
//! let hits = scene.hits_at(Point::new(150.0, 200.0));
//! assert_eq!(hits.as_slice(), [id]);
//! ```
//!
//! ## Hit testing and stacking
//!
//! Hit tests return *all* objects under a point, sorted by z-order
//! descending with a newer-handle tie-break, so drop resolution can scan
//! front-to-back past the dragged card itself. Objects must be both visible
//! and pickable to be hit.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod scene;
mod types;

pub use scene::{Scene, ZoneHit};
pub use types::{ObjectFlags, ObjectId, ObjectKind, PlacedObject, Rotation, ZoneTag};
