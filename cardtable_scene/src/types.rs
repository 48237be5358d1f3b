// Copyright 2026 the Cardtable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: object handles, flags, and placed objects.

use cardtable_decks::{Card, CardFace, DeckSlot};
use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Identifier for an object placed on the tabletop.
///
/// A small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused. It consists of a slot index
/// and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ObjectId` that pointed to
///   that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a
///   new, distinct `ObjectId`.
///
/// ### Newer
///
/// An `ObjectId` is considered newer than another when it has a higher
/// generation; if generations are equal, the higher slot index is newer.
/// This total order is used only for deterministic tie-breaks in
/// [hit testing](crate::Scene::hits_at).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObjectId(pub(crate) u32, pub(crate) u32);

impl ObjectId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn newer_than(self, other: Self) -> bool {
        if self.1 != other.1 {
            self.1 > other.1
        } else {
            self.0 > other.0
        }
    }
}

bitflags::bitflags! {
    /// Object flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u8 {
        /// Object is visible (participates in rendering and hit testing).
        const VISIBLE  = 0b0000_0001;
        /// Object is pickable (participates in hit testing).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for ObjectFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Tap rotation of a placed object.
///
/// Tapping turns a card sideways; the render transform rotates 90° about
/// the object's center and its world AABB swaps extents.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum Rotation {
    /// Upright, 0°.
    #[default]
    Untapped,
    /// Turned sideways, 90°.
    Tapped,
}

impl Rotation {
    /// Returns the other rotation state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Untapped => Self::Tapped,
            Self::Tapped => Self::Untapped,
        }
    }

    /// Rotation angle in degrees.
    #[must_use]
    pub fn degrees(self) -> f64 {
        match self {
            Self::Untapped => 0.0,
            Self::Tapped => 90.0,
        }
    }
}

/// What kind of visual a placed object is.
#[derive(Clone, Debug)]
pub enum ObjectKind {
    /// A playable card; carries the card record it represents.
    Card(Card),
    /// A free counter token (not tied to any deck).
    Counter,
    /// A deck pile marker; drop zones derive from its bounds.
    Pile(DeckSlot),
}

/// A named drop-zone region owned by a pile marker.
///
/// Top zones put a released card on top of the addressed deck's draw pile
/// (drawn next); bottom zones put it on the bottom.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ZoneTag {
    /// Top half of deck one's pile marker.
    DeckOneTop,
    /// Bottom half of deck one's pile marker.
    DeckOneBottom,
    /// Top half of deck two's pile marker.
    DeckTwoTop,
    /// Bottom half of deck two's pile marker.
    DeckTwoBottom,
}

impl ZoneTag {
    /// The deck slot this zone addresses.
    #[must_use]
    pub fn slot(self) -> DeckSlot {
        match self {
            Self::DeckOneTop | Self::DeckOneBottom => DeckSlot::One,
            Self::DeckTwoTop | Self::DeckTwoBottom => DeckSlot::Two,
        }
    }

    /// `true` if the zone addresses the bottom of the pile.
    #[must_use]
    pub fn to_bottom(self) -> bool {
        matches!(self, Self::DeckOneBottom | Self::DeckTwoBottom)
    }

    /// The zone tag for a slot and pile end.
    #[must_use]
    pub fn for_slot(slot: DeckSlot, to_bottom: bool) -> Self {
        match (slot, to_bottom) {
            (DeckSlot::One, false) => Self::DeckOneTop,
            (DeckSlot::One, true) => Self::DeckOneBottom,
            (DeckSlot::Two, false) => Self::DeckTwoTop,
            (DeckSlot::Two, true) => Self::DeckTwoBottom,
        }
    }
}

/// An object placed on the tabletop.
///
/// Positions are stored in canvas coordinates (the same space pointer events
/// arrive in). `size` is the object's base, unscaled extent; the on-screen
/// extent is `size` scaled by the render transform, which is the object's
/// own copy of the compounded canvas transform (plus tap rotation).
#[derive(Clone, Debug)]
pub struct PlacedObject {
    /// What the object is.
    pub kind: ObjectKind,
    /// Top-left corner in canvas coordinates (for the untapped layout).
    pub position: Point,
    /// Base, unscaled size.
    pub size: Size,
    /// Z-order; higher is in front.
    pub z_index: i32,
    /// Tap rotation state.
    pub rotation: Rotation,
    /// Which face is showing (meaningful for cards).
    pub face: CardFace,
    /// Visibility and picking flags.
    pub flags: ObjectFlags,
    /// The object's copy of the compounded canvas transform.
    pub render_transform: Affine,
    /// The deck slot this object was drawn from, if any.
    pub owner: Option<DeckSlot>,
}

impl PlacedObject {
    fn with_kind(kind: ObjectKind, position: Point, size: Size) -> Self {
        Self {
            kind,
            position,
            size,
            z_index: 0,
            rotation: Rotation::default(),
            face: CardFace::default(),
            flags: ObjectFlags::default(),
            render_transform: Affine::IDENTITY,
            owner: None,
        }
    }

    /// Creates a face-up, untapped card object.
    #[must_use]
    pub fn card(card: Card, position: Point, size: Size) -> Self {
        Self::with_kind(ObjectKind::Card(card), position, size)
    }

    /// Creates a counter token.
    #[must_use]
    pub fn counter(position: Point, size: Size) -> Self {
        Self::with_kind(ObjectKind::Counter, position, size)
    }

    /// Creates a pile marker for a deck slot.
    #[must_use]
    pub fn pile(slot: DeckSlot, position: Point, size: Size) -> Self {
        Self::with_kind(ObjectKind::Pile(slot), position, size)
    }

    /// Returns the card record if this object is a card.
    #[must_use]
    pub fn as_card(&self) -> Option<&Card> {
        match &self.kind {
            ObjectKind::Card(card) => Some(card),
            _ => None,
        }
    }

    /// Returns the deck slot if this object is a pile marker.
    #[must_use]
    pub fn as_pile(&self) -> Option<DeckSlot> {
        match self.kind {
            ObjectKind::Pile(slot) => Some(slot),
            _ => None,
        }
    }

    /// Uniform scale factor of the render transform.
    ///
    /// The render transform is a compounded uniform scale, translation, and
    /// tap rotation, so the scale is the length of the first column.
    #[must_use]
    pub fn render_scale(&self) -> f64 {
        let c = self.render_transform.as_coeffs();
        Vec2::new(c[0], c[1]).hypot()
    }

    /// The object's current world-space bounding box.
    ///
    /// Scaled extents around the layout center; a tapped object's extents
    /// are swapped (90° rotation about the center).
    #[must_use]
    pub fn world_aabb(&self) -> Rect {
        let scale = self.render_scale();
        let w = self.size.width * scale;
        let h = self.size.height * scale;
        let center = self.position + Vec2::new(w / 2.0, h / 2.0);
        match self.rotation {
            Rotation::Untapped => Rect::from_center_size(center, Size::new(w, h)),
            Rotation::Tapped => Rect::from_center_size(center, Size::new(h, w)),
        }
    }
}
