// Copyright 2026 the Cardtable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable card records and the small enums shared across the workspace.

use alloc::string::String;
use core::fmt;

/// Opaque unique identifier of a card definition.
///
/// Identity of a card is its id, as assigned by the external card-data
/// service; two records with the same id are the same card regardless of any
/// other field.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CardId(String);

impl CardId {
    /// Creates an id from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which face of a card is currently showing.
///
/// Stored per placed instance, not on the [`Card`] record.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardFace {
    /// The primary (front) face.
    #[default]
    Front,
    /// The secondary (back) face, present only on two-faced cards.
    Back,
}

impl CardFace {
    /// Returns the other face.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// One of the two deck slots in a session.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeckSlot {
    /// Player one's deck.
    One,
    /// Player two's deck.
    Two,
}

impl DeckSlot {
    /// Zero-based index of the slot, for array-shaped per-slot state.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

/// An immutable card record supplied by the external card-data collaborator.
///
/// The record carries identity, a display name, and image references for one
/// or two faces. A card with a back image is "two-faced": placed instances of
/// it may flip between faces. All play state lives outside this type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    id: CardId,
    display_name: String,
    front_image: String,
    back_image: Option<String>,
}

impl Card {
    /// Creates a single-faced card.
    pub fn new(
        id: CardId,
        display_name: impl Into<String>,
        front_image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            front_image: front_image.into(),
            back_image: None,
        }
    }

    /// Adds a back face, making this a two-faced card.
    #[must_use]
    pub fn with_back_face(mut self, back_image: impl Into<String>) -> Self {
        self.back_image = Some(back_image.into());
        self
    }

    /// Returns the card's id.
    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.id
    }

    /// Returns the card's display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns `true` if the card has a back face to flip to.
    #[must_use]
    pub fn has_two_faces(&self) -> bool {
        self.back_image.is_some()
    }

    /// Returns the image reference for a face.
    ///
    /// `None` for [`CardFace::Back`] on a single-faced card.
    #[must_use]
    pub fn image_for(&self, face: CardFace) -> Option<&str> {
        match face {
            CardFace::Front => Some(&self.front_image),
            CardFace::Back => self.back_image.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> Card {
        Card::new(CardId::new(id), "Test Card", "img://front")
    }

    #[test]
    fn single_faced_card_has_no_back_image() {
        let c = card("a");
        assert!(!c.has_two_faces());
        assert_eq!(c.image_for(CardFace::Front), Some("img://front"));
        assert_eq!(c.image_for(CardFace::Back), None);
    }

    #[test]
    fn two_faced_card_exposes_both_images() {
        let c = card("a").with_back_face("img://back");
        assert!(c.has_two_faces());
        assert_eq!(c.image_for(CardFace::Back), Some("img://back"));
    }

    #[test]
    fn face_flip_is_an_involution() {
        assert_eq!(CardFace::Front.flipped(), CardFace::Back);
        assert_eq!(CardFace::Front.flipped().flipped(), CardFace::Front);
    }

    #[test]
    fn slot_indices_are_stable() {
        assert_eq!(DeckSlot::One.index(), 0);
        assert_eq!(DeckSlot::Two.index(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn card_round_trips_through_json() {
        let c = card("abc-123").with_back_face("img://back");
        let json = serde_json::to_string(&c).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
