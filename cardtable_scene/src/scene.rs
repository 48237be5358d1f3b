// Copyright 2026 the Cardtable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The object registry: insertion, queries, and whole-scene transforms.

use alloc::vec::Vec;

use cardtable_decks::{CardFace, DeckSlot};
use cardtable_view2d::TransformStep;
use kurbo::{Affine, Point, Rect};
use smallvec::SmallVec;

use crate::types::{ObjectFlags, ObjectId, ObjectKind, PlacedObject, Rotation, ZoneTag};

/// A drop zone found under a point.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ZoneHit {
    /// The pile marker owning the zone.
    pub pile: ObjectId,
    /// Which zone of that pile was hit.
    pub tag: ZoneTag,
}

struct Slot {
    generation: u32,
    object: Option<PlacedObject>,
}

/// Registry of every object placed on the tabletop.
///
/// A flat slot vector with linear scans: small and simple, right for the
/// tens of objects a deck-testing session produces. Handles are
/// generational ([`ObjectId`]); operations on stale handles are no-ops.
#[derive(Default)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scene")
            .field("total_slots", &self.slots.len())
            .field("alive", &self.len())
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.object.is_some()).count()
    }

    /// Returns `true` if no objects are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Places an object, returning its handle.
    pub fn insert(&mut self, object: PlacedObject) -> ObjectId {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.object = Some(object);
            ObjectId::new(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 1,
                object: Some(object),
            });
            ObjectId::new(idx, 1)
        }
    }

    /// Removes an object, returning it. `None` for stale handles.
    pub fn remove(&mut self, id: ObjectId) -> Option<PlacedObject> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        let object = slot.object.take()?;
        self.free.push(id.0);
        Some(object)
    }

    /// Returns `true` if the handle refers to a live object.
    #[must_use]
    pub fn is_alive(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Borrows an object. `None` for stale handles.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.object.as_ref()
    }

    /// Mutably borrows an object. `None` for stale handles.
    #[must_use]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut PlacedObject> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.object.as_mut()
    }

    /// Iterates over live objects with their handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &PlacedObject)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            let object = slot.object.as_ref()?;
            let idx = u32::try_from(idx).ok()?;
            Some((ObjectId::new(idx, slot.generation), object))
        })
    }

    /// Keeps only the objects for which the predicate returns `true`.
    ///
    /// Used by the new-game sweep, which preserves the pile markers and
    /// clears everything else.
    pub fn retain(&mut self, mut keep: impl FnMut(ObjectId, &PlacedObject) -> bool) {
        for idx in 0..self.slots.len() {
            let Ok(idx32) = u32::try_from(idx) else {
                continue;
            };
            let slot = &mut self.slots[idx];
            let id = ObjectId::new(idx32, slot.generation);
            if let Some(object) = &slot.object
                && !keep(id, object)
            {
                slot.object = None;
                self.free.push(id.0);
            }
        }
    }

    /// Sets an object's position. No-op for stale handles.
    pub fn set_position(&mut self, id: ObjectId, position: Point) -> bool {
        if let Some(object) = self.get_mut(id) {
            object.position = position;
            true
        } else {
            false
        }
    }

    /// Sets an object's z-order directly. No-op for stale handles.
    pub fn set_z_index(&mut self, id: ObjectId, z_index: i32) -> bool {
        if let Some(object) = self.get_mut(id) {
            object.z_index = z_index;
            true
        } else {
            false
        }
    }

    /// Reassigns which deck slot an object belongs to (`None` detaches it).
    ///
    /// No-op for stale handles.
    pub fn set_owner(&mut self, id: ObjectId, owner: Option<DeckSlot>) -> bool {
        if let Some(object) = self.get_mut(id) {
            object.owner = owner;
            true
        } else {
            false
        }
    }

    /// Raises an object above everything else.
    pub fn bring_to_front(&mut self, id: ObjectId) -> bool {
        let front = self.max_z() + 1;
        if let Some(object) = self.get_mut(id) {
            object.z_index = front;
            true
        } else {
            false
        }
    }

    /// Lowers an object behind everything else.
    pub fn send_to_back(&mut self, id: ObjectId) -> bool {
        let back = self.min_z() - 1;
        if let Some(object) = self.get_mut(id) {
            object.z_index = back;
            true
        } else {
            false
        }
    }

    /// Toggles an object's tap rotation, rotating its render transform ±90°
    /// about the object's center.
    ///
    /// Returns the new rotation, or `None` for stale handles. Whether an
    /// object *should* tap (cards yes, piles no) is the gesture layer's
    /// policy.
    pub fn toggle_tapped(&mut self, id: ObjectId) -> Option<Rotation> {
        let object = self.get_mut(id)?;
        let angle = match object.rotation {
            Rotation::Untapped => core::f64::consts::FRAC_PI_2,
            Rotation::Tapped => -core::f64::consts::FRAC_PI_2,
        };
        // Rotation is prepended: it acts in the object's local space, about
        // the render origin at the object's center.
        object.render_transform = object.render_transform * Affine::rotate(angle);
        object.rotation = object.rotation.toggled();
        Some(object.rotation)
    }

    /// Flips which face of a card is showing.
    ///
    /// Returns the new face, or `None` when the handle is stale, the object
    /// is not a card, or the card has only one face (all silent no-ops).
    pub fn toggle_face(&mut self, id: ObjectId) -> Option<CardFace> {
        let object = self.get_mut(id)?;
        match &object.kind {
            ObjectKind::Card(card) if card.has_two_faces() => {
                object.face = object.face.flipped();
                Some(object.face)
            }
            _ => None,
        }
    }

    /// Applies a zoom or pan step to every live object.
    ///
    /// Zoom scales each stored position about the step's pivot and composes
    /// the same scaling onto each render transform; pan adds the step's
    /// object-space delta to each position.
    pub fn apply_to_all(&mut self, step: TransformStep) {
        for slot in &mut self.slots {
            let Some(object) = slot.object.as_mut() else {
                continue;
            };
            match step {
                TransformStep::Zoom { factor, pivot } => {
                    object.position = pivot + (object.position - pivot) * factor;
                    object.render_transform = scale_about(factor, pivot) * object.render_transform;
                }
                TransformStep::Pan { delta } => {
                    object.position += delta;
                }
            }
        }
    }

    /// All objects under a point, front to back.
    ///
    /// Candidates must be visible and pickable. Results are sorted by
    /// z-order descending; equal z resolves to the newer handle first.
    #[must_use]
    pub fn hits_at(&self, pt: Point) -> SmallVec<[ObjectId; 8]> {
        let mut hits: SmallVec<[(ObjectId, i32); 8]> = SmallVec::new();
        for (id, object) in self.iter() {
            if object.flags.contains(ObjectFlags::VISIBLE | ObjectFlags::PICKABLE)
                && object.world_aabb().contains(pt)
            {
                hits.push((id, object.z_index));
            }
        }
        hits.sort_unstable_by(|a, b| match b.1.cmp(&a.1) {
            core::cmp::Ordering::Equal => {
                if a.0.newer_than(b.0) {
                    core::cmp::Ordering::Less
                } else {
                    core::cmp::Ordering::Greater
                }
            }
            other => other,
        });
        hits.into_iter().map(|(id, _)| id).collect()
    }

    /// The frontmost object under a point, if any.
    #[must_use]
    pub fn top_hit_at(&self, pt: Point) -> Option<ObjectId> {
        self.hits_at(pt).first().copied()
    }

    /// Drop zones under a point, front to back.
    ///
    /// Every visible, pickable pile marker whose bounds contain the point
    /// contributes one zone: the top half of its AABB addresses the top of
    /// that deck's pile, the bottom half the bottom. Zone geometry is
    /// derived from the pile's current bounds, so pile drags and view
    /// changes never leave zones stale.
    #[must_use]
    pub fn zones_at(&self, pt: Point) -> SmallVec<[ZoneHit; 4]> {
        let mut zones: SmallVec<[(ZoneHit, i32); 4]> = SmallVec::new();
        for (id, object) in self.iter() {
            let Some(slot) = object.as_pile() else {
                continue;
            };
            if !object.flags.contains(ObjectFlags::VISIBLE | ObjectFlags::PICKABLE) {
                continue;
            }
            let aabb = object.world_aabb();
            if !aabb.contains(pt) {
                continue;
            }
            let to_bottom = pt.y >= aabb.center().y;
            zones.push((
                ZoneHit {
                    pile: id,
                    tag: ZoneTag::for_slot(slot, to_bottom),
                },
                object.z_index,
            ));
        }
        zones.sort_unstable_by(|a, b| match b.1.cmp(&a.1) {
            core::cmp::Ordering::Equal => {
                if a.0.pile.newer_than(b.0.pile) {
                    core::cmp::Ordering::Less
                } else {
                    core::cmp::Ordering::Greater
                }
            }
            other => other,
        });
        zones.into_iter().map(|(zone, _)| zone).collect()
    }

    /// The top/bottom zone rectangles of a pile marker.
    ///
    /// `None` when the handle is stale or not a pile. Intended for display
    /// layers that want to render the zones.
    #[must_use]
    pub fn zone_rects(&self, id: ObjectId) -> Option<(Rect, Rect)> {
        let object = self.get(id)?;
        object.as_pile()?;
        let aabb = object.world_aabb();
        let mid = aabb.center().y;
        let top = Rect::new(aabb.x0, aabb.y0, aabb.x1, mid);
        let bottom = Rect::new(aabb.x0, mid, aabb.x1, aabb.y1);
        Some((top, bottom))
    }

    fn max_z(&self) -> i32 {
        self.iter().map(|(_, o)| o.z_index).max().unwrap_or(0)
    }

    fn min_z(&self) -> i32 {
        self.iter().map(|(_, o)| o.z_index).min().unwrap_or(0)
    }
}

/// Scale about a fixed point, composed from the primitives.
fn scale_about(factor: f64, pivot: Point) -> Affine {
    Affine::translate(pivot.to_vec2()) * Affine::scale(factor) * Affine::translate(-pivot.to_vec2())
}
