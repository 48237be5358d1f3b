// Copyright 2026 the Cardtable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture state machine and its effect vocabulary.

use cardtable_decks::{Card, CardFace, DeckSlot};
use cardtable_scene::{ObjectId, ObjectKind, Rotation, Scene};
use cardtable_view2d::{CanvasTransform, ZoomDirection};
use kurbo::{Point, Vec2};

/// Pointer buttons the tabletop reacts to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PointerButton {
    /// The primary (usually left) button: drag and double-click flip.
    Primary,
    /// The middle button: canvas panning.
    Middle,
    /// The secondary (usually right) button: tap/untap, remove counters.
    Secondary,
}

/// Current phase of the gesture machine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum GesturePhase {
    /// No gesture active.
    #[default]
    Idle,
    /// Middle-button canvas pan in progress.
    Panning,
    /// A card (or counter token) is being dragged.
    DraggingCard,
    /// A pile marker is being dragged.
    DraggingPile,
}

/// An interaction outcome the embedder may need to reconcile.
///
/// Scene and view mutations have already happened when an effect is
/// returned; effects exist so the session layer can update deck state
/// ([`GestureEffect::CardReturned`]) and so observers know a redraw-worthy
/// change occurred.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEffect {
    /// A card or counter drag began; the object was raised to the front.
    DragStarted {
        /// The captured object.
        object: ObjectId,
    },
    /// A pile marker drag began.
    PileDragStarted {
        /// The captured pile marker.
        object: ObjectId,
    },
    /// A canvas pan began.
    PanStarted,
    /// The canvas panned; all objects were repositioned.
    Panned,
    /// The canvas zoomed; all objects were rescaled.
    Zoomed,
    /// A card's visible face changed.
    FaceFlipped {
        /// The flipped card object.
        object: ObjectId,
        /// The face now showing.
        face: CardFace,
    },
    /// A card's tap rotation changed.
    TapToggled {
        /// The tapped/untapped card object.
        object: ObjectId,
        /// The rotation now in effect.
        rotation: Rotation,
    },
    /// A counter token was removed.
    CounterRemoved {
        /// The removed token's (now stale) handle.
        object: ObjectId,
    },
    /// A dragged card was released over a deck zone and left the scene.
    ///
    /// The embedder puts `card` on top (`to_bottom == false`) or bottom of
    /// the addressed deck's draw pile.
    CardReturned {
        /// The card to return.
        card: Card,
        /// The deck the zone addresses.
        slot: DeckSlot,
        /// Whether the card goes to the bottom of the pile.
        to_bottom: bool,
    },
    /// A dragged card was released with no zone under it; it stays in
    /// place, lowered behind the other objects.
    CardDropped {
        /// The released object.
        object: ObjectId,
    },
}

#[derive(Clone, Copy, Debug)]
struct DragCapture {
    object: ObjectId,
    /// Object position minus pointer position at capture time.
    offset: Vec2,
}

/// Tracks the active pointer gesture across events.
///
/// One machine exists per session. All methods take the scene and view
/// transform by `&mut` so transitions, object mutations, and transform
/// updates stay atomic per event.
#[derive(Clone, Debug, Default)]
pub struct GestureMachine {
    phase: GesturePhase,
    drag: Option<DragCapture>,
}

impl GestureMachine {
    /// Creates an idle machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// The object captured by an active drag, if any.
    #[must_use]
    pub fn dragged_object(&self) -> Option<ObjectId> {
        self.drag.map(|d| d.object)
    }

    /// Handles a pointer-button press at `pt`.
    ///
    /// `click_count` is the platform's click streak for this press (2 for
    /// the second press of a double click).
    pub fn on_pointer_down(
        &mut self,
        scene: &mut Scene,
        view: &mut CanvasTransform,
        button: PointerButton,
        pt: Point,
        click_count: u8,
    ) -> Option<GestureEffect> {
        match button {
            PointerButton::Middle => {
                if self.phase != GesturePhase::Idle {
                    return None;
                }
                view.begin_pan(pt);
                self.phase = GesturePhase::Panning;
                Some(GestureEffect::PanStarted)
            }
            PointerButton::Secondary => self.on_secondary_down(scene, pt),
            PointerButton::Primary => {
                if self.phase != GesturePhase::Idle {
                    return None;
                }
                let id = scene.top_hit_at(pt)?;
                let object = scene.get(id)?;
                match &object.kind {
                    ObjectKind::Card(card) => {
                        if click_count >= 2 {
                            // Double click flips instead of dragging.
                            if !card.has_two_faces() {
                                return None;
                            }
                            let face = scene.toggle_face(id)?;
                            Some(GestureEffect::FaceFlipped { object: id, face })
                        } else {
                            self.start_drag(scene, id, pt);
                            self.phase = GesturePhase::DraggingCard;
                            Some(GestureEffect::DragStarted { object: id })
                        }
                    }
                    ObjectKind::Counter => {
                        self.start_drag(scene, id, pt);
                        self.phase = GesturePhase::DraggingCard;
                        Some(GestureEffect::DragStarted { object: id })
                    }
                    ObjectKind::Pile(_) => {
                        let position = object.position;
                        self.drag = Some(DragCapture {
                            object: id,
                            offset: position - pt,
                        });
                        self.phase = GesturePhase::DraggingPile;
                        Some(GestureEffect::PileDragStarted { object: id })
                    }
                }
            }
        }
    }

    /// Handles pointer movement to `pt`.
    pub fn on_pointer_move(
        &mut self,
        scene: &mut Scene,
        view: &mut CanvasTransform,
        pt: Point,
    ) -> Option<GestureEffect> {
        match self.phase {
            GesturePhase::Panning => {
                let step = view.pan(pt)?;
                scene.apply_to_all(step);
                Some(GestureEffect::Panned)
            }
            GesturePhase::DraggingCard | GesturePhase::DraggingPile => {
                let capture = self.drag?;
                scene.set_position(capture.object, pt + capture.offset);
                None
            }
            GesturePhase::Idle => None,
        }
    }

    /// Handles a pointer-button release at `pt`.
    pub fn on_pointer_up(
        &mut self,
        scene: &mut Scene,
        view: &mut CanvasTransform,
        button: PointerButton,
        pt: Point,
    ) -> Option<GestureEffect> {
        match (button, self.phase) {
            (PointerButton::Middle, GesturePhase::Panning) => {
                view.end_pan();
                self.phase = GesturePhase::Idle;
                None
            }
            (PointerButton::Primary, GesturePhase::DraggingCard) => {
                let capture = self.drag.take();
                self.phase = GesturePhase::Idle;
                self.resolve_drop(scene, capture?, pt)
            }
            (PointerButton::Primary, GesturePhase::DraggingPile) => {
                // Piles are repositioned but never consumed by a zone.
                self.drag = None;
                self.phase = GesturePhase::Idle;
                None
            }
            _ => None,
        }
    }

    /// Handles a scroll-wheel event at `pt` with the platform's delta.
    ///
    /// Over a two-faced card the wheel flips it; everywhere else it zooms
    /// the canvas about the pointer. A zoom refused at the scale band is a
    /// silent no-op.
    pub fn on_wheel(
        &mut self,
        scene: &mut Scene,
        view: &mut CanvasTransform,
        pt: Point,
        delta: f64,
    ) -> Option<GestureEffect> {
        if let Some(id) = scene.top_hit_at(pt)
            && let Some(object) = scene.get(id)
            && let ObjectKind::Card(card) = &object.kind
        {
            if card.has_two_faces() {
                let face = scene.toggle_face(id)?;
                return Some(GestureEffect::FaceFlipped { object: id, face });
            }
            return None;
        }

        let direction = ZoomDirection::from_scroll(delta)?;
        let step = view.zoom(direction, pt)?;
        scene.apply_to_all(step);
        Some(GestureEffect::Zoomed)
    }

    fn on_secondary_down(&mut self, scene: &mut Scene, pt: Point) -> Option<GestureEffect> {
        // Tap/untap and counter removal work regardless of the current
        // phase; they are not state-machine transitions.
        let id = scene.top_hit_at(pt)?;
        match &scene.get(id)?.kind {
            ObjectKind::Card(_) => {
                let rotation = scene.toggle_tapped(id)?;
                Some(GestureEffect::TapToggled {
                    object: id,
                    rotation,
                })
            }
            ObjectKind::Counter => {
                scene.remove(id)?;
                // Removing the dragged token would leave a stale capture.
                if self.dragged_object() == Some(id) {
                    self.drag = None;
                    if self.phase == GesturePhase::DraggingCard {
                        self.phase = GesturePhase::Idle;
                    }
                }
                Some(GestureEffect::CounterRemoved { object: id })
            }
            ObjectKind::Pile(_) => None,
        }
    }

    fn start_drag(&mut self, scene: &mut Scene, id: ObjectId, pt: Point) {
        scene.bring_to_front(id);
        let position = scene.get(id).map_or(pt, |o| o.position);
        self.drag = Some(DragCapture {
            object: id,
            offset: position - pt,
        });
    }

    fn resolve_drop(
        &mut self,
        scene: &mut Scene,
        capture: DragCapture,
        pt: Point,
    ) -> Option<GestureEffect> {
        let object = scene.get(capture.object)?;
        if object.as_card().is_none() {
            // Counter tokens are never consumed by zones; they stay where
            // released, keeping their raised z.
            return None;
        }

        // First tagged hit wins: the frontmost zone under the release point
        // receives the card exactly once.
        if let Some(zone) = scene.zones_at(pt).first().copied() {
            let removed = scene.remove(capture.object)?;
            let card = match removed.kind {
                ObjectKind::Card(card) => card,
                _ => return None,
            };
            Some(GestureEffect::CardReturned {
                card,
                slot: zone.tag.slot(),
                to_bottom: zone.tag.to_bottom(),
            })
        } else {
            scene.send_to_back(capture.object);
            Some(GestureEffect::CardDropped {
                object: capture.object,
            })
        }
    }
}
