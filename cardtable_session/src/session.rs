// Copyright 2026 the Cardtable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The session object and its change-notification seam.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use cardtable_decks::{Card, DeckLedger, DeckSlot, DrawPile, LedgerEntry};
use cardtable_gesture::{GestureEffect, GestureMachine, GesturePhase, PointerButton};
use cardtable_scene::{ObjectId, ObjectKind, PlacedObject, Scene};
use cardtable_shuffle::shuffle;
use cardtable_view2d::CanvasTransform;
use hashbrown::HashMap;
use kurbo::{Point, Size};

/// Base card size on the canvas, before zoom.
pub const CARD_SIZE: Size = Size::new(179.0, 250.0);
/// Base counter-token size on the canvas, before zoom.
pub const COUNTER_SIZE: Size = Size::new(40.0, 40.0);
/// Where deck one's pile marker starts.
pub const PILE_ONE_POSITION: Point = Point::new(40.0, 60.0);
/// Where deck two's pile marker starts.
pub const PILE_TWO_POSITION: Point = Point::new(40.0, 380.0);
/// Life total both players start a game with.
pub const STARTING_LIFE: i32 = 20;
/// Cards dealt to each player by [`DeckSession::new_game`].
pub const OPENING_HAND_SIZE: usize = 7;

/// Gap between a pile marker and a freshly drawn card, before zoom.
const DRAW_GAP: f64 = 20.0;

/// Which bound list a change notification refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DeckList {
    /// Deck one's draw list.
    One,
    /// Deck two's draw list.
    Two,
    /// The sideboard list.
    Side,
}

impl DeckList {
    fn from_slot(slot: DeckSlot) -> Self {
        match slot {
            DeckSlot::One => Self::One,
            DeckSlot::Two => Self::Two,
        }
    }
}

/// A "deck changed" notification delivered to subscribers.
///
/// Subscribers re-read the session's snapshots; the event only says which
/// list is stale.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DeckEvent {
    /// The list whose contents changed.
    pub list: DeckList,
}

/// Handle for cancelling a subscription.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn FnMut(DeckEvent)>;

/// A deck-testing game session.
///
/// Owns both deck ledgers, the sideboard, both draw piles, the scene (with
/// one persistent pile marker per deck), the canvas transform, the gesture
/// machine, and the life counters. See the crate docs for an overview.
pub struct DeckSession {
    ledgers: [DeckLedger; 2],
    side: DeckLedger,
    piles: [DrawPile; 2],
    scene: Scene,
    view: CanvasTransform,
    gestures: GestureMachine,
    pile_markers: [ObjectId; 2],
    life: [i32; 2],
    list_visible: [bool; 2],
    subscribers: HashMap<SubscriberId, Subscriber>,
    next_subscriber: u64,
}

impl core::fmt::Debug for DeckSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeckSession")
            .field("pile_lens", &[self.piles[0].len(), self.piles[1].len()])
            .field("placed_objects", &self.scene.len())
            .field("life", &self.life)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Default for DeckSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckSession {
    /// Creates a fresh session with empty decks and the two pile markers
    /// placed at their starting positions.
    #[must_use]
    pub fn new() -> Self {
        let mut scene = Scene::new();
        let pile_markers = [
            scene.insert(PlacedObject::pile(DeckSlot::One, PILE_ONE_POSITION, CARD_SIZE)),
            scene.insert(PlacedObject::pile(DeckSlot::Two, PILE_TWO_POSITION, CARD_SIZE)),
        ];
        Self {
            ledgers: [DeckLedger::new(), DeckLedger::new()],
            side: DeckLedger::new(),
            piles: [DrawPile::new(), DrawPile::new()],
            scene,
            view: CanvasTransform::new(),
            gestures: GestureMachine::new(),
            pile_markers,
            life: [STARTING_LIFE; 2],
            list_visible: [true; 2],
            subscribers: HashMap::new(),
            next_subscriber: 0,
        }
    }

    // ---- snapshots ---------------------------------------------------

    /// The ledger behind a deck slot.
    #[must_use]
    pub fn ledger(&self, slot: DeckSlot) -> &DeckLedger {
        &self.ledgers[slot.index()]
    }

    /// The sideboard list.
    #[must_use]
    pub fn side(&self) -> &DeckLedger {
        &self.side
    }

    /// The draw pile of a deck slot (what the bound list displays).
    #[must_use]
    pub fn pile(&self, slot: DeckSlot) -> &DrawPile {
        &self.piles[slot.index()]
    }

    /// The scene of placed objects.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The canvas view transform.
    #[must_use]
    pub fn view(&self) -> &CanvasTransform {
        &self.view
    }

    /// The pile marker object for a deck slot.
    #[must_use]
    pub fn pile_marker(&self, slot: DeckSlot) -> ObjectId {
        self.pile_markers[slot.index()]
    }

    /// Current phase of the gesture machine.
    #[must_use]
    pub fn gesture_phase(&self) -> GesturePhase {
        self.gestures.phase()
    }

    /// A player's current life total.
    #[must_use]
    pub fn life(&self, player: DeckSlot) -> i32 {
        self.life[player.index()]
    }

    /// Adjusts a player's life total by a delta (negative for damage).
    pub fn adjust_life(&mut self, player: DeckSlot, delta: i32) -> i32 {
        let life = &mut self.life[player.index()];
        *life += delta;
        *life
    }

    /// Whether a slot's bound list should be shown.
    #[must_use]
    pub fn list_visible(&self, slot: DeckSlot) -> bool {
        self.list_visible[slot.index()]
    }

    /// Shows or hides a slot's bound list.
    pub fn set_list_visible(&mut self, slot: DeckSlot, visible: bool) {
        self.list_visible[slot.index()] = visible;
    }

    /// Toggles a slot's list visibility, returning the new state.
    pub fn toggle_list_visible(&mut self, slot: DeckSlot) -> bool {
        let visible = &mut self.list_visible[slot.index()];
        *visible = !*visible;
        *visible
    }

    // ---- change notification -----------------------------------------

    /// Registers a "deck changed" listener.
    ///
    /// The listener is called with the list that changed; it should re-read
    /// the session's snapshots rather than expect payload data.
    pub fn subscribe(&mut self, listener: impl FnMut(DeckEvent) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.insert(id, Box::new(listener));
        id
    }

    /// Removes a listener. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    fn notify(&mut self, list: DeckList) {
        let event = DeckEvent { list };
        for listener in self.subscribers.values_mut() {
            listener(event);
        }
    }

    // ---- deck operations ---------------------------------------------

    /// Replaces a slot's deck with freshly loaded entries and rebuilds its
    /// draw pile in ledger order.
    ///
    /// Only called with successfully parsed data; a failed load is surfaced
    /// by the I/O collaborator and leaves the session untouched.
    pub fn load_deck(&mut self, slot: DeckSlot, entries: Vec<LedgerEntry>, name: impl Into<String>) {
        let idx = slot.index();
        self.ledgers[idx].replace(entries, name);
        self.piles[idx] = DrawPile::from_ledger(&self.ledgers[idx]);
        self.notify(DeckList::from_slot(slot));
    }

    /// Replaces the sideboard list.
    pub fn load_side(&mut self, entries: Vec<LedgerEntry>, name: impl Into<String>) {
        self.side.replace(entries, name);
        self.notify(DeckList::Side);
    }

    /// Shuffles a slot's draw pile.
    pub fn shuffle_deck(&mut self, slot: DeckSlot) {
        shuffle(self.piles[slot.index()].cards_mut());
        self.notify(DeckList::from_slot(slot));
    }

    /// Draws the top card of a slot's pile onto the canvas.
    ///
    /// No-op (`None`) on an empty pile.
    pub fn draw(&mut self, slot: DeckSlot) -> Option<ObjectId> {
        self.draw_at(slot, 0)
    }

    /// Draws the card at `index` of a slot's pile onto the canvas
    /// ("draw selected"). No-op (`None`) when out of range.
    pub fn draw_at(&mut self, slot: DeckSlot, index: usize) -> Option<ObjectId> {
        let card = self.piles[slot.index()].draw_at(index)?;
        let id = self.place_beside_pile(slot, card);
        self.notify(DeckList::from_slot(slot));
        Some(id)
    }

    /// Places a sideboard card onto the canvas without consuming it.
    ///
    /// The sideboard is a browsing source: drawing from it never removes
    /// the card from the list, so no notification fires.
    pub fn draw_from_side(&mut self, index: usize) -> Option<ObjectId> {
        let card = self.side.entries().get(index)?.card.clone();
        Some(self.place_beside_pile(DeckSlot::One, card))
    }

    /// Puts a card on top or bottom of a slot's draw pile.
    pub fn put_back(&mut self, card: Card, slot: DeckSlot, to_bottom: bool) {
        let pile = &mut self.piles[slot.index()];
        if to_bottom {
            pile.put_bottom(card);
        } else {
            pile.put_top(card);
        }
        self.notify(DeckList::from_slot(slot));
    }

    /// Places a free counter token at a canvas position.
    pub fn place_counter(&mut self, position: Point) -> ObjectId {
        let mut token = PlacedObject::counter(position, COUNTER_SIZE);
        token.render_transform = self.view.matrix();
        let id = self.scene.insert(token);
        self.scene.bring_to_front(id);
        id
    }

    /// Starts a new game.
    ///
    /// Resets both life totals, clears every placed object except the two
    /// pile markers, rebuilds both draw piles from their ledgers, shuffles
    /// them, and deals seven cards to each player, alternating.
    pub fn new_game(&mut self) {
        self.life = [STARTING_LIFE; 2];

        let markers = self.pile_markers;
        self.scene.retain(|id, _| markers.contains(&id));

        for slot in [DeckSlot::One, DeckSlot::Two] {
            let idx = slot.index();
            self.piles[idx] = DrawPile::from_ledger(&self.ledgers[idx]);
            shuffle(self.piles[idx].cards_mut());
            self.notify(DeckList::from_slot(slot));
        }

        for _ in 0..OPENING_HAND_SIZE {
            self.draw(DeckSlot::One);
            self.draw(DeckSlot::Two);
        }
    }

    // ---- pointer surface ---------------------------------------------

    /// Forwards a pointer press to the gesture machine and reconciles the
    /// resulting effect.
    pub fn pointer_down(
        &mut self,
        button: PointerButton,
        pt: Point,
        click_count: u8,
    ) -> Option<GestureEffect> {
        let effect =
            self.gestures
                .on_pointer_down(&mut self.scene, &mut self.view, button, pt, click_count);
        self.apply_effect(effect)
    }

    /// Forwards pointer movement to the gesture machine.
    pub fn pointer_move(&mut self, pt: Point) -> Option<GestureEffect> {
        let effect = self.gestures.on_pointer_move(&mut self.scene, &mut self.view, pt);
        self.apply_effect(effect)
    }

    /// Forwards a pointer release to the gesture machine and reconciles the
    /// resulting effect (a card released over a deck zone goes back into
    /// that deck's draw pile).
    pub fn pointer_up(&mut self, button: PointerButton, pt: Point) -> Option<GestureEffect> {
        let effect = self
            .gestures
            .on_pointer_up(&mut self.scene, &mut self.view, button, pt);
        self.apply_effect(effect)
    }

    /// Forwards a scroll-wheel event to the gesture machine.
    pub fn wheel(&mut self, pt: Point, delta: f64) -> Option<GestureEffect> {
        let effect = self
            .gestures
            .on_wheel(&mut self.scene, &mut self.view, pt, delta);
        self.apply_effect(effect)
    }

    /// Snapshot of the session state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> SessionDebugInfo {
        let placed_cards = self
            .scene
            .iter()
            .filter(|(_, o)| matches!(o.kind, ObjectKind::Card(_)))
            .count();
        SessionDebugInfo {
            pile_lens: [self.piles[0].len(), self.piles[1].len()],
            placed_objects: self.scene.len(),
            placed_cards,
            scale: self.view.scale(),
            life: self.life,
            phase: self.gestures.phase(),
        }
    }

    fn apply_effect(&mut self, effect: Option<GestureEffect>) -> Option<GestureEffect> {
        if let Some(GestureEffect::CardReturned {
            card,
            slot,
            to_bottom,
        }) = &effect
        {
            let pile = &mut self.piles[slot.index()];
            if *to_bottom {
                pile.put_bottom(card.clone());
            } else {
                pile.put_top(card.clone());
            }
            self.notify(DeckList::from_slot(*slot));
        }
        effect
    }

    /// Creates a card visual anchored beside a slot's pile marker, offset by
    /// the pile width plus a gap, both scaled by the current zoom. The new
    /// object copies the compounded canvas matrix as its render transform.
    fn place_beside_pile(&mut self, slot: DeckSlot, card: Card) -> ObjectId {
        let marker = self
            .scene
            .get(self.pile_markers[slot.index()])
            .map_or(PILE_ONE_POSITION, |m| m.position);
        let scale = self.view.scale();
        let position = Point::new(marker.x + (CARD_SIZE.width + DRAW_GAP) * scale, marker.y);

        let mut object = PlacedObject::card(card, position, CARD_SIZE);
        object.render_transform = self.view.matrix();
        object.owner = Some(slot);
        let id = self.scene.insert(object);
        self.scene.bring_to_front(id);
        id
    }
}

/// Debug snapshot of a [`DeckSession`] state.
#[derive(Clone, Copy, Debug)]
pub struct SessionDebugInfo {
    /// Remaining cards in each draw pile.
    pub pile_lens: [usize; 2],
    /// Live objects in the scene (markers included).
    pub placed_objects: usize,
    /// Live card objects in the scene.
    pub placed_cards: usize,
    /// Current canvas scale.
    pub scale: f64,
    /// Both players' life totals.
    pub life: [i32; 2],
    /// Current gesture phase.
    pub phase: GesturePhase,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use cardtable_decks::CardId;
    use core::cell::RefCell;

    fn card(id: &str) -> Card {
        Card::new(CardId::new(id), id, "img://front")
    }

    fn deck_of(n: u32) -> Vec<LedgerEntry> {
        (0..n)
            .map(|i| LedgerEntry::new(card(&alloc::format!("c-{i}")), 1))
            .collect()
    }

    #[test]
    fn loading_expands_counts_in_ledger_order() {
        let mut session = DeckSession::new();
        session.load_deck(
            DeckSlot::One,
            vec![
                LedgerEntry::new(card("a"), 2),
                LedgerEntry::new(card("b"), 1),
            ],
            "test",
        );

        let ids: Vec<&str> = session
            .pile(DeckSlot::One)
            .cards()
            .iter()
            .map(|c| c.id().as_str())
            .collect();
        assert_eq!(ids, ["a", "a", "b"]);
        assert_eq!(session.ledger(DeckSlot::One).name(), "test");
    }

    #[test]
    fn draw_moves_one_card_from_pile_to_canvas() {
        let mut session = DeckSession::new();
        session.load_deck(DeckSlot::One, deck_of(3), "test");
        let before = session.debug_info();

        let id = session.draw(DeckSlot::One).unwrap();

        let after = session.debug_info();
        assert_eq!(after.pile_lens[0], before.pile_lens[0] - 1);
        assert_eq!(after.placed_cards, before.placed_cards + 1);
        let object = session.scene().get(id).unwrap();
        assert_eq!(object.owner, Some(DeckSlot::One));
        assert_eq!(object.as_card().unwrap().id().as_str(), "c-0");
    }

    #[test]
    fn drawing_from_an_empty_pile_changes_nothing() {
        let mut session = DeckSession::new();
        let before = session.debug_info();

        assert!(session.draw(DeckSlot::One).is_none());

        let after = session.debug_info();
        assert_eq!(after.pile_lens, before.pile_lens);
        assert_eq!(after.placed_cards, before.placed_cards);
    }

    #[test]
    fn draw_at_takes_the_selected_card() {
        let mut session = DeckSession::new();
        session.load_deck(
            DeckSlot::Two,
            vec![
                LedgerEntry::new(card("a"), 1),
                LedgerEntry::new(card("b"), 1),
                LedgerEntry::new(card("c"), 1),
            ],
            "test",
        );

        let id = session.draw_at(DeckSlot::Two, 1).unwrap();
        let object = session.scene().get(id).unwrap();
        assert_eq!(object.as_card().unwrap().id().as_str(), "b");

        let remaining: Vec<&str> = session
            .pile(DeckSlot::Two)
            .cards()
            .iter()
            .map(|c| c.id().as_str())
            .collect();
        assert_eq!(remaining, ["a", "c"]);
    }

    #[test]
    fn side_drawing_is_non_destructive() {
        let mut session = DeckSession::new();
        session.load_side(vec![LedgerEntry::new(card("wish"), 1)], "side");

        let id = session.draw_from_side(0).unwrap();
        assert!(session.scene().get(id).is_some());
        assert_eq!(session.side().len(), 1, "side list must keep the card");

        assert!(session.draw_from_side(5).is_none());
    }

    #[test]
    fn shuffle_preserves_the_pile_multiset() {
        let mut session = DeckSession::new();
        session.load_deck(DeckSlot::One, deck_of(40), "test");
        let mut before: Vec<String> = session
            .pile(DeckSlot::One)
            .cards()
            .iter()
            .map(|c| String::from(c.id().as_str()))
            .collect();
        before.sort();

        session.shuffle_deck(DeckSlot::One);

        let mut after: Vec<String> = session
            .pile(DeckSlot::One)
            .cards()
            .iter()
            .map(|c| String::from(c.id().as_str()))
            .collect();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn new_game_deals_seven_each_and_resets_life() {
        let mut session = DeckSession::new();
        session.load_deck(DeckSlot::One, deck_of(40), "one");
        session.load_deck(DeckSlot::Two, deck_of(40), "two");
        session.adjust_life(DeckSlot::One, -7);
        let stray = session.place_counter(Point::new(600.0, 600.0));

        session.new_game();

        let info = session.debug_info();
        assert_eq!(info.pile_lens, [33, 33]);
        assert_eq!(info.placed_cards, 14);
        assert_eq!(info.life, [STARTING_LIFE, STARTING_LIFE]);
        assert!(!session.scene().is_alive(stray));
        assert!(session.scene().is_alive(session.pile_marker(DeckSlot::One)));
        assert!(session.scene().is_alive(session.pile_marker(DeckSlot::Two)));
        // Markers + 14 dealt cards.
        assert_eq!(info.placed_objects, 16);
    }

    #[test]
    fn new_game_with_empty_decks_just_resets() {
        let mut session = DeckSession::new();
        session.new_game();

        let info = session.debug_info();
        assert_eq!(info.pile_lens, [0, 0]);
        assert_eq!(info.placed_cards, 0);
        assert_eq!(info.placed_objects, 2);
    }

    #[test]
    fn subscribers_learn_which_list_changed() {
        let mut session = DeckSession::new();
        let seen: Rc<RefCell<Vec<DeckList>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = session.subscribe(move |event| sink.borrow_mut().push(event.list));

        session.load_deck(DeckSlot::One, deck_of(2), "one");
        session.draw(DeckSlot::One);
        session.load_side(vec![LedgerEntry::new(card("s"), 1)], "side");

        assert_eq!(
            seen.borrow().as_slice(),
            [DeckList::One, DeckList::One, DeckList::Side]
        );

        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.draw(DeckSlot::One);
        assert_eq!(seen.borrow().len(), 3, "unsubscribed listener must not fire");
    }

    #[test]
    fn drag_to_deck_zone_returns_the_card_to_that_pile() {
        let mut session = DeckSession::new();
        session.load_deck(DeckSlot::One, deck_of(3), "test");
        let drawn = session.draw(DeckSlot::One).unwrap();
        assert_eq!(session.pile(DeckSlot::One).len(), 2);

        // Grab the drawn card at its center.
        let grab = session.scene().get(drawn).unwrap().world_aabb().center();
        session.pointer_down(PointerButton::Primary, grab, 1);
        assert_eq!(session.gesture_phase(), GesturePhase::DraggingCard);

        // Release over the top half of deck one's pile marker.
        let marker = session
            .scene()
            .get(session.pile_marker(DeckSlot::One))
            .unwrap()
            .world_aabb();
        let release = Point::new(marker.center().x, marker.y0 + marker.height() * 0.25);
        session.pointer_move(release);
        let effect = session.pointer_up(PointerButton::Primary, release);

        assert!(matches!(
            effect,
            Some(GestureEffect::CardReturned {
                to_bottom: false,
                slot: DeckSlot::One,
                ..
            })
        ));
        assert_eq!(session.pile(DeckSlot::One).len(), 3);
        assert_eq!(
            session.pile(DeckSlot::One).cards()[0].id().as_str(),
            "c-0",
            "card goes back on top"
        );
        assert!(!session.scene().is_alive(drawn));
        assert_eq!(session.gesture_phase(), GesturePhase::Idle);
    }

    #[test]
    fn wheel_zoom_rescales_drawn_cards_with_the_view() {
        let mut session = DeckSession::new();
        session.load_deck(DeckSlot::One, deck_of(1), "test");
        let drawn = session.draw(DeckSlot::One).unwrap();

        session.wheel(Point::new(900.0, 900.0), 120.0);

        assert!((session.view().scale() - 1.1).abs() < 1e-12);
        let object = session.scene().get(drawn).unwrap();
        assert!((object.render_scale() - 1.1).abs() < 1e-9);
    }

    #[test]
    fn drawn_cards_land_beside_the_pile_scaled_by_zoom() {
        let mut session = DeckSession::new();
        session.load_deck(DeckSlot::One, deck_of(2), "test");

        let first = session.draw(DeckSlot::One).unwrap();
        let expected_x = PILE_ONE_POSITION.x + CARD_SIZE.width + 20.0;
        let pos = session.scene().get(first).unwrap().position;
        assert!((pos.x - expected_x).abs() < 1e-9);
        assert!((pos.y - PILE_ONE_POSITION.y).abs() < 1e-9);
    }

    #[test]
    fn life_and_list_visibility_are_per_player_state() {
        let mut session = DeckSession::new();
        assert_eq!(session.life(DeckSlot::One), STARTING_LIFE);
        assert_eq!(session.adjust_life(DeckSlot::One, -3), 17);
        assert_eq!(session.life(DeckSlot::Two), STARTING_LIFE);

        assert!(session.list_visible(DeckSlot::Two));
        assert!(!session.toggle_list_visible(DeckSlot::Two));
        session.set_list_visible(DeckSlot::Two, true);
        assert!(session.list_visible(DeckSlot::Two));
    }

    #[test]
    fn counters_place_and_remove_via_the_pointer() {
        let mut session = DeckSession::new();
        let token = session.place_counter(Point::new(700.0, 200.0));
        assert!(session.scene().is_alive(token));

        let effect = session.pointer_down(
            PointerButton::Secondary,
            Point::new(720.0, 220.0),
            1,
        );
        assert_eq!(effect, Some(GestureEffect::CounterRemoved { object: token }));
        assert!(!session.scene().is_alive(token));
    }
}
