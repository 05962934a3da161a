//! Long-press recognition for a wrapped view.
//!
//! A trigger wraps one piece of content (a message bubble). The embedding
//! app forwards it pointer events and a tick per frame, and reports the
//! content's geometry on every layout pass. Holding the press past the
//! configured duration presents the overlay; the same touch can then slide
//! straight onto a reaction without lifting.

use std::cell::RefCell;
use std::rc::Rc;

use pique_core::haptics;
use pique_core::{Impulse, PointerButtons, PointerEvent, PointerPhase, Vec2};
use web_time::Instant;

use crate::config::{AppearingSide, OverlayConfig, PressDuration};
use crate::controller::{GeometrySnapshot, OverlayController, PresentationRequest};
use crate::menu::MenuEntry;
use crate::scene::ContentPainter;

#[derive(Clone, Copy, Debug, PartialEq)]
enum PressState {
    Idle,
    Pressing { start: Instant, origin: Vec2 },
    LongPressRecognized { origin: Vec2 },
    Dragging,
    /// Sequence over (cancelled or fired); waiting for the pointer to lift.
    Ended,
}

pub struct LongPressTrigger {
    controller: OverlayController,
    config: Rc<OverlayConfig>,
    press_duration: PressDuration,
    appearing_side: AppearingSide,
    /// Two-way binding to the caller's stored reaction for this content.
    selection: Rc<RefCell<Option<String>>>,
    content: ContentPainter,
    menu: Vec<MenuEntry>,

    geometry: Option<GeometrySnapshot>,
    state: PressState,
}

impl LongPressTrigger {
    pub fn new(
        controller: OverlayController,
        config: Rc<OverlayConfig>,
        press_duration: PressDuration,
        appearing_side: AppearingSide,
        selection: Rc<RefCell<Option<String>>>,
        content: ContentPainter,
        menu: Vec<MenuEntry>,
    ) -> Self {
        LongPressTrigger {
            controller,
            config,
            press_duration,
            appearing_side,
            selection,
            content,
            menu,
            geometry: None,
            state: PressState::Idle,
        }
    }

    /// Record the wrapped content's geometry. Called on every layout pass;
    /// cheap, idempotent overwrite.
    pub fn set_geometry(&mut self, snapshot: GeometrySnapshot) {
        self.geometry = Some(snapshot);
    }

    pub fn geometry(&self) -> Option<GeometrySnapshot> {
        self.geometry
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match event.phase {
            PointerPhase::Down => {
                if !event.buttons.contains(PointerButtons::PRIMARY) {
                    return;
                }
                let inside = self
                    .geometry
                    .map(|g| g.global_frame.contains(event.position))
                    .unwrap_or(false);
                if inside {
                    self.state = PressState::Pressing {
                        start: event.time,
                        origin: event.position,
                    };
                }
            }
            PointerPhase::Move => self.pointer_moved(event.position),
            PointerPhase::Up | PointerPhase::Cancel => {
                if self.state == PressState::Dragging && self.controller.is_visible() {
                    self.controller.set_drag_location(None);
                }
                self.state = PressState::Idle;
            }
        }
    }

    /// Time-based recognition; call once per frame.
    pub fn tick(&mut self, now: Instant) {
        let PressState::Pressing { start, origin } = self.state else {
            return;
        };
        if self.controller.is_visible() {
            return; // Single overlay; a concurrent press never re-presents.
        }
        if now.saturating_duration_since(start) < self.press_duration.duration() {
            return;
        }

        let Some(geometry) = self.geometry else {
            // First frame: nothing measured yet, ignore the press entirely.
            log::debug!("long press before geometry capture; ignoring");
            self.state = PressState::Ended;
            return;
        };

        haptics::impulse(Impulse::Heavy);

        let selection = self.selection.clone();
        let request = PresentationRequest {
            content: self.content.clone(),
            geometry,
            menu: self.menu.clone(),
            appearing_side: self.appearing_side,
            on_reaction_change: Rc::new(move |reaction: Option<&str>| {
                *selection.borrow_mut() = reaction.map(str::to_owned);
            }),
        };
        self.controller
            .show(request, self.selection.borrow().clone());
        log::debug!("long press recognized; overlay presented");
        self.state = PressState::LongPressRecognized { origin };
    }

    fn pointer_moved(&mut self, position: Vec2) {
        match self.state {
            PressState::Pressing { origin, .. } => {
                let travel = origin.distance_to(position);
                if self.controller.is_visible() {
                    // Overlay came up mid-press; the drag engages after the
                    // minimum travel and previews reactions directly.
                    if travel >= self.config.drag_min_distance {
                        self.state = PressState::Dragging;
                        self.controller.set_drag_location(Some(position));
                    }
                } else if travel > self.config.press_slop {
                    self.state = PressState::Ended;
                }
            }
            PressState::LongPressRecognized { origin } => {
                if origin.distance_to(position) >= self.config.drag_min_distance {
                    self.state = PressState::Dragging;
                    if self.controller.is_visible() {
                        self.controller.set_drag_location(Some(position));
                    }
                }
            }
            PressState::Dragging => {
                if self.controller.is_visible() {
                    self.controller.set_drag_location(Some(position));
                }
            }
            PressState::Idle | PressState::Ended => {}
        }
    }
}
