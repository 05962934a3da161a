use std::rc::Rc;

use pique_core::{Rect, Signal, Size, Vec2, signal};

use crate::config::AppearingSide;
use crate::menu::MenuEntry;
use crate::scene::ContentPainter;

/// A tracked view's size and global position at a point in time. Overwritten
/// on every layout pass, never accumulated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometrySnapshot {
    pub size: Size,
    pub global_frame: Rect,
}

impl GeometrySnapshot {
    pub fn new(size: Size, global_frame: Rect) -> Self {
        GeometrySnapshot { size, global_frame }
    }
}

/// Outcome of an overlay dismissal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReactionChoice {
    NoChange,
    Selected(String),
}

pub type ReactionChangeHandler = Rc<dyn Fn(Option<&str>)>;

/// Everything the presenter needs to show one long-pressed view. Built by
/// the trigger on recognition, consumed once, dropped on unmount.
#[derive(Clone)]
pub struct PresentationRequest {
    pub content: ContentPainter,
    pub geometry: GeometrySnapshot,
    pub menu: Vec<MenuEntry>,
    pub appearing_side: AppearingSide,
    pub on_reaction_change: ReactionChangeHandler,
}

/// Shared overlay state. One instance per app, constructed by the
/// composition root and cloned (cheaply, by handle) into triggers and the
/// host. All mutation notifies dependents synchronously on this thread.
#[derive(Clone)]
pub struct OverlayController {
    visible: Signal<bool>,
    presented: Signal<Option<Rc<PresentationRequest>>>,
    drag_location: Signal<Option<Vec2>>,
    selected_reaction: Signal<Option<String>>,
}

impl OverlayController {
    pub fn new() -> Self {
        OverlayController {
            visible: signal(false),
            presented: signal(None),
            drag_location: signal(None),
            selected_reaction: signal(None),
        }
    }

    pub fn visible(&self) -> &Signal<bool> {
        &self.visible
    }

    pub fn presented(&self) -> &Signal<Option<Rc<PresentationRequest>>> {
        &self.presented
    }

    pub fn drag_location(&self) -> &Signal<Option<Vec2>> {
        &self.drag_location
    }

    pub fn selected_reaction(&self) -> &Signal<Option<String>> {
        &self.selected_reaction
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Presents `request`. Callers must not invoke while already visible;
    /// if they do, the last write wins.
    pub fn show(&self, request: PresentationRequest, current_selection: Option<String>) {
        if self.is_visible() {
            log::warn!("show() while the overlay is visible; replacing the presentation");
        }
        self.selected_reaction.set(current_selection);
        self.drag_location.set(Some(Vec2::ZERO));
        self.presented.set(Some(Rc::new(request)));
        self.visible.set(true);
    }

    /// Begins dismissal. `presented` stays set so the presenter can run its
    /// exit animation; the host clears it on unmount.
    pub fn hide(&self) {
        self.visible.set(false);
    }

    pub fn set_drag_location(&self, location: Option<Vec2>) {
        self.drag_location.set(location);
    }

    /// Selecting the current reaction clears it; anything else replaces it.
    /// The presentation's change handler is invoked with the new value so
    /// the originating view can store it beyond the overlay's lifetime.
    pub fn toggle_reaction(&self, reaction: &str) {
        let new = self.selected_reaction.with(|current| {
            if current.as_deref() == Some(reaction) {
                None
            } else {
                Some(reaction.to_string())
            }
        });
        self.selected_reaction.set(new.clone());

        if let Some(request) = self.presented.get() {
            (request.on_reaction_change)(new.as_deref());
        }
    }

    pub(crate) fn clear_presented(&self) {
        self.presented.set(None);
    }
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::new()
    }
}
