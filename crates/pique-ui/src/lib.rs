//! # Pique — long-press reaction picker overlay
//!
//! Long-pressing a wrapped view pops up a blurred full-screen overlay: the
//! pressed content stays in place, a horizontally scrollable row of emoji
//! reactions appears above it, and a contextual action menu below. The user
//! can keep the finger down and drag straight onto a reaction, previewed by
//! a pop-up hover, or tap a reaction or menu item directly.
//!
//! The component is headless. Interaction and animation live in explicit
//! state machines driven by pointer events and a per-frame tick; each frame
//! the host emits a [`Scene`] for whatever renderer the app uses.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use pique_core::{Rect, Size};
//! use pique_ui::*;
//!
//! let controller = OverlayController::new();
//! let mut host = HostMount::new(
//!     controller.clone(),
//!     OverlayConfig::default(),
//!     Rc::new(DefaultReactionCatalog),
//! )
//! .unwrap();
//! host.set_screen_size(Size::new(390.0, 844.0));
//!
//! // One trigger per message bubble.
//! let reaction: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
//! let mut trigger = LongPressTrigger::new(
//!     controller.clone(),
//!     host.config().clone(),
//!     PressDuration::Default,
//!     AppearingSide::Leading,
//!     reaction.clone(),
//!     Rc::new(|_scene, _frame, _alpha| { /* paint the bubble */ }),
//!     vec![MenuEntry::Item(MenuItem::new("Reply", || {}))],
//! );
//! trigger.set_geometry(GeometrySnapshot::new(
//!     Size::new(120.0, 44.0),
//!     Rect::new(24.0, 300.0, 120.0, 44.0),
//! ));
//!
//! // Per frame: forward pointer events to the trigger and host, then
//! // `trigger.tick(now)` and `host.frame(now)` and draw the scene.
//! ```

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod glyph;
pub mod host;
pub mod menu;
pub mod presenter;
pub mod scene;
pub mod strip;
pub mod trigger;
mod tests;

pub use catalog::{CustomReactionCatalog, DefaultReactionCatalog, ReactionCatalog};
pub use config::{AppearingSide, OverlayConfig, PressDuration};
pub use controller::{
    GeometrySnapshot, OverlayController, PresentationRequest, ReactionChangeHandler,
    ReactionChoice,
};
pub use error::{CatalogError, InstallError};
pub use glyph::ReactionGlyph;
pub use host::HostMount;
pub use menu::{MenuEntry, MenuItem};
pub use presenter::{OverlayPhase, OverlayPresenter, boundary_offset};
pub use scene::{ContentPainter, Scene, SceneNode};
pub use strip::ReactionStrip;
pub use trigger::LongPressTrigger;
