//! # Pique runtime primitives
//!
//! The overlay component in `pique-ui` is headless: interaction and animation
//! live in explicit state machines, and everything they need from a "UI
//! runtime" is in this crate.
//!
//! - [`Signal<T>`] — observable, reactive value with synchronous
//!   notification. Components subscribe to the overlay state they depend on
//!   and detach with the returned [`SubKey`] when they unmount.
//! - [`AnimatedValue`] / [`AnimationSpec`] — tweens and damped springs,
//!   sampled against an installable [`animation::Clock`]:
//!
//! ```rust
//! use pique_core::*;
//! use std::rc::Rc;
//! use web_time::Duration;
//!
//! let clock = TestClock::new();
//! set_clock(Rc::new(clock.clone()));
//!
//! let mut scale = AnimatedValue::new(0.0f32, AnimationSpec::spring_response(0.2, 0.7));
//! scale.set_target(1.0);
//! clock.advance(Duration::from_millis(100));
//! scale.update();
//! assert!(*scale.get() > 0.0);
//! ```
//!
//! - [`PointerEvent`] — the raw input vocabulary gesture recognizers consume.
//! - [`haptics`] — impulse side effects; a no-op unless a platform installs
//!   an engine.

pub mod animation;
pub mod color;
pub mod geometry;
pub mod haptics;
pub mod input;
pub mod signal;
mod tests;

pub use animation::*;
pub use color::*;
pub use geometry::*;
pub use haptics::{Haptics, Impulse, NoopHaptics, set_haptics};
pub use input::*;
pub use signal::*;
