//! Haptic feedback abstraction. The component fires impulses at gesture
//! milestones; platforms install an engine, everywhere else this is a no-op.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Impulse {
    Light,
    Heavy,
}

pub trait Haptics {
    fn impulse(&self, style: Impulse);
}

pub struct NoopHaptics;

impl Haptics for NoopHaptics {
    fn impulse(&self, _style: Impulse) {}
}

thread_local! {
    static ENGINE: RefCell<Rc<dyn Haptics>> = RefCell::new(Rc::new(NoopHaptics));
}

/// Install the platform haptics engine for this thread.
pub fn set_haptics(engine: Rc<dyn Haptics>) {
    ENGINE.with(|e| *e.borrow_mut() = engine);
}

pub fn impulse(style: Impulse) {
    ENGINE.with(|e| e.borrow().impulse(style));
}
