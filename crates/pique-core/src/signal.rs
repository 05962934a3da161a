use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Handle returned by [`Signal::subscribe`]; pass to `unsubscribe`.
    pub struct SubKey;
}

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Observable value. Cloning the handle shares the underlying state.
///
/// All notification is synchronous on the current thread: by the time
/// `set`/`update` returns, every subscriber has observed the new value.
/// Subscribers may subscribe/unsubscribe from inside a notification; they
/// must not write the same signal re-entrantly.
pub struct Signal<T: 'static> {
    value: Rc<RefCell<T>>,
    subs: Rc<RefCell<SlotMap<SubKey, Subscriber<T>>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Signal {
            value: self.value.clone(),
            subs: self.subs.clone(),
        }
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Signal {
            value: Rc::new(RefCell::new(value)),
            subs: Rc::new(RefCell::new(SlotMap::with_key())),
        }
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    /// Read the value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    pub fn set(&self, v: T) {
        *self.value.borrow_mut() = v;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.value.borrow_mut());
        self.notify();
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubKey {
        self.subs.borrow_mut().insert(Rc::new(f))
    }

    pub fn unsubscribe(&self, key: SubKey) {
        if self.subs.borrow_mut().remove(key).is_none() {
            log::warn!("unsubscribe: unknown subscription key");
        }
    }

    fn notify(&self) {
        // Snapshot first so subscribers can touch the registry.
        let snapshot: SmallVec<[Subscriber<T>; 4]> =
            self.subs.borrow().values().cloned().collect();
        for sub in snapshot {
            sub(&self.value.borrow());
        }
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
