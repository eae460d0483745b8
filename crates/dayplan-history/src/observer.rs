/// Change notification for `HistoryStore`.
///
/// Callbacks are owned by the `Subscription` returned from `subscribe`; the
/// registry only keeps weak references and prunes dead ones on every
/// subscribe and notify. Dropping a `Subscription` therefore unsubscribes
/// before the next notification cycle.
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::state::HistoryState;

type Callback<T> = dyn Fn(&Arc<HistoryState<T>>);

/// RAII guard for a registered observer.
#[must_use = "dropping a Subscription unsubscribes the observer"]
pub struct Subscription<T> {
    _callback: Rc<Callback<T>>,
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish()
    }
}

/// Registration-ordered list of observers.
pub(crate) struct Observers<T> {
    slots: RefCell<Vec<Weak<Callback<T>>>>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
        }
    }
}

impl<T: 'static> Observers<T> {
    pub(crate) fn subscribe(
        &self,
        callback: impl Fn(&Arc<HistoryState<T>>) + 'static,
    ) -> Subscription<T> {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        let mut slots = self.slots.borrow_mut();
        slots.retain(|w| w.strong_count() > 0);
        slots.push(Rc::downgrade(&callback));
        Subscription {
            _callback: callback,
        }
    }
}

impl<T> Observers<T> {
    /// Number of observers whose `Subscription` is still alive.
    pub(crate) fn live_count(&self) -> usize {
        self.slots
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Calls every live observer in registration order.
    ///
    /// The slot list is not borrowed while callbacks run, so a callback may
    /// register further observers; those are first called on the next cycle.
    pub(crate) fn notify(&self, state: &Arc<HistoryState<T>>) {
        let live: Vec<Rc<Callback<T>>> = {
            let mut slots = self.slots.borrow_mut();
            slots.retain(|w| w.strong_count() > 0);
            slots.iter().filter_map(Weak::upgrade).collect()
        };
        for callback in live {
            callback(state);
        }
    }
}
