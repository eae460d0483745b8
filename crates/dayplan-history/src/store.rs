/// Owner of the current history state plus its observers.
///
/// `HistoryStore` is the stateful face of `HistoryState`: it swaps in the
/// result of each pure transition and tells observers about it. Operations
/// never fail; when a transition is a no-op nothing is swapped and nobody is
/// notified.
use std::sync::Arc;

use serde::Serialize;

use crate::observer::{Observers, Subscription};
use crate::state::HistoryState;

/// Linear undo/redo container for snapshots of `T`.
pub struct HistoryStore<T> {
    state: Arc<HistoryState<T>>,
    observers: Observers<T>,
}

impl<T> std::fmt::Debug for HistoryStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("initialized", &self.state.is_initialized())
            .field("past_len", &self.state.past().len())
            .field("future_len", &self.state.future().len())
            .field("observers", &self.observers.live_count())
            .finish()
    }
}

impl<T> Default for HistoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HistoryStore<T> {
    /// Creates an uninitialized store. `present()` is `None` until the
    /// first `set_state`.
    pub fn new() -> Self {
        Self::from_state(HistoryState::empty())
    }

    /// Creates a store seeded with `initial` and no history.
    pub fn with_initial(initial: impl Into<Arc<T>>) -> Self {
        Self::from_state(HistoryState::baseline(initial))
    }

    fn from_state(state: HistoryState<T>) -> Self {
        Self {
            state: Arc::new(state),
            observers: Observers::default(),
        }
    }

    /// The current present snapshot.
    pub fn present(&self) -> Option<Arc<T>> {
        self.state.present().cloned()
    }

    /// The whole current state.
    ///
    /// The returned handle is never modified by later transitions.
    pub fn state(&self) -> Arc<HistoryState<T>> {
        Arc::clone(&self.state)
    }

    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.can_redo()
    }

    /// Number of snapshots available to undo.
    pub fn undo_depth(&self) -> usize {
        self.state.past().len()
    }

    /// Number of snapshots available to redo.
    pub fn redo_depth(&self) -> usize {
        self.state.future().len()
    }

    /// Steps back one snapshot. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.state.undo() {
            Some(next) => {
                self.commit(next, "undo");
                true
            }
            None => false,
        }
    }

    /// Steps forward one snapshot. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.state.redo() {
            Some(next) => {
                self.commit(next, "redo");
                true
            }
            None => false,
        }
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.observers.live_count()
    }

    fn commit(&mut self, next: HistoryState<T>, kind: &str) {
        self.state = Arc::new(next);
        tracing::debug!(
            kind,
            past = self.state.past().len(),
            future = self.state.future().len(),
            "history: transition applied"
        );
        self.observers.notify(&self.state);
    }
}

impl<T: 'static> HistoryStore<T> {
    /// Registers `callback` to run after every applied transition.
    ///
    /// The observer stays registered for as long as the returned
    /// `Subscription` is alive.
    pub fn subscribe(
        &self,
        callback: impl Fn(&Arc<HistoryState<T>>) + 'static,
    ) -> Subscription<T> {
        self.observers.subscribe(callback)
    }
}

impl<T: Serialize> HistoryStore<T> {
    /// Sets a new present value.
    ///
    /// With `overwrite`, all history is discarded and `value` becomes a fresh
    /// baseline. Otherwise `value` is recorded as an edit on top of the
    /// present, clearing the redo branch, unless it is structurally equal to
    /// the present, in which case nothing happens.
    ///
    /// Returns whether a transition was applied.
    pub fn set_state(&mut self, value: impl Into<Arc<T>>, overwrite: bool) -> bool {
        match self.state.set(value, overwrite) {
            Some(next) => {
                self.commit(next, if overwrite { "checkpoint" } else { "edit" });
                true
            }
            None => false,
        }
    }

    /// Records `value` as an undoable edit.
    pub fn set(&mut self, value: impl Into<Arc<T>>) -> bool {
        self.set_state(value, false)
    }

    /// Replaces everything with `value` as a new baseline.
    pub fn checkpoint(&mut self, value: impl Into<Arc<T>>) {
        self.set_state(value, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    fn counting(store: &HistoryStore<String>) -> (Rc<Cell<usize>>, Subscription<String>) {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let sub = store.subscribe(move |_| counter.set(counter.get() + 1));
        (calls, sub)
    }

    type PairMap = BTreeMap<(u8, u8), u8>;

    fn counting_map(store: &HistoryStore<PairMap>) -> (Rc<Cell<usize>>, Subscription<PairMap>) {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let sub = store.subscribe(move |_| counter.set(counter.get() + 1));
        (calls, sub)
    }

    #[test]
    fn test_new_store_is_uninitialized() {
        let store: HistoryStore<String> = HistoryStore::new();
        assert!(store.present().is_none());
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_with_initial() {
        let store = HistoryStore::<String>::with_initial("x".to_string());
        assert_eq!(store.present().as_deref().map(String::as_str), Some("x"));
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_default_matches_new() {
        let store: HistoryStore<u8> = HistoryStore::default();
        assert!(store.present().is_none());
        assert_eq!(store.undo_depth(), 0);
        assert_eq!(store.redo_depth(), 0);
    }

    #[test]
    fn test_set_notifies_once_per_transition() {
        let mut store: HistoryStore<String> = HistoryStore::new();
        let (calls, _sub) = counting(&store);

        assert!(store.set("a".to_string()));
        assert!(store.set("b".to_string()));
        assert!(!store.set("b".to_string()));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_undo_redo_notify_only_when_moving() {
        let mut store = HistoryStore::<String>::with_initial("a".to_string());
        let (calls, _sub) = counting(&store);

        assert!(!store.redo());
        assert!(store.set("b".to_string()));
        assert!(store.undo());
        assert!(!store.undo());
        assert!(store.redo());
        assert!(!store.redo());
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_checkpoint_notifies_even_for_equal_value() {
        let mut store = HistoryStore::<String>::with_initial("a".to_string());
        store.set("b".to_string());
        let (calls, _sub) = counting(&store);

        store.checkpoint("b".to_string());
        assert_eq!(calls.get(), 1);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_old_state_handle_is_stable() {
        let mut store = HistoryStore::<String>::with_initial("a".to_string());
        let before = store.state();
        store.set("b".to_string());
        store.undo();
        store.checkpoint("z".to_string());

        assert_eq!(before.present().map(|v| v.as_str()), Some("a"));
        assert!(before.past().is_empty());
        assert!(before.future().is_empty());
    }

    #[test]
    fn test_depths_track_stacks() {
        let mut store: HistoryStore<u32> = HistoryStore::new();
        for i in 0..5u32 {
            store.set(i);
        }
        store.undo();
        store.undo();
        assert_eq!(store.undo_depth(), 2);
        assert_eq!(store.redo_depth(), 2);
    }

    #[test]
    fn test_observer_count_follows_subscriptions() {
        let store: HistoryStore<u32> = HistoryStore::new();
        let a = store.subscribe(|_| {});
        let b = store.subscribe(|_| {});
        assert_eq!(store.observer_count(), 2);
        drop(a);
        assert_eq!(store.observer_count(), 1);
        drop(b);
        assert_eq!(store.observer_count(), 0);
    }

    #[test]
    fn test_uncomparable_equal_edit_is_recorded() {
        let map: PairMap = BTreeMap::from([((1, 2), 1)]);
        let mut store = HistoryStore::<PairMap>::with_initial(map.clone());
        let (calls, _sub) = counting_map(&store);

        assert!(store.set(map));
        assert_eq!(store.undo_depth(), 1);
        assert_eq!(calls.get(), 1);
    }
}
