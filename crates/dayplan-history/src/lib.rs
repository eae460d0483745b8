//! Linear undo/redo history over immutable snapshots.
//!
//! A `HistoryStore<T>` holds one optional present value plus the snapshots
//! before it (past) and the snapshots undone from it (future). Every
//! transition replaces the whole `HistoryState`, so a state handle obtained
//! earlier keeps reading the same values forever.
//!
//! Edits that are structurally equal to the present are dropped, so a UI that
//! re-submits the same value on every keystroke or drag tick does not pile up
//! empty undo steps.
pub mod equality;
pub mod observer;
pub mod state;
pub mod store;

pub use equality::deep_eq;
pub use observer::Subscription;
pub use state::HistoryState;
pub use store::HistoryStore;
