/// Immutable history value and its pure transitions.
use std::sync::Arc;

use serde::Serialize;

use crate::equality::deep_eq;

/// One immutable point in the history of a value.
///
/// Snapshots are reference counted, so moving a snapshot between `past`,
/// `present` and `future` never copies the underlying `T`.
#[derive(Debug, PartialEq)]
pub struct HistoryState<T> {
    /// Snapshots that preceded the present, oldest first.
    past: Vec<Arc<T>>,
    /// The active snapshot. `None` until the first value is set.
    present: Option<Arc<T>>,
    /// Undone snapshots, nearest redo candidate first.
    future: Vec<Arc<T>>,
}

impl<T> Clone for HistoryState<T> {
    fn clone(&self) -> Self {
        Self {
            past: self.past.clone(),
            present: self.present.clone(),
            future: self.future.clone(),
        }
    }
}

impl<T> Default for HistoryState<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> HistoryState<T> {
    /// A state with no present value and no history.
    pub fn empty() -> Self {
        Self {
            past: Vec::new(),
            present: None,
            future: Vec::new(),
        }
    }

    /// A fresh baseline: `value` is present, past and future are empty.
    pub fn baseline(value: impl Into<Arc<T>>) -> Self {
        Self {
            past: Vec::new(),
            present: Some(value.into()),
            future: Vec::new(),
        }
    }

    pub fn past(&self) -> &[Arc<T>] {
        &self.past
    }

    pub fn present(&self) -> Option<&Arc<T>> {
        self.present.as_ref()
    }

    pub fn future(&self) -> &[Arc<T>] {
        &self.future
    }

    /// Whether a present value has ever been set.
    pub fn is_initialized(&self) -> bool {
        self.present.is_some()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Steps back one snapshot.
    ///
    /// The last past snapshot becomes present and the old present becomes
    /// the nearest redo candidate. Returns `None` when there is nothing to
    /// undo.
    pub fn undo(&self) -> Option<Self> {
        let (previous, rest) = self.past.split_last()?;
        let current = self.present.clone()?;

        let mut future = Vec::with_capacity(self.future.len() + 1);
        future.push(current);
        future.extend(self.future.iter().cloned());

        Some(Self {
            past: rest.to_vec(),
            present: Some(Arc::clone(previous)),
            future,
        })
    }

    /// Steps forward one snapshot.
    ///
    /// The first future snapshot becomes present and the old present becomes
    /// the nearest undo candidate. Returns `None` when there is nothing to
    /// redo.
    pub fn redo(&self) -> Option<Self> {
        let (next, rest) = self.future.split_first()?;
        let current = self.present.clone()?;

        let mut past = Vec::with_capacity(self.past.len() + 1);
        past.extend(self.past.iter().cloned());
        past.push(current);

        Some(Self {
            past,
            present: Some(Arc::clone(next)),
            future: rest.to_vec(),
        })
    }
}

impl<T: Serialize> HistoryState<T> {
    /// Applies `value` as a new edit, or as a checkpoint when `overwrite` is set.
    ///
    /// Returns `None` when the edit is structurally equal to the present,
    /// in which case no history entry is created.
    pub fn set(&self, value: impl Into<Arc<T>>, overwrite: bool) -> Option<Self> {
        let value = value.into();
        if overwrite {
            return Some(Self::baseline(value));
        }

        let Some(current) = &self.present else {
            return Some(Self::baseline(value));
        };

        if Arc::ptr_eq(current, &value) || is_same_snapshot(&**current, &*value) {
            tracing::trace!("history: edit equals present, skipped");
            return None;
        }

        let mut past = Vec::with_capacity(self.past.len() + 1);
        past.extend(self.past.iter().cloned());
        past.push(Arc::clone(current));

        Some(Self {
            past,
            present: Some(value),
            future: Vec::new(),
        })
    }
}

/// Equality check used for edit dedup.
///
/// A value that cannot be serialized is treated as a distinct edit so the
/// change is still recorded.
fn is_same_snapshot<T: Serialize>(current: &T, next: &T) -> bool {
    match deep_eq(current, next) {
        Ok(equal) => equal,
        Err(e) => {
            tracing::warn!("history: failed to compare snapshots, recording edit: {e}");
            false
        }
    }
}
