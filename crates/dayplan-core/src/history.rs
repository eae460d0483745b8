// Re-exports from dayplan-history and the bridge between schedule edits
// and the history store.
pub use dayplan_history::{HistoryState, HistoryStore, Subscription};

use anyhow::Result;

use crate::schedule::Schedule;

/// Undo/redo history of a schedule.
pub type ScheduleHistory = HistoryStore<Schedule>;

/// Runs `edit` against the present schedule and records the result.
///
/// An uninitialized history is edited as if it held an empty schedule.
/// Returns whether the edit produced a new history entry; an edit that
/// yields a schedule equal to the present is dropped.
///
/// # Errors
///
/// Returns the edit's own error. The history is left untouched in that case.
pub fn apply_edit(
    history: &mut ScheduleHistory,
    edit: impl FnOnce(&Schedule) -> Result<Schedule>,
) -> Result<bool> {
    let next = match history.present() {
        Some(current) => edit(current.as_ref())?,
        None => edit(&Schedule::default())?,
    };
    Ok(history.set(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Event, EventTime};

    #[test]
    fn test_apply_edit_on_uninitialized_history() {
        let mut history = ScheduleHistory::new();
        let applied = apply_edit(&mut history, |s| Ok(s.with_title("Friday"))).unwrap();
        assert!(applied);
        assert_eq!(history.present().unwrap().title, "Friday");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_failed_edit_leaves_history_untouched() {
        let mut history = ScheduleHistory::with_initial(Schedule::new("Sat"));
        let before = history.state();
        assert!(apply_edit(&mut history, |s| s.with_event_removed(0)).is_err());
        assert!(std::sync::Arc::ptr_eq(&before, &history.state()));
    }

    #[test]
    fn test_noop_edit_is_not_recorded() {
        let schedule =
            Schedule::new("Sun").with_event_added(Event::new("Walk", EventTime::Untimed));
        let mut history = ScheduleHistory::with_initial(schedule);
        let applied = apply_edit(&mut history, |s| s.with_event_moved(0, 0)).unwrap();
        assert!(!applied);
        assert!(!history.can_undo());
    }
}
