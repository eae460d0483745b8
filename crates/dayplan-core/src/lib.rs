pub mod document;
pub mod event;
pub mod history;
pub mod schedule;
pub mod time;

pub use event::Event;
pub use history::{apply_edit, ScheduleHistory};
pub use schedule::Schedule;
pub use time::EventTime;
