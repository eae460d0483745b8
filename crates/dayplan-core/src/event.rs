use serde::{Deserialize, Serialize};

use crate::time::EventTime;

/// One entry of a schedule.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub time: EventTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Event {
    /// Creates an event with a fresh random id.
    pub fn new(title: impl Into<String>, time: EventTime) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            time,
            icon: None,
            note: None,
        }
    }

    /// Single-line rendering used by the plain-text export.
    pub(crate) fn label(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{icon} {}", self.title),
            None => self.title.clone(),
        }
    }
}
