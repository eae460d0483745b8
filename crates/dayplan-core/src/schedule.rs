/// The schedule document and its pure edits.
///
/// Every edit borrows the current schedule and returns a new one, which is
/// what the history store records as the next snapshot. Edits that change
/// nothing (moving an event onto its own slot, retitling with the same text)
/// produce a schedule equal to the input, so the store drops them.
use std::collections::BTreeMap;

use anyhow::Result;
use dayplan_config::TimeFormat;
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::time::EventTime;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Schedule {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub events: Vec<Event>,
    /// Translated plain-text renderings keyed by language code.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<String, String>,
}

impl Schedule {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.events.len() {
            anyhow::bail!(
                "event index {} out of range (schedule has {} events)",
                index,
                self.events.len()
            );
        }
        Ok(())
    }

    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }

    /// Appends `event` at the end.
    pub fn with_event_added(&self, event: Event) -> Self {
        let mut next = self.clone();
        next.events.push(event);
        next
    }

    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn with_event_removed(&self, index: usize) -> Result<Self> {
        self.check_index(index)?;
        let mut next = self.clone();
        next.events.remove(index);
        Ok(next)
    }

    /// Moves the event at `from` so it ends up at index `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if either index is out of range.
    pub fn with_event_moved(&self, from: usize, to: usize) -> Result<Self> {
        self.check_index(from)?;
        self.check_index(to)?;
        let mut next = self.clone();
        let event = next.events.remove(from);
        next.events.insert(to, event);
        Ok(next)
    }

    /// Applies `update` to a copy of the event at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn with_event_updated(
        &self,
        index: usize,
        update: impl FnOnce(&mut Event),
    ) -> Result<Self> {
        self.check_index(index)?;
        let mut next = self.clone();
        update(&mut next.events[index]);
        Ok(next)
    }

    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn with_event_retitled(&self, index: usize, title: impl Into<String>) -> Result<Self> {
        let title = title.into();
        self.with_event_updated(index, |e| e.title = title)
    }

    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn with_event_retimed(&self, index: usize, time: EventTime) -> Result<Self> {
        self.with_event_updated(index, |e| e.time = time)
    }

    /// Sets or clears the icon of the event at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn with_event_icon(&self, index: usize, icon: Option<String>) -> Result<Self> {
        self.with_event_updated(index, |e| e.icon = icon)
    }

    /// Sets or clears the note of the event at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn with_event_note(&self, index: usize, note: Option<String>) -> Result<Self> {
        self.with_event_updated(index, |e| e.note = note)
    }

    /// Orders timed events by start time; untimed events keep their
    /// relative order and go last.
    pub fn sorted_by_time(&self) -> Self {
        let mut next = self.clone();
        next.events.sort_by_key(|e| (e.time.start().is_none(), e.time.start()));
        next
    }

    /// Stores a translated rendering for `language`, replacing any previous one.
    pub fn with_translation(&self, language: &str, text: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.translations.insert(language.trim().to_lowercase(), text.into());
        next
    }

    pub fn translation(&self, language: &str) -> Option<&str> {
        self.translations
            .get(&language.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Plain-text rendering handed to the translation service.
    ///
    /// The title goes first, then one line per event (`time  label`), with
    /// notes indented on the following line.
    pub fn to_plain_text(&self, format: TimeFormat) -> String {
        let mut out = String::new();
        if !self.title.is_empty() {
            out.push_str(&self.title);
            out.push('\n');
        }
        for event in &self.events {
            let time = event.time.render(format);
            if time.is_empty() {
                out.push_str(&event.label());
            } else {
                out.push_str(&format!("{time}  {}", event.label()));
            }
            out.push('\n');
            if let Some(note) = &event.note {
                out.push_str(&format!("    {note}\n"));
            }
        }
        out
    }
}
