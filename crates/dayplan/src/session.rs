/// Line-oriented editing session over a schedule history.
///
/// Each command becomes at most one history transition. Rejected edits
/// surface as errors and leave the history untouched.
use std::path::Path;

use anyhow::Result;
use dayplan_config::AppConfig;
use dayplan_core::document::{load_template, save_document};
use dayplan_core::history::Subscription;
use dayplan_core::{apply_edit, Event, Schedule, ScheduleHistory};

use crate::command::{Command, HELP};

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Message to show the user; the session continues.
    Continue(String),
    Quit,
}

pub struct Session {
    history: ScheduleHistory,
    config: AppConfig,
    _autosave: Option<Subscription<Schedule>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("history", &self.history)
            .field("autosave", &self._autosave.is_some())
            .finish()
    }
}

impl Session {
    /// Creates a session with an empty history.
    ///
    /// When autosave is enabled, every applied transition writes the present
    /// schedule to the configured autosave file.
    pub fn new(config: AppConfig) -> Self {
        let history = ScheduleHistory::new();
        let autosave = config.autosave_enabled.then(|| {
            let path = config.autosave_file();
            tracing::info!("Autosaving to {}", path.display());
            history.subscribe(move |state| {
                if let Some(present) = state.present() {
                    if let Err(e) = save_document(&path, present) {
                        tracing::warn!("Autosave failed: {e:#}");
                    }
                }
            })
        });
        Self {
            history,
            config,
            _autosave: autosave,
        }
    }

    pub fn history(&self) -> &ScheduleHistory {
        &self.history
    }

    /// Loads `path` as a fresh baseline, discarding all history.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be loaded; the history is
    /// unchanged in that case.
    pub fn load(&mut self, path: &Path) -> Result<String> {
        let schedule = load_template(path)?;
        let count = schedule.len();
        self.history.checkpoint(schedule);
        Ok(format!("Loaded {} ({count} events)", path.display()))
    }

    /// Parses and executes one input line.
    ///
    /// # Errors
    ///
    /// Returns an error for unparsable lines and rejected edits.
    pub fn run_line(&mut self, line: &str) -> Result<Outcome> {
        let command: Command = line.parse()?;
        self.execute(command)
    }

    /// Executes one command.
    ///
    /// # Errors
    ///
    /// Returns an error for rejected edits and file failures.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let message = match command {
            Command::Title(title) => self.edit(|s| Ok(s.with_title(title)))?,
            Command::Add { time, title } => {
                self.edit(|s| Ok(s.with_event_added(Event::new(title, time))))?
            }
            Command::Remove(index) => self.edit(|s| s.with_event_removed(index))?,
            Command::Move { from, to } => self.edit(|s| s.with_event_moved(from, to))?,
            Command::Rename { index, title } => {
                self.edit(|s| s.with_event_retitled(index, title))?
            }
            Command::Time { index, time } => self.edit(|s| s.with_event_retimed(index, time))?,
            Command::Icon { index, icon } => self.edit(|s| s.with_event_icon(index, icon))?,
            Command::Note { index, note } => self.edit(|s| s.with_event_note(index, note))?,
            Command::Sort => self.edit(|s| Ok(s.sorted_by_time()))?,
            Command::Translation { language, text } => {
                self.edit(|s| Ok(s.with_translation(&language, text)))?
            }
            Command::Undo => {
                if self.history.undo() {
                    self.render()
                } else {
                    "Nothing to undo".to_string()
                }
            }
            Command::Redo => {
                if self.history.redo() {
                    self.render()
                } else {
                    "Nothing to redo".to_string()
                }
            }
            Command::Load(path) => self.load(&path)?,
            Command::Save(path) => {
                let schedule = self.present();
                save_document(&path, &schedule)?;
                format!("Saved {}", path.display())
            }
            Command::Show => self.render(),
            Command::Text => self.present().to_plain_text(self.config.time_format),
            Command::Status => self.status(),
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Continue(message))
    }

    fn edit(&mut self, edit: impl FnOnce(&Schedule) -> Result<Schedule>) -> Result<String> {
        if apply_edit(&mut self.history, edit)? {
            Ok(self.render())
        } else {
            Ok("Unchanged".to_string())
        }
    }

    fn present(&self) -> Schedule {
        self.history
            .present()
            .map(|s| (*s).clone())
            .unwrap_or_default()
    }

    fn status(&self) -> String {
        format!(
            "undo: {} step(s), redo: {} step(s), languages: {}",
            self.history.undo_depth(),
            self.history.redo_depth(),
            self.config.target_languages.join(", ")
        )
    }

    /// Numbered listing of the present schedule.
    fn render(&self) -> String {
        let Some(schedule) = self.history.present() else {
            return "(empty)".to_string();
        };
        let mut lines = Vec::with_capacity(schedule.len() + 1);
        if !schedule.title.is_empty() {
            lines.push(format!("# {}", schedule.title));
        }
        for (i, event) in schedule.events.iter().enumerate() {
            let time = event.time.render(self.config.time_format);
            let icon = event
                .icon
                .as_deref()
                .map(|icon| format!("{icon} "))
                .unwrap_or_default();
            lines.push(format!("{:>2}. {time:<17} {icon}{}", i + 1, event.title));
        }
        if schedule.is_empty() {
            lines.push("(no events)".to_string());
        }
        lines.join("\n")
    }
}
