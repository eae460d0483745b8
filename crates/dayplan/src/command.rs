/// Line commands understood by the session driver.
///
/// Event positions are 1-based on the command line and 0-based once parsed.
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use dayplan_core::EventTime;

pub const HELP: &str = "\
commands:
  title <text>              set the schedule title
  add <time|-> <title>      append an event (time: HH:MM, HH:MM-HH:MM or -)
  remove <n>                delete event n
  move <from> <to>          reorder an event
  rename <n> <title>        change an event title
  time <n> <time|->         change an event time
  icon <n> [icon]           set or clear an event icon
  note <n> [text]           set or clear an event note
  sort                      order events by start time
  translation <lang> <text> store a translated rendering
  undo | redo               step through history
  load <file>               load a template as a fresh baseline
  save <file>               write the current schedule
  show | text | status      inspect the schedule
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Title(String),
    Add { time: EventTime, title: String },
    Remove(usize),
    Move { from: usize, to: usize },
    Rename { index: usize, title: String },
    Time { index: usize, time: EventTime },
    Icon { index: usize, icon: Option<String> },
    Note { index: usize, note: Option<String> },
    Sort,
    Translation { language: String, text: String },
    Undo,
    Redo,
    Load(PathBuf),
    Save(PathBuf),
    Show,
    Text,
    Status,
    Help,
    Quit,
}

/// Parses a 1-based event position into a 0-based index.
fn parse_index(token: &str) -> Result<usize> {
    let n: usize = token
        .parse()
        .with_context(|| format!("invalid event number '{token}'"))?;
    if n == 0 {
        anyhow::bail!("event numbers start at 1");
    }
    Ok(n - 1)
}

/// Splits `text` into its first word and the trimmed remainder.
fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (text, ""),
    }
}

fn required<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    if value.is_empty() {
        anyhow::bail!("missing {what}");
    }
    Ok(value)
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let (verb, rest) = split_word(line.trim());
        let command = match verb.to_lowercase().as_str() {
            "title" => Self::Title(rest.to_string()),
            "add" => {
                let (time, title) = split_word(rest);
                Self::Add {
                    time: required(time, "time")?.parse()?,
                    title: required(title, "title")?.to_string(),
                }
            }
            "remove" | "rm" => Self::Remove(parse_index(required(rest, "event number")?)?),
            "move" | "mv" => {
                let (from, to) = split_word(rest);
                Self::Move {
                    from: parse_index(required(from, "source position")?)?,
                    to: parse_index(required(to, "target position")?)?,
                }
            }
            "rename" => {
                let (index, title) = split_word(rest);
                Self::Rename {
                    index: parse_index(required(index, "event number")?)?,
                    title: required(title, "title")?.to_string(),
                }
            }
            "time" => {
                let (index, time) = split_word(rest);
                Self::Time {
                    index: parse_index(required(index, "event number")?)?,
                    time: time.parse()?,
                }
            }
            "icon" => {
                let (index, icon) = split_word(rest);
                Self::Icon {
                    index: parse_index(required(index, "event number")?)?,
                    icon: optional(icon),
                }
            }
            "note" => {
                let (index, note) = split_word(rest);
                Self::Note {
                    index: parse_index(required(index, "event number")?)?,
                    note: optional(note),
                }
            }
            "sort" => Self::Sort,
            "translation" | "tr" => {
                let (language, text) = split_word(rest);
                Self::Translation {
                    language: required(language, "language code")?.to_string(),
                    text: required(text, "translated text")?.to_string(),
                }
            }
            "undo" | "u" => Self::Undo,
            "redo" | "r" => Self::Redo,
            "load" => Self::Load(PathBuf::from(required(rest, "file path")?)),
            "save" => Self::Save(PathBuf::from(required(rest, "file path")?)),
            "show" | "ls" => Self::Show,
            "text" => Self::Text,
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => anyhow::bail!("unknown command '{other}' (try 'help')"),
        };
        Ok(command)
    }
}
