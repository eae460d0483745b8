/// Event time slots: untimed, a single start time, or a span.
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use dayplan_config::TimeFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTime {
    #[default]
    Untimed,
    At(NaiveTime),
    /// `start <= end` is enforced by `span()`, parsing and `validate()`.
    Span { start: NaiveTime, end: NaiveTime },
}

impl EventTime {
    /// Builds a span, rejecting one that ends before it starts.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` is earlier than `start`.
    pub fn span(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if end < start {
            anyhow::bail!(
                "time span ends before it starts ({} > {})",
                start.format("%H:%M"),
                end.format("%H:%M")
            );
        }
        Ok(Self::Span { start, end })
    }

    /// Checks a value that was built without `span()`, e.g. by deserialization.
    ///
    /// # Errors
    ///
    /// Returns an error for a span that ends before it starts.
    pub fn validate(&self) -> Result<()> {
        if let Self::Span { start, end } = *self {
            Self::span(start, end)?;
        }
        Ok(())
    }

    /// Start time used for ordering. `None` for untimed events.
    pub fn start(&self) -> Option<NaiveTime> {
        match self {
            Self::Untimed => None,
            Self::At(t) => Some(*t),
            Self::Span { start, .. } => Some(*start),
        }
    }

    pub fn is_timed(&self) -> bool {
        !matches!(self, Self::Untimed)
    }

    /// Renders the slot for display. Untimed renders as an empty string.
    pub fn render(&self, format: TimeFormat) -> String {
        let pattern = match format {
            TimeFormat::H24 => "%H:%M",
            TimeFormat::H12 => "%-I:%M %p",
        };
        match self {
            Self::Untimed => String::new(),
            Self::At(t) => t.format(pattern).to_string(),
            Self::Span { start, end } => {
                format!("{} - {}", start.format(pattern), end.format(pattern))
            }
        }
    }
}

fn parse_clock(text: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M")
        .with_context(|| format!("invalid time '{}', expected HH:MM", text.trim()))
}

/// Parses `-` (or empty) as untimed, `HH:MM` as a start time and
/// `HH:MM-HH:MM` as a span.
impl FromStr for EventTime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s == "-" {
            return Ok(Self::Untimed);
        }
        match s.split_once('-') {
            Some((start, end)) => Self::span(parse_clock(start)?, parse_clock(end)?),
            None => Ok(Self::At(parse_clock(s)?)),
        }
    }
}

/// Formats in the same shape `from_str` accepts.
impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Untimed => write!(f, "-"),
            Self::At(t) => write!(f, "{}", t.format("%H:%M")),
            Self::Span { start, end } => {
                write!(f, "{}-{}", start.format("%H:%M"), end.format("%H:%M"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_untimed() {
        assert_eq!("-".parse::<EventTime>().unwrap(), EventTime::Untimed);
        assert_eq!("  ".parse::<EventTime>().unwrap(), EventTime::Untimed);
    }

    #[test]
    fn test_parse_single_time() {
        assert_eq!("09:30".parse::<EventTime>().unwrap(), EventTime::At(hm(9, 30)));
    }

    #[test]
    fn test_parse_span() {
        let parsed: EventTime = "09:00-10:15".parse().unwrap();
        assert_eq!(
            parsed,
            EventTime::Span {
                start: hm(9, 0),
                end: hm(10, 15)
            }
        );
    }

    #[test]
    fn test_parse_rejects_inverted_span() {
        assert!("11:00-10:00".parse::<EventTime>().is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("lunch".parse::<EventTime>().is_err());
        assert!("25:00".parse::<EventTime>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for text in ["-", "07:05", "13:00-14:30"] {
            let parsed: EventTime = text.parse().unwrap();
            assert_eq!(parsed.to_string(), text);
        }
    }

    #[test]
    fn test_render_24h_and_12h() {
        let t = EventTime::At(hm(14, 5));
        assert_eq!(t.render(TimeFormat::H24), "14:05");
        assert_eq!(t.render(TimeFormat::H12), "2:05 PM");

        let span = EventTime::span(hm(9, 0), hm(10, 0)).unwrap();
        assert_eq!(span.render(TimeFormat::H24), "09:00 - 10:00");
        assert_eq!(span.render(TimeFormat::H12), "9:00 AM - 10:00 AM");

        assert_eq!(EventTime::Untimed.render(TimeFormat::H24), "");
    }

    #[test]
    fn test_start() {
        assert_eq!(EventTime::Untimed.start(), None);
        assert_eq!(EventTime::At(hm(8, 0)).start(), Some(hm(8, 0)));
        assert!(!EventTime::Untimed.is_timed());
    }

    #[test]
    fn test_validate_inverted_span() {
        let inverted = EventTime::Span {
            start: hm(15, 0),
            end: hm(14, 0),
        };
        assert!(inverted.validate().is_err());
        assert!(EventTime::span(hm(9, 0), hm(9, 0)).unwrap().validate().is_ok());
        assert!(EventTime::Untimed.validate().is_ok());
    }
}
