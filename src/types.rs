//! Shared value types used by documents, the skills catalogue and rendering.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A skill used in the context of a document (an experience, a project).
///
/// The name is the identifier that links back to the skills catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// How the skill was used in this particular context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A span of time with either end optional. A missing end means "ongoing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriod {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl TimePeriod {
    /// Card heading such as `January 2020 - March 2023` or `May 2024 - Present`.
    ///
    /// `None` when the period has no start.
    pub fn label(&self) -> Option<String> {
        let start = self.start?;
        let end = match self.end {
            Some(end) => end.format("%B %Y").to_string(),
            None => "Present".to_string(),
        };
        Some(format!("{} - {}", start.format("%B %Y"), end))
    }
}

/// Parse a timestamp with a strftime-style format.
///
/// Formats that stop short of a full date (`%Y-%m`, `%Y`) are accepted: the
/// missing day and month default to the first, and the time to midnight.
pub fn parse_timestamp(raw: &str, format: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
        return Ok(datetime);
    }
    let date = NaiveDate::parse_from_str(raw, format)
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), &format!("{format}-%d")))
        .or_else(|_| {
            NaiveDate::parse_from_str(&format!("{raw}-01-01"), &format!("{format}-%m-%d"))
        })
        .or_else(|_| NaiveDate::parse_from_str(raw, format))?;
    Ok(date.and_time(NaiveTime::MIN))
}
