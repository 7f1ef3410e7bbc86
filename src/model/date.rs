use std::fmt;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Output format for directive dates: `YYYY-MM-DD HH:MM`, 24-hour, zero-padded.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Shape of the text between the angle brackets of a directive:
/// `YYYY-MM-DD`, an optional day name (`Fri`), an optional `HH:MM`.
pub(crate) const DATE_PATTERN: &str =
    r"(\d{4})-(\d{1,2})-(\d{1,2})(?:\s+[[:alpha:]]+\.?)?(?:\s+(\d{1,2}):(\d{2}))?";

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^\s*{}\s*$", DATE_PATTERN)).unwrap());

/// A date attached to a node by a `SCHEDULED:` or `DEADLINE:` line.
///
/// Dates carry no time zone; they are naive wall-clock values in whatever zone
/// the reader of the document assumes. A date whose components do not form a
/// real calendar date (e.g. `2024-02-30` or `25:00`) is kept as `Invalid` with
/// its raw text so that it survives a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DirectiveDate {
    Valid(NaiveDateTime),
    Invalid(String),
}

impl DirectiveDate {
    /// Build a date from already-extracted components. `raw` is what gets
    /// preserved if the components are out of range.
    pub fn from_parts(
        raw: &str,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> Self {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .map(DirectiveDate::Valid)
            .unwrap_or_else(|| DirectiveDate::Invalid(raw.trim().to_string()))
    }

    /// Parse the inside of a directive's angle brackets.
    /// Text that is not date-shaped at all is returned as `Invalid`.
    pub fn parse(s: &str) -> Self {
        let Some(caps) = DATE_RE.captures(s) else {
            return DirectiveDate::Invalid(s.trim().to_string());
        };
        Self::from_captures(s, &caps, 1)
    }

    /// Build from regex captures where the year sits in group `first` and
    /// month, day, hour, minute follow in order.
    pub(crate) fn from_captures(raw: &str, caps: &regex::Captures<'_>, first: usize) -> Self {
        let num = |i: usize| caps.get(first + i).and_then(|m| m.as_str().parse::<u32>().ok());
        let year = caps
            .get(first)
            .and_then(|m| m.as_str().parse::<i32>().ok());
        match (year, num(1), num(2)) {
            (Some(year), Some(month), Some(day)) => Self::from_parts(
                raw,
                year,
                month,
                day,
                num(3).unwrap_or(0),
                num(4).unwrap_or(0),
            ),
            _ => DirectiveDate::Invalid(raw.trim().to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, DirectiveDate::Valid(_))
    }

    /// The date-time, if it is a real one.
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        match self {
            DirectiveDate::Valid(dt) => Some(*dt),
            DirectiveDate::Invalid(_) => None,
        }
    }
}

impl From<NaiveDateTime> for DirectiveDate {
    fn from(dt: NaiveDateTime) -> Self {
        DirectiveDate::Valid(dt)
    }
}

impl fmt::Display for DirectiveDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveDate::Valid(dt) => write!(f, "{}", dt.format(DATE_FORMAT)),
            DirectiveDate::Invalid(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for DirectiveDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DirectiveDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(DirectiveDate::parse(&s))
    }
}
