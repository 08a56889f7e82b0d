//! Day-level records: calendar keys, work log entries and review tasks.
//!
//! # Responsibility
//! - Parse and format the `YYYY-MM-DD` keys used by the store document.
//! - Define `DayRecord` and `ReviewTask` with their wire field names.
//!
//! # Invariants
//! - A `DayKey` always names a real calendar date between years 0000 and 9999.
//! - `DayKey` text order equals chronological order.
//! - `ReviewTask::completed` never goes back to `false`.

use chrono::{Datelike, Days, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";
const MAX_DAY_KEY_YEAR: i32 = 9999;

static DAY_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid day key regex"));

/// Stable identifier assigned to every review task at creation.
pub type TaskId = Uuid;

/// Validation error for day key text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayKeyError {
    /// Text is not shaped like `YYYY-MM-DD`.
    Format(String),
    /// Text is shaped correctly but names no calendar date.
    Calendar(String),
}

impl Display for DayKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format(value) => {
                write!(f, "invalid date `{value}`; expected format YYYY-MM-DD")
            }
            Self::Calendar(value) => write!(f, "invalid date `{value}`; no such calendar day"),
        }
    }
}

impl Error for DayKeyError {}

/// Calendar day used as the store key.
///
/// Serialized as its `YYYY-MM-DD` text, so it can be used directly as a JSON
/// object key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Parses strict `YYYY-MM-DD` text.
    ///
    /// # Errors
    /// - `DayKeyError::Format` when the text is not zero-padded `YYYY-MM-DD`.
    /// - `DayKeyError::Calendar` when the date does not exist (e.g. `2023-02-29`).
    pub fn parse(value: &str) -> Result<Self, DayKeyError> {
        if !DAY_KEY_RE.is_match(value) {
            return Err(DayKeyError::Format(value.to_string()));
        }
        NaiveDate::parse_from_str(value, DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DayKeyError::Calendar(value.to_string()))
    }

    /// Wraps a calendar date.
    ///
    /// Returns `None` for dates whose year cannot be written with four digits.
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        (0..=MAX_DAY_KEY_YEAR)
            .contains(&date.year())
            .then_some(Self(date))
    }

    /// Today's date on the local clock.
    pub fn today_local() -> Self {
        // Local clock years stay well inside the four-digit range.
        Self(Local::now().date_naive())
    }

    /// Adds whole days, failing when the result leaves the supported range.
    pub fn checked_add_days(self, days: u32) -> Option<Self> {
        self.0
            .checked_add_days(Days::new(u64::from(days)))
            .and_then(Self::from_date)
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(self, earlier: DayKey) -> i64 {
        (self.0 - earlier.0).num_days()
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl TryFrom<String> for DayKey {
    type Error = DayKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<DayKey> for String {
    fn from(value: DayKey) -> Self {
        value.to_string()
    }
}

/// One scheduled review of a previously logged work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewTask {
    /// Text of the logged work item; duplicates are allowed.
    pub content: String,
    /// One-way completion flag.
    #[serde(default)]
    pub completed: bool,
    /// Stable identity. Documents written without ids get a fresh one on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: TaskId,
}

impl ReviewTask {
    /// Creates a pending review with a generated id.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), content)
    }

    /// Creates a pending review with a caller-provided id.
    pub fn with_id(id: TaskId, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            completed: false,
            id,
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.completed
    }

    /// Marks the review completed.
    ///
    /// Returns `true` only when this call flipped the flag.
    pub fn complete(&mut self) -> bool {
        let flipped = !self.completed;
        self.completed = true;
        flipped
    }
}

/// Everything stored under one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Work items logged on this day, in insertion order.
    #[serde(default)]
    pub work_done: Vec<String>,
    /// Reviews due on this day, in scheduling order.
    #[serde(default)]
    pub review_tasks: Vec<ReviewTask>,
}

impl DayRecord {
    /// Iterates reviews that are still pending.
    pub fn pending_reviews(&self) -> impl Iterator<Item = &ReviewTask> {
        self.review_tasks.iter().filter(|task| task.is_pending())
    }

    /// Returns the first review whose content matches exactly.
    pub fn first_review_by_content_mut(&mut self, content: &str) -> Option<&mut ReviewTask> {
        self.review_tasks
            .iter_mut()
            .find(|task| task.content == content)
    }

    /// Returns the review with the given id.
    pub fn review_by_id_mut(&mut self, id: TaskId) -> Option<&mut ReviewTask> {
        self.review_tasks.iter_mut().find(|task| task.id == id)
    }
}
