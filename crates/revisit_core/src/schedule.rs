//! Fixed-interval review scheduling.
//!
//! # Responsibility
//! - Map one start day to its seven review days.
//!
//! # Invariants
//! - Offsets are fixed day counts; "1 month" is exactly 30 days.
//! - Output order follows `REVIEW_INTERVALS`.
//! - Pure: no clock access, no store access.

use crate::model::day::DayKey;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One entry of the review offset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewInterval {
    pub label: &'static str,
    pub days: u32,
}

/// Review offsets applied to every logged work item.
pub const REVIEW_INTERVALS: [ReviewInterval; 7] = [
    ReviewInterval {
        label: "1 day later",
        days: 1,
    },
    ReviewInterval {
        label: "3 days later",
        days: 3,
    },
    ReviewInterval {
        label: "1 week later",
        days: 7,
    },
    ReviewInterval {
        label: "2 weeks later",
        days: 14,
    },
    ReviewInterval {
        label: "1 month later",
        days: 30,
    },
    ReviewInterval {
        label: "3 months later",
        days: 90,
    },
    ReviewInterval {
        label: "6 months later",
        days: 180,
    },
];

/// A review day derived from a start day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledReview {
    pub label: &'static str,
    pub offset_days: u32,
    pub date: DayKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A review day would fall past year 9999.
    OutOfRange { start: DayKey, offset_days: u32 },
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { start, offset_days } => write!(
                f,
                "review {offset_days} days after {start} is outside the supported date range"
            ),
        }
    }
}

impl Error for ScheduleError {}

/// Computes the seven review days for work logged on `start`.
///
/// # Errors
/// - `ScheduleError::OutOfRange` when any review day cannot be represented.
pub fn compute_review_dates(start: DayKey) -> Result<Vec<ScheduledReview>, ScheduleError> {
    REVIEW_INTERVALS
        .iter()
        .map(|interval| {
            start
                .checked_add_days(interval.days)
                .map(|date| ScheduledReview {
                    label: interval.label,
                    offset_days: interval.days,
                    date,
                })
                .ok_or(ScheduleError::OutOfRange {
                    start,
                    offset_days: interval.days,
                })
        })
        .collect()
}
