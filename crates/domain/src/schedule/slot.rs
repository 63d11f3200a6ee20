//! Time slots — HH:MM windows and the minute arithmetic behind them.
//!
//! All comparisons treat a window as the half-open range `[start, end)`
//! in minutes since midnight. A window whose end is not after its start
//! wraps past midnight (23:00–00:30 covers ninety minutes), represented
//! by adding a full day to its end.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minutes in a civil day.
pub const MINUTES_PER_DAY: i32 = 1440;

/// A `[start, end)` time-of-day window expressed as HH:MM strings.
///
/// An end at or before the start means the window runs past midnight
/// into the next day; an end of `00:00` means end-of-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Start of the window, `HH:MM` in 24-hour format.
    pub start: String,
    /// End of the window, `HH:MM` in 24-hour format.
    pub end: String,
}

impl TimeSlot {
    /// Create a slot from HH:MM strings.
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Check that both boundaries are well-formed HH:MM times.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTime`] naming the offending value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for value in [&self.start, &self.end] {
            if !is_valid_time(value) {
                return Err(ValidationError::InvalidTime {
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Start boundary in minutes since midnight.
    #[must_use]
    pub fn start_minute(&self) -> i32 {
        time_to_minutes(&self.start)
    }

    /// End boundary in minutes since midnight, without wraparound
    /// adjustment.
    #[must_use]
    pub fn end_minute(&self) -> i32 {
        time_to_minutes(&self.end)
    }

    /// End boundary adjusted for wraparound: an end at or before the
    /// start lands on the next day, so the value may reach 2880.
    #[must_use]
    pub fn end_minute_adjusted(&self) -> i32 {
        adjusted_end(self.start_minute(), self.end_minute())
    }

    /// Whether the two windows share at least one minute.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        ranges_overlap(
            self.start_minute(),
            self.end_minute(),
            other.start_minute(),
            other.end_minute(),
        )
    }

    /// Whether `next` begins exactly where this window ends.
    #[must_use]
    pub fn adjacent_to(&self, next: &Self) -> bool {
        adjacent(&self.end, &next.start)
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Parse `HH:MM` into minutes since midnight.
///
/// Malformed input yields 0; callers validate with [`is_valid_time`]
/// before arithmetic.
#[must_use]
pub fn time_to_minutes(value: &str) -> i32 {
    let Some((hours, minutes)) = value.split_once(':') else {
        return 0;
    };
    let hours: i32 = hours.parse().unwrap_or(0);
    let minutes: i32 = minutes.parse().unwrap_or(0);
    hours * 60 + minutes
}

/// Format minutes since midnight as `HH:MM`, normalizing modulo one day.
///
/// Negative values wrap backwards (-10 becomes `23:50`).
#[must_use]
pub fn minutes_to_time(minutes: i32) -> String {
    let normalized = minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", normalized / 60, normalized % 60)
}

/// Whether `value` is a well-formed `HH:MM` time of day.
#[must_use]
pub fn is_valid_time(value: &str) -> bool {
    let Some((hours, minutes)) = value.split_once(':') else {
        return false;
    };
    if hours.len() != 2 || minutes.len() != 2 {
        return false;
    }
    if !hours.chars().chain(minutes.chars()).all(|c| c.is_ascii_digit()) {
        return false;
    }
    let (Ok(h), Ok(m)) = (hours.parse::<i32>(), minutes.parse::<i32>()) else {
        return false;
    };
    (0..24).contains(&h) && (0..60).contains(&m)
}

/// Wraparound-adjusted end: an end at or before the start belongs to
/// the next day.
#[must_use]
pub fn adjusted_end(start: i32, end: i32) -> i32 {
    if end <= start { end + MINUTES_PER_DAY } else { end }
}

/// Whether two `[start, end)` windows share at least one minute,
/// accounting for wraparound.
#[must_use]
pub fn ranges_overlap(start1: i32, end1: i32, start2: i32, end2: i32) -> bool {
    overlap_range(start1, end1, start2, end2).is_some()
}

/// Intersection of two windows in adjusted minutes, if any.
///
/// Ends are wraparound-adjusted, so a window may extend past 1440. A
/// window that spills into the next day is additionally compared
/// against the other window shifted by one day, which is how
/// 23:00–00:30 meets 00:00–01:00 at 00:00–00:30.
#[must_use]
pub fn overlap_range(start1: i32, end1: i32, start2: i32, end2: i32) -> Option<(i32, i32)> {
    let end1 = adjusted_end(start1, end1);
    let end2 = adjusted_end(start2, end2);
    intersection(start1, end1, start2, end2)
        .or_else(|| intersection(start1 - MINUTES_PER_DAY, end1 - MINUTES_PER_DAY, start2, end2))
        .or_else(|| intersection(start1, end1, start2 - MINUTES_PER_DAY, end2 - MINUTES_PER_DAY))
}

fn intersection(start1: i32, end1: i32, start2: i32, end2: i32) -> Option<(i32, i32)> {
    let start = start1.max(start2);
    let end = end1.min(end2);
    (start < end).then_some((start, end))
}

/// Whether one window ends exactly where another starts.
///
/// Boundary equality only, no wraparound adjustment: a window ending at
/// `00:00` is adjacent to one starting at `00:00`.
#[must_use]
pub fn adjacent(end: &str, start: &str) -> bool {
    time_to_minutes(end) == time_to_minutes(start)
}
