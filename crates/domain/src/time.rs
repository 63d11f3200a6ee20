//! Time and timestamp helpers.
//!
//! The engine distinguishes two notions of time: UTC [`Timestamp`]s for
//! record-keeping (log entries, schedule audit fields) and the civil
//! wall clock the schedules are written against ([`CivilDate`] plus a
//! minute-of-day).

use chrono::{DateTime, TimeZone, Timelike, Utc};

/// UTC timestamp used for `created_at`, `updated_at`, and log records.
pub type Timestamp = DateTime<Utc>;

/// Calendar date in the fixed civil timezone, used to decide whether a
/// one-time schedule applies today.
pub type CivilDate = chrono::NaiveDate;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Minutes elapsed since midnight on the instant's own calendar day.
///
/// HH:MM schedule boundaries are compared against this value, so it is
/// always in `[0, 1440)`.
#[must_use]
pub fn minute_of_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> i32 {
    let time = instant.time();
    i32::try_from(time.hour() * 60 + time.minute()).unwrap_or(0)
}
