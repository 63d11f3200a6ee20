//! Clock port — wall-clock time behind a seam.
//!
//! The executor compares schedule boundaries against local civil time,
//! so it reads the clock through this trait and tests substitute a
//! scripted one.

use chrono::{DateTime, Local};

/// Source of the current local time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
