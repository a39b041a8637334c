//! Time source for the calendar features.
//!
//! Feature derivation never reads the wall clock directly; it asks a
//! [`Clock`]. Production uses [`SystemClock`] (local time zone), tests pin an
//! instant with [`FixedClock`].

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

pub trait Clock {
    /// Current local date and time.
    fn local_now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn local_now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn local_now(&self) -> NaiveDateTime {
        (**self).local_now()
    }
}

/// Weekday index, 0 = Monday through 6 = Sunday.
pub fn day_of_week(at: &NaiveDateTime) -> u32 {
    at.weekday().num_days_from_monday()
}

/// Hour of day, 0-23.
pub fn hour_of_day(at: &NaiveDateTime) -> u32 {
    at.hour()
}
