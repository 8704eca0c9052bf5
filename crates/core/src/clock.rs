//! Source of "today" for the day summary

use chrono::NaiveDate;

pub trait Clock: Send + Sync {
    /// The server's local calendar date
    fn today(&self) -> NaiveDate;
}

/// Reads the local system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
