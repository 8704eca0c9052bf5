//! Calendar event items as the day summary sees them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{DAY_WINDOW_END, DAY_WINDOW_START};

/// Attendance status reported by Google Calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

crate::impl_domain_status_conversions!(EventStatus {
    Confirmed => "confirmed",
    Tentative => "tentative",
    Cancelled => "cancelled",
});

/// A single event, reduced to the fields the summary uses.
///
/// Every field is optional because the API omits them freely; an unknown
/// status string is stored as `None` and treated as not confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: Option<String>,
    pub status: Option<EventStatus>,
    /// Raw `start.dateTime` (RFC 3339); all-day events only have `start.date`.
    pub start_date_time: Option<String>,
}

impl CalendarEvent {
    pub fn is_confirmed(&self) -> bool {
        self.status == Some(EventStatus::Confirmed)
    }
}

/// Query bounds for one day, `[06:00:00, 23:59:59]` at a fixed UTC offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayWindow {
    pub date: NaiveDate,
    pub time_min: String,
    pub time_max: String,
}

impl DayWindow {
    pub fn for_date(date: NaiveDate, utc_offset: &str) -> Self {
        let day = date.format("%Y-%m-%d");
        Self {
            date,
            time_min: format!("{day}T{DAY_WINDOW_START}{utc_offset}"),
            time_max: format!("{day}T{DAY_WINDOW_END}{utc_offset}"),
        }
    }

    /// `YYYY-MM-DD`, used for the same-day check on event start times.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
