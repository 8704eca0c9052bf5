//! Calendar integration port interfaces

use async_trait::async_trait;
use daybrief_domain::{CalendarEvent, CalendarFetchError, DayWindow};

/// Trait for calendar provider operations
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Fetch the events of `calendar_id` inside `window`, in API order
    async fn list_events(
        &self,
        access_token: &str,
        calendar_id: &str,
        window: &DayWindow,
    ) -> Result<Vec<CalendarEvent>, CalendarFetchError>;
}
