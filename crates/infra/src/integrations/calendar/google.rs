//! Google Calendar provider implementation

use std::str::FromStr;

use async_trait::async_trait;
use daybrief_core::CalendarProvider;
use daybrief_domain::{CalendarEvent, CalendarFetchError, DayWindow, EventStatus};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

/// Upper bound on followed `nextPageToken`s for one day.
const MAX_PAGES: usize = 10;

/// Google Calendar events.list client
pub struct GoogleCalendarProvider {
    http: HttpClient,
    api_base: String,
}

impl GoogleCalendarProvider {
    pub fn new(http: HttpClient, api_base: impl Into<String>) -> Self {
        Self { http, api_base: api_base.into() }
    }

    fn events_url(&self, calendar_id: &str) -> Result<Url, CalendarFetchError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| CalendarFetchError::Request(format!("invalid calendar API base: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| CalendarFetchError::Request("calendar API base cannot be a base".into()))?
            .pop_if_empty()
            .extend(["calendars", calendar_id, "events"]);
        Ok(url)
    }

    async fn fetch_page(
        &self,
        url: &Url,
        access_token: &str,
        window: &DayWindow,
        page_token: Option<&str>,
    ) -> Result<GoogleEventsResponse, CalendarFetchError> {
        let mut query = vec![("timeMin", window.time_min.as_str()), ("timeMax", window.time_max.as_str())];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let request =
            self.http.request(Method::GET, url.clone()).bearer_auth(access_token).query(&query);
        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| CalendarFetchError::Request(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| CalendarFetchError::Request(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "calendar_request_rejected");
            return Err(CalendarFetchError::Api { status: status.as_u16(), body });
        }

        serde_json::from_str(&body).map_err(|e| CalendarFetchError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendarProvider {
    async fn list_events(
        &self,
        access_token: &str,
        calendar_id: &str,
        window: &DayWindow,
    ) -> Result<Vec<CalendarEvent>, CalendarFetchError> {
        let url = self.events_url(calendar_id)?;
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        for page in 1..=MAX_PAGES {
            let response =
                self.fetch_page(&url, access_token, window, page_token.as_deref()).await?;
            events.extend(response.items.into_iter().map(CalendarEvent::from));

            match response.next_page_token {
                Some(next) if page < MAX_PAGES => page_token = Some(next),
                Some(_) => {
                    warn!(pages = MAX_PAGES, "calendar_page_limit_reached");
                    break;
                }
                None => break,
            }
        }

        debug!(calendar_id, events = events.len(), "calendar_events_fetched");
        Ok(events)
    }
}

#[derive(Debug, Deserialize)]
struct GoogleEventsResponse {
    #[serde(default)]
    items: Vec<GoogleCalendarEvent>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleCalendarEvent {
    summary: Option<String>,
    status: Option<String>,
    start: Option<EventDateTime>,
}

#[derive(Debug, Deserialize)]
struct EventDateTime {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
}

impl From<GoogleCalendarEvent> for CalendarEvent {
    fn from(event: GoogleCalendarEvent) -> Self {
        Self {
            summary: event.summary,
            status: event.status.as_deref().and_then(|s| EventStatus::from_str(s).ok()),
            start_date_time: event.start.and_then(|start| start.date_time),
        }
    }
}
