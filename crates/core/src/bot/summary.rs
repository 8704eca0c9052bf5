//! Day summary builder
//!
//! Turns the raw event list for one day into the messages the bot sends:
//! an optional busy-day warning, a header and the listing with a chip that
//! starts the flow again.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use daybrief_domain::constants::{
    BUSY_DAY_THRESHOLD, BUSY_DAY_WARNING_TEXT, CMD_LOGIN, EVENT_START_FORMAT,
    REPLAY_SUGGESTION_TEXT, SUMMARY_HEADER_TEXT,
};
use daybrief_domain::{CalendarEvent, EventClassificationError, OutboundMessage, Suggestion};
use tracing::debug;

/// Distinct confirmed event titles for one day, in start-time order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySummary {
    pub summaries: Vec<String>,
    /// Events dropped because they could not be classified.
    pub skipped: usize,
}

impl DaySummary {
    /// Sort, filter and deduplicate `events` for the day `date` (`YYYY-MM-DD`).
    pub fn from_events(mut events: Vec<CalendarEvent>, date: &str) -> Self {
        sort_by_start(&mut events);

        let mut seen = HashSet::new();
        let mut summary = Self::default();
        for event in &events {
            match classify(event, date) {
                Ok(Some(title)) => {
                    if seen.insert(title) {
                        summary.summaries.push(title.to_string());
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    debug!(error = %err, "calendar_event_skipped");
                    summary.skipped += 1;
                }
            }
        }
        summary
    }

    pub fn is_busy(&self) -> bool {
        self.summaries.len() > BUSY_DAY_THRESHOLD
    }

    /// One `- title` line per retained event; empty when nothing was retained.
    pub fn listing(&self) -> String {
        self.summaries.iter().map(|title| format!("- {title}\n")).collect()
    }

    /// Messages to send, in order.
    pub fn messages(&self) -> Vec<OutboundMessage> {
        let mut messages = Vec::with_capacity(3);
        if self.is_busy() {
            messages.push(OutboundMessage::text(BUSY_DAY_WARNING_TEXT));
        }
        messages.push(OutboundMessage::text(SUMMARY_HEADER_TEXT));
        messages.push(OutboundMessage::text(self.listing()).with_suggestion(Suggestion::Reply {
            text: REPLAY_SUGGESTION_TEXT.to_string(),
            postback_data: CMD_LOGIN.to_string(),
        }));
        messages
    }
}

/// Stable ascending sort by start time; events without a parseable start go
/// last.
pub fn sort_by_start(events: &mut [CalendarEvent]) {
    events.sort_by_cached_key(|event| {
        let start = start_key(event);
        (start.is_none(), start)
    });
}

fn start_key(event: &CalendarEvent) -> Option<NaiveDateTime> {
    let raw = event.start_date_time.as_deref()?;
    NaiveDateTime::parse_from_str(raw.get(..19)?, EVENT_START_FORMAT).ok()
}

/// Decide whether `event` belongs in the summary for `date`.
///
/// `Ok(None)` filters the event out (not confirmed, or starting on another
/// day). Confirmed events lacking the fields the summary needs are errors so
/// the caller can count them.
pub fn classify<'a>(
    event: &'a CalendarEvent,
    date: &str,
) -> Result<Option<&'a str>, EventClassificationError> {
    if !event.is_confirmed() {
        return Ok(None);
    }
    let start = event.start_date_time.as_deref().ok_or(EventClassificationError::MissingStart)?;
    if !start.contains(date) {
        return Ok(None);
    }
    event.summary.as_deref().map(Some).ok_or(EventClassificationError::MissingSummary)
}

#[cfg(test)]
mod tests {
    use daybrief_domain::EventStatus;

    use super::*;

    const DAY: &str = "2024-01-01";

    fn event(summary: &str, start: Option<&str>) -> CalendarEvent {
        CalendarEvent {
            summary: Some(summary.to_string()),
            status: Some(EventStatus::Confirmed),
            start_date_time: start.map(str::to_string),
        }
    }

    #[test]
    fn sorts_by_start_with_missing_last() {
        let mut events = vec![
            event("none", None),
            event("nine", Some("2024-01-01T09:00:00")),
            event("eight", Some("2024-01-01T08:00:00")),
        ];

        sort_by_start(&mut events);

        let order: Vec<_> = events.iter().map(|e| e.summary.as_deref().unwrap()).collect();
        assert_eq!(order, ["eight", "nine", "none"]);
    }

    #[test]
    fn sort_ignores_offset_suffix_and_keeps_ties_stable() {
        let mut events = vec![
            event("garbage", Some("soon")),
            event("b", Some("2024-01-01T10:00:00-07:00")),
            event("a", Some("2024-01-01T10:00:00Z")),
            event("early", Some("2024-01-01T07:30:00.000-07:00")),
        ];

        sort_by_start(&mut events);

        let order: Vec<_> = events.iter().map(|e| e.summary.as_deref().unwrap()).collect();
        assert_eq!(order, ["early", "b", "a", "garbage"]);
    }

    #[test]
    fn duplicate_confirmed_titles_are_listed_once() {
        let summary = DaySummary::from_events(
            vec![
                event("Standup", Some("2024-01-01T09:00:00-07:00")),
                event("Standup", Some("2024-01-01T10:00:00-07:00")),
                event("Review", Some("2024-01-01T11:00:00-07:00")),
            ],
            DAY,
        );

        assert_eq!(summary.summaries, ["Standup", "Review"]);
        assert_eq!(summary.listing(), "- Standup\n- Review\n");
    }

    #[test]
    fn unconfirmed_and_other_day_events_are_filtered() {
        let mut tentative = event("Maybe", Some("2024-01-01T09:00:00"));
        tentative.status = Some(EventStatus::Tentative);
        let mut unknown = event("Unknown", Some("2024-01-01T09:00:00"));
        unknown.status = None;

        let summary = DaySummary::from_events(
            vec![tentative, unknown, event("Tomorrow", Some("2024-01-02T09:00:00"))],
            DAY,
        );

        assert!(summary.summaries.is_empty());
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn unclassifiable_events_are_skipped_not_fatal() {
        let all_day = event("Holiday", None);
        let untitled = CalendarEvent { summary: None, ..event("", Some("2024-01-01T12:00:00")) };

        let summary = DaySummary::from_events(
            vec![all_day, untitled, event("Lunch", Some("2024-01-01T12:30:00"))],
            DAY,
        );

        assert_eq!(summary.summaries, ["Lunch"]);
        assert_eq!(summary.skipped, 2);
    }

    #[test]
    fn classify_reports_missing_fields() {
        assert_eq!(classify(&event("x", None), DAY), Err(EventClassificationError::MissingStart));
        let untitled = CalendarEvent { summary: None, ..event("", Some("2024-01-01T12:00:00")) };
        assert_eq!(classify(&untitled, DAY), Err(EventClassificationError::MissingSummary));
    }

    #[test]
    fn warning_only_above_four_events() {
        let day_with = |count: usize| {
            let events = (0..count)
                .map(|i| {
                    let start = format!("2024-01-01T1{i}:00:00");
                    event(&format!("Meeting {i}"), Some(start.as_str()))
                })
                .collect();
            DaySummary::from_events(events, DAY)
        };

        let four = day_with(4).messages();
        assert_eq!(four.len(), 2);
        assert_eq!(four[0].text, SUMMARY_HEADER_TEXT);

        let five = day_with(5).messages();
        assert_eq!(five.len(), 3);
        assert_eq!(five[0].text, "Looks like you have a lot of meetings today!");
        assert_eq!(five[1].text, "Here's the list of items or your calendar...");
    }

    #[test]
    fn listing_message_carries_replay_chip_even_when_empty() {
        let messages = DaySummary::default().messages();
        let listing = messages.last().unwrap();

        assert_eq!(listing.text, "");
        assert_eq!(
            listing.suggestions,
            vec![Suggestion::Reply { text: "Let's do it again!".into(), postback_data: "login".into() }]
        );
    }
}
