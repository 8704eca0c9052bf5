//! Shared test helpers for `daybrief-core` integration tests.
//!
//! Lightweight in-memory implementations of every port so the bot tests can
//! focus on behaviour instead of boilerplate.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use daybrief_core::{
    CalendarProvider, Clock, ConversationRepository, MessagingGateway, TokenExchanger,
};
use daybrief_domain::{
    CalendarEvent, CalendarFetchError, Conversation, DayWindow, MessagingError, OutboundMessage,
    Result as DomainResult, TokenExchangeError,
};

/// In-memory `ConversationRepository`.
#[derive(Default, Clone)]
pub struct InMemoryConversations {
    rows: Arc<Mutex<HashMap<String, Conversation>>>,
}

impl InMemoryConversations {
    pub fn with(conversation: Conversation) -> Self {
        let repo = Self::default();
        repo.rows.lock().unwrap().insert(conversation.id.clone(), conversation);
        repo
    }

    pub fn verifier(&self, id: &str) -> Option<String> {
        self.rows.lock().unwrap().get(id).and_then(|c| c.code_verifier.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rows.lock().unwrap().contains_key(id)
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversations {
    async fn get(&self, id: &str) -> DomainResult<Option<Conversation>> {
        Ok(self.rows.lock().unwrap().get(id).cloned())
    }

    async fn upsert(&self, conversation: Conversation) -> DomainResult<()> {
        self.rows.lock().unwrap().insert(conversation.id.clone(), conversation);
        Ok(())
    }

    async fn insert_if_absent(&self, id: &str) -> DomainResult<()> {
        self.rows
            .lock()
            .unwrap()
            .entry(id.to_owned())
            .or_insert_with(|| Conversation::new(id));
        Ok(())
    }
}

/// Records every message handed to the gateway; optionally fails from the
/// n-th send on.
#[derive(Default, Clone)]
pub struct RecordingGateway {
    sent: Arc<Mutex<Vec<(String, OutboundMessage)>>>,
    fail_from: Option<usize>,
}

impl RecordingGateway {
    pub fn failing_from(index: usize) -> Self {
        Self { fail_from: Some(index), ..Self::default() }
    }

    pub fn sent(&self) -> Vec<(String, OutboundMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, m)| m.text).collect()
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send_with_typing_indicator(
        &self,
        conversation_id: &str,
        message: &OutboundMessage,
    ) -> Result<(), MessagingError> {
        let mut sent = self.sent.lock().unwrap();
        if self.fail_from.is_some_and(|n| sent.len() >= n) {
            return Err(MessagingError::Api { status: 503, body: "unavailable".into() });
        }
        sent.push((conversation_id.to_string(), message.clone()));
        Ok(())
    }
}

/// Token exchanger returning a canned result and recording its inputs.
#[derive(Clone)]
pub struct StubTokens {
    result: Result<String, TokenExchangeError>,
    calls: Arc<Mutex<Vec<(String, String, Option<String>)>>>,
}

impl StubTokens {
    pub fn ok(token: &str) -> Self {
        Self { result: Ok(token.to_string()), calls: Arc::default() }
    }

    pub fn failing(err: TokenExchangeError) -> Self {
        Self { result: Err(err), calls: Arc::default() }
    }

    pub fn calls(&self) -> Vec<(String, String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenExchanger for StubTokens {
    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
        redirect_uri: Option<&str>,
    ) -> Result<String, TokenExchangeError> {
        self.calls.lock().unwrap().push((
            code.to_string(),
            code_verifier.to_string(),
            redirect_uri.map(str::to_string),
        ));
        self.result.clone()
    }
}

/// Calendar returning fixed events and recording the requested windows.
#[derive(Clone)]
pub struct StubCalendar {
    result: Result<Vec<CalendarEvent>, CalendarFetchError>,
    requests: Arc<Mutex<Vec<(String, String, DayWindow)>>>,
}

impl StubCalendar {
    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        Self { result: Ok(events), requests: Arc::default() }
    }

    pub fn failing(err: CalendarFetchError) -> Self {
        Self { result: Err(err), requests: Arc::default() }
    }

    pub fn requests(&self) -> Vec<(String, String, DayWindow)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalendarProvider for StubCalendar {
    async fn list_events(
        &self,
        access_token: &str,
        calendar_id: &str,
        window: &DayWindow,
    ) -> Result<Vec<CalendarEvent>, CalendarFetchError> {
        self.requests.lock().unwrap().push((
            access_token.to_string(),
            calendar_id.to_string(),
            window.clone(),
        ));
        self.result.clone()
    }
}

/// Clock pinned to one date.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
