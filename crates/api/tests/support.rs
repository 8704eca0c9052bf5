//! Shared fixtures: an `AppContext` over a temp SQLite file with in-process
//! fakes for the outbound Google services.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use daybrief_core::{CalendarProvider, MessagingGateway, TokenExchanger};
use daybrief_domain::{
    CalendarEvent, CalendarFetchError, Config, DayWindow, MessagingError, OAuthClientConfig,
    OutboundMessage, TokenExchangeError,
};
use daybrief_lib::context::{open_database, Services};
use daybrief_lib::AppContext;
use tempfile::TempDir;

pub const CLIENT_ID: &str = "client-123";

/// Records every message instead of sending it.
#[derive(Default)]
pub struct RecordingGateway {
    pub sent: Mutex<Vec<(String, OutboundMessage)>>,
}

impl RecordingGateway {
    pub fn messages(&self) -> Vec<(String, OutboundMessage)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send_with_typing_indicator(
        &self,
        conversation_id: &str,
        message: &OutboundMessage,
    ) -> Result<(), MessagingError> {
        self.sent.lock().unwrap().push((conversation_id.to_string(), message.clone()));
        Ok(())
    }
}

/// Hands out a fixed token and remembers the verifiers it was given.
#[derive(Default)]
pub struct FakeTokens {
    pub verifiers: Mutex<Vec<String>>,
}

#[async_trait]
impl TokenExchanger for FakeTokens {
    async fn exchange_code(
        &self,
        _code: &str,
        code_verifier: &str,
        _redirect_uri: Option<&str>,
    ) -> Result<String, TokenExchangeError> {
        self.verifiers.lock().unwrap().push(code_verifier.to_string());
        Ok("ya29.fake".into())
    }
}

/// Returns the same events for any window.
#[derive(Default)]
pub struct FakeCalendar {
    pub events: Vec<CalendarEvent>,
}

#[async_trait]
impl CalendarProvider for FakeCalendar {
    async fn list_events(
        &self,
        _access_token: &str,
        _calendar_id: &str,
        _window: &DayWindow,
    ) -> Result<Vec<CalendarEvent>, CalendarFetchError> {
        Ok(self.events.clone())
    }
}

pub struct TestApp {
    pub context: Arc<AppContext>,
    pub gateway: Arc<RecordingGateway>,
    pub tokens: Arc<FakeTokens>,
    _temp_dir: TempDir,
}

pub fn test_config(temp_dir: &TempDir) -> Config {
    let mut config = Config {
        oauth: OAuthClientConfig {
            client_id: CLIENT_ID.into(),
            client_secret: "secret".into(),
            ..OAuthClientConfig::default()
        },
        ..Config::default()
    };
    config.database.path = temp_dir.path().join("data").join("daybrief.db").to_string_lossy().into_owned();
    config.database.pool_size = 2;
    config
}

pub fn test_app(events: Vec<CalendarEvent>) -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir);
    let db = open_database(&config).unwrap();

    let gateway = Arc::new(RecordingGateway::default());
    let tokens = Arc::new(FakeTokens::default());
    let services = Services {
        tokens: tokens.clone(),
        calendar: Arc::new(FakeCalendar { events }),
        messaging: gateway.clone(),
    };

    let context = Arc::new(AppContext::with_services(config, db, services));
    TestApp { context, gateway, tokens, _temp_dir: temp_dir }
}
