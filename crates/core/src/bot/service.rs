//! Bot service - the single entry point for inbound webhook events
//!
//! Every failure ends here: it is logged and the user sees nothing. The
//! returned [`Outcome`] only feeds logs and tests.

use std::sync::Arc;

use daybrief_common::auth::PKCEChallenge;
use daybrief_domain::constants::CALENDAR_ID_PRIMARY;
use daybrief_domain::{
    Conversation, DaybriefError, DayWindow, InboundEvent, InboundWebhook, OutboundMessage, Result,
};
use tracing::{debug, error, info, warn};

use super::login::login_prompt;
use super::router::{echo_reply, route, Route};
use super::summary::DaySummary;
use crate::auth_ports::TokenExchanger;
use crate::calendar_ports::CalendarProvider;
use crate::clock::{Clock, SystemClock};
use crate::conversation_ports::ConversationRepository;
use crate::messaging_ports::MessagingGateway;

/// Static values the bot needs besides its ports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSettings {
    /// OAuth client the sign-in chip requests consent for
    pub client_id: String,
    /// Fixed UTC offset of the day window, e.g. `-07:00`
    pub utc_offset: String,
    pub calendar_id: String,
}

impl BotSettings {
    pub fn new(client_id: impl Into<String>, utc_offset: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            utc_offset: utc_offset.into(),
            calendar_id: CALENDAR_ID_PRIMARY.to_string(),
        }
    }
}

/// What handling an event amounted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `messages` were delivered to the conversation.
    Replied { messages: usize },
    /// Nothing to do; `reason` is a short log label.
    Ignored { reason: &'static str },
    /// Handling stopped at `error`; the user is not told.
    Failed { error: DaybriefError },
}

impl Outcome {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Replied { .. } => "replied",
            Self::Ignored { .. } => "ignored",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Calendar assistant bot
pub struct BotService {
    conversations: Arc<dyn ConversationRepository>,
    tokens: Arc<dyn TokenExchanger>,
    calendar: Arc<dyn CalendarProvider>,
    messaging: Arc<dyn MessagingGateway>,
    clock: Arc<dyn Clock>,
    settings: BotSettings,
}

impl BotService {
    /// Create a bot that reads "today" from the system clock
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        tokens: Arc<dyn TokenExchanger>,
        calendar: Arc<dyn CalendarProvider>,
        messaging: Arc<dyn MessagingGateway>,
        settings: BotSettings,
    ) -> Self {
        Self { conversations, tokens, calendar, messaging, clock: Arc::new(SystemClock), settings }
    }

    /// Replace the clock (tests pin the date)
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &BotSettings {
        &self.settings
    }

    /// Handle one decoded webhook delivery. Never fails; see [`Outcome`].
    pub async fn handle_event(&self, webhook: InboundWebhook) -> Outcome {
        info!(
            conversation_id = %webhook.conversation_id,
            event = webhook.event.kind(),
            display_name = webhook.display_name.as_deref().unwrap_or(""),
            "webhook_event_received"
        );

        let conversation_id = webhook.conversation_id.clone();
        match self.dispatch(webhook).await {
            Ok(outcome) => {
                info!(%conversation_id, outcome = outcome.label(), "webhook_event_handled");
                outcome
            }
            Err(error) => {
                error!(%conversation_id, error = %error, "webhook_event_failed");
                Outcome::Failed { error }
            }
        }
    }

    async fn dispatch(&self, webhook: InboundWebhook) -> Result<Outcome> {
        let conversation = self.conversations.get_or_create(&webhook.conversation_id).await?;

        match webhook.event {
            InboundEvent::TextMessage { text }
            | InboundEvent::SuggestionResponse { postback_data: text } => {
                self.route_message(&text, &conversation).await
            }
            InboundEvent::AuthResponse { code, redirect_uri } => {
                self.complete_login(&conversation, code.as_deref(), redirect_uri.as_deref()).await
            }
            InboundEvent::UserStatus(status) => {
                info!(conversation_id = %conversation.id, ?status, "user_status_received");
                Ok(Outcome::Ignored { reason: "user_status" })
            }
            InboundEvent::Unknown => Ok(Outcome::Ignored { reason: "unsupported_event" }),
        }
    }

    /// Route a text or postback for `conversation` to its handler.
    ///
    /// # Errors
    /// Propagates storage and messaging failures.
    pub async fn route_message(&self, text: &str, conversation: &Conversation) -> Result<Outcome> {
        let route = route(text);
        debug!(conversation_id = %conversation.id, ?route, "message_routed");
        match route {
            Route::Login => self.invoke_login(conversation).await,
            Route::Echo => {
                self.send(&conversation.id, &echo_reply(text)).await?;
                Ok(Outcome::Replied { messages: 1 })
            }
        }
    }

    /// Start a PKCE sign-in: store a fresh verifier, then send the chip.
    ///
    /// The verifier is persisted before the message goes out so that an
    /// authentication response can never arrive ahead of it.
    ///
    /// # Errors
    /// Propagates storage and messaging failures.
    pub async fn invoke_login(&self, conversation: &Conversation) -> Result<Outcome> {
        let pkce = PKCEChallenge::generate();
        let updated = conversation.clone().with_code_verifier(pkce.code_verifier.clone());
        self.conversations.upsert(updated).await?;
        info!(
            conversation_id = %conversation.id,
            verifier_len = pkce.code_verifier.len(),
            "login_verifier_stored"
        );

        self.send(&conversation.id, &login_prompt(&self.settings.client_id, &pkce.code_challenge))
            .await?;
        Ok(Outcome::Replied { messages: 1 })
    }

    async fn complete_login(
        &self,
        conversation: &Conversation,
        code: Option<&str>,
        redirect_uri: Option<&str>,
    ) -> Result<Outcome> {
        let (Some(verifier), Some(code)) = (conversation.code_verifier.as_deref(), code) else {
            warn!(
                conversation_id = %conversation.id,
                has_verifier = conversation.code_verifier.is_some(),
                has_code = code.is_some(),
                "auth_response_incomplete"
            );
            return Ok(Outcome::Ignored { reason: "missing_verifier_or_code" });
        };

        let access_token = self.tokens.exchange_code(code, verifier, redirect_uri).await?;
        info!(conversation_id = %conversation.id, "access_token_obtained");

        self.send_day_summary(&conversation.id, &access_token).await
    }

    /// Fetch today's events with `access_token` and send the summary.
    ///
    /// # Errors
    /// A calendar or messaging failure stops the summary; messages already
    /// sent stay sent.
    pub async fn send_day_summary(
        &self,
        conversation_id: &str,
        access_token: &str,
    ) -> Result<Outcome> {
        let window = DayWindow::for_date(self.clock.today(), &self.settings.utc_offset);
        let events =
            self.calendar.list_events(access_token, &self.settings.calendar_id, &window).await?;
        let fetched = events.len();

        let summary = DaySummary::from_events(events, &window.date_string());
        info!(
            conversation_id,
            fetched,
            retained = summary.summaries.len(),
            skipped = summary.skipped,
            "day_summary_built"
        );

        let messages = summary.messages();
        for message in &messages {
            self.send(conversation_id, message).await?;
        }
        Ok(Outcome::Replied { messages: messages.len() })
    }

    async fn send(&self, conversation_id: &str, message: &OutboundMessage) -> Result<()> {
        self.messaging.send_with_typing_indicator(conversation_id, message).await?;
        debug!(conversation_id, message_id = %message.message_id, "message_sent");
        Ok(())
    }
}
