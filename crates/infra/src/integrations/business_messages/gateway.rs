//! Business Messages implementation of the `MessagingGateway` port

use std::sync::Arc;

use async_trait::async_trait;
use daybrief_core::MessagingGateway;
use daybrief_domain::{MessagingConfig, MessagingError, OutboundMessage};
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use super::auth::AccessTokenSource;
use super::types::{EventRequest, MessageRequest, Representative, TypingEvent};
use crate::http::HttpClient;

/// Sends agent messages wrapped in typing indicators.
pub struct BusinessMessagesGateway {
    http: HttpClient,
    api_base: String,
    tokens: Arc<dyn AccessTokenSource>,
    representative: Representative,
}

impl BusinessMessagesGateway {
    pub fn new(
        http: HttpClient,
        config: &MessagingConfig,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Self {
        Self {
            http,
            api_base: config.api_base.clone(),
            tokens,
            representative: Representative::bot(
                config.representative_name.clone(),
                config.avatar_image.clone(),
            ),
        }
    }

    fn conversation_url(&self, conversation_id: &str, leaf: &str) -> Result<Url, MessagingError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| MessagingError::Request(format!("invalid messaging API base: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| MessagingError::Request("messaging API base cannot be a base".into()))?
            .pop_if_empty()
            .extend(["conversations", conversation_id, leaf]);
        Ok(url)
    }

    async fn send_typing(
        &self,
        conversation_id: &str,
        message_id: &str,
        event: TypingEvent,
        token: &str,
    ) -> Result<(), MessagingError> {
        let mut url = self.conversation_url(conversation_id, "events")?;
        let event_id = format!("{message_id}{}", event.id_suffix());
        url.query_pairs_mut().append_pair("eventId", &event_id);

        let body = EventRequest { event_type: event, representative: &self.representative };
        self.post(url, token, &body).await
    }

    async fn post<B: Serialize + Sync>(
        &self,
        url: Url,
        token: &str,
        body: &B,
    ) -> Result<(), MessagingError> {
        let request = self.http.request(Method::POST, url).bearer_auth(token).json(body);
        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| MessagingError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "messaging_request_rejected");
        Err(MessagingError::Api { status: status.as_u16(), body })
    }
}

#[async_trait]
impl MessagingGateway for BusinessMessagesGateway {
    async fn send_with_typing_indicator(
        &self,
        conversation_id: &str,
        message: &OutboundMessage,
    ) -> Result<(), MessagingError> {
        let token = self.tokens.access_token().await?;
        let message_id = message.message_id.as_str();

        self.send_typing(conversation_id, message_id, TypingEvent::TypingStarted, &token).await?;

        let url = self.conversation_url(conversation_id, "messages")?;
        self.post(url, &token, &MessageRequest::new(message, &self.representative)).await?;

        self.send_typing(conversation_id, message_id, TypingEvent::TypingStopped, &token).await?;

        debug!(conversation_id, message_id, "business_message_delivered");
        Ok(())
    }
}
