use std::time::Duration;

use daybrief_domain::{DaybriefError, HttpConfig};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, Url};
use tracing::{debug, warn};

use crate::errors::InfraError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_BACKOFF: Duration = Duration::from_millis(200);
/// Backoff stops doubling after this many retries.
const MAX_BACKOFF_DOUBLINGS: u32 = 6;

/// When a failed call is tried again, and how long to wait first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total tries including the first one; never below 1.
    pub max_attempts: u32,
    pub base_backoff: Duration,
}

impl RetryPolicy {
    /// A single attempt. Authorization codes are single use, so this is the
    /// default for every client.
    pub const fn once() -> Self {
        Self { max_attempts: 1, base_backoff: DEFAULT_BACKOFF }
    }

    /// Wait before try number `attempt` (1-based; the first try never waits).
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let doublings = (attempt - 2).min(MAX_BACKOFF_DOUBLINGS);
        self.base_backoff.saturating_mul(1 << doublings)
    }

    fn has_attempts_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::once()
    }
}

/// Outbound HTTP for the Google adapters: one `reqwest` client with a
/// timeout, a user agent and a [`RetryPolicy`].
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client with default timeout and a single attempt.
    pub fn new() -> Result<Self, DaybriefError> {
        Self::builder().build()
    }

    /// Client for the `[http]` configuration section.
    pub fn from_config(config: &HttpConfig) -> Result<Self, DaybriefError> {
        Self::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .max_attempts(config.max_attempts)
            .user_agent(concat!("daybrief/", env!("CARGO_PKG_VERSION")))
            .build()
    }

    pub fn request<U: reqwest::IntoUrl>(&self, method: Method, url: U) -> RequestBuilder {
        self.client.request(method, url)
    }

    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Execute `builder`. Connect errors, timeouts and 5xx answers are tried
    /// again while the policy allows; any other status is returned as is.
    ///
    /// # Errors
    /// The transport error of the last attempt, converted through
    /// [`InfraError`]. Every attempt sends a clone of `builder`, so a
    /// streaming body is `Internal` whatever the policy.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, DaybriefError> {
        let mut attempt = 1;
        loop {
            let request = self.prepare(&builder)?;
            let method = request.method().clone();
            let url = redacted_url(request.url());
            debug!(attempt, %method, %url, "http_request_sent");

            let outcome = self.client.execute(request).await;
            let retryable = match &outcome {
                Ok(response) => {
                    debug!(attempt, %method, %url, status = %response.status(), "http_response_received");
                    response.status().is_server_error()
                }
                Err(err) => {
                    debug!(attempt, %method, %url, error = %err, "http_request_failed");
                    is_transient(err)
                }
            };

            if !(retryable && self.retry.has_attempts_after(attempt)) {
                return outcome.map_err(|err| InfraError::from(err).into());
            }

            attempt += 1;
            let delay = self.retry.delay_before(attempt);
            warn!(attempt, delay_ms = delay.as_millis(), %url, "http_request_retrying");
            tokio::time::sleep(delay).await;
        }
    }

    fn prepare(&self, builder: &RequestBuilder) -> Result<reqwest::Request, DaybriefError> {
        let builder = builder.try_clone().ok_or_else(|| {
            DaybriefError::Internal("streaming request bodies cannot be sent through HttpClient".into())
        })?;
        builder.build().map_err(|err| InfraError::from(err).into())
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout() || err.is_request()
}

/// URL without its query string, which carries page tokens and time windows.
fn redacted_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.into()
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    retry: RetryPolicy,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: DEFAULT_TIMEOUT, retry: RetryPolicy::once(), user_agent: None }
    }
}

impl HttpClientBuilder {
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total tries per request; 0 is treated as 1.
    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.retry.max_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub const fn base_backoff(mut self, backoff: Duration) -> Self {
        self.retry.base_backoff = backoff;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, DaybriefError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        let client = builder.build().map_err(InfraError::from)?;
        Ok(HttpClient { client, retry: self.retry })
    }
}
