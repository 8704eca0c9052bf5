//! Inbound HTTP surface: the Business Messages webhook, a landing page and
//! a health probe.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use daybrief_domain::constants::{REPRESENTATIVE_DISPLAY_NAME, WEBHOOK_ACK, WEBHOOK_WRONG_METHOD};
use daybrief_domain::{DaybriefError, InboundWebhook, Result};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::utils::health::ComponentHealth;

const DEVELOPER_CONSOLE_URL: &str = "https://business-communications.sandbox.google.com/console/";

/// Routes of the webhook server.
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(landing_page))
        .route("/health", get(health))
        .route("/callback", post(callback).fallback(wrong_method))
        .with_state(context)
}

/// Bind `config.server.bind_addr` and serve until ctrl-c.
///
/// # Errors
/// `DaybriefError::Config` for an unparseable address, `Network` when the
/// socket cannot be bound or the server stops with an error.
pub async fn serve(context: Arc<AppContext>) -> Result<()> {
    let addr: SocketAddr = context.config.server.bind_addr.parse().map_err(|e| {
        DaybriefError::Config(format!(
            "invalid bind address {}: {e}",
            context.config.server.bind_addr
        ))
    })?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| DaybriefError::Network(format!("failed to bind {addr}: {e}")))?;
    info!(%addr, "webhook_server_listening");

    axum::serve(listener, router(context))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown_signal_received");
            }
        })
        .await
        .map_err(|e| DaybriefError::Network(format!("webhook server error: {e}")))
}

/// Every delivery is acknowledged with the same body; failures are only
/// logged.
async fn callback(State(context): State<Arc<AppContext>>, body: Bytes) -> &'static str {
    match InboundWebhook::parse(&body) {
        Ok(webhook) => {
            context.bot.handle_event(webhook).await;
        }
        Err(err) => warn!(error = %err, bytes = body.len(), "webhook_payload_rejected"),
    }
    WEBHOOK_ACK
}

async fn wrong_method() -> &'static str {
    WEBHOOK_WRONG_METHOD
}

async fn landing_page() -> Html<String> {
    Html(format!(
        "<h1>Welcome to {REPRESENTATIVE_DISPLAY_NAME}</h1>\n\
         <br/><br/>\n\
         Check out the <a href=\"{DEVELOPER_CONSOLE_URL}\">\n\
         Business Communications Developer Console</a> to access this agent's\n\
         test URLs.\n"
    ))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    score: f64,
    components: Vec<ComponentHealth>,
    timestamp: i64,
}

async fn health(State(context): State<Arc<AppContext>>) -> impl IntoResponse {
    let status = context.health_check().await;
    let (code, label) = if status.is_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: label,
        version: env!("CARGO_PKG_VERSION"),
        score: status.score,
        components: status.components,
        timestamp: status.timestamp,
    };
    (code, Json(body))
}
