//! Application context - dependency injection container

use std::fs;
use std::path::Path;
use std::sync::Arc;

use daybrief_core::{
    BotService, BotSettings, CalendarProvider, ConversationRepository, MessagingGateway,
    TokenExchanger,
};
use daybrief_domain::{Config, DaybriefError, Result};
use daybrief_infra::errors::map_join_error;
use daybrief_infra::{
    BusinessMessagesGateway, DbManager, GoogleCalendarProvider, GoogleTokenClient, HttpClient,
    ServiceAccountTokenSource, SqliteConversationRepository,
};
use tracing::{info, warn};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub conversations: Arc<dyn ConversationRepository>,
    pub bot: Arc<BotService>,
}

/// Outbound collaborators of the bot, swapped for fakes in tests
pub struct Services {
    pub tokens: Arc<dyn TokenExchanger>,
    pub calendar: Arc<dyn CalendarProvider>,
    pub messaging: Arc<dyn MessagingGateway>,
}

impl AppContext {
    /// Build the production context: SQLite store, Google adapters and the
    /// service-account backed messaging gateway.
    ///
    /// # Errors
    /// Fails when the database cannot be opened or migrated, or when the
    /// service-account key cannot be loaded.
    pub async fn new(config: Config) -> Result<Self> {
        let db = open_database(&config)?;

        let http = HttpClient::from_config(&config.http)?;
        let key_source =
            ServiceAccountTokenSource::from_key_file(&config.messaging.service_account_path)
                .await?;

        let services = Services {
            tokens: Arc::new(GoogleTokenClient::new(http.clone(), &config.oauth)),
            calendar: Arc::new(GoogleCalendarProvider::new(
                http.clone(),
                config.calendar.api_base.clone(),
            )),
            messaging: Arc::new(BusinessMessagesGateway::new(
                http,
                &config.messaging,
                Arc::new(key_source),
            )),
        };

        Ok(Self::with_services(config, db, services))
    }

    /// Assemble a context around an already migrated database.
    pub fn with_services(config: Config, db: Arc<DbManager>, services: Services) -> Self {
        let conversations: Arc<dyn ConversationRepository> =
            Arc::new(SqliteConversationRepository::new(Arc::clone(&db)));

        let settings = BotSettings::new(&config.oauth.client_id, &config.calendar.utc_offset);
        let bot = Arc::new(BotService::new(
            Arc::clone(&conversations),
            services.tokens,
            services.calendar,
            services.messaging,
            settings,
        ));

        info!(db_path = %db.path().display(), "app_context_initialized");
        Self { config, db, conversations, bot }
    }

    /// Check the health of the context's components.
    ///
    /// The database is probed with a query; the OAuth client only needs its
    /// credentials to be present.
    pub async fn health_check(&self) -> HealthStatus {
        let mut status = HealthStatus::new().add_component(self.check_database_health().await);

        status = status.add_component(if self.config.oauth.is_complete() {
            ComponentHealth::healthy("oauth_client")
        } else {
            ComponentHealth::unhealthy("oauth_client", "client id or secret missing")
        });

        status.calculate_score();
        status
    }

    async fn check_database_health(&self) -> ComponentHealth {
        let db = Arc::clone(&self.db);
        let result = tokio::task::spawn_blocking(move || db.health_check())
            .await
            .map_err(map_join_error)
            .and_then(|inner| inner);

        match result {
            Ok(()) => ComponentHealth::healthy("database"),
            Err(err) => {
                warn!(error = %err, "database_health_check_failed");
                ComponentHealth::unhealthy("database", err.to_string())
            }
        }
    }
}

/// Open the configured database, creating its directory, and migrate it.
///
/// # Errors
/// `DaybriefError::Database` when the directory, pool or schema fails.
pub fn open_database(config: &Config) -> Result<Arc<DbManager>> {
    let path = Path::new(&config.database.path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            DaybriefError::Database(format!(
                "failed to create database directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let db = DbManager::new(path, config.database.pool_size)?;
    db.run_migrations()?;
    Ok(Arc::new(db))
}
