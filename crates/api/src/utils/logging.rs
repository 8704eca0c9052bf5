use daybrief_domain::{DaybriefError, LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `config.default_filter`. Calling this twice is a
/// no-op, so tests and the binary can share it.
pub fn init_tracing(config: &LoggingConfig) {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}

/// Convert a `DaybriefError` into a stable label suitable for logging.
#[inline]
pub const fn error_label(error: &DaybriefError) -> &'static str {
    match error {
        DaybriefError::Database(_) => "database",
        DaybriefError::Config(_) => "config",
        DaybriefError::Network(_) => "network",
        DaybriefError::Auth(_) => "auth",
        DaybriefError::NotFound(_) => "not_found",
        DaybriefError::InvalidInput(_) => "invalid_input",
        DaybriefError::Messaging(_) => "messaging",
        DaybriefError::Internal(_) => "internal",
    }
}
