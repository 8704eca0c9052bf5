//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the OAuth client credentials are not in the environment, falls back
//!    to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Either way the OAuth client id and secret must end up set.
//!
//! ## Environment Variables
//! - `OAUTH_CLIENT_ID`, `OAUTH_CLIENT_SECRET`: OAuth client (required)
//! - `DAYBRIEF_SERVICE_ACCOUNT_PATH`: Business Messages service-account key
//! - `DAYBRIEF_DB_PATH`, `DAYBRIEF_DB_POOL_SIZE`: SQLite file and pool size
//! - `DAYBRIEF_BIND_ADDR`: Webhook server address
//! - `DAYBRIEF_CALENDAR_UTC_OFFSET`: Offset of the day window, e.g. `-07:00`
//! - `DAYBRIEF_TOKEN_ENDPOINT`, `DAYBRIEF_CALENDAR_API_BASE`,
//!   `DAYBRIEF_MESSAGING_API_BASE`: Upstream endpoints
//! - `DAYBRIEF_HTTP_TIMEOUT_SECS`, `DAYBRIEF_HTTP_MAX_ATTEMPTS`: Outbound HTTP
//! - `DAYBRIEF_LOG_FORMAT`: `pretty` or `json`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./daybrief.json` or `./daybrief.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use daybrief_domain::{Config, DaybriefError, LogFormat, Result};

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `DaybriefError::Config` if neither source yields a complete
/// configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("config_loaded_from_env");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "config_env_incomplete");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only the OAuth client credentials are required; every other variable
/// overrides the built-in default when set.
///
/// # Errors
/// Returns `DaybriefError::Config` if required variables are missing or a
/// value cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    config.oauth.client_id = env_var("OAUTH_CLIENT_ID")?;
    config.oauth.client_secret = env_var("OAUTH_CLIENT_SECRET")?;
    apply_env_overrides(&mut config)?;
    validate(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Environment overrides are applied on top of the file contents.
///
/// # Errors
/// Returns `DaybriefError::Config` if the file is missing or invalid, or the
/// OAuth client credentials are not set.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(DaybriefError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            DaybriefError::Config(
                "OAUTH_CLIENT_ID/OAUTH_CLIENT_SECRET not set and no config file found".to_string(),
            )
        })?,
    };

    let mut config = read_config_file(&config_path)?;
    apply_env_overrides(&mut config)?;
    validate(config)
}

/// Load configuration for commands that never talk to Google
///
/// Uses the first probed config file if there is one, otherwise the
/// defaults, then applies environment overrides. The OAuth client
/// credentials may be missing.
///
/// # Errors
/// Returns `DaybriefError::Config` if a probed file is invalid or an
/// override cannot be parsed.
pub fn load_without_credentials() -> Result<Config> {
    let mut config = match probe_config_paths() {
        Some(path) => read_config_file(&path)?,
        None => Config::default(),
    };
    apply_env_overrides(&mut config)?;
    validate_settings(config)
}

fn read_config_file(path: &Path) -> Result<Config> {
    tracing::info!(path = %path.display(), "config_loaded_from_file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| DaybriefError::Config(format!("Failed to read config file: {e}")))?;
    parse_config(&contents, path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| DaybriefError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| DaybriefError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(DaybriefError::Config(format!("Unsupported config format: {extension}"))),
    }
}

fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(id) = env_opt("OAUTH_CLIENT_ID") {
        config.oauth.client_id = id;
    }
    if let Some(secret) = env_opt("OAUTH_CLIENT_SECRET") {
        config.oauth.client_secret = secret;
    }
    if let Some(endpoint) = env_opt("DAYBRIEF_TOKEN_ENDPOINT") {
        config.oauth.token_endpoint = endpoint;
    }
    if let Some(path) = env_opt("DAYBRIEF_SERVICE_ACCOUNT_PATH") {
        config.messaging.service_account_path = path;
    }
    if let Some(base) = env_opt("DAYBRIEF_MESSAGING_API_BASE") {
        config.messaging.api_base = base;
    }
    if let Some(path) = env_opt("DAYBRIEF_DB_PATH") {
        config.database.path = path;
    }
    if let Some(size) = env_parse::<u32>("DAYBRIEF_DB_POOL_SIZE")? {
        config.database.pool_size = size;
    }
    if let Some(addr) = env_opt("DAYBRIEF_BIND_ADDR") {
        config.server.bind_addr = addr;
    }
    if let Some(offset) = env_opt("DAYBRIEF_CALENDAR_UTC_OFFSET") {
        config.calendar.utc_offset = offset;
    }
    if let Some(base) = env_opt("DAYBRIEF_CALENDAR_API_BASE") {
        config.calendar.api_base = base;
    }
    if let Some(secs) = env_parse::<u64>("DAYBRIEF_HTTP_TIMEOUT_SECS")? {
        config.http.timeout_secs = secs;
    }
    if let Some(attempts) = env_parse::<u32>("DAYBRIEF_HTTP_MAX_ATTEMPTS")? {
        config.http.max_attempts = attempts;
    }
    if let Some(format) = env_opt("DAYBRIEF_LOG_FORMAT") {
        config.logging.format = LogFormat::from_str(&format).map_err(DaybriefError::Config)?;
    }
    Ok(())
}

fn validate(config: Config) -> Result<Config> {
    if !config.oauth.is_complete() {
        return Err(DaybriefError::Config(
            "OAuth client id and secret must both be configured".to_string(),
        ));
    }
    validate_settings(config)
}

fn validate_settings(config: Config) -> Result<Config> {
    if config.database.pool_size == 0 {
        return Err(DaybriefError::Config("database pool size must be at least 1".to_string()));
    }
    if !is_rfc3339_offset(&config.calendar.utc_offset) {
        return Err(DaybriefError::Config(format!(
            "calendar utc_offset must be Z or +HH:MM/-HH:MM, got {:?}",
            config.calendar.utc_offset
        )));
    }
    Ok(config)
}

/// `Z` or `±HH:MM`, the offsets an RFC 3339 timestamp accepts.
fn is_rfc3339_offset(offset: &str) -> bool {
    if offset == "Z" {
        return true;
    }
    let bytes = offset.as_bytes();
    if bytes.len() != 6 || !matches!(bytes[0], b'+' | b'-') || bytes[3] != b':' {
        return false;
    }
    let field = |range: std::ops::Range<usize>| {
        offset
            .get(range)
            .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u8>().ok())
    };
    matches!((field(1..3), field(4..6)), (Some(hours), Some(minutes)) if hours <= 23 && minutes <= 59)
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 6] = [
        "config.json",
        "config.toml",
        "daybrief.json",
        "daybrief.toml",
        "../config.json",
        "../config.toml",
    ];

    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `DaybriefError::Config` if the variable is unset or empty.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        DaybriefError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Non-empty value of `key`, if any.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| DaybriefError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::TempDir;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 15] = [
        "OAUTH_CLIENT_ID",
        "OAUTH_CLIENT_SECRET",
        "DAYBRIEF_TOKEN_ENDPOINT",
        "DAYBRIEF_SERVICE_ACCOUNT_PATH",
        "DAYBRIEF_MESSAGING_API_BASE",
        "DAYBRIEF_DB_PATH",
        "DAYBRIEF_DB_POOL_SIZE",
        "DAYBRIEF_BIND_ADDR",
        "DAYBRIEF_CALENDAR_UTC_OFFSET",
        "DAYBRIEF_CALENDAR_API_BASE",
        "DAYBRIEF_HTTP_TIMEOUT_SECS",
        "DAYBRIEF_HTTP_MAX_ATTEMPTS",
        "DAYBRIEF_LOG_FORMAT",
        "TEST_DAYBRIEF_EMPTY",
        "TEST_DAYBRIEF_NUMBER",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn write_config(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_from_env_with_required_vars_only() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("OAUTH_CLIENT_ID", "client");
        std::env::set_var("OAUTH_CLIENT_SECRET", "secret");

        let config = load_from_env().expect("config from env");

        assert_eq!(config.oauth.client_id, "client");
        assert_eq!(config.oauth.client_secret, "secret");
        assert_eq!(
            config.messaging.service_account_path,
            "resources/bm-agent-service-account-credentials.json"
        );
        assert_eq!(config.database.path, "daybrief.db");
        assert_eq!(config.calendar.utc_offset, "-07:00");

        clear_env();
    }

    #[test]
    fn test_load_from_env_applies_overrides() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("OAUTH_CLIENT_ID", "client");
        std::env::set_var("OAUTH_CLIENT_SECRET", "secret");
        std::env::set_var("DAYBRIEF_DB_PATH", "/tmp/daybrief-test.db");
        std::env::set_var("DAYBRIEF_DB_POOL_SIZE", "2");
        std::env::set_var("DAYBRIEF_CALENDAR_UTC_OFFSET", "+02:00");
        std::env::set_var("DAYBRIEF_HTTP_MAX_ATTEMPTS", "3");
        std::env::set_var("DAYBRIEF_LOG_FORMAT", "JSON");

        let config = load_from_env().expect("config from env");

        assert_eq!(config.database.path, "/tmp/daybrief-test.db");
        assert_eq!(config.database.pool_size, 2);
        assert_eq!(config.calendar.utc_offset, "+02:00");
        assert_eq!(config.http.max_attempts, 3);
        assert_eq!(config.logging.format, LogFormat::Json);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_secret() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("OAUTH_CLIENT_ID", "client");

        let err = load_from_env().unwrap_err();
        assert!(
            matches!(&err, DaybriefError::Config(msg) if msg.contains("OAUTH_CLIENT_SECRET")),
            "unexpected error: {err:?}"
        );

        clear_env();
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("OAUTH_CLIENT_ID", "client");
        std::env::set_var("OAUTH_CLIENT_SECRET", "secret");
        std::env::set_var("DAYBRIEF_DB_POOL_SIZE", "not-a-number");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, DaybriefError::Config(_)));

        clear_env();
    }

    #[test]
    fn test_env_opt_treats_blank_as_unset() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        std::env::set_var("TEST_DAYBRIEF_EMPTY", "  ");
        std::env::set_var("TEST_DAYBRIEF_NUMBER", " 12 ");

        assert_eq!(env_opt("TEST_DAYBRIEF_EMPTY"), None);
        assert_eq!(env_parse::<u32>("TEST_DAYBRIEF_NUMBER").unwrap(), Some(12));

        clear_env();
    }

    #[test]
    fn test_load_from_file_toml_with_env_secret() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("OAUTH_CLIENT_SECRET", "from-env");

        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "daybrief.toml",
            r#"
[oauth]
client_id = "file-client"
client_secret = "file-secret"

[database]
path = "file.db"

[calendar]
utc_offset = "+00:00"
"#,
        );

        let config = load_from_file(Some(path)).expect("config from file");

        assert_eq!(config.oauth.client_id, "file-client");
        assert_eq!(config.oauth.client_secret, "from-env");
        assert_eq!(config.database.path, "file.db");
        assert_eq!(config.database.pool_size, 4);
        assert_eq!(config.calendar.utc_offset, "+00:00");

        clear_env();
    }

    #[test]
    fn test_load_from_file_json() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "config.json",
            r#"{"oauth": {"client_id": "id", "client_secret": "secret"}, "server": {"bind_addr": "127.0.0.1:9000"}}"#,
        );

        let config = load_from_file(Some(path)).expect("config from file");
        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
    }

    #[test]
    fn test_load_from_file_without_credentials_fails() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "config.json", r#"{"database": {"path": "x.db"}}"#);

        let err = load_from_file(Some(path)).unwrap_err();
        assert!(matches!(err, DaybriefError::Config(_)));
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(DaybriefError::Config(_))));
    }

    #[test]
    fn test_parse_config_invalid_json() {
        let result = parse_config(r#"{ "this is": "not valid json" "#, Path::new("config.json"));
        assert!(matches!(result, Err(DaybriefError::Config(msg)) if msg.contains("JSON")));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", Path::new("test.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_zero_pool_size_is_rejected() {
        let mut config = Config::default();
        config.oauth.client_id = "id".into();
        config.oauth.client_secret = "secret".into();
        config.database.pool_size = 0;

        assert!(validate(config).is_err());
    }

    #[test]
    fn test_utc_offset_must_be_rfc3339() {
        for offset in ["Z", "-07:00", "+05:30", "+00:00"] {
            assert!(is_rfc3339_offset(offset), "{offset} should be accepted");
        }
        for offset in ["+0700", "PST", "07:00", "+7:00", "+24:00", "-07:60", "", "z"] {
            assert!(!is_rfc3339_offset(offset), "{offset} should be rejected");
        }
    }

    #[test]
    fn test_load_from_env_rejects_bad_utc_offset() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("OAUTH_CLIENT_ID", "client");
        std::env::set_var("OAUTH_CLIENT_SECRET", "secret");
        std::env::set_var("DAYBRIEF_CALENDAR_UTC_OFFSET", "+0700");

        let err = load_from_env().unwrap_err();
        assert!(
            matches!(&err, DaybriefError::Config(msg) if msg.contains("utc_offset")),
            "unexpected error: {err:?}"
        );

        clear_env();
    }

    #[test]
    fn test_load_without_credentials_skips_oauth_check() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("DAYBRIEF_DB_PATH", "/tmp/daybrief-feedback.db");

        let config = load_without_credentials().expect("config without credentials");

        assert_eq!(config.database.path, "/tmp/daybrief-feedback.db");
        assert!(load_from_env().is_err());

        clear_env();
    }
}
