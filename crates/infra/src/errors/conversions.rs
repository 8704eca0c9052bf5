//! Conversions from storage, pool and HTTP errors into `DaybriefError`.
//!
//! Adapters wrap the foreign error in [`InfraError`] and let `?` turn it into
//! the domain error, so `daybrief-domain` never depends on rusqlite or
//! reqwest.

use daybrief_domain::DaybriefError;
use rusqlite::ffi::ErrorCode;

/// Newtype carrying a `DaybriefError` produced on the infrastructure side.
#[derive(Debug)]
pub struct InfraError(pub DaybriefError);

impl From<InfraError> for DaybriefError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DaybriefError> for InfraError {
    fn from(value: DaybriefError) -> Self {
        Self(value)
    }
}

/// SQLite extended codes for UNIQUE and PRIMARY KEY violations.
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;
const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;

impl From<rusqlite::Error> for InfraError {
    fn from(err: rusqlite::Error) -> Self {
        let mapped = match err {
            rusqlite::Error::QueryReturnedNoRows => {
                DaybriefError::NotFound("no matching row".into())
            }
            rusqlite::Error::SqliteFailure(ffi, message) => match ffi.code {
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                    DaybriefError::Database(format!("database is busy: {}", message.unwrap_or_default()))
                }
                ErrorCode::ConstraintViolation
                    if matches!(
                        ffi.extended_code,
                        SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY
                    ) =>
                {
                    DaybriefError::Database("duplicate key".into())
                }
                ErrorCode::NotADatabase => {
                    DaybriefError::Database("file is not a SQLite database".into())
                }
                code => DaybriefError::Database(format!(
                    "sqlite {code:?} ({}): {}",
                    ffi.extended_code,
                    message.unwrap_or_default()
                )),
            },
            other => DaybriefError::Database(other.to_string()),
        };
        Self(mapped)
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(err: r2d2::Error) -> Self {
        Self(DaybriefError::Database(format!("connection pool error: {err}")))
    }
}

impl From<reqwest::Error> for InfraError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self(DaybriefError::Network("HTTP request timed out".into()));
        }
        if err.is_connect() {
            return Self(DaybriefError::Network(format!("HTTP connection failure: {err}")));
        }

        let Some(status) = err.status() else {
            return Self(DaybriefError::Network(err.to_string()));
        };
        let message = format!("HTTP {status}");
        let mapped = match status.as_u16() {
            401 | 403 => DaybriefError::Auth(message),
            404 => DaybriefError::NotFound(message),
            429 => DaybriefError::Network(message),
            400..=499 => DaybriefError::InvalidInput(message),
            _ => DaybriefError::Network(message),
        };
        Self(mapped)
    }
}

/// Map a failed `spawn_blocking` join into a domain error.
pub fn map_join_error(err: tokio::task::JoinError) -> DaybriefError {
    if err.is_cancelled() {
        DaybriefError::Internal("blocking task cancelled".into())
    } else {
        DaybriefError::Internal(format!("blocking task panicked: {err}"))
    }
}
