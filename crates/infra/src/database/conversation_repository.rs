//! SQLite-backed implementation of the `ConversationRepository` port.

use std::sync::Arc;

use async_trait::async_trait;
use daybrief_core::ConversationRepository;
use daybrief_domain::{Conversation, Result as DomainResult};
use rusqlite::{params, OptionalExtension};
use tokio::task;

use super::manager::{map_sql_error, DbManager};
use crate::errors::map_join_error;

/// Conversation store keyed by Business Messages conversation id.
pub struct SqliteConversationRepository {
    db: Arc<DbManager>,
}

impl SqliteConversationRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ConversationRepository for SqliteConversationRepository {
    async fn get(&self, id: &str) -> DomainResult<Option<Conversation>> {
        let db = Arc::clone(&self.db);
        let id = id.to_owned();

        task::spawn_blocking(move || -> DomainResult<Option<Conversation>> {
            let conn = db.get_connection()?;
            conn.query_row(
                "SELECT id, code_verifier FROM conversations WHERE id = ?1",
                params![id],
                |row| Ok(Conversation { id: row.get(0)?, code_verifier: row.get(1)? }),
            )
            .optional()
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn upsert(&self, conversation: Conversation) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO conversations (id, code_verifier) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET code_verifier = excluded.code_verifier",
                params![conversation.id, conversation.code_verifier],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn insert_if_absent(&self, id: &str) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let id = id.to_owned();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO conversations (id, code_verifier) VALUES (?1, NULL)
                 ON CONFLICT(id) DO NOTHING",
                params![id],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}
