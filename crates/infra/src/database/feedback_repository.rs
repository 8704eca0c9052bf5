//! SQLite-backed implementation of the `FeedbackRepository` port.

use std::sync::Arc;

use async_trait::async_trait;
use daybrief_core::FeedbackRepository;
use daybrief_domain::{DaybriefError, Feedback, Result as DomainResult};
use rusqlite::{params, Row};
use tokio::task;

use super::manager::{map_sql_error, DbManager};
use crate::errors::map_join_error;

pub struct SqliteFeedbackRepository {
    db: Arc<DbManager>,
}

impl SqliteFeedbackRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeedbackRepository for SqliteFeedbackRepository {
    async fn create(&self, text: &str) -> DomainResult<Feedback> {
        let db = Arc::clone(&self.db);
        let text = text.to_owned();

        task::spawn_blocking(move || -> DomainResult<Feedback> {
            let conn = db.get_connection()?;
            conn.execute("INSERT INTO feedback (text) VALUES (?1)", params![text])
                .map_err(map_sql_error)?;
            Ok(Feedback { id: conn.last_insert_rowid(), text, reviewed: false })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_unreviewed(&self) -> DomainResult<Vec<Feedback>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Feedback>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare("SELECT id, text, reviewed FROM feedback WHERE reviewed = 0 ORDER BY id")
                .map_err(map_sql_error)?;
            let rows = stmt.query_map([], map_feedback_row).map_err(map_sql_error)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn mark_reviewed(&self, id: i64) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let updated = conn
                .execute("UPDATE feedback SET reviewed = 1 WHERE id = ?1", params![id])
                .map_err(map_sql_error)?;
            if updated == 0 {
                return Err(DaybriefError::NotFound(format!("feedback {id}")));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_feedback_row(row: &Row<'_>) -> rusqlite::Result<Feedback> {
    Ok(Feedback { id: row.get(0)?, text: row.get(1)?, reviewed: row.get(2)? })
}
