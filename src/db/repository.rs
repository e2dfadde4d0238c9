//! Blob repository for the remote document server.
//!
//! Bodies are stored verbatim; the server does not interpret the document.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;

/// Database repository for stored JSON blobs.
#[derive(Clone)]
pub struct BlobRepository {
    pool: SqlitePool,
}

impl BlobRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a blob by ID.
    pub async fn get_blob(&self, id: &str) -> Result<Option<serde_json::Value>, AppError> {
        let row = sqlx::query("SELECT body FROM blobs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let body: String = row.get("body");
                Ok(Some(serde_json::from_str(&body)?))
            }
            None => Ok(None),
        }
    }

    /// Replace a blob wholesale, creating it if needed.
    pub async fn put_blob(&self, id: &str, body: &serde_json::Value) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        let body = serde_json::to_string(body)?;

        sqlx::query(
            "INSERT INTO blobs (id, body, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
        )
        .bind(id)
        .bind(&body)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
