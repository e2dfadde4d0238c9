//! Durable local cache of the document fields and session flags.
//!
//! Every field is an independent key so a single corrupt or missing entry falls
//! back to its default without affecting the others.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    Center, Document, EmergencyContact, DEFAULT_ADMIN_PASSWORD, DEFAULT_USER_PASSWORD,
};

/// Keys of the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    Centers,
    EmergencyContact,
    UserPassword,
    AdminPassword,
    LastUpdated,
    UserLoggedIn,
    AdminLoggedIn,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Centers => "centers",
            StoreKey::EmergencyContact => "emergency_contact",
            StoreKey::UserPassword => "user_password",
            StoreKey::AdminPassword => "admin_password",
            StoreKey::LastUpdated => "last_updated",
            StoreKey::UserLoggedIn => "session.user_logged_in",
            StoreKey::AdminLoggedIn => "session.admin_logged_in",
        }
    }
}

/// Everything the local store holds, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSnapshot {
    pub document: Document,
    pub user_logged_in: bool,
    pub admin_logged_in: bool,
}

/// SQLite-backed local store.
#[derive(Clone)]
pub struct LocalStore {
    pool: SqlitePool,
}

impl LocalStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Read the raw value stored under `key`.
    pub async fn get(&self, key: StoreKey) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT value FROM local_entries WHERE key = ?")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    /// Persist one field.
    pub async fn save(&self, key: StoreKey, value: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO local_entries (key, value, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key.as_str())
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Remove one field so the next load sees its default.
    pub async fn remove(&self, key: StoreKey) -> Result<(), AppError> {
        sqlx::query("DELETE FROM local_entries WHERE key = ?")
            .bind(key.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn save_centers(&self, centers: &[Center]) -> Result<(), AppError> {
        self.save(StoreKey::Centers, &serde_json::to_string(centers)?)
            .await
    }

    pub async fn save_emergency_contact(&self, contact: &EmergencyContact) -> Result<(), AppError> {
        self.save(StoreKey::EmergencyContact, &serde_json::to_string(contact)?)
            .await
    }

    pub async fn save_user_password(&self, password: &str) -> Result<(), AppError> {
        self.save(StoreKey::UserPassword, password).await
    }

    pub async fn save_admin_password(&self, password: &str) -> Result<(), AppError> {
        self.save(StoreKey::AdminPassword, password).await
    }

    pub async fn save_last_updated(&self, last_updated: i64) -> Result<(), AppError> {
        self.save(StoreKey::LastUpdated, &last_updated.to_string())
            .await
    }

    /// Persist both session flags.
    pub async fn save_session(&self, user_logged_in: bool, admin_logged_in: bool) -> Result<(), AppError> {
        self.save(StoreKey::UserLoggedIn, &user_logged_in.to_string())
            .await?;
        self.save(StoreKey::AdminLoggedIn, &admin_logged_in.to_string())
            .await
    }

    /// Persist every document field in one transaction.
    pub async fn save_document(&self, document: &Document) -> Result<(), AppError> {
        let entries = [
            (StoreKey::Centers, serde_json::to_string(&document.centers)?),
            (
                StoreKey::EmergencyContact,
                serde_json::to_string(&document.emergency_contact)?,
            ),
            (StoreKey::UserPassword, document.user_password.clone()),
            (StoreKey::AdminPassword, document.admin_password.clone()),
            (StoreKey::LastUpdated, document.last_updated.to_string()),
        ];

        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;
        for (key, value) in &entries {
            sqlx::query(
                "INSERT INTO local_entries (key, value, updated_at) VALUES (?, ?, ?) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            )
            .bind(key.as_str())
            .bind(value)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(())
    }

    /// Load every field, substituting defaults for missing or unreadable entries.
    pub async fn load(&self) -> Result<LocalSnapshot, AppError> {
        let defaults = Document::default();

        let centers = match self.get(StoreKey::Centers).await? {
            Some(raw) => parse_or_default(StoreKey::Centers, &raw, defaults.centers),
            None => defaults.centers,
        };
        let emergency_contact = match self.get(StoreKey::EmergencyContact).await? {
            Some(raw) => parse_or_default(StoreKey::EmergencyContact, &raw, defaults.emergency_contact),
            None => defaults.emergency_contact,
        };
        let user_password = self
            .get(StoreKey::UserPassword)
            .await?
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_PASSWORD.to_string());
        let admin_password = self
            .get(StoreKey::AdminPassword)
            .await?
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string());
        let last_updated = self
            .get(StoreKey::LastUpdated)
            .await?
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(0);

        let user_logged_in = self.get(StoreKey::UserLoggedIn).await?.as_deref() == Some("true");
        let admin_logged_in = self.get(StoreKey::AdminLoggedIn).await?.as_deref() == Some("true");

        Ok(LocalSnapshot {
            document: Document {
                centers,
                emergency_contact,
                user_password,
                admin_password,
                last_updated,
            },
            user_logged_in,
            admin_logged_in,
        })
    }
}

fn parse_or_default<T: serde::de::DeserializeOwned>(key: StoreKey, raw: &str, default: T) -> T {
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Ignoring unreadable local entry {}: {}", key.as_str(), e);
            default
        }
    }
}
