//! The replicated document: the entire state shared between devices.

use serde::{Deserialize, Serialize};

use super::{Center, EmergencyContact};

pub const DEFAULT_USER_PASSWORD: &str = "EPZArmy";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// The whole application document, replicated wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub centers: Vec<Center>,
    pub emergency_contact: EmergencyContact,
    pub user_password: String,
    pub admin_password: String,
    /// Milliseconds since the epoch of the last accepted write
    pub last_updated: i64,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            centers: Vec::new(),
            emergency_contact: EmergencyContact::default(),
            user_password: DEFAULT_USER_PASSWORD.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            last_updated: 0,
        }
    }
}

impl Document {
    /// Build a full snapshot from this document with `patch` laid over it and the
    /// given write timestamp.
    pub fn merged(&self, patch: DocumentPatch, last_updated: i64) -> Document {
        Document {
            centers: patch.centers.unwrap_or_else(|| self.centers.clone()),
            emergency_contact: patch
                .emergency_contact
                .unwrap_or_else(|| self.emergency_contact.clone()),
            user_password: patch
                .user_password
                .unwrap_or_else(|| self.user_password.clone()),
            admin_password: patch
                .admin_password
                .unwrap_or_else(|| self.admin_password.clone()),
            last_updated,
        }
    }

    /// Timestamp for the next write: the current time, bumped past the last write
    /// when the clock has not advanced.
    pub fn next_timestamp(&self, now_ms: i64) -> i64 {
        now_ms.max(self.last_updated + 1)
    }
}

/// Named-field replacement applied by a push. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    pub centers: Option<Vec<Center>>,
    pub emergency_contact: Option<EmergencyContact>,
    pub user_password: Option<String>,
    pub admin_password: Option<String>,
}

impl DocumentPatch {
    pub fn centers(centers: Vec<Center>) -> Self {
        Self {
            centers: Some(centers),
            ..Self::default()
        }
    }

    pub fn emergency_contact(contact: EmergencyContact) -> Self {
        Self {
            emergency_contact: Some(contact),
            ..Self::default()
        }
    }

    pub fn user_password(password: impl Into<String>) -> Self {
        Self {
            user_password: Some(password.into()),
            ..Self::default()
        }
    }

    pub fn admin_password(password: impl Into<String>) -> Self {
        Self {
            admin_password: Some(password.into()),
            ..Self::default()
        }
    }
}

/// Current time in milliseconds since the epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
