//! Backup export and import.

use std::path::{Path, PathBuf};

use chrono::Utc;

use super::AppController;
use crate::errors::AppError;
use crate::models::{DocumentPatch, DocumentPayload};
use crate::sync::SyncOutcome;

/// File name of a backup written today.
pub fn backup_file_name() -> String {
    format!("centers-backup-{}.json", Utc::now().format("%Y-%m-%d"))
}

impl AppController {
    /// Write the in-memory document to a dated backup file in `dir`.
    pub async fn export_to(&self, dir: &Path) -> Result<PathBuf, AppError> {
        let document = self.document().await;
        let body = serde_json::to_vec(&document)?;

        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(backup_file_name());
        tokio::fs::write(&path, body).await?;

        tracing::info!(path = %path.display(), centers = document.centers.len(), "Exported backup");
        Ok(path)
    }

    /// Replace the local document with a backup file and push it.
    ///
    /// Nothing is changed when the file is unreadable or lacks `centers` or
    /// `emergencyContact`.
    pub async fn import_from(&self, path: &Path) -> Result<SyncOutcome, AppError> {
        self.require_admin().await?;

        let body = tokio::fs::read(path).await.map_err(|e| {
            AppError::MalformedImportFile(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let payload = DocumentPayload::parse_import(&body)?;

        {
            let mut state = self.state.lock().await;
            self.engine.apply_payload(&mut state, &payload, None).await?;
        }
        tracing::info!(path = %path.display(), "Imported backup");

        self.engine.push(DocumentPatch::default()).await
    }
}
