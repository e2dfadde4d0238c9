//! Center list mutations. Each one renumbers the list and pushes it.

use super::{AppController, Screen};
use crate::errors::AppError;
use crate::models::{renumber, CenterDraft, DocumentPatch};
use crate::sync::SyncOutcome;

impl AppController {
    /// Open the edit screen with a draft of an existing center, or of a new one
    /// when `id` is `None`.
    pub async fn begin_edit(&self, id: Option<&str>) -> Result<CenterDraft, AppError> {
        self.require_admin().await?;

        let mut state = self.state.lock().await;
        let draft = match id {
            Some(id) => state
                .document
                .centers
                .iter()
                .find(|c| c.id == id)
                .map(CenterDraft::from)
                .ok_or_else(|| AppError::NotFound(format!("Center {} not found", id)))?,
            None => CenterDraft::new(),
        };
        state.screen = Screen::EditCenter;
        Ok(draft)
    }

    /// Store a draft: replace the center with the same id, or append it.
    pub async fn save_center(&self, draft: CenterDraft) -> Result<SyncOutcome, AppError> {
        self.require_admin().await?;

        if draft.name.trim().is_empty() {
            return Err(AppError::Validation("Center name is required".to_string()));
        }

        let centers = {
            let state = self.state.lock().await;
            let mut centers = state.document.centers.clone();
            let center = draft.into_center();
            match centers.iter().position(|c| c.id == center.id) {
                Some(index) => centers[index] = center,
                None => centers.push(center),
            }
            renumber(&mut centers, self.digits);
            centers
        };

        let outcome = self.engine.push(DocumentPatch::centers(centers)).await?;
        self.navigate(Screen::Admin).await;
        Ok(outcome)
    }

    pub async fn delete_center(&self, id: &str) -> Result<SyncOutcome, AppError> {
        self.require_admin().await?;

        let centers = {
            let state = self.state.lock().await;
            if !state.document.centers.iter().any(|c| c.id == id) {
                return Err(AppError::NotFound(format!("Center {} not found", id)));
            }
            let mut centers: Vec<_> = state
                .document
                .centers
                .iter()
                .filter(|c| c.id != id)
                .cloned()
                .collect();
            renumber(&mut centers, self.digits);
            centers
        };

        let outcome = self.engine.push(DocumentPatch::centers(centers)).await?;

        let mut state = self.state.lock().await;
        if state.selected_center.as_deref() == Some(id) {
            state.selected_center = None;
        }
        Ok(outcome)
    }

    /// Move a center to the 0-based `position`, clamped to the end of the list.
    pub async fn move_center(&self, id: &str, position: usize) -> Result<SyncOutcome, AppError> {
        self.require_admin().await?;

        let centers = {
            let state = self.state.lock().await;
            let mut centers = state.document.centers.clone();
            let from = centers
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| AppError::NotFound(format!("Center {} not found", id)))?;
            let center = centers.remove(from);
            let to = position.min(centers.len());
            centers.insert(to, center);
            renumber(&mut centers, self.digits);
            centers
        };

        self.engine.push(DocumentPatch::centers(centers)).await
    }
}
