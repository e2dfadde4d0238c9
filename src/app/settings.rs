//! Emergency contact and password settings.

use super::{AppController, Screen};
use crate::errors::AppError;
use crate::models::{DocumentPatch, EmergencyContact};
use crate::sync::SyncOutcome;

impl AppController {
    pub async fn open_settings(&self) -> Result<(), AppError> {
        self.require_admin().await?;
        self.navigate(Screen::Settings).await;
        Ok(())
    }

    pub async fn save_emergency_contact(
        &self,
        contact: EmergencyContact,
    ) -> Result<SyncOutcome, AppError> {
        self.require_admin().await?;

        if contact.name.trim().is_empty() || contact.mobile.trim().is_empty() {
            return Err(AppError::Validation(
                "Emergency contact needs both a name and a mobile number".to_string(),
            ));
        }

        self.engine
            .push(DocumentPatch::emergency_contact(contact))
            .await
    }

    pub async fn change_user_password(&self, password: &str) -> Result<SyncOutcome, AppError> {
        self.require_admin().await?;
        if password.is_empty() {
            return Err(AppError::Validation("Password must not be empty".to_string()));
        }
        self.engine.push(DocumentPatch::user_password(password)).await
    }

    pub async fn change_admin_password(&self, password: &str) -> Result<SyncOutcome, AppError> {
        self.require_admin().await?;
        if password.is_empty() {
            return Err(AppError::Validation("Password must not be empty".to_string()));
        }
        self.engine.push(DocumentPatch::admin_password(password)).await
    }
}
