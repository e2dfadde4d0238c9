//! HTTP client for the shared remote document.

use reqwest::header::ACCEPT;

use crate::errors::AppError;
use crate::models::{Document, DocumentPayload};

/// Client for the single remote document at a fixed URL.
#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    url: String,
}

impl RemoteClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and validate the remote document.
    pub async fn fetch(&self) -> Result<DocumentPayload, AppError> {
        let response = self
            .http
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::NetworkFailure(format!(
                "Remote fetch returned {}",
                status
            )));
        }

        let body = response.bytes().await?;
        DocumentPayload::parse_remote(&body)
    }

    /// Replace the remote document with `document`.
    pub async fn replace(&self, document: &Document) -> Result<(), AppError> {
        let response = self
            .http
            .put(&self.url)
            .header(ACCEPT, "application/json")
            .json(document)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::NetworkFailure(format!(
                "Remote replace returned {}",
                status
            )));
        }

        Ok(())
    }
}
