//! Validated view of a document received from outside the process.
//!
//! Remote responses and import files are parsed into [`DocumentPayload`] before
//! anything is applied. A payload whose present fields have the wrong shape is
//! rejected as a whole; absent fields are simply not applied.

use serde::Deserialize;

use super::{Center, EmergencyContact};
use crate::errors::AppError;

/// A document whose fields may each be missing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    #[serde(default)]
    pub centers: Option<Vec<Center>>,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default)]
    pub user_password: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
    #[serde(default)]
    pub last_updated: Option<i64>,
}

impl DocumentPayload {
    /// Parse the body of a remote `GET`.
    pub fn parse_remote(body: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(body)
            .map_err(|e| AppError::MalformedRemoteData(format!("Remote document rejected: {}", e)))
    }

    /// Parse an import file. `centers` and `emergencyContact` must be present.
    pub fn parse_import(body: &[u8]) -> Result<Self, AppError> {
        let payload: Self = serde_json::from_slice(body)
            .map_err(|e| AppError::MalformedImportFile(format!("Import file rejected: {}", e)))?;

        if payload.centers.is_none() {
            return Err(AppError::MalformedImportFile(
                "Import file has no centers".to_string(),
            ));
        }
        if payload.emergency_contact.is_none() {
            return Err(AppError::MalformedImportFile(
                "Import file has no emergencyContact".to_string(),
            ));
        }

        Ok(payload)
    }

    /// Whether the payload carries a timestamp newer than `local`.
    pub fn is_newer_than(&self, local: i64) -> bool {
        self.last_updated.is_some_and(|ts| ts > local)
    }

    /// The timestamp to adopt when this payload is applied; a missing or zero
    /// timestamp falls back to `now_ms`.
    pub fn effective_last_updated(&self, now_ms: i64) -> i64 {
        self.last_updated.filter(|ts| *ts > 0).unwrap_or(now_ms)
    }

    /// User password to apply, if present and non-empty.
    pub fn user_password(&self) -> Option<&str> {
        self.user_password.as_deref().filter(|p| !p.is_empty())
    }

    /// Admin password to apply, if present and non-empty.
    pub fn admin_password(&self) -> Option<&str> {
        self.admin_password.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_remote_payload_is_accepted() {
        let payload =
            DocumentPayload::parse_remote(br#"{"lastUpdated": 50, "userPassword": ""}"#).unwrap();
        assert!(payload.centers.is_none());
        assert!(payload.emergency_contact.is_none());
        assert_eq!(payload.user_password(), None);
        assert_eq!(payload.last_updated, Some(50));
    }

    #[test]
    fn test_wrong_shapes_are_rejected() {
        let cases: [&[u8]; 4] = [
            b"[1, 2, 3]",
            br#"{"centers": "not a list"}"#,
            br#"{"centers": [{"name": "missing id"}]}"#,
            br#"{"lastUpdated": "yesterday"}"#,
        ];
        for body in cases {
            let err = DocumentPayload::parse_remote(body).unwrap_err();
            assert!(matches!(err, AppError::MalformedRemoteData(_)), "{:?}", err);
        }
    }

    #[test]
    fn test_null_fields_count_as_absent() {
        let payload =
            DocumentPayload::parse_remote(br#"{"centers": null, "emergencyContact": null}"#)
                .unwrap();
        assert_eq!(payload, DocumentPayload::default());
    }

    #[test]
    fn test_import_requires_centers_and_contact() {
        let err = DocumentPayload::parse_import(br#"{"centers": []}"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedImportFile(_)));

        let err =
            DocumentPayload::parse_import(br#"{"emergencyContact": {"name": "a", "mobile": "1"}}"#)
                .unwrap_err();
        assert!(matches!(err, AppError::MalformedImportFile(_)));

        let err = DocumentPayload::parse_import(b"not json").unwrap_err();
        assert!(matches!(err, AppError::MalformedImportFile(_)));

        let ok = DocumentPayload::parse_import(
            br#"{"centers": [], "emergencyContact": {"name": "a", "mobile": "1"}}"#,
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn test_timestamp_helpers() {
        let payload = DocumentPayload {
            last_updated: Some(100),
            ..DocumentPayload::default()
        };
        assert!(payload.is_newer_than(99));
        assert!(!payload.is_newer_than(100));
        assert_eq!(payload.effective_last_updated(7), 100);

        let missing = DocumentPayload::default();
        assert!(!missing.is_newer_than(0));
        assert_eq!(missing.effective_last_updated(7), 7);

        let zero = DocumentPayload {
            last_updated: Some(0),
            ..DocumentPayload::default()
        };
        assert_eq!(zero.effective_last_updated(7), 7);
    }
}
