//! Submission envelope

use crate::state::{FormPayload, UploadedFile};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Payload plus uploaded files, stamped for delivery
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPackage {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub payload: FormPayload,
    /// Uploaded files keyed by slot id (`img-1`..`img-3`)
    pub files: BTreeMap<String, UploadedFile>,
}

impl SubmissionPackage {
    pub fn new(payload: FormPayload, files: BTreeMap<String, UploadedFile>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            payload,
            files,
        }
    }
}

/// Acknowledgement returned by a sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub accepted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FormData;

    #[test]
    fn test_serializes_payload_and_files() {
        let mut files = BTreeMap::new();
        files.insert(
            "img-2".to_string(),
            UploadedFile {
                path: "/tmp/ine.webp".into(),
                size_bytes: 10,
            },
        );
        let package = SubmissionPackage::new(FormPayload::from_form(&FormData::default()), files);
        let json = serde_json::to_value(&package).unwrap();

        assert_eq!(json["payload"]["activeTab"], "identificacion");
        assert_eq!(json["files"]["img-2"]["sizeBytes"], 10);
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn test_ids_are_unique() {
        let payload = FormPayload::from_form(&FormData::default());
        let a = SubmissionPackage::new(payload.clone(), BTreeMap::new());
        let b = SubmissionPackage::new(payload, BTreeMap::new());
        assert_ne!(a.id, b.id);
    }
}
