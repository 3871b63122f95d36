//! Document domain model.
//!
//! Documents live in the document repository, never in the key-value store.

use serde::{Deserialize, Serialize};

pub type DocumentId = i64;

/// Stored document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    /// Serialized as `type` to match the stored schema naming.
    #[serde(rename = "type")]
    pub kind: String,
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
}

/// Document metadata before an id has been assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
}

impl NewDocument {
    pub fn new(name: impl Into<String>, kind: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            owner: owner.into(),
            department: None,
            uploaded_at: None,
            size_bytes: None,
        }
    }

    pub fn with_id(self, id: DocumentId) -> Document {
        Document {
            id,
            name: self.name,
            kind: self.kind,
            owner: self.owner,
            department: self.department,
            uploaded_at: self.uploaded_at,
            size_bytes: self.size_bytes,
        }
    }
}
