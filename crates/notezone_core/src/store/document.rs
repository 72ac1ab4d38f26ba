//! On-disk note document codec.
//!
//! # Responsibility
//! - Define the `<id>.json` payload: `{ id, title, content, createdAt }`.
//! - Decode/encode payloads for scan and read-modify-write paths.
//!
//! # Invariants
//! - `id` is generated once from a random UUID and never reassigned.
//! - `content` is opaque and never interpreted.
//! - Unknown top-level fields survive a decode/encode cycle.

use crate::model::node::Node;
use crate::store::error::{StoreError, StoreResult};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// File extension recognized as a note document.
pub const NOTE_EXTENSION: &str = "json";

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDocument {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Absent in documents written before creation times were recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NoteDocument {
    /// Creates an empty note with a fresh id and the current time.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: String::new(),
            created_at: Some(now_iso8601()),
            extra: Map::new(),
        }
    }

    /// Decodes a payload read from `path` (store-relative, for errors only).
    pub fn decode(path: &str, raw: &str) -> StoreResult<Self> {
        let document: Self =
            serde_json::from_str(raw).map_err(|err| StoreError::corrupt(path, err))?;
        if document.id.trim().is_empty() {
            return Err(StoreError::CorruptDocument {
                path: path.to_string(),
                message: "note id is blank".to_string(),
            });
        }
        Ok(document)
    }

    /// Encodes as pretty JSON with two-space indentation.
    pub fn encode(&self, path: &str) -> StoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| StoreError::corrupt(path, err))
    }

    /// File name this document is stored under.
    pub fn file_name(&self) -> String {
        format!("{}.{NOTE_EXTENSION}", self.id)
    }

    /// Projects into a tree node located at `path`.
    pub fn to_node(&self, path: impl Into<String>) -> Node {
        Node::note(
            self.id.clone(),
            self.title.clone(),
            path,
            self.created_at.clone(),
        )
    }
}

/// Current UTC time as ISO-8601 with millisecond precision and `Z` suffix.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::NoteDocument;
    use crate::store::error::StoreError;

    #[test]
    fn new_document_has_uuid_and_timestamp() {
        let document = NoteDocument::new("Todo");
        assert_eq!(document.id.len(), 36);
        assert!(document.content.is_empty());
        let created_at = document.created_at.as_deref().expect("created_at should be set");
        assert!(created_at.ends_with('Z'));
        assert_eq!(document.file_name(), format!("{}.json", document.id));
    }

    #[test]
    fn decode_keeps_unknown_fields_and_defaults_content() {
        let raw = r#"{"id":"abc","title":"Old","pinned":true}"#;
        let document = NoteDocument::decode("abc.json", raw).unwrap();
        assert_eq!(document.content, "");
        assert_eq!(document.created_at, None);

        let encoded = document.encode("abc.json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["pinned"], true);
        assert!(value.get("createdAt").is_none());
        assert!(encoded.contains("\n  \"id\""));
    }

    #[test]
    fn decode_rejects_missing_or_blank_id() {
        let missing = NoteDocument::decode("x.json", r#"{"title":"t"}"#).unwrap_err();
        assert!(matches!(missing, StoreError::CorruptDocument { .. }));

        let blank = NoteDocument::decode("x.json", r#"{"id":"  ","title":"t"}"#).unwrap_err();
        assert!(matches!(blank, StoreError::CorruptDocument { ref path, .. } if path == "x.json"));
    }

    #[test]
    fn decode_rejects_invalid_json() {
        let err = NoteDocument::decode("bad.json", "{not json").unwrap_err();
        assert_eq!(err.code(), "corrupt_document");
    }
}
