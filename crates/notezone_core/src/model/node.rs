//! Tree node view model.
//!
//! # Responsibility
//! - Describe one folder or note as produced by a scan.
//!
//! # Invariants
//! - Note `id` is the UUID embedded in the note file and survives renames.
//! - Folder `id` equals its store-relative `path` and changes on rename.
//! - `children` is `Some` only for folders; `created_at` is `None` for folders.
//! - Nodes are rebuilt on every scan and never patched in place.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Node variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Directory under the store root.
    Folder,
    /// One `<id>.json` note file.
    Note,
}

impl NodeKind {
    /// Wire label used by the UI boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Note => "note",
        }
    }

    /// Parses a wire label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "folder" => Some(Self::Folder),
            "note" => Some(Self::Note),
            _ => None,
        }
    }
}

/// One scanned folder or note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Canonical identity: UUID for notes, relative path for folders.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Serialized as `type` to match the UI schema.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Store-relative path, `/`-separated.
    pub path: String,
    /// Sorted children, folders only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
    /// ISO-8601 creation timestamp, notes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Node {
    /// Builds a folder node; its id is its path.
    pub fn folder(title: impl Into<String>, path: impl Into<String>, children: Vec<Node>) -> Self {
        let path = path.into();
        Self {
            id: path.clone(),
            title: title.into(),
            kind: NodeKind::Folder,
            path,
            children: Some(children),
            created_at: None,
        }
    }

    /// Builds a note node.
    pub fn note(
        id: impl Into<String>,
        title: impl Into<String>,
        path: impl Into<String>,
        created_at: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: NodeKind::Note,
            path: path.into(),
            children: None,
            created_at,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_note(&self) -> bool {
        self.kind == NodeKind::Note
    }

    /// Children slice; empty for notes.
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Sibling order: folders first, then case-insensitive title.
///
/// Ties fall back to the raw title and then the id so the order is total.
pub fn sibling_order(a: &Node, b: &Node) -> Ordering {
    let rank = |node: &Node| match node.kind {
        NodeKind::Folder => 0u8,
        NodeKind::Note => 1u8,
    };
    rank(a)
        .cmp(&rank(b))
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::{sibling_order, Node, NodeKind};

    #[test]
    fn folders_sort_before_notes_then_by_title() {
        let mut nodes = vec![
            Node::note("n1", "apple", "n1.json", None),
            Node::folder("zeta", "zeta", Vec::new()),
            Node::note("n2", "Banana", "n2.json", None),
            Node::folder("Alpha", "Alpha", Vec::new()),
        ];
        nodes.sort_by(sibling_order);
        let titles: Vec<_> = nodes.iter().map(|node| node.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "zeta", "apple", "Banana"]);
    }

    #[test]
    fn serializes_with_ui_field_names() {
        let note = Node::note(
            "1f0c",
            "Todo",
            "Work/1f0c.json",
            Some("2024-01-01T00:00:00.000Z".to_string()),
        );
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["type"], "note");
        assert_eq!(value["createdAt"], "2024-01-01T00:00:00.000Z");
        assert!(value.get("children").is_none());

        let folder = Node::folder("Work", "Work", vec![note]);
        let value = serde_json::to_value(&folder).unwrap();
        assert_eq!(value["id"], "Work");
        assert!(value.get("createdAt").is_none());
        assert_eq!(value["children"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn kind_labels_round_trip() {
        assert_eq!(NodeKind::parse("folder"), Some(NodeKind::Folder));
        assert_eq!(NodeKind::parse(NodeKind::Note.as_str()), Some(NodeKind::Note));
        assert_eq!(NodeKind::parse("file"), None);
    }
}
