//! Core domain logic for NoteZone.
//! This crate owns the folder/note hierarchy invariants: identity, ordering,
//! name safety, and selection continuity across re-scans.

pub mod config;
pub mod logging;
pub mod model;
pub mod profile;
pub mod sanitize;
pub mod service;
pub mod store;

pub use config::AppPaths;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::node::{sibling_order, Node, NodeKind};
pub use profile::reminders::{load_reminders, save_reminders};
pub use profile::settings::{load_settings, save_settings, Settings};
pub use sanitize::{sanitize_name, sanitize_name_or, NEW_NOTE_FALLBACK, RENAME_FALLBACK};
pub use service::selection::{find_node_by_id, flatten, reconcile_selection};
pub use service::workspace_service::WorkspaceService;
pub use store::document::{NoteDocument, NOTE_EXTENSION};
pub use store::document_store::{DeleteOutcome, DeleteTarget, DocumentStore};
pub use store::error::{StoreError, StoreResult};
pub use store::scanner::{scan_tree, HIDDEN_MARKER};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
