//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the document store operations to Dart via FRB.
//! - Translate store results into flat envelopes the UI can render.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Read calls recover locally (empty tree / `None`); every mutation reports
//!   success or a human-readable failure.

use notezone_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    load_reminders as load_reminders_inner, load_settings as load_settings_inner,
    ping as ping_inner, reconcile_selection as reconcile_selection_inner,
    save_reminders as save_reminders_inner, save_settings as save_settings_inner, AppPaths,
    DeleteTarget, DocumentStore, Node, NodeKind, Settings, StoreError,
};
use std::sync::OnceLock;

static APP_PATHS: OnceLock<AppPaths> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the user data directory for this process.
///
/// Must run before the first store call; otherwise the directory resolved
/// from `NOTEZONE_DATA_DIR` or the platform data dir is used.
///
/// # FFI contract
/// - Sync call, no file-system access.
/// - Returns empty string on success, error message when blank or when a
///   different directory is already active.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_data_dir(data_dir: String) -> String {
    let trimmed = data_dir.trim();
    if trimmed.is_empty() {
        return "data_dir cannot be empty".to_string();
    }
    let requested = AppPaths::from_data_dir(trimmed);
    let active = APP_PATHS.get_or_init(|| requested.clone());
    if *active == requested {
        log::info!(
            "event=data_dir_configure module=ffi status=ok data_dir={}",
            active.data_dir.display()
        );
        String::new()
    } else {
        format!(
            "data directory already set to `{}`",
            active.data_dir.display()
        )
    }
}

/// One tree entry as rendered by the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    /// Note UUID, or relative path for folders.
    pub id: String,
    pub title: String,
    /// `folder|note`.
    pub kind: String,
    /// Store-relative path used for every follow-up call.
    pub path: String,
    /// Sorted children; always empty for notes.
    pub children: Vec<TreeItem>,
    /// ISO-8601 creation time; notes only.
    pub created_at: Option<String>,
}

/// Result envelope for note creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNoteResponse {
    pub success: bool,
    pub node: Option<TreeItem>,
    pub error: Option<String>,
}

/// Result envelope for folder creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFolderResponse {
    pub success: bool,
    /// Store-relative path of the created folder.
    pub path: Option<String>,
    pub error: Option<String>,
}

/// Generic action response envelope for rename/write/delete flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// One item of a bulk delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub path: String,
    /// `folder|note`.
    pub kind: String,
}

/// Flat settings record mirrored from `settings.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDto {
    pub theme: String,
    pub notebook_font: String,
    pub language: String,
    pub time_zone: String,
}

/// Returns the full folder/note tree; empty on failure.
pub async fn list_tree() -> Vec<TreeItem> {
    data_context().list_tree().await
}

/// Returns the note content at `path`, or `None` when unreadable.
pub async fn read_note(path: String) -> Option<String> {
    data_context().read_note(&path).await
}

/// Replaces the content of the note at `path`.
pub async fn write_note(path: String, content: String) -> ActionResponse {
    data_context().write_note(&path, &content).await
}

/// Renames a folder or retitles a note.
///
/// `id` is informational; `path` addresses the item.
pub async fn rename_item(
    id: String,
    path: String,
    new_title: String,
    kind: String,
) -> ActionResponse {
    data_context().rename_item(&id, &path, &new_title, &kind).await
}

/// Creates a note under `parent_path`.
pub async fn create_note(parent_path: String, title: String) -> CreateNoteResponse {
    data_context().create_note(&parent_path, &title).await
}

/// Creates a folder under `parent_path`.
pub async fn create_folder(parent_path: String, name: String) -> CreateFolderResponse {
    data_context().create_folder(&parent_path, &name).await
}

/// Deletes one folder (recursively) or note.
pub async fn delete_item(path: String, kind: String) -> ActionResponse {
    data_context().delete_item(&path, &kind).await
}

/// Deletes all items concurrently; one response per request, in order.
pub async fn delete_items(items: Vec<DeleteRequest>) -> Vec<ActionResponse> {
    data_context().delete_items(items).await
}

/// Finds the fresh item whose id matches the previous selection.
#[flutter_rust_bridge::frb(sync)]
pub fn reconcile_selection(tree: Vec<TreeItem>, previous_id: Option<String>) -> Option<TreeItem> {
    let nodes: Vec<Node> = tree.iter().map(to_node).collect();
    reconcile_selection_inner(&nodes, previous_id.as_deref()).map(|node| to_tree_item(&node))
}

/// Loads settings; defaults on failure.
pub async fn load_settings() -> SettingsDto {
    data_context().load_settings().await
}

/// Saves settings.
pub async fn save_settings(settings: SettingsDto) -> ActionResponse {
    data_context().save_settings(settings).await
}

/// Loads reminders as a JSON array string (`[]` on failure).
pub async fn load_reminders() -> String {
    data_context().load_reminders().await
}

/// Saves reminders from a JSON array string.
pub async fn save_reminders(reminders_json: String) -> ActionResponse {
    data_context().save_reminders(&reminders_json).await
}

/// Store and profile files bound to one data directory.
struct DataContext {
    paths: AppPaths,
    store: DocumentStore,
}

impl DataContext {
    fn new(paths: AppPaths) -> Self {
        let store = DocumentStore::new(paths.notes_dir.clone());
        Self { paths, store }
    }

    async fn list_tree(&self) -> Vec<TreeItem> {
        self.store.list_tree().await.iter().map(to_tree_item).collect()
    }

    async fn read_note(&self, path: &str) -> Option<String> {
        self.store.read_note_content(path).await
    }

    async fn write_note(&self, path: &str, content: &str) -> ActionResponse {
        match self.store.write_note_content(path, content).await {
            Ok(()) => ActionResponse::success("Note saved."),
            Err(err) => ActionResponse::failure(format!("Failed to save note: {err}")),
        }
    }

    async fn rename_item(
        &self,
        id: &str,
        path: &str,
        new_title: &str,
        kind: &str,
    ) -> ActionResponse {
        let Some(kind) = NodeKind::parse(kind) else {
            return ActionResponse::failure(format!(
                "Failed to rename `{id}`: unknown item kind `{kind}`"
            ));
        };
        match self.store.rename_item(path, new_title, kind).await {
            Ok(new_path) => ActionResponse::success(format!("Renamed to `{new_path}`.")),
            Err(err) => ActionResponse::failure(format!("Failed to rename `{id}`: {err}")),
        }
    }

    async fn create_note(&self, parent_path: &str, title: &str) -> CreateNoteResponse {
        match self.store.create_note(parent_path, title).await {
            Ok(node) => CreateNoteResponse {
                success: true,
                node: Some(to_tree_item(&node)),
                error: None,
            },
            Err(err) => CreateNoteResponse {
                success: false,
                node: None,
                error: Some(format!("Failed to create note: {err}")),
            },
        }
    }

    async fn create_folder(&self, parent_path: &str, name: &str) -> CreateFolderResponse {
        match self.store.create_folder(parent_path, name).await {
            Ok(path) => CreateFolderResponse {
                success: true,
                path: Some(path),
                error: None,
            },
            Err(err) => CreateFolderResponse {
                success: false,
                path: None,
                error: Some(folder_error_message(&err)),
            },
        }
    }

    async fn delete_item(&self, path: &str, kind: &str) -> ActionResponse {
        let Some(kind) = NodeKind::parse(kind) else {
            return unknown_kind_failure(path, kind);
        };
        match self.store.delete_item(path, kind).await {
            Ok(()) => ActionResponse::success("Deleted."),
            Err(err) => ActionResponse::failure(format!("Failed to delete `{path}`: {err}")),
        }
    }

    async fn delete_items(&self, items: Vec<DeleteRequest>) -> Vec<ActionResponse> {
        let mut responses: Vec<Option<ActionResponse>> = vec![None; items.len()];
        let mut targets = Vec::new();
        let mut target_slots = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            match NodeKind::parse(&item.kind) {
                Some(kind) => {
                    targets.push(DeleteTarget {
                        path: item.path,
                        kind,
                    });
                    target_slots.push(index);
                }
                None => responses[index] = Some(unknown_kind_failure(&item.path, &item.kind)),
            }
        }

        let outcomes = self.store.delete_items(targets).await;
        for (slot, outcome) in target_slots.into_iter().zip(outcomes) {
            responses[slot] = Some(match outcome.result {
                Ok(()) => ActionResponse::success("Deleted."),
                Err(err) => ActionResponse::failure(format!(
                    "Failed to delete `{}`: {err}",
                    outcome.path
                )),
            });
        }
        responses.into_iter().flatten().collect()
    }

    async fn load_settings(&self) -> SettingsDto {
        let settings = load_settings_inner(&self.paths.settings_file).await;
        SettingsDto {
            theme: settings.theme,
            notebook_font: settings.notebook_font,
            language: settings.language,
            time_zone: settings.time_zone,
        }
    }

    async fn save_settings(&self, settings: SettingsDto) -> ActionResponse {
        let settings = Settings {
            theme: settings.theme,
            notebook_font: settings.notebook_font,
            language: settings.language,
            time_zone: settings.time_zone,
        };
        match save_settings_inner(&self.paths.settings_file, &settings).await {
            Ok(()) => ActionResponse::success("Settings saved."),
            Err(err) => ActionResponse::failure(format!("Failed to save settings: {err}")),
        }
    }

    async fn load_reminders(&self) -> String {
        let reminders = load_reminders_inner(&self.paths.reminders_file).await;
        serde_json::to_string(&reminders).unwrap_or_else(|_| "[]".to_string())
    }

    async fn save_reminders(&self, reminders_json: &str) -> ActionResponse {
        let reminders: Vec<serde_json::Value> = match serde_json::from_str(reminders_json) {
            Ok(reminders) => reminders,
            Err(err) => {
                return ActionResponse::failure(format!("Invalid reminders payload: {err}"))
            }
        };
        match save_reminders_inner(&self.paths.reminders_file, &reminders).await {
            Ok(()) => ActionResponse::success("Reminders saved."),
            Err(err) => ActionResponse::failure(format!("Failed to save reminders: {err}")),
        }
    }
}

fn data_context() -> DataContext {
    DataContext::new(APP_PATHS.get_or_init(AppPaths::resolve).clone())
}

fn unknown_kind_failure(path: &str, kind: &str) -> ActionResponse {
    ActionResponse::failure(format!("Failed to delete `{path}`: unknown item kind `{kind}`"))
}

fn folder_error_message(err: &StoreError) -> String {
    match err {
        StoreError::InvalidName => "Invalid folder name provided.".to_string(),
        StoreError::AlreadyExists(_) => {
            "Failed to create folder: Folder already exists.".to_string()
        }
        other => format!("Failed to create folder: {other}"),
    }
}

fn to_tree_item(node: &Node) -> TreeItem {
    TreeItem {
        id: node.id.clone(),
        title: node.title.clone(),
        kind: node.kind.as_str().to_string(),
        path: node.path.clone(),
        children: node.children().iter().map(to_tree_item).collect(),
        created_at: node.created_at.clone(),
    }
}

fn to_node(item: &TreeItem) -> Node {
    match NodeKind::parse(&item.kind) {
        Some(NodeKind::Folder) => {
            let mut node = Node::folder(
                item.title.clone(),
                item.path.clone(),
                item.children.iter().map(to_node).collect(),
            );
            node.id = item.id.clone();
            node
        }
        _ => Node::note(
            item.id.clone(),
            item.title.clone(),
            item.path.clone(),
            item.created_at.clone(),
        ),
    }
}
