//! Workspace session service.
//!
//! # Responsibility
//! - Own the last scanned tree and the current selection for one UI session.
//! - Sequence every mutation as: store call -> full re-scan -> reconcile.
//!
//! # Invariants
//! - The tree is replaced wholesale on refresh, never patched.
//! - Selection is tracked by id and re-resolved after every refresh.
//! - Items are addressed by id and resolved against the current tree.

use crate::model::node::Node;
use crate::service::selection::{find_node_by_id, reconcile_selection};
use crate::store::document_store::{DeleteOutcome, DeleteTarget, DocumentStore};
use crate::store::error::{StoreError, StoreResult};
use log::debug;

/// Explicit application state for one store root.
pub struct WorkspaceService {
    store: DocumentStore,
    tree: Vec<Node>,
    selected: Option<Node>,
}

impl WorkspaceService {
    /// Creates a session with an empty tree; call `refresh` to load it.
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            tree: Vec::new(),
            selected: None,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn tree(&self) -> &[Node] {
        &self.tree
    }

    pub fn selected(&self) -> Option<&Node> {
        self.selected.as_ref()
    }

    /// Re-scans the store and re-resolves the selection by id.
    pub async fn refresh(&mut self) -> &[Node] {
        self.tree = self.store.list_tree().await;
        let previous_id = self.selected.as_ref().map(|node| node.id.clone());
        self.selected = reconcile_selection(&self.tree, previous_id.as_deref());
        if previous_id.is_some() && self.selected.is_none() {
            debug!("event=selection_cleared module=workspace status=ok");
        }
        &self.tree
    }

    /// Selects the node with `id` in the current tree, or clears selection.
    pub fn select(&mut self, id: &str) -> Option<&Node> {
        self.selected = find_node_by_id(&self.tree, id).cloned();
        self.selected.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Creates a note, refreshes, and selects the created note.
    pub async fn create_note(&mut self, parent_path: &str, title: &str) -> StoreResult<Node> {
        let created = self.store.create_note(parent_path, title).await?;
        self.refresh().await;
        if self.select(&created.id).is_none() {
            self.selected = Some(created.clone());
        }
        Ok(created)
    }

    /// Creates a folder and refreshes.
    pub async fn create_folder(&mut self, parent_path: &str, name: &str) -> StoreResult<String> {
        let created = self.store.create_folder(parent_path, name).await?;
        self.refresh().await;
        Ok(created)
    }

    /// Renames the item with `id`; blank or unchanged titles are a no-op.
    ///
    /// A renamed note keeps its selection; a renamed folder loses it because
    /// its id is its path.
    pub async fn rename_item(&mut self, id: &str, new_title: &str) -> StoreResult<()> {
        let target = self.lookup(id)?;
        if new_title.trim().is_empty() || target.title == new_title {
            return Ok(());
        }
        let result = self
            .store
            .rename_item(&target.path, new_title, target.kind)
            .await
            .map(|_| ());
        self.refresh().await;
        result
    }

    /// Deletes the item with `id` and refreshes.
    pub async fn delete_item(&mut self, id: &str) -> StoreResult<()> {
        let target = self.lookup(id)?;
        self.drop_selection_if_among(&[id]);
        let result = self.store.delete_item(&target.path, target.kind).await;
        self.refresh().await;
        result
    }

    /// Deletes all `ids` concurrently, then refreshes once every delete ended.
    ///
    /// Returns one outcome per id, in request order. An id missing from the
    /// current tree has no path, so its outcome carries the id and `NotFound`.
    pub async fn delete_items(&mut self, ids: &[&str]) -> Vec<DeleteOutcome> {
        let mut slots: Vec<Option<DeleteOutcome>> = Vec::with_capacity(ids.len());
        let mut targets = Vec::new();
        let mut target_slots = Vec::new();
        for (index, id) in ids.iter().enumerate() {
            match find_node_by_id(&self.tree, id) {
                Some(node) => {
                    targets.push(DeleteTarget::from(node));
                    target_slots.push(index);
                    slots.push(None);
                }
                None => slots.push(Some(DeleteOutcome {
                    path: id.to_string(),
                    result: Err(StoreError::NotFound(id.to_string())),
                })),
            }
        }

        self.drop_selection_if_among(ids);
        let outcomes = self.store.delete_items(targets).await;
        for (slot, outcome) in target_slots.into_iter().zip(outcomes) {
            slots[slot] = Some(outcome);
        }
        self.refresh().await;
        slots.into_iter().flatten().collect()
    }

    /// Content of the selected note; empty for folders or no selection.
    pub async fn load_selected_content(&self) -> String {
        match &self.selected {
            Some(node) if node.is_note() => self
                .store
                .read_note_content(&node.path)
                .await
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    /// Writes `content` to the selected note; returns `false` when no note is
    /// selected.
    pub async fn save_selected_content(&self, content: &str) -> StoreResult<bool> {
        match &self.selected {
            Some(node) if node.is_note() => {
                self.store.write_note_content(&node.path, content).await?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn lookup(&self, id: &str) -> StoreResult<Node> {
        find_node_by_id(&self.tree, id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn drop_selection_if_among(&mut self, ids: &[&str]) {
        let selected_id = self.selected.as_ref().map(|node| node.id.as_str());
        if selected_id.is_some_and(|selected| ids.contains(&selected)) {
            self.selected = None;
        }
    }
}
