//! Filesystem-backed document store.
//!
//! # Responsibility
//! - Create, rename, delete, read and write folders/notes under one root.
//! - Delegate tree listing to the scanner.
//!
//! # Invariants
//! - Stateless between calls: the directory tree is the only state.
//! - Every operation first ensures the root exists (idempotent).
//! - Every caller path is resolved under the root before any I/O.
//! - Note files are addressed by path; the embedded id is never rewritten.
//! - Reads never fail through `list_tree`/`read_note_content`; mutations
//!   report failures as `StoreError`.

use crate::model::node::{Node, NodeKind};
use crate::sanitize::{sanitize_name, sanitize_name_or, NEW_NOTE_FALLBACK, RENAME_FALLBACK};
use crate::store::document::NoteDocument;
use crate::store::error::{StoreError, StoreResult};
use crate::store::paths::{join_relative, normalize_relative, parent_relative, resolve};
use crate::store::scanner::{read_document, scan_tree};
use log::{debug, error, info, warn};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// One item addressed by a bulk delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub path: String,
    pub kind: NodeKind,
}

impl From<&Node> for DeleteTarget {
    fn from(node: &Node) -> Self {
        Self {
            path: node.path.clone(),
            kind: node.kind,
        }
    }
}

/// Per-item result of a bulk delete, in request order.
#[derive(Debug)]
pub struct DeleteOutcome {
    pub path: String,
    pub result: StoreResult<()>,
}

/// Document store rooted at one directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Creates a store for `root`; nothing is touched until first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root directory chain when absent.
    pub async fn ensure_root(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|err| StoreError::from_io("", err))
    }

    /// Scans the full tree, reporting an unreadable root as an error.
    pub async fn try_list_tree(&self) -> StoreResult<Vec<Node>> {
        self.ensure_root().await?;
        scan_tree(&self.root).await
    }

    /// Scans the full tree; failures are logged and yield an empty tree.
    pub async fn list_tree(&self) -> Vec<Node> {
        match self.try_list_tree().await {
            Ok(tree) => tree,
            Err(err) => {
                error!(
                    "event=tree_list module=store status=error code={} error={}",
                    err.code(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Reads the opaque content of the note at `path`.
    pub async fn try_read_note_content(&self, path: &str) -> StoreResult<String> {
        self.ensure_root().await?;
        let relative = normalize_relative(path)?;
        let document = read_document(&resolve(&self.root, &relative)?, &relative).await?;
        Ok(document.content)
    }

    /// Reads note content; failures are logged and yield `None`.
    pub async fn read_note_content(&self, path: &str) -> Option<String> {
        match self.try_read_note_content(path).await {
            Ok(content) => Some(content),
            Err(err) => {
                warn!(
                    "event=note_read module=store status=error code={} error={}",
                    err.code(),
                    err
                );
                None
            }
        }
    }

    /// Replaces only the `content` field of the note at `path`.
    ///
    /// Last write wins; a note deleted in the meantime yields `NotFound`.
    pub async fn write_note_content(&self, path: &str, content: &str) -> StoreResult<()> {
        let result = self.write_note_content_inner(path, content).await;
        log_mutation("note_write", path, &result);
        result
    }

    /// Renames a folder on disk or retitles a note in place.
    ///
    /// Returns the item's path after the operation. Folder renames change the
    /// path (and therefore the id) of the folder and all of its descendants;
    /// note renames keep both path and id.
    ///
    /// A folder rename never replaces another entry (`AlreadyExists`), and a
    /// `Folder` rename of a path that is not a directory fails with `NotFound`.
    pub async fn rename_item(
        &self,
        path: &str,
        new_title: &str,
        kind: NodeKind,
    ) -> StoreResult<String> {
        let result = match kind {
            NodeKind::Folder => self.rename_folder(path, new_title).await,
            NodeKind::Note => self.retitle_note(path, new_title).await,
        };
        log_mutation("item_rename", path, &result);
        result
    }

    /// Creates an empty note under `parent_path`, creating missing parents.
    pub async fn create_note(&self, parent_path: &str, title: &str) -> StoreResult<Node> {
        let result = self.create_note_inner(parent_path, title).await;
        match &result {
            Ok(node) => info!(
                "event=note_create module=store status=ok id={} path={}",
                node.id, node.path
            ),
            Err(err) => error!(
                "event=note_create module=store status=error parent={} code={} error={}",
                parent_path,
                err.code(),
                err
            ),
        }
        result
    }

    /// Creates folder `name` under `parent_path` and returns its path.
    ///
    /// A name that sanitizes to nothing fails with `InvalidName` before any
    /// filesystem access; an existing target fails with `AlreadyExists`.
    pub async fn create_folder(&self, parent_path: &str, name: &str) -> StoreResult<String> {
        let result = self.create_folder_inner(parent_path, name).await;
        log_mutation("folder_create", parent_path, &result);
        result
    }

    /// Deletes a folder recursively or a single note file.
    ///
    /// Deleting a folder that is already gone succeeds.
    pub async fn delete_item(&self, path: &str, kind: NodeKind) -> StoreResult<()> {
        let result = self.delete_item_inner(path, kind).await;
        log_mutation("item_delete", path, &result);
        result
    }

    /// Deletes all targets concurrently and returns once every task finished.
    pub async fn delete_items<I>(&self, targets: I) -> Vec<DeleteOutcome>
    where
        I: IntoIterator<Item = DeleteTarget>,
    {
        let handles: Vec<_> = targets
            .into_iter()
            .map(|target| {
                let store = self.clone();
                let path = target.path.clone();
                let handle =
                    tokio::spawn(async move { store.delete_item(&target.path, target.kind).await });
                (path, handle)
            })
            .collect();

        // Why: callers re-scan right after this returns, so every task must have
        // finished; awaiting in spawn order also keeps outcomes in request order.
        let mut outcomes = Vec::with_capacity(handles.len());
        for (path, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(join_err) => Err(StoreError::Io {
                    path: path.clone(),
                    source: io::Error::other(join_err.to_string()),
                }),
            };
            outcomes.push(DeleteOutcome { path, result });
        }
        outcomes
    }

    async fn write_note_content_inner(&self, path: &str, content: &str) -> StoreResult<()> {
        self.ensure_root().await?;
        let relative = normalize_relative(path)?;
        let full_path = resolve(&self.root, &relative)?;
        let mut document = read_document(&full_path, &relative).await?;
        document.content = content.to_string();
        write_document(&full_path, &relative, &document).await
    }

    async fn rename_folder(&self, path: &str, new_title: &str) -> StoreResult<String> {
        self.ensure_root().await?;
        let relative = normalize_relative(path)?;
        if relative.is_empty() {
            return Err(StoreError::PathOutsideRoot(path.to_string()));
        }

        let name = sanitize_name_or(new_title, RENAME_FALLBACK);
        let target = join_relative(parent_relative(&relative), &name);
        if target == relative {
            debug!(
                "event=item_rename module=store status=skipped reason=unchanged path={}",
                relative
            );
            return Ok(relative);
        }

        let source_path = resolve(&self.root, &relative)?;
        let target_path = resolve(&self.root, &target)?;
        let metadata = fs::metadata(&source_path)
            .await
            .map_err(|err| StoreError::from_io(relative.clone(), err))?;
        if !metadata.is_dir() {
            return Err(StoreError::NotFound(relative));
        }

        // Why: on case-insensitive volumes a case-only rename finds its own
        // source at the target path; any other existing entry would be
        // replaced by `rename`, so only the same entry may proceed.
        if entry_exists(&target_path, &target).await? {
            let same = same_entry(&source_path, &target_path)
                .await
                .map_err(|err| StoreError::from_io(target.clone(), err))?;
            if !same {
                return Err(StoreError::AlreadyExists(target));
            }
        }

        fs::rename(&source_path, &target_path)
            .await
            .map_err(|err| StoreError::from_io(relative.clone(), err))?;
        Ok(target)
    }

    async fn retitle_note(&self, path: &str, new_title: &str) -> StoreResult<String> {
        self.ensure_root().await?;
        let relative = normalize_relative(path)?;
        let full_path = resolve(&self.root, &relative)?;
        let mut document = read_document(&full_path, &relative).await?;
        document.title = sanitize_name_or(new_title, RENAME_FALLBACK);
        write_document(&full_path, &relative, &document).await?;
        Ok(relative)
    }

    async fn create_note_inner(&self, parent_path: &str, title: &str) -> StoreResult<Node> {
        let parent = normalize_relative(parent_path)?;
        self.ensure_root().await?;

        let parent_dir = resolve(&self.root, &parent)?;
        fs::create_dir_all(&parent_dir)
            .await
            .map_err(|err| StoreError::from_io(parent.clone(), err))?;

        let document = NoteDocument::new(sanitize_name_or(title, NEW_NOTE_FALLBACK));
        let relative = join_relative(&parent, &document.file_name());
        write_document(&parent_dir.join(document.file_name()), &relative, &document).await?;
        Ok(document.to_node(relative))
    }

    async fn create_folder_inner(&self, parent_path: &str, name: &str) -> StoreResult<String> {
        let name = sanitize_name(name).ok_or(StoreError::InvalidName)?;
        let parent = normalize_relative(parent_path)?;
        self.ensure_root().await?;

        let parent_dir = resolve(&self.root, &parent)?;
        fs::create_dir_all(&parent_dir)
            .await
            .map_err(|err| StoreError::from_io(parent.clone(), err))?;

        let relative = join_relative(&parent, &name);
        fs::create_dir(parent_dir.join(&name))
            .await
            .map_err(|err| StoreError::from_io(relative.clone(), err))?;
        Ok(relative)
    }

    async fn delete_item_inner(&self, path: &str, kind: NodeKind) -> StoreResult<()> {
        self.ensure_root().await?;
        let relative = normalize_relative(path)?;
        if relative.is_empty() {
            return Err(StoreError::PathOutsideRoot(path.to_string()));
        }
        let full_path = resolve(&self.root, &relative)?;

        match kind {
            NodeKind::Folder => match fs::remove_dir_all(&full_path).await {
                Ok(()) => Ok(()),
                // Why: overlapping bulk deletes (a folder and its own child) race
                // on the same subtree; an already-removed folder is the goal state.
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(StoreError::from_io(relative, err)),
            },
            NodeKind::Note => fs::remove_file(&full_path)
                .await
                .map_err(|err| StoreError::from_io(relative, err)),
        }
    }
}

async fn write_document(
    full_path: &Path,
    relative: &str,
    document: &NoteDocument,
) -> StoreResult<()> {
    let encoded = document.encode(relative)?;
    fs::write(full_path, encoded)
        .await
        .map_err(|err| StoreError::from_io(relative, err))
}

/// Whether both paths name the same filesystem entry.
async fn same_entry(left: &Path, right: &Path) -> io::Result<bool> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;

        let left = fs::metadata(left).await?;
        let right = fs::metadata(right).await?;
        Ok(left.dev() == right.dev() && left.ino() == right.ino())
    }
    #[cfg(not(unix))]
    {
        Ok(fs::canonicalize(left).await? == fs::canonicalize(right).await?)
    }
}

async fn entry_exists(full_path: &Path, relative: &str) -> StoreResult<bool> {
    fs::try_exists(full_path)
        .await
        .map_err(|err| StoreError::from_io(relative, err))
}

fn log_mutation<T>(event: &str, path: &str, result: &StoreResult<T>) {
    match result {
        Ok(_) => info!("event={event} module=store status=ok path={path}"),
        Err(err) => error!(
            "event={event} module=store status=error path={path} code={} error={err}",
            err.code()
        ),
    }
}
