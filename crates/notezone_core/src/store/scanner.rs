//! Recursive tree scanner.
//!
//! # Responsibility
//! - Walk the store root and build an ordered folder/note tree.
//!
//! # Invariants
//! - Read-only: never mutates the filesystem.
//! - Hidden entries (leading `.`) are excluded entirely.
//! - Only `*.json` files become notes; other files are ignored.
//! - A failing note file or subdirectory is logged and isolated; only an
//!   unreadable root fails the scan.
//! - Every folder's children are sorted with `sibling_order`.

use crate::model::node::{sibling_order, Node};
use crate::store::document::{NoteDocument, NOTE_EXTENSION};
use crate::store::error::{StoreError, StoreResult};
use crate::store::paths::join_relative;
use log::warn;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::fs;

/// Leading character that marks an entry as hidden.
pub const HIDDEN_MARKER: char = '.';

type ScanFuture = Pin<Box<dyn Future<Output = StoreResult<Vec<Node>>> + Send>>;

/// Scans `root` recursively into sorted top-level nodes.
pub async fn scan_tree(root: &Path) -> StoreResult<Vec<Node>> {
    scan_dir(root.to_path_buf(), String::new()).await
}

/// Returns whether `name` is a visible note file name.
pub fn is_note_file_name(name: &str) -> bool {
    !name.starts_with(HIDDEN_MARKER)
        && Path::new(name)
            .extension()
            .is_some_and(|extension| extension == NOTE_EXTENSION)
}

/// Reads and decodes the note document at `full_path`.
pub async fn read_document(full_path: &Path, relative: &str) -> StoreResult<NoteDocument> {
    let raw = fs::read_to_string(full_path)
        .await
        .map_err(|err| StoreError::from_io(relative, err))?;
    NoteDocument::decode(relative, &raw)
}

fn scan_dir(dir: PathBuf, relative: String) -> ScanFuture {
    Box::pin(async move {
        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|err| StoreError::from_io(relative.clone(), err))?;
        let mut nodes = Vec::new();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| StoreError::from_io(relative.clone(), err))?
        {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                warn!(
                    "event=scan_entry module=scanner status=skipped reason=non_utf8_name parent={}",
                    relative
                );
                continue;
            };
            if name.starts_with(HIDDEN_MARKER) {
                continue;
            }

            let entry_relative = join_relative(&relative, name);
            let file_type = match entry.file_type().await {
                Ok(file_type) => file_type,
                Err(err) => {
                    warn!(
                        "event=scan_entry module=scanner status=skipped path={} error={}",
                        entry_relative, err
                    );
                    continue;
                }
            };

            if file_type.is_dir() {
                let children = match scan_dir(entry.path(), entry_relative.clone()).await {
                    Ok(children) => children,
                    Err(err) => {
                        warn!(
                            "event=scan_folder module=scanner status=error path={} error={}",
                            entry_relative, err
                        );
                        Vec::new()
                    }
                };
                nodes.push(Node::folder(name, entry_relative, children));
            } else if file_type.is_file() && is_note_file_name(name) {
                match read_document(&entry.path(), &entry_relative).await {
                    Ok(document) => nodes.push(document.to_node(entry_relative)),
                    Err(err) => warn!(
                        "event=scan_note module=scanner status=skipped code={} error={}",
                        err.code(),
                        err
                    ),
                }
            }
        }

        nodes.sort_by(sibling_order);
        Ok(nodes)
    })
}
