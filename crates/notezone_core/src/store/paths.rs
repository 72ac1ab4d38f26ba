//! Store-relative path handling.
//!
//! # Invariants
//! - Relative paths are rendered `/`-separated; the root is the empty string.
//! - Resolution never yields a location outside the store root.

use crate::store::error::{StoreError, StoreResult};
use std::path::{Component, Path, PathBuf};

/// Normalizes a caller-supplied relative path.
///
/// `""` and `"."` address the root. `..`, absolute paths and drive prefixes
/// are rejected.
pub fn normalize_relative(relative: &str) -> StoreResult<String> {
    let mut parts = Vec::new();
    for component in Path::new(relative.trim()).components() {
        match component {
            Component::Normal(part) => match part.to_str() {
                Some(part) => parts.push(part),
                None => return Err(StoreError::PathOutsideRoot(relative.to_string())),
            },
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(StoreError::PathOutsideRoot(relative.to_string()));
            }
        }
    }
    Ok(parts.join("/"))
}

/// Resolves a relative path to an absolute location under `root`.
pub fn resolve(root: &Path, relative: &str) -> StoreResult<PathBuf> {
    let normalized = normalize_relative(relative)?;
    if normalized.is_empty() {
        return Ok(root.to_path_buf());
    }
    Ok(root.join(normalized))
}

/// Appends one entry name to a normalized relative parent.
pub fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Parent of a normalized relative path; the root's parent is the root.
pub fn parent_relative(relative: &str) -> &str {
    match relative.rfind('/') {
        Some(index) => &relative[..index],
        None => "",
    }
}
