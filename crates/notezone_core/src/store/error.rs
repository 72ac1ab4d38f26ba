//! Error taxonomy for document store operations.
//!
//! # Invariants
//! - `std::io::ErrorKind::NotFound` always surfaces as `NotFound`.
//! - `std::io::ErrorKind::AlreadyExists` always surfaces as `AlreadyExists`.
//! - Paths carried by variants are store-relative, never absolute.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

/// Result type used by document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from document store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Target path is missing on read/write/rename/delete.
    NotFound(String),
    /// Creation or rename collides with an existing entry.
    AlreadyExists(String),
    /// Name is empty after sanitization and no fallback applies.
    InvalidName,
    /// Note file content is not a valid note document.
    CorruptDocument { path: String, message: String },
    /// Caller-supplied relative path escapes the store root.
    PathOutsideRoot(String),
    /// Any other filesystem failure.
    Io { path: String, source: io::Error },
}

impl StoreError {
    /// Classifies an I/O failure observed at `path`.
    pub fn from_io(path: impl Into<String>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::AlreadyExists => Self::AlreadyExists(path),
            _ => Self::Io { path, source },
        }
    }

    /// Builds a corrupt-document error from a JSON decode failure.
    pub fn corrupt(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::CorruptDocument {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Stable machine-readable code for boundary envelopes and log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::AlreadyExists(_) => "already_exists",
            Self::InvalidName => "invalid_name",
            Self::CorruptDocument { .. } => "corrupt_document",
            Self::PathOutsideRoot(_) => "path_outside_root",
            Self::Io { .. } => "io_failure",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "item not found: `{path}`"),
            Self::AlreadyExists(path) => write!(f, "item already exists: `{path}`"),
            Self::InvalidName => write!(f, "name is empty after sanitization"),
            Self::CorruptDocument { path, message } => {
                write!(f, "corrupt note document `{path}`: {message}")
            }
            Self::PathOutsideRoot(path) => {
                write!(f, "path escapes the store root: `{path}`")
            }
            Self::Io { path, source } => write!(f, "i/o failure at `{path}`: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
