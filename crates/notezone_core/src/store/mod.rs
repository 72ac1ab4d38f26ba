//! Filesystem persistence for the folder/note hierarchy.
//!
//! # Responsibility
//! - Map the folder/note tree onto a directory tree of `<id>.json` files.
//! - Keep path handling and JSON codec details inside the store boundary.
//!
//! # Invariants
//! - The filesystem is the single source of truth; no tree is cached here.
//! - Callers re-scan after every mutation to observe fresh ids and paths.

pub mod document;
pub mod document_store;
pub mod error;
pub mod paths;
pub mod scanner;
