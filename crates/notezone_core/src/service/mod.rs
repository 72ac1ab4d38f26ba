//! Session-level services above the document store.
//!
//! # Responsibility
//! - Keep UI/FFI layers decoupled from re-scan and selection bookkeeping.

pub mod selection;
pub mod workspace_service;
