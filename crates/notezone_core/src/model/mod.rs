//! View model produced by tree scans.
//!
//! # Responsibility
//! - Define the folder/note descriptors handed to UI callers.
//!
//! # Invariants
//! - The filesystem is the source of truth; these types are snapshots.

pub mod node;
