//! Flat per-user files stored next to the note hierarchy.
//!
//! # Responsibility
//! - Persist `settings.json` and `reminders.json` as opaque blobs.
//!
//! # Invariants
//! - Neither file participates in the folder/note tree.

pub mod reminders;
pub mod settings;
