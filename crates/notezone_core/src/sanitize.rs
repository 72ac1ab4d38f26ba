//! Title-to-filesystem-name sanitizer.
//!
//! # Responsibility
//! - Turn user-supplied titles into names safe to use as one path component.
//!
//! # Invariants
//! - Output only contains ASCII letters, digits, whitespace, `-`, `_`, `.`.
//! - Output never contains `..`, never starts with the hidden marker `.`, and
//!   never has leading/trailing whitespace.
//! - Sanitization is pure and never fails; emptiness is reported to callers.

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s\-_.]").expect("valid disallowed-char regex"));
static DOT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").expect("valid dot-run regex"));

/// Fallback title for notes created without a usable title.
pub const NEW_NOTE_FALLBACK: &str = "New Note";
/// Fallback title for renames that sanitize to nothing.
pub const RENAME_FALLBACK: &str = "Untitled";

/// Sanitizes `raw`, returning `None` when nothing usable remains.
pub fn sanitize_name(raw: &str) -> Option<String> {
    let allowed = DISALLOWED_RE.replace_all(raw, "");
    let collapsed = DOT_RUN_RE.replace_all(&allowed, ".");
    let trimmed = collapsed
        .trim_start_matches(|c: char| c == '.' || c.is_whitespace())
        .trim_end();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Sanitizes `raw`, substituting `fallback` when nothing usable remains.
pub fn sanitize_name_or(raw: &str, fallback: &str) -> String {
    sanitize_name(raw).unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::{sanitize_name, sanitize_name_or, NEW_NOTE_FALLBACK, RENAME_FALLBACK};

    #[test]
    fn keeps_allowed_characters() {
        assert_eq!(
            sanitize_name("Meeting notes_2024-01.v2").as_deref(),
            Some("Meeting notes_2024-01.v2")
        );
    }

    #[test]
    fn strips_traversal_sequences() {
        let name = sanitize_name("../../etc/passwd").expect("letters survive");
        assert!(!name.contains('/'));
        assert!(!name.contains('\\'));
        assert!(!name.contains(".."));
        assert!(!name.starts_with('.'));
        assert_eq!(name, "etcpasswd");
    }

    #[test]
    fn dot_only_names_are_empty() {
        assert_eq!(sanitize_name(".."), None);
        assert_eq!(sanitize_name(" . "), None);
        assert_eq!(sanitize_name_or("..", RENAME_FALLBACK), "Untitled");
    }

    #[test]
    fn whitespace_only_uses_fallback() {
        assert_eq!(sanitize_name("   "), None);
        assert_eq!(sanitize_name_or("   ", NEW_NOTE_FALLBACK), "New Note");
    }

    #[test]
    fn removes_symbols_and_trims() {
        assert_eq!(
            sanitize_name("  Plans: Q3 <draft>?  ").as_deref(),
            Some("Plans Q3 draft")
        );
        assert_eq!(sanitize_name("日本語"), None);
    }

    #[test]
    fn hidden_marker_is_never_produced() {
        assert_eq!(sanitize_name(".config").as_deref(), Some("config"));
        assert_eq!(sanitize_name("a..b").as_deref(), Some("a.b"));
    }
}
