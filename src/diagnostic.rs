//! Diagnostics and text edits.
//!
//! A [`Diagnostic`] is one reported violation: which rule raised it, a
//! stable message id plus interpolation data, the source span it anchors
//! to, and an optional [`TextEdit`] that would resolve it. Diagnostics are
//! descriptive only; the input tree and source text are never mutated.
//!
//! Fix application is the consumer's second phase: all edits from one
//! checker pass are non-overlapping zero-width insertions, so
//! [`apply_edits`] can apply a whole batch atomically.

use crate::error::{Result, StatlineError};
use crate::source::Span;
use serde::Serialize;

/// A zero-width insertion into the original source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    /// Byte offset at which to insert, relative to the original source.
    pub offset: usize,
    /// The text to insert.
    pub text: String,
}

impl TextEdit {
    /// Creates an insertion edit at the given byte offset.
    pub fn insertion(offset: usize, text: impl Into<String>) -> Self {
        TextEdit {
            offset,
            text: text.into(),
        }
    }
}

/// A single violation reported by a rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Stable name of the rule that produced this diagnostic.
    pub rule: &'static str,
    /// Stable message identifier, e.g. `"exceed"`.
    pub message_id: &'static str,
    /// Human-readable message with interpolated values.
    pub message: String,
    /// Number of countable statements found on the offending line.
    pub count_on_line: usize,
    /// The configured maximum the line exceeded.
    pub max: usize,
    /// The span of the node the diagnostic anchors to.
    pub span: Span,
    /// An edit that would resolve the violation, when the rule can fix it.
    pub fix: Option<TextEdit>,
}

/// Serializes a pass's diagnostics to pretty-printed JSON for host display.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn diagnostics_to_json(diagnostics: &[Diagnostic]) -> Result<String> {
    serde_json::to_string_pretty(diagnostics)
        .map_err(|e| StatlineError::config_error(format!("Failed to serialize diagnostics: {}", e)))
}

/// Applies a batch of edits from one checker pass to the original source.
///
/// Edits are sorted by offset and applied in one reconstruction, so the
/// batch is atomic: either every edit lands or none does.
///
/// # Errors
///
/// Returns an `EditError` when an edit points past the end of the source
/// or when two edits share an offset (overlap), which a single pass never
/// produces.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> Result<String> {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by_key(|e| e.offset);

    let mut out = String::with_capacity(source.len() + edits.iter().map(|e| e.text.len()).sum::<usize>());
    let mut cursor = 0usize;
    let mut last_offset: Option<usize> = None;

    for edit in ordered {
        if edit.offset > source.len() {
            return Err(StatlineError::edit_error_at(
                "insertion offset past end of source",
                edit.offset,
            ));
        }
        if last_offset == Some(edit.offset) {
            return Err(StatlineError::edit_error_at(
                "two edits share the same offset",
                edit.offset,
            ));
        }
        if !source.is_char_boundary(edit.offset) {
            return Err(StatlineError::edit_error_at(
                "insertion offset is not a character boundary",
                edit.offset,
            ));
        }
        out.push_str(&source[cursor..edit.offset]);
        out.push_str(&edit.text);
        cursor = edit.offset;
        last_offset = Some(edit.offset);
    }
    out.push_str(&source[cursor..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_single_insertion() {
        let edits = [TextEdit::insertion(10, "\n")];
        let out = apply_edits("if (a){b()}", &edits).unwrap();
        assert_eq!(out, "if (a){b()\n}");
    }

    #[test]
    fn test_apply_multiple_insertions_in_any_order() {
        let edits = [TextEdit::insertion(5, "\n"), TextEdit::insertion(2, "\n")];
        let out = apply_edits("aabbbcc", &edits).unwrap();
        assert_eq!(out, "aa\nbbb\ncc");
    }

    #[test]
    fn test_apply_insertion_at_end_of_source() {
        let edits = [TextEdit::insertion(3, "\n")];
        assert_eq!(apply_edits("a()", &edits).unwrap(), "a()\n");
    }

    #[test]
    fn test_rejects_offset_past_end() {
        let edits = [TextEdit::insertion(4, "\n")];
        let err = apply_edits("a()", &edits).unwrap_err();
        assert_eq!(err.name(), "EditError");
    }

    #[test]
    fn test_rejects_overlapping_edits() {
        let edits = [TextEdit::insertion(1, "\n"), TextEdit::insertion(1, "\n")];
        let err = apply_edits("ab", &edits).unwrap_err();
        assert_eq!(err.name(), "EditError");
    }

    #[test]
    fn test_empty_batch_is_identity() {
        assert_eq!(apply_edits("a(); b();", &[]).unwrap(), "a(); b();");
    }

    #[test]
    fn test_diagnostics_serialize_to_valid_json() {
        let json = diagnostics_to_json(&[]).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&json).expect("Generated report should be valid JSON");
        assert!(parsed.as_array().unwrap().is_empty());
    }
}
