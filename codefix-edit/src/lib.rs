//! Edit engine for codefix.
//!
//! Responsibilities:
//! - Validate that a refactor edit is span-exact against the text it was computed for.
//! - Apply edits to in-memory file texts.
//! - Render a unified diff preview.

mod error;

pub use error::{EditError, EditOutcome};

use camino::{Utf8Path, Utf8PathBuf};
use codefix_types::{RefactorEditInfo, TextChange};
use diffy::{DiffOptions, PatchFormatter};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Check every change of one file against `text`.
///
/// Changes may arrive in any order; they are checked in ascending start order.
/// Adjacent changes are fine, overlapping ones are not.
pub fn validate_changes(file: &Utf8Path, text: &str, changes: &[TextChange]) -> EditOutcome<()> {
    let mut ordered: Vec<&TextChange> = changes.iter().collect();
    ordered.sort_by_key(|c| c.span.start);

    let mut previous: Option<&TextChange> = None;
    for change in ordered {
        let span = change.span;
        let out_of_bounds = || EditError::SpanOutOfBounds {
            file: file.to_path_buf(),
            start: span.start,
            end: span.end(),
            len: text.len(),
        };
        let end = span.checked_end().ok_or_else(out_of_bounds)? as usize;
        if end > text.len() {
            return Err(out_of_bounds());
        }
        let start = span.start as usize;
        for offset in [start, end] {
            if !text.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary {
                    file: file.to_path_buf(),
                    offset: offset as u32,
                });
            }
        }
        if let Some(prev) = previous
            && prev.span.end() > span.start
        {
            return Err(EditError::OverlappingChanges {
                file: file.to_path_buf(),
                first: prev.span,
                second: span,
            });
        }
        previous = Some(change);
    }
    Ok(())
}

/// Apply the changes of one file to `text`, returning the new text.
pub fn apply_text_changes(
    file: &Utf8Path,
    text: &str,
    changes: &[TextChange],
) -> EditOutcome<String> {
    validate_changes(file, text, changes)?;

    let mut ordered: Vec<&TextChange> = changes.iter().collect();
    ordered.sort_by_key(|c| c.span.start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for change in ordered {
        let start = change.span.start as usize;
        out.push_str(&text[cursor..start]);
        out.push_str(&change.new_text);
        cursor = change.span.end() as usize;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}

/// Validate a whole edit bundle. `lookup` supplies the text each change was computed against.
pub fn validate_edit_info<'t, F>(info: &RefactorEditInfo, lookup: F) -> EditOutcome<()>
where
    F: Fn(&Utf8Path) -> Option<&'t str>,
{
    let mut seen = BTreeSet::new();
    for entry in &info.edits {
        if !seen.insert(entry.file_name.as_path()) {
            return Err(EditError::DuplicateFile {
                file: entry.file_name.clone(),
            });
        }
        let text = lookup(&entry.file_name).ok_or_else(|| EditError::UnknownFile {
            file: entry.file_name.clone(),
        })?;
        validate_changes(&entry.file_name, text, &entry.text_changes)?;
    }
    Ok(())
}

/// Apply an edit bundle to a set of file texts. Files the edit does not touch
/// are carried over unchanged. Nothing is applied unless every entry is valid.
pub fn apply_edit_info(
    files: &BTreeMap<Utf8PathBuf, String>,
    info: &RefactorEditInfo,
) -> EditOutcome<BTreeMap<Utf8PathBuf, String>> {
    validate_edit_info(info, |path| files.get(path).map(String::as_str))?;

    let mut after = files.clone();
    for entry in &info.edits {
        let Some(text) = files.get(&entry.file_name) else {
            continue;
        };
        let updated = apply_text_changes(&entry.file_name, text, &entry.text_changes)?;
        debug!(
            file = %entry.file_name,
            changes = entry.text_changes.len(),
            "applied text changes"
        );
        after.insert(entry.file_name.clone(), updated);
    }
    Ok(after)
}

/// Unified diff of every file whose text differs between `before` and `after`,
/// in `git apply` form (`a/` and `b/` prefixed paths).
pub fn preview_patch(
    before: &BTreeMap<Utf8PathBuf, String>,
    after: &BTreeMap<Utf8PathBuf, String>,
) -> String {
    let mut out = String::new();
    let formatter = PatchFormatter::new();

    for (path, old) in before {
        let new = after.get(path).unwrap_or(old);
        if old == new {
            continue;
        }

        out.push_str(&format!("diff --git a/{0} b/{0}\n", path));

        let mut options = DiffOptions::new();
        options
            .set_original_filename(format!("a/{path}"))
            .set_modified_filename(format!("b/{path}"));
        let patch = options.create_patch(old, new);
        out.push_str(&formatter.fmt_patch(&patch).to_string());
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}
