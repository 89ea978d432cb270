use crate::text::TextSpan;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Replace the text under `span` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextChange {
    pub span: TextSpan,
    pub new_text: String,
}

impl TextChange {
    pub fn replace(span: TextSpan, new_text: impl Into<String>) -> Self {
        Self {
            span,
            new_text: new_text.into(),
        }
    }
}

/// All changes for one file, ordered ascending by `span.start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTextChanges {
    pub file_name: Utf8PathBuf,
    pub text_changes: Vec<TextChange>,
}

impl FileTextChanges {
    /// Hosts apply changes without resolving order themselves, so the list is
    /// sorted here (stable, so equal starts keep their insertion order).
    pub fn new(file_name: impl Into<Utf8PathBuf>, mut text_changes: Vec<TextChange>) -> Self {
        text_changes.sort_by_key(|c| c.span.start);
        Self {
            file_name: file_name.into(),
            text_changes,
        }
    }
}

/// The edit bundle returned for a chosen refactor action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactorEditInfo {
    pub edits: Vec<FileTextChanges>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename_filename: Option<Utf8PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename_location: Option<u32>,
}

impl RefactorEditInfo {
    pub fn new(edits: Vec<FileTextChanges>) -> Self {
        Self {
            edits,
            rename_filename: None,
            rename_location: None,
        }
    }

    /// One file, one change.
    pub fn single(file_name: impl Into<Utf8PathBuf>, change: TextChange) -> Self {
        Self::new(vec![FileTextChanges::new(file_name, vec![change])])
    }

    pub fn change_count(&self) -> usize {
        self.edits.iter().map(|e| e.text_changes.len()).sum()
    }
}
