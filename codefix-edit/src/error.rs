//! Error types for codefix-edit.
//!
//! Every variant describes an edit that must not reach the host: applying it
//! would corrupt text outside the intended span or only partially apply.

use camino::Utf8PathBuf;
use codefix_types::TextSpan;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    /// A change reaches past the end of the file text.
    #[error("{file}: span {start}..{end} is outside the text (len {len})")]
    SpanOutOfBounds {
        file: Utf8PathBuf,
        start: u32,
        end: u32,
        len: usize,
    },

    /// A change boundary splits a multi-byte character.
    #[error("{file}: offset {offset} is not on a character boundary")]
    NotCharBoundary { file: Utf8PathBuf, offset: u32 },

    /// Two changes in one file cover the same text.
    #[error("{file}: change at {first:?} overlaps change at {second:?}")]
    OverlappingChanges {
        file: Utf8PathBuf,
        first: TextSpan,
        second: TextSpan,
    },

    /// The edit targets a file the caller has no text for.
    #[error("{file}: no text available for this file")]
    UnknownFile { file: Utf8PathBuf },

    /// The same file appears in more than one entry of an edit bundle.
    #[error("{file}: listed more than once in one edit")]
    DuplicateFile { file: Utf8PathBuf },
}

impl EditError {
    pub fn file(&self) -> &Utf8PathBuf {
        match self {
            EditError::SpanOutOfBounds { file, .. }
            | EditError::NotCharBoundary { file, .. }
            | EditError::OverlappingChanges { file, .. }
            | EditError::UnknownFile { file }
            | EditError::DuplicateFile { file } => file,
        }
    }
}

/// Result type alias using EditError.
pub type EditOutcome<T> = Result<T, EditError>;
