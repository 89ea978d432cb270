//! Shared DTOs for the codefix workspace.
//!
//! These mirror the shapes a language-service host exchanges with its plugins
//! (spans, diagnostics, refactor listings and edit bundles).
//!
//! # Design constraints
//! - Offsets are byte offsets into the UTF-8 text of one file version.
//! - Types serialize with the host's camelCase field names.
//! - Prefer adding optional fields over changing semantics.

pub mod diagnostic;
pub mod edit;
pub mod refactor;
pub mod text;

pub use diagnostic::{Diagnostic, DiagnosticCategory};
pub use edit::{FileTextChanges, RefactorEditInfo, TextChange};
pub use refactor::{
    ApplicableRefactorInfo, FormatCodeSettings, RefactorActionInfo, UserPreferences,
};
pub use text::{PositionOrRange, TextRange, TextSpan};

/// Diagnostic codes the builtin fixes react to.
pub mod codes {
    /// "Cannot assign to 'x' because it is a constant."
    pub const CANNOT_ASSIGN_TO_CONSTANT: u32 = 2588;
}
