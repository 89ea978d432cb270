//! Test tooling: a tiny in-memory analysis service.
//!
//! Understands a small declaration/assignment language (`const`/`let`/`var`
//! statements, `for (... of ...)` loops, blocks, assignments and `+`), binds
//! names with block scoping and reports two diagnostics:
//! - 2588 "Cannot assign to 'x' because it is a constant." at the assigned identifier
//! - 2304 "Cannot find name 'x'." at an unresolved identifier
//!
//! This crate exists so the production crates can be exercised end to end; it is
//! never a dependency of them.

mod binder;
mod lexer;
mod parser;
mod service;

pub use service::{InMemoryProgram, InMemoryService, RecordingLog};

/// Offset of the `nth` (0-based) occurrence of `needle` in `text`.
pub fn offset_of(text: &str, needle: &str, nth: usize) -> Option<u32> {
    text.match_indices(needle)
        .nth(nth)
        .map(|(i, _)| i as u32)
}
