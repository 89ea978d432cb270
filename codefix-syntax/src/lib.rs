//! Read-only syntax tree as handed to codefix by an analysis service.
//!
//! codefix never parses. Analysis services assemble trees with [`TreeBuilder`]
//! and codefix only walks them: kinds, offsets, leading trivia, parent links and
//! ordered children. Tokens are nodes too, so a declaration list's children
//! include its keyword token.

mod builder;
mod kind;
mod source;
mod tree;

pub use builder::{Checkpoint, TreeBuilder, TreeError};
pub use kind::SyntaxKind;
pub use source::SourceFile;
pub use tree::{Ancestors, Node, NodeId, SyntaxTree};
