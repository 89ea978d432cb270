use crate::ports::{LogSink, Program};
use camino::Utf8Path;
use codefix_syntax::{Node, NodeId, SourceFile};
use codefix_types::{Diagnostic, RefactorEditInfo};

mod const_to_let;

pub use const_to_let::ConstToLet;

/// Everything a fix may look at for one request.
///
/// Built fresh by the resolver for every request and dropped with it.
pub struct FixOptions<'a> {
    pub target_node: NodeId,
    pub source_file: &'a SourceFile,
    /// Diagnostics for `source_file`, in the order the service produced them.
    pub diagnostics: Vec<Diagnostic>,
    pub program: &'a dyn Program,
    pub log: &'a dyn LogSink,
}

impl FixOptions<'_> {
    pub fn target(&self) -> &Node {
        &self.source_file.tree()[self.target_node]
    }

    pub fn target_text(&self) -> &str {
        self.source_file.node_text(self.target_node)
    }

    pub fn log(&self, message: &str) {
        self.log.log(message);
    }
}

/// Static description of a registered fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub diagnostic_codes: &'static [u32],
}

/// A named fix offered for a specific node/diagnostic context.
///
/// Implementations are stateless; the same instance serves every request.
pub trait CodeFix: Send + Sync {
    fn meta(&self) -> FixMeta;

    fn name(&self) -> &'static str {
        self.meta().name
    }

    /// Whether this fix applies. Must not mutate anything; logs why it rejected.
    fn resolves(&self, options: &FixOptions<'_>) -> bool;

    /// Label shown to the user. Only called after `resolves` returned true.
    fn describe(&self, options: &FixOptions<'_>) -> String;

    /// The edit implementing the fix, or `None` when there is nothing to change.
    fn apply(
        &self,
        options: &FixOptions<'_>,
        file_name: &Utf8Path,
        action_name: &str,
    ) -> Option<RefactorEditInfo>;
}

/// The registry, in offer order.
pub fn builtin_fixes() -> Vec<Box<dyn CodeFix>> {
    vec![Box::new(ConstToLet)]
}

pub fn builtin_fix_metas() -> Vec<FixMeta> {
    builtin_fixes().iter().map(|f| f.meta()).collect()
}
