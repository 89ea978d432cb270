use camino::Utf8Path;
use codefix_syntax::{NodeId, SourceFile};
use codefix_types::Diagnostic;

/// Read-only access to the analysis service.
///
/// codefix re-queries these on every request; nothing returned here is cached.
pub trait AnalysisService {
    /// The current program, or `None` while the service has none loaded.
    fn program(&self) -> Option<&dyn Program>;
}

/// One consistent snapshot of parsed files, symbols and diagnostics.
pub trait Program {
    fn source_file(&self, file_name: &Utf8Path) -> Option<&SourceFile>;

    /// Syntactic and semantic diagnostics for one file, in service order.
    fn pre_emit_diagnostics(&self, source_file: &SourceFile) -> Vec<Diagnostic>;

    /// The symbol `node` refers to. Declarations are nodes of `source_file`.
    fn symbol_at_location(&self, source_file: &SourceFile, node: NodeId) -> Option<Symbol>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    /// Declaration nodes in the order the service reports them.
    pub declarations: Vec<NodeId>,
}

/// Fire-and-forget text sink for rejection reasons and progress lines.
pub trait LogSink {
    fn log(&self, message: &str);
}

impl<F> LogSink for F
where
    F: Fn(&str),
{
    fn log(&self, message: &str) {
        self(message)
    }
}

/// `LogSink` that only emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, message: &str) {
        tracing::debug!(target: "codefix", "{message}");
    }
}
