use crate::binder::{Binding, bind};
use crate::parser::parse;
use anyhow::{Context, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use codefix_core::{HostLogger, LanguageService};
use codefix_domain::{AnalysisService, LogSink, Program, Symbol};
use codefix_syntax::{NodeId, SourceFile};
use codefix_types::{
    ApplicableRefactorInfo, Diagnostic, FormatCodeSettings, PositionOrRange, RefactorEditInfo,
    UserPreferences,
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug)]
struct AnalyzedFile {
    source: SourceFile,
    binding: Binding,
}

/// One snapshot of every loaded file.
#[derive(Debug, Default)]
pub struct InMemoryProgram {
    files: BTreeMap<Utf8PathBuf, AnalyzedFile>,
    diagnostics_override: BTreeMap<Utf8PathBuf, Vec<Diagnostic>>,
}

impl InMemoryProgram {
    fn analyzed(&self, source_file: &SourceFile) -> Option<&AnalyzedFile> {
        self.files.get(source_file.file_name())
    }
}

impl Program for InMemoryProgram {
    fn source_file(&self, file_name: &Utf8Path) -> Option<&SourceFile> {
        self.files.get(file_name).map(|f| &f.source)
    }

    fn pre_emit_diagnostics(&self, source_file: &SourceFile) -> Vec<Diagnostic> {
        if let Some(diagnostics) = self.diagnostics_override.get(source_file.file_name()) {
            return diagnostics.clone();
        }
        self.analyzed(source_file)
            .map(|f| f.binding.diagnostics.clone())
            .unwrap_or_default()
    }

    fn symbol_at_location(&self, source_file: &SourceFile, node: NodeId) -> Option<Symbol> {
        let binding = &self.analyzed(source_file)?.binding;
        let data = binding.symbols.get(*binding.references.get(&node)?)?;
        Some(Symbol {
            name: data.name.clone(),
            declarations: data.declarations.clone(),
        })
    }
}

/// In-memory language service: parses and binds files on load and answers the
/// host side of the refactor protocol with canned results.
#[derive(Debug)]
pub struct InMemoryService {
    program: Option<InMemoryProgram>,
    host_refactors: Vec<ApplicableRefactorInfo>,
    host_edits: Option<RefactorEditInfo>,
    calls: RefCell<Vec<String>>,
}

impl Default for InMemoryService {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryService {
    pub fn new() -> Self {
        Self {
            program: Some(InMemoryProgram::default()),
            host_refactors: Vec::new(),
            host_edits: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// A service that has not loaded a program yet.
    pub fn without_program() -> Self {
        Self {
            program: None,
            ..Self::new()
        }
    }

    pub fn with_file(mut self, file_name: &str, text: &str) -> anyhow::Result<Self> {
        self.set_file(file_name, text)?;
        Ok(self)
    }

    /// Replace what the service reports for `file_name` instead of computing it.
    pub fn with_diagnostics(mut self, file_name: &str, diagnostics: Vec<Diagnostic>) -> Self {
        self.set_diagnostics_override(file_name, diagnostics);
        self
    }

    pub fn with_host_refactors(mut self, refactors: Vec<ApplicableRefactorInfo>) -> Self {
        self.host_refactors = refactors;
        self
    }

    pub fn with_host_edits(mut self, edits: RefactorEditInfo) -> Self {
        self.host_edits = Some(edits);
        self
    }

    /// Parse and bind `text` as the new version of `file_name`.
    pub fn set_file(&mut self, file_name: &str, text: &str) -> anyhow::Result<()> {
        let program = self
            .program
            .as_mut()
            .ok_or_else(|| anyhow!("service has no program"))?;
        let tree = parse(text).with_context(|| format!("parse {file_name}"))?;
        let source = SourceFile::new(file_name, text, tree);
        let binding = bind(&source);
        debug!(
            file = file_name,
            nodes = source.tree().len(),
            diagnostics = binding.diagnostics.len(),
            "loaded fixture file"
        );
        program
            .files
            .insert(Utf8PathBuf::from(file_name), AnalyzedFile { source, binding });
        Ok(())
    }

    pub fn set_diagnostics_override(&mut self, file_name: &str, diagnostics: Vec<Diagnostic>) {
        if let Some(program) = self.program.as_mut() {
            program
                .diagnostics_override
                .insert(Utf8PathBuf::from(file_name), diagnostics);
        }
    }

    pub fn file_text(&self, file_name: &str) -> Option<&str> {
        let program = self.program.as_ref()?;
        program
            .files
            .get(Utf8Path::new(file_name))
            .map(|f| f.source.text())
    }

    /// Current diagnostics for `file_name`, honoring any override.
    pub fn diagnostics(&self, file_name: &str) -> Vec<Diagnostic> {
        let Some(program) = self.program.as_ref() else {
            return Vec::new();
        };
        program
            .source_file(Utf8Path::new(file_name))
            .map(|source| program.pre_emit_diagnostics(source))
            .unwrap_or_default()
    }

    /// Apply `edits` and re-analyze every touched file. Overrides for those files are dropped.
    ///
    /// Returns the unified diff of what changed.
    pub fn apply_edit(&mut self, edits: &RefactorEditInfo) -> anyhow::Result<String> {
        let program = self
            .program
            .as_mut()
            .ok_or_else(|| anyhow!("service has no program"))?;
        let before: BTreeMap<Utf8PathBuf, String> = program
            .files
            .iter()
            .map(|(name, f)| (name.clone(), f.source.text().to_string()))
            .collect();
        let after = codefix_edit::apply_edit_info(&before, edits).context("apply edit")?;
        let preview = codefix_edit::preview_patch(&before, &after);
        debug!(changes = edits.change_count(), "applying fixture edit\n{preview}");

        for entry in &edits.edits {
            program.diagnostics_override.remove(&entry.file_name);
        }
        for (name, text) in &after {
            if before.get(name) != Some(text) {
                self.set_file(name.as_str(), text)?;
            }
        }
        Ok(preview)
    }

    /// Host-side calls that reached this service, oldest first.
    pub fn host_calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl AnalysisService for InMemoryService {
    fn program(&self) -> Option<&dyn Program> {
        self.program.as_ref().map(|p| p as &dyn Program)
    }
}

impl LanguageService for InMemoryService {
    fn applicable_refactors(
        &self,
        file_name: &Utf8Path,
        _position_or_range: PositionOrRange,
        _preferences: &UserPreferences,
    ) -> Vec<ApplicableRefactorInfo> {
        self.calls
            .borrow_mut()
            .push(format!("applicable_refactors {file_name}"));
        self.host_refactors.clone()
    }

    fn edits_for_refactor(
        &self,
        file_name: &Utf8Path,
        _format_options: &FormatCodeSettings,
        _position_or_range: PositionOrRange,
        refactor_name: &str,
        action_name: &str,
        _preferences: &UserPreferences,
    ) -> Option<RefactorEditInfo> {
        self.calls.borrow_mut().push(format!(
            "edits_for_refactor {file_name} {refactor_name}/{action_name}"
        ));
        self.host_edits.clone()
    }
}

/// Collects log lines from both the domain sink and the host logger port.
#[derive(Debug, Default)]
pub struct RecordingLog {
    lines: RefCell<Vec<String>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|line| line.contains(needle))
    }

    fn push(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}

impl LogSink for RecordingLog {
    fn log(&self, message: &str) {
        self.push(message);
    }
}

impl HostLogger for RecordingLog {
    fn info(&self, message: &str) {
        self.push(message);
    }
}
