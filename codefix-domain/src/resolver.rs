use crate::fixes::{self, CodeFix, FixOptions};
use crate::locator::{locate, probe_range};
use crate::policy::ResolverPolicy;
use crate::ports::{AnalysisService, LogSink};
use camino::Utf8Path;
use codefix_types::{PositionOrRange, RefactorActionInfo, RefactorEditInfo};
use tracing::debug;

/// The fixes that resolved for one request, with the context they resolved against.
pub struct Resolution<'a> {
    pub fixes: Vec<&'a dyn CodeFix>,
    pub options: FixOptions<'a>,
}

/// Combines node location, diagnostics and the fix registry.
///
/// Holds no per-request state: every call re-reads the program from the service.
pub struct Resolver {
    fixes: Vec<Box<dyn CodeFix>>,
    policy: ResolverPolicy,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            fixes: fixes::builtin_fixes(),
            policy: ResolverPolicy::default(),
        }
    }

    pub fn with_fixes(fixes: Vec<Box<dyn CodeFix>>) -> Self {
        Self {
            fixes,
            policy: ResolverPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ResolverPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &ResolverPolicy {
        &self.policy
    }

    /// Registered fixes the policy lets through, in registry order.
    pub fn enabled_fixes(&self) -> impl Iterator<Item = &dyn CodeFix> {
        self.fixes
            .iter()
            .map(|f| f.as_ref())
            .filter(|f| self.policy.permits(f.name()))
    }

    /// Build the request context and filter the registry by `resolves`.
    ///
    /// `None` when the program or file is missing, nothing is under the cursor,
    /// or no fix resolves.
    pub fn resolve<'a>(
        &'a self,
        service: &'a dyn AnalysisService,
        file_name: &Utf8Path,
        position_or_range: PositionOrRange,
        log: &'a dyn LogSink,
    ) -> Option<Resolution<'a>> {
        let Some(program) = service.program() else {
            log.log("no program available");
            return None;
        };
        let Some(source_file) = program.source_file(file_name) else {
            log.log(&format!("source file not found: {file_name}"));
            return None;
        };

        let probe = probe_range(position_or_range);
        let Some(target_node) = locate(source_file.tree(), probe) else {
            log.log(&format!("no node at {}", probe.pos));
            return None;
        };

        let diagnostics = program.pre_emit_diagnostics(source_file);
        debug!(
            file = %file_name,
            position = probe.pos,
            kind = %source_file.tree()[target_node].kind(),
            diagnostics = diagnostics.len(),
            "resolving code fixes"
        );

        let options = FixOptions {
            target_node,
            source_file,
            diagnostics,
            program,
            log,
        };
        let fixes: Vec<&dyn CodeFix> = self
            .enabled_fixes()
            .filter(|f| f.resolves(&options))
            .collect();
        if fixes.is_empty() {
            log.log("no fixes apply");
            return None;
        }
        Some(Resolution { fixes, options })
    }

    /// Name and label of every fix applicable at `position_or_range`, in registry order.
    pub fn discover(
        &self,
        service: &dyn AnalysisService,
        file_name: &Utf8Path,
        position_or_range: PositionOrRange,
        log: &dyn LogSink,
    ) -> Vec<RefactorActionInfo> {
        let Some(resolution) = self.resolve(service, file_name, position_or_range, log) else {
            return Vec::new();
        };
        resolution
            .fixes
            .iter()
            .map(|fix| RefactorActionInfo {
                name: fix.name().to_string(),
                description: fix.describe(&resolution.options),
            })
            .collect()
    }

    /// Edits for the fix named `action_name`, recomputed from the live service state.
    ///
    /// `None` when the fix is unknown, does not resolve here, has nothing to change,
    /// or produced an edit that does not fit the file text.
    pub fn apply(
        &self,
        service: &dyn AnalysisService,
        file_name: &Utf8Path,
        position_or_range: PositionOrRange,
        action_name: &str,
        log: &dyn LogSink,
    ) -> Option<RefactorEditInfo> {
        let resolution = self.resolve(service, file_name, position_or_range, log)?;
        let Some(fix) = resolution
            .fixes
            .iter()
            .find(|f| f.name() == action_name)
        else {
            log.log(&format!("no resolved fix named {action_name}"));
            return None;
        };

        let edit = fix.apply(&resolution.options, file_name, action_name)?;
        let source = resolution.options.source_file;
        let checked = codefix_edit::validate_edit_info(&edit, |path| {
            (path == file_name).then_some(source.text())
        });
        if let Err(err) = checked {
            debug!(file = %err.file(), fix = action_name, "dropping invalid edit");
            log.log(&format!("{action_name} produced an invalid edit: {err}"));
            return None;
        }

        debug!(
            file = %file_name,
            fix = action_name,
            changes = edit.change_count(),
            "code fix applied"
        );
        Some(edit)
    }
}
