//! Plugin activation and the language-service proxy.

use crate::adapters::HostLogSink;
use crate::ports::{HostLogger, LanguageService};
use crate::settings::PluginConfig;
use camino::Utf8Path;
use codefix_domain::{AnalysisService, FixMeta, LogSink, Program, Resolver, builtin_fix_metas};
use codefix_types::{
    ApplicableRefactorInfo, FormatCodeSettings, PositionOrRange, RefactorEditInfo,
    UserPreferences,
};
use serde_json::Value;
use tracing::{info, warn};

/// Identity of the host that activated the plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostInfo {
    pub name: String,
    pub version: Option<String>,
}

/// What the host hands over on activation.
#[derive(Debug, Clone, Default)]
pub struct HostModules {
    pub host: HostInfo,
}

/// Activation entry point. The returned factory wraps one host session per `create` call.
pub fn create_plugin(modules: HostModules) -> PluginFactory {
    info!(
        host = %modules.host.name,
        version = modules.host.version.as_deref().unwrap_or("unknown"),
        "codefix plugin activated"
    );
    PluginFactory { modules }
}

/// Per-session inputs: the host language service, its logger and the plugin's config block.
pub struct PluginCreateInfo<S, L> {
    pub language_service: S,
    pub logger: L,
    pub config: Value,
}

#[derive(Debug, Clone)]
pub struct PluginFactory {
    modules: HostModules,
}

impl PluginFactory {
    pub fn host(&self) -> &HostInfo {
        &self.modules.host
    }

    /// Wrap `info.language_service` in a proxy that also offers code fixes.
    ///
    /// An invalid config block is logged and replaced by the defaults.
    pub fn create<S, L>(&self, info: PluginCreateInfo<S, L>) -> CodeFixLanguageService<S, L>
    where
        S: LanguageService,
        L: HostLogger,
    {
        let PluginCreateInfo {
            language_service,
            logger,
            config,
        } = info;

        let config = match PluginConfig::from_value(&config) {
            Ok(config) => config,
            Err(err) => {
                let fallback = PluginConfig::default();
                warn!(error = %err, "falling back to default plugin config");
                logger.info(&format!("{} {err}; using defaults", fallback.name));
                fallback
            }
        };

        let resolver = Resolver::new().with_policy(config.policy());
        let known: Vec<&str> = builtin_fix_metas().iter().map(|meta| meta.name).collect();
        for pattern in resolver.policy().unmatched_patterns(&known) {
            warn!(pattern, "policy pattern matches no registered fix");
            logger.info(&format!(
                "{} policy pattern matches no registered fix: {pattern}",
                config.name
            ));
        }

        let proxy = CodeFixLanguageService {
            inner: language_service,
            logger,
            resolver,
            config,
        };
        proxy.log("created");
        proxy
    }
}

/// Host language service with code fixes layered on top of its refactors.
///
/// Owns the wrapped service; everything codefix does not handle falls through to it.
pub struct CodeFixLanguageService<S, L> {
    inner: S,
    logger: L,
    resolver: Resolver,
    config: PluginConfig,
}

impl<S, L> CodeFixLanguageService<S, L>
where
    S: LanguageService,
    L: HostLogger,
{
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Metadata for the fixes this session may offer.
    pub fn available_fixes(&self) -> Vec<FixMeta> {
        self.resolver.enabled_fixes().map(|f| f.meta()).collect()
    }

    fn sink(&self) -> HostLogSink<'_, L> {
        HostLogSink::new(&self.logger, &self.config.name)
    }

    fn log(&self, message: &str) {
        self.sink().log(message);
    }
}

impl<S, L> AnalysisService for CodeFixLanguageService<S, L>
where
    S: LanguageService,
    L: HostLogger,
{
    fn program(&self) -> Option<&dyn Program> {
        self.inner.program()
    }
}

impl<S, L> LanguageService for CodeFixLanguageService<S, L>
where
    S: LanguageService,
    L: HostLogger,
{
    fn applicable_refactors(
        &self,
        file_name: &Utf8Path,
        position_or_range: PositionOrRange,
        preferences: &UserPreferences,
    ) -> Vec<ApplicableRefactorInfo> {
        let mut refactors =
            self.inner
                .applicable_refactors(file_name, position_or_range, preferences);

        let sink = self.sink();
        let actions = self
            .resolver
            .discover(&self.inner, file_name, position_or_range, &sink);
        if !actions.is_empty() {
            refactors.push(ApplicableRefactorInfo {
                name: self.config.refactor_name(),
                description: self.config.refactor_description.clone(),
                inlineable: None,
                actions,
            });
        }
        refactors
    }

    fn edits_for_refactor(
        &self,
        file_name: &Utf8Path,
        format_options: &FormatCodeSettings,
        position_or_range: PositionOrRange,
        refactor_name: &str,
        action_name: &str,
        preferences: &UserPreferences,
    ) -> Option<RefactorEditInfo> {
        let sink = self.sink();
        if let Some(edits) =
            self.resolver
                .apply(&self.inner, file_name, position_or_range, action_name, &sink)
        {
            return Some(edits);
        }
        self.inner.edits_for_refactor(
            file_name,
            format_options,
            position_or_range,
            refactor_name,
            action_name,
            preferences,
        )
    }
}
