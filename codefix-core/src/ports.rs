//! Port traits abstracting the host away from the plugin.

use camino::Utf8Path;
use codefix_domain::AnalysisService;
use codefix_types::{
    ApplicableRefactorInfo, FormatCodeSettings, PositionOrRange, RefactorEditInfo,
    UserPreferences,
};

/// The host's language service: analysis access plus its own refactor machinery.
pub trait LanguageService: AnalysisService {
    fn applicable_refactors(
        &self,
        file_name: &Utf8Path,
        position_or_range: PositionOrRange,
        preferences: &UserPreferences,
    ) -> Vec<ApplicableRefactorInfo>;

    fn edits_for_refactor(
        &self,
        file_name: &Utf8Path,
        format_options: &FormatCodeSettings,
        position_or_range: PositionOrRange,
        refactor_name: &str,
        action_name: &str,
        preferences: &UserPreferences,
    ) -> Option<RefactorEditInfo>;
}

/// Where the host wants plugin log lines to go.
pub trait HostLogger {
    fn info(&self, message: &str);
}

impl<T: HostLogger + ?Sized> HostLogger for &T {
    fn info(&self, message: &str) {
        (**self).info(message)
    }
}
