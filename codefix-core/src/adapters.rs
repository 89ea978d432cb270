//! Bridges from host ports to domain ports.

use crate::ports::HostLogger;
use codefix_domain::LogSink;

/// Forwards domain log lines to the host logger, prefixed with the plugin name,
/// and mirrors them as `tracing` events.
pub struct HostLogSink<'a, L: HostLogger> {
    logger: &'a L,
    plugin_name: &'a str,
}

impl<'a, L: HostLogger> HostLogSink<'a, L> {
    pub fn new(logger: &'a L, plugin_name: &'a str) -> Self {
        Self {
            logger,
            plugin_name,
        }
    }
}

impl<L: HostLogger> LogSink for HostLogSink<'_, L> {
    fn log(&self, message: &str) {
        tracing::debug!(target: "codefix", plugin = self.plugin_name, "{message}");
        self.logger.info(&format!("{} {}", self.plugin_name, message));
    }
}
