//! Embeddable plugin surface for codefix.
//!
//! Wraps a host language service so that refactor discovery and refactor
//! application also offer the registered code fixes, and falls through to the
//! host's own behavior whenever no fix applies.
//!
//! # Port traits
//!
//! The host is abstracted behind port traits in [`ports`]:
//! - [`LanguageService`](ports::LanguageService): analysis plus the host's default refactors
//! - [`HostLogger`](ports::HostLogger): the host's log destination
//!
//! The [`adapters`] module bridges the host logger to the domain's log sink.
//!
//! # Entry points
//!
//! - [`create_plugin`](plugin::create_plugin): activation, returns a factory
//! - [`PluginFactory::create`](plugin::PluginFactory::create): wrap one host session

pub mod adapters;
pub mod plugin;
pub mod ports;
pub mod settings;

pub use plugin::{
    CodeFixLanguageService, HostInfo, HostModules, PluginCreateInfo, PluginFactory, create_plugin,
};
pub use ports::{HostLogger, LanguageService};
pub use settings::{ConfigError, PluginConfig};

// Re-export the domain ports so hosts don't need codefix-domain directly.
pub use codefix_domain::{AnalysisService, LogSink, Program, Symbol};
