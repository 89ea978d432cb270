//! Plugin configuration, read from the host's per-plugin JSON block.

use codefix_domain::ResolverPolicy;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_PLUGIN_NAME: &str = "codefix-plugin";
pub const DEFAULT_REFACTOR_DESCRIPTION: &str = "Code Fixes";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid plugin config: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("plugin name must not be empty")]
    EmptyName,
}

/// Top-level plugin configuration.
///
/// Unrecognized keys are ignored so hosts can keep their own fields in the block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginConfig {
    /// Log prefix and refactor group prefix.
    pub name: String,

    /// Allowlist patterns over fix names. If non-empty, only matching fixes are offered.
    pub allow: Vec<String>,

    /// Denylist patterns over fix names.
    pub deny: Vec<String>,

    /// Label of the refactor group the host shows.
    pub refactor_description: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLUGIN_NAME.to_string(),
            allow: Vec::new(),
            deny: Vec::new(),
            refactor_description: DEFAULT_REFACTOR_DESCRIPTION.to_string(),
        }
    }
}

impl PluginConfig {
    /// Parse the host's config block. `null` means defaults.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        let config = Self::deserialize(value)?;
        if config.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        Ok(config)
    }

    /// Name of the refactor group codefix contributes.
    pub fn refactor_name(&self) -> String {
        format!("{}-refactor-info", self.name)
    }

    pub fn policy(&self) -> ResolverPolicy {
        ResolverPolicy {
            allow: self.allow.clone(),
            deny: self.deny.clone(),
        }
    }
}
