use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One offered action inside a refactor group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactorActionInfo {
    pub name: String,
    pub description: String,
}

/// A group of actions the host lists for a cursor/selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicableRefactorInfo {
    pub name: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inlineable: Option<bool>,

    #[serde(default)]
    pub actions: Vec<RefactorActionInfo>,
}

/// Host formatting settings forwarded with edit requests. codefix does not
/// reformat, so these are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatCodeSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_line_character: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convert_tabs_to_spaces: Option<bool>,
}

/// Opaque host preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(flatten)]
    pub values: BTreeMap<String, serde_json::Value>,
}
