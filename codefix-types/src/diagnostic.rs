use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCategory {
    Warning,
    #[default]
    Error,
    Suggestion,
    Message,
}

/// A fact the analysis service reports about a location in a file.
///
/// Diagnostics are a snapshot; codefix never owns or mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: u32,

    /// Offset of the first significant character the diagnostic points at.
    /// Global diagnostics carry no location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    pub fn new(code: u32, start: u32) -> Self {
        Self {
            code,
            start: Some(start),
            length: None,
            message: String::new(),
            category: DiagnosticCategory::Error,
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// `code|start` as used in rejection log lines; `-` for a missing start.
    pub fn log_key(&self) -> String {
        match self.start {
            Some(start) => format!("{}|{}", self.code, start),
            None => format!("{}|-", self.code),
        }
    }
}
