//! ErrorKind - Stable tags for invocation failures

use serde::{Deserialize, Serialize};

/// Stable, machine-readable tag carried by every invocation failure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A placeholder had no input value and no default
    TemplateError,
    /// Transport failure, timeout or non-2xx status from the provider
    NetworkError,
    /// No parseable JSON in the model's response text
    ExtractionError,
    /// Parsed JSON does not conform to the output schema
    SchemaValidationError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::TemplateError => "TemplateError",
            ErrorKind::NetworkError => "NetworkError",
            ErrorKind::ExtractionError => "ExtractionError",
            ErrorKind::SchemaValidationError => "SchemaValidationError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
