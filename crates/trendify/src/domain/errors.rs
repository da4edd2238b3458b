//! Domain Errors
//!
//! Error types for domain operations and the prompt invocation pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::ErrorKind;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(String),
}

/// A single schema violation, addressed by a path such as `ideas[2].title`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Failure of a single prompt invocation
///
/// Every variant maps to a stable [`ErrorKind`]; nothing here is retried
/// by the pipeline.
#[derive(Debug, Clone, Error)]
pub enum InvocationError {
    #[error("Template error: {0}")]
    Template(String),

    #[error("Network error: {message}")]
    Network { status: Option<u16>, message: String },

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Schema validation failed: {}", summarize(.0))]
    SchemaValidation(Vec<Violation>),
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl InvocationError {
    /// Transport-level failure with no HTTP status
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            status: None,
            message: message.into(),
        }
    }

    /// Non-2xx response from the provider
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::Network {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            InvocationError::Template(_) => ErrorKind::TemplateError,
            InvocationError::Network { .. } => ErrorKind::NetworkError,
            InvocationError::Extraction(_) => ErrorKind::ExtractionError,
            InvocationError::SchemaValidation(_) => ErrorKind::SchemaValidationError,
        }
    }

    /// Violated fields, empty for every kind except schema validation
    pub fn violations(&self) -> &[Violation] {
        match self {
            InvocationError::SchemaValidation(violations) => violations,
            _ => &[],
        }
    }
}
