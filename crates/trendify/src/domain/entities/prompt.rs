//! PromptTemplate - Parsed prompt with named placeholders
//!
//! Pure domain entity without infrastructure dependencies.
//!
//! Syntax:
//! - `{{field}}` or `{{profile.handle}}` substitutes an input value
//! - `{{#each list}}...{{/each}}` repeats the body once per list element;
//!   inside it `{{this}}`, `{{this.key}}`, `{{key}}` and `{{@index}}` refer
//!   to the current element

use crate::domain::entities::InvocationInput;
use crate::domain::errors::InvocationError;
use crate::domain::services::template::{self, Node};

/// A prompt template, parsed once and immutable afterwards
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    nodes: Vec<Node>,
    defaults: InvocationInput,
}

impl PromptTemplate {
    /// Parse a template; unbalanced blocks and unterminated tags are rejected
    pub fn new(source: impl Into<String>) -> Result<Self, InvocationError> {
        let source: String = source.into();
        let nodes = template::parse(&source)?;
        Ok(Self {
            nodes,
            defaults: InvocationInput::new(),
        })
    }

    /// Declare a value used when the input has no such top-level field
    pub fn with_default(
        mut self,
        field: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.defaults.insert(field.into(), value.into());
        self
    }

    /// Top-level input fields referenced by the template, in first-use order
    pub fn placeholders(&self) -> Vec<String> {
        let mut names = Vec::new();
        template::collect_roots(&self.nodes, &mut names);
        names
    }

    /// Render against `input`; fails on the first unresolved placeholder
    pub fn render(&self, input: &InvocationInput) -> Result<String, InvocationError> {
        template::render(&self.nodes, input, &self.defaults)
    }
}
