//! Flow Catalogue
//!
//! Each flow is a static bundle of prompt template, output schema and
//! preferred provider. The catalogue is built once on first use and shared
//! for the life of the process.

mod collaboration_ideas;
mod content_ideas;
mod profile_analysis;
mod video_review;
mod video_script;

use std::sync::OnceLock;

use crate::domain::entities::{OutputSchema, PromptTemplate};
use crate::domain::value_objects::Provider;

/// A named prompt + schema bundle
#[derive(Debug, Clone)]
pub struct Flow {
    pub name: &'static str,
    pub description: &'static str,
    /// Provider tried first; callers may fall back to any configured one
    pub provider: Provider,
    /// The request must carry a media attachment
    pub requires_attachment: bool,
    pub template: PromptTemplate,
    pub schema: OutputSchema,
}

static CATALOGUE: OnceLock<Vec<Flow>> = OnceLock::new();

/// All flows, in a stable order
pub fn catalogue() -> &'static [Flow] {
    CATALOGUE.get_or_init(|| {
        vec![
            content_ideas::flow(),
            video_script::flow(),
            profile_analysis::flow(),
            collaboration_ideas::flow(),
            video_review::flow(),
        ]
    })
}

/// Look up a flow by name
pub fn find(name: &str) -> Option<&'static Flow> {
    catalogue().iter().find(|f| f.name == name)
}

/// Parse a built-in template
///
/// Built-in templates are compile-time constants covered by tests, so a
/// parse failure here is a programming error.
fn builtin(source: &'static str) -> PromptTemplate {
    PromptTemplate::new(source).expect("built-in flow template must parse")
}
