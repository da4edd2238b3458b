//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - PromptTemplate: parsed prompt with placeholders and defaults
//! - OutputSchema: declarative description of the expected model output
//! - Invocation: input map, model configuration, media attachments
//! - GenerationRecord: persisted result of a successful invocation
//! - PaymentEvent: verified billing webhook

mod generation;
mod invocation;
mod payment;
mod prompt;
mod schema;

pub use generation::*;
pub use invocation::*;
pub use payment::*;
pub use prompt::*;
pub use schema::*;
