//! Trendify Domain Library
//!
//! Core types and the prompt invocation pipeline behind Trendify's
//! AI features (content ideas, scripts, profile and video analysis).
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): entities, value objects, errors and the
//!   pure services that make up the pipeline
//!   - `services/template`: `{{placeholder}}` / `{{#each}}` rendering
//!   - `services/extraction`: recovering JSON from free-form model output
//!   - `services/validation`: checking JSON against an [`OutputSchema`]
//!   - `services/normalization`: collapsing accepted union shapes
//!   - `services/invoker`: the [`PromptInvoker`] tying it all together
//!
//! - **Ports** (`ports/`): traits implemented by infrastructure crates
//!   - `services/`: generative AI providers
//!   - `repositories/`: the opaque document store
//!
//! - **Flows** (`flows/`): the static catalogue of prompt + schema bundles
//!
//! # Usage
//!
//! ```rust,ignore
//! use trendify::{flows, PromptInvoker};
//!
//! let flow = flows::find("content_ideas").unwrap();
//! let ideas = invoker.invoke(&flow.template, &flow.schema, &input).await?;
//! ```

pub mod domain;
pub mod flows;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    extract_json, normalize, validate, DomainError, ErrorKind, FieldSchema, GenerationRecord,
    InvocationError, InvocationInput, MediaAttachment, ModelConfig, Normalization, OutputSchema,
    PaymentEvent, PaymentGateway, PromptInvoker, PromptTemplate, Provider, SchemaType, Violation,
};
pub use flows::Flow;
pub use ports::{DocumentRepository, GenerationRequest, GenerativeProvider, StoredDocument};
