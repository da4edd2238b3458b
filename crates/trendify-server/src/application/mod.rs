//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and AI providers.

mod billing_service;
mod generation_service;

pub use billing_service::{BillingError, BillingService};
pub use generation_service::{GenerationError, GenerationOutcome, GenerationService};
