//! Trendify Data Models
//!
//! - Flow: catalogue listing and invocation
//! - Generation: saved results per user
//! - Webhook: billing webhook acknowledgements
//! - Error: uniform error body

mod error;
mod flow;
mod generation;
mod webhook;

pub use error::*;
pub use flow::*;
pub use generation::*;
pub use webhook::*;
