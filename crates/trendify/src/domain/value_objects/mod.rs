//! Value Objects
//!
//! Immutable value types shared across the domain.

mod error_kind;
mod payment_gateway;
mod provider;

pub use error_kind::*;
pub use payment_gateway::*;
pub use provider::*;
