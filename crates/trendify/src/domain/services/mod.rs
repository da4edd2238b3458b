//! Domain Services
//!
//! The prompt invocation pipeline: render, dispatch, extract, validate,
//! normalize.

mod extraction;
mod invoker;
mod normalization;
pub(crate) mod template;
mod validation;

pub use extraction::*;
pub use invoker::*;
pub use normalization::*;
pub use validation::*;
