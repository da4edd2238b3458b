//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod document_repository;

pub use document_repository::*;
