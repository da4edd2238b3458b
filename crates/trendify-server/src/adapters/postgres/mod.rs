//! PostgreSQL Repository Implementations

mod document_repository;

pub use document_repository::PgDocumentRepository;
