//! # Catalog Module
//!
//! Projects and the documents they own. The catalog is docbridge's view of
//! the host application's data model: a project names its members, a
//! document names its backing file and carries the save counter.
//!
//! ## Invariants
//! - Project membership is the only authorization rule in the system.
//! - A document's `version` increases by exactly one per committed save.
//! - Repositories are injected; nothing in the crate hardcodes fixtures.

pub mod document;
pub mod errors;
pub mod project;
pub mod seed;

pub use document::{Document, DocumentRepository, InMemoryDocumentRepository};
pub use errors::{CatalogError, CatalogResult};
pub use project::{InMemoryProjectRepository, Project, ProjectRepository};
pub use seed::{SeedError, SeedFile, SeedResult};
