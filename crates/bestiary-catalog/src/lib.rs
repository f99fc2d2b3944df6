//! # bestiary-catalog
//!
//! Catalog service facade for the bestiary.
//!
//! [`CatalogService`] is the only surface transport layers call: it owns
//! validation, transaction boundaries, and the composition of the category
//! normalizer, the link reconciler, and the external provider.

pub mod service;

// Re-export core types
pub use bestiary_core::*;

pub use service::CatalogService;
